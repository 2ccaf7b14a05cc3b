use std::collections::HashMap;
use std::rc::Rc;

use monkey_core::ast;
use monkey_core::ast::{Expression, InfixOperator, PrefixOperator};

use crate::environment::Environment;
use crate::object::{object_to_key, EvaluationError, Function, Object, QuickReturn};

/// Evaluates a whole program in `environment`. An early `return` is
/// unwrapped here; an error becomes the result. An empty program is `null`.
pub fn eval_program(
    program: &ast::Program,
    environment: &mut Environment,
) -> Result<Rc<Object>, EvaluationError> {
    let mut result = Object::null();
    for statement in &program.statements {
        match eval_statement(statement, environment) {
            Ok(value) => result = value,
            Err(QuickReturn::Return(value)) => return Ok(value),
            Err(QuickReturn::Error(error)) => return Err(error),
        }
    }
    Ok(result)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(statement.name.name.clone(), value.clone());
    Ok(value)
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    Err(QuickReturn::Return(value))
}

/// Blocks run in a fresh child frame, so `let` inside a block cannot leak
/// out. Both sentinels pass through untouched; an empty block is `null`.
fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &Environment,
) -> Result<Rc<Object>, QuickReturn> {
    let mut scope = Environment::new_enclosed(environment.clone());
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, &mut scope)?;
    }
    Ok(result)
}

fn eval_expression(
    expression: &Expression,
    environment: &mut Environment,
) -> Result<Rc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.clone())),
        Expression::Identifier(identifier) => {
            environment.get(&identifier.name).ok_or_else(|| {
                QuickReturn::Error(EvaluationError::IdentifierNotFound(identifier.name.clone()))
            })
        }
        Expression::ArrayLiteral(elements) => {
            Ok(Object::array(eval_expressions(elements, environment)?))
        }
        Expression::HashLiteral(literal) => {
            let mut pairs = HashMap::new();
            for (key_expression, value_expression) in &literal.pairs {
                let key = eval_expression(key_expression, environment)?;
                let value = eval_expression(value_expression, environment)?;
                // Later duplicates overwrite earlier pairs.
                pairs.insert(object_to_key(&key)?, (key, value));
            }
            Ok(Object::hash(pairs))
        }
        Expression::Prefix(operator, right) => {
            let right = eval_expression(right, environment)?;
            eval_prefix_operation(*operator, right)
        }
        Expression::Infix(operator, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            eval_infix_operation(*operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if is_truthy(&condition) {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment.clone(),
        )),
        Expression::MacroLiteral { .. } => {
            Err(QuickReturn::Error(EvaluationError::MacroNotExpanded))
        }
        Expression::Call {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, environment)?;
            let arguments = eval_expressions(arguments, environment)?;
            match callee.as_ref() {
                Object::Function(function) => apply_function(function, arguments),
                Object::Builtin(builtin) => {
                    (builtin.func)(arguments).map_err(QuickReturn::Error)
                }
                other => Err(QuickReturn::Error(EvaluationError::CallNotSupported(
                    other.kind(),
                ))),
            }
        }
        Expression::Index { left, index } => {
            let left = eval_expression(left, environment)?;
            let index = eval_expression(index, environment)?;
            eval_index_expression(left, index)
        }
    }
}

/// `false` and `null` are falsy; everything else, `0` included, is truthy.
fn is_truthy(object: &Rc<Object>) -> bool {
    !matches!(object.as_ref(), Object::Boolean(false) | Object::Null)
}

fn eval_expressions(
    expressions: &[Expression],
    environment: &mut Environment,
) -> Result<Vec<Rc<Object>>, QuickReturn> {
    let mut result = Vec::with_capacity(expressions.len());
    for expression in expressions {
        result.push(eval_expression(expression, environment)?);
    }
    Ok(result)
}

/// Runs the body in a fresh frame enclosing the closure's captured
/// environment, never the caller's. The `Return` sentinel is unwrapped
/// exactly once here.
fn apply_function(
    function: &Function,
    arguments: Vec<Rc<Object>>,
) -> Result<Rc<Object>, QuickReturn> {
    if function.parameters.len() != arguments.len() {
        return Err(EvaluationError::WrongArgumentCount {
            name: function.to_string(),
            expected: function.parameters.len(),
            actual: arguments.len(),
        }
        .into());
    }

    let mut scope = Environment::new_enclosed(function.env.clone());
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        scope.set(parameter.name.clone(), argument);
    }

    match eval_block_statement(&function.body, &scope) {
        Err(QuickReturn::Return(value)) => Ok(value),
        other => other,
    }
}

fn eval_prefix_operation(
    operator: PrefixOperator,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    match (operator, right.as_ref()) {
        (PrefixOperator::Bang, Object::Boolean(value)) => Ok(Object::boolean(!value)),
        (PrefixOperator::Bang, Object::Null) => Ok(Object::boolean(true)),
        (PrefixOperator::Bang, _) => Ok(Object::boolean(false)),
        (PrefixOperator::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        (PrefixOperator::Minus, other) => Err(EvaluationError::WrongPrefixOperand {
            operator: "-",
            operand: other.kind(),
        }
        .into()),
    }
}

fn eval_infix_operation(
    operator: InfixOperator,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    match (operator, left.as_ref(), right.as_ref()) {
        (InfixOperator::Plus, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::integer(left.wrapping_add(*right)))
        }
        (InfixOperator::Plus, Object::String(left), Object::String(right)) => {
            Ok(Object::string(format!("{}{}", left, right)))
        }
        (InfixOperator::Minus, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::integer(left.wrapping_sub(*right)))
        }
        (InfixOperator::Multiply, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::integer(left.wrapping_mul(*right)))
        }
        (InfixOperator::Divide, Object::Integer(left), Object::Integer(right)) => {
            if *right == 0 {
                Err(EvaluationError::DivisionByZero.into())
            } else {
                Ok(Object::integer(left.wrapping_div(*right)))
            }
        }
        (InfixOperator::LessThan, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::boolean(left < right))
        }
        (InfixOperator::GreaterThan, Object::Integer(left), Object::Integer(right)) => {
            Ok(Object::boolean(left > right))
        }
        // Equality compares structurally for every kind and never errors;
        // different kinds are simply unequal.
        (InfixOperator::Equal, left, right) => Ok(Object::boolean(left == right)),
        (InfixOperator::NotEqual, left, right) => Ok(Object::boolean(left != right)),
        (operator, left, right) => Err(EvaluationError::WrongInfixOperands {
            operator: operator.symbol(),
            left: left.kind(),
            right: right.kind(),
        }
        .into()),
    }
}

fn eval_index_expression(
    left: Rc<Object>,
    index: Rc<Object>,
) -> Result<Rc<Object>, QuickReturn> {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(elements), Object::Integer(index)) => Ok(usize::try_from(*index)
            .ok()
            .and_then(|index| elements.get(index))
            .cloned()
            .unwrap_or_else(Object::null)),
        (Object::Hash(pairs), _) => {
            let key = object_to_key(&index)?;
            Ok(pairs
                .get(&key)
                .map(|(_, value)| value.clone())
                .unwrap_or_else(Object::null))
        }
        (left, index) => Err(EvaluationError::WrongIndexOperands {
            left: left.kind(),
            index: index.kind(),
        }
        .into()),
    }
}
