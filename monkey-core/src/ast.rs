use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct LetStatement {
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnStatement {
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
    StringLiteral(Rc<str>),
    ArrayLiteral(Vec<Expression>),
    HashLiteral(HashLiteral),
    Prefix(PrefixOperator, Box<Expression>),
    Infix(InfixOperator, Box<Expression>, Box<Expression>),
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    MacroLiteral {
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

/// Key/value pairs in parse order. Keys are plain expressions; nothing is
/// deduplicated until the literal is evaluated.
#[derive(Debug, Clone)]
pub struct HashLiteral {
    pub pairs: Vec<(Expression, Expression)>,
}

// Pair order is not significant when comparing hash literals.
impl PartialEq for HashLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self.pairs.iter().all(|pair| other.pairs.contains(pair))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

impl PrefixOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            PrefixOperator::Bang => "!",
            PrefixOperator::Minus => "-",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
}

impl InfixOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::LessThan => "<",
            InfixOperator::GreaterThan => ">",
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

fn write_statements(
    f: &mut std::fmt::Formatter<'_>,
    statements: &[Statement],
) -> std::fmt::Result {
    for (i, statement) in statements.iter().enumerate() {
        if i > 0 {
            f.write_str("\n")?;
        }
        write!(f, "{}", statement)?;
    }
    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_statements(f, &self.statements)
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_statements(f, &self.statements)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Let(statement) => {
                write!(f, "let {} = {};", statement.name, statement.value)
            }
            Statement::Return(statement) => write!(f, "return {};", statement.value),
            Statement::Expression(expression) => write!(f, "{}", expression),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

fn join_parameters(parameters: &[Identifier]) -> String {
    parameters
        .iter()
        .map(|parameter| parameter.name.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(ident) => write!(f, "{}", ident),
            IntegerLiteral(value) => write!(f, "{}", value),
            BooleanLiteral(value) => write!(f, "{}", value),
            StringLiteral(value) => write!(f, "\"{}\"", value),
            ArrayLiteral(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            HashLiteral(literal) => {
                f.write_str("{")?;
                for (i, (key, value)) in literal.pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Prefix(operator, right) => write!(f, "({}{})", operator.symbol(), right),
            Infix(operator, left, right) => {
                write!(f, "({} {} {})", left, operator.symbol(), right)
            }
            If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({}) {{{}}}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{{}}}", alternative)?;
                }
                Ok(())
            }
            FunctionLiteral { parameters, body } => {
                write!(f, "fn({}) {{{}}}", join_parameters(parameters), body)
            }
            MacroLiteral { parameters, body } => {
                write!(f, "macro({}) {{{}}}", join_parameters(parameters), body)
            }
            Call {
                function,
                arguments,
            } => {
                write!(f, "{}(", function)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                f.write_str(")")
            }
            Index { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier { name: name.into() }
    }

    #[test]
    fn let_statement_renders_with_semicolon() {
        let statement = Statement::Let(LetStatement {
            name: ident("myVar"),
            value: Expression::Identifier(ident("anotherVar")),
        });

        assert_eq!(statement.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn program_statements_join_with_newlines() {
        let program = Program {
            statements: vec![
                Statement::Return(ReturnStatement {
                    value: Expression::IntegerLiteral(5),
                }),
                Statement::Expression(Expression::BooleanLiteral(true)),
            ],
        };

        assert_eq!(program.to_string(), "return 5;\ntrue");
    }

    #[test]
    fn if_expression_parenthesises_its_condition() {
        let expression = Expression::If {
            condition: Box::new(Expression::Identifier(ident("x"))),
            consequence: BlockStatement {
                statements: vec![Statement::Expression(Expression::IntegerLiteral(1))],
            },
            alternative: Some(BlockStatement {
                statements: vec![Statement::Expression(Expression::IntegerLiteral(2))],
            }),
        };

        assert_eq!(expression.to_string(), "if (x) {1} else {2}");
    }

    #[test]
    fn function_and_macro_literals_share_a_shape() {
        let body = BlockStatement {
            statements: vec![Statement::Expression(Expression::Infix(
                InfixOperator::Plus,
                Box::new(Expression::Identifier(ident("x"))),
                Box::new(Expression::Identifier(ident("y"))),
            ))],
        };

        let function = Expression::FunctionLiteral {
            parameters: vec![ident("x"), ident("y")],
            body: body.clone(),
        };
        let makro = Expression::MacroLiteral {
            parameters: vec![ident("x"), ident("y")],
            body,
        };

        assert_eq!(function.to_string(), "fn(x, y) {(x + y)}");
        assert_eq!(makro.to_string(), "macro(x, y) {(x + y)}");
        assert_ne!(function, makro);
    }

    #[test]
    fn hash_literal_equality_ignores_pair_order() {
        let one = Expression::HashLiteral(HashLiteral {
            pairs: vec![
                (
                    Expression::StringLiteral("a".into()),
                    Expression::IntegerLiteral(1),
                ),
                (
                    Expression::StringLiteral("b".into()),
                    Expression::IntegerLiteral(2),
                ),
            ],
        });
        let other = Expression::HashLiteral(HashLiteral {
            pairs: vec![
                (
                    Expression::StringLiteral("b".into()),
                    Expression::IntegerLiteral(2),
                ),
                (
                    Expression::StringLiteral("a".into()),
                    Expression::IntegerLiteral(1),
                ),
            ],
        });
        let different = Expression::HashLiteral(HashLiteral {
            pairs: vec![(
                Expression::StringLiteral("a".into()),
                Expression::IntegerLiteral(1),
            )],
        });

        assert_eq!(one, other);
        assert_ne!(one, different);
    }

    #[test]
    fn array_literals_compare_in_order() {
        let one = Expression::ArrayLiteral(vec![
            Expression::IntegerLiteral(1),
            Expression::IntegerLiteral(2),
        ]);
        let reversed = Expression::ArrayLiteral(vec![
            Expression::IntegerLiteral(2),
            Expression::IntegerLiteral(1),
        ]);

        assert_ne!(one, reversed);
    }

    #[test]
    fn string_literals_render_quoted() {
        let expression = Expression::StringLiteral("hello world".into());
        assert_eq!(expression.to_string(), "\"hello world\"");
    }
}
