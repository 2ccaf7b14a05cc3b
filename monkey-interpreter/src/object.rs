use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use monkey_core::ast;
use thiserror::Error;

use crate::environment::Environment;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
    Array(Vec<Rc<Object>>),
    /// Keyed by the canonical encoding; the original key object is kept next
    /// to the value so the hash can render and compare as written.
    Hash(HashMap<HashKey, (Rc<Object>, Rc<Object>)>),
    Function(Function),
    Builtin(Builtin),
    /// Reserved for a macro-expansion stage; evaluation never constructs it.
    Quote(ast::Expression),
    Null,
}

/// Kind tags as they appear in error messages.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ObjectKind {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    Quote,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectKind::Integer => "INTEGER",
            ObjectKind::Boolean => "BOOLEAN",
            ObjectKind::Null => "NULL",
            ObjectKind::String => "STRING",
            ObjectKind::Array => "ARRAY",
            ObjectKind::Hash => "HASH",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::Builtin => "BUILTIN",
            ObjectKind::Quote => "QUOTE",
        };
        f.write_str(name)
    }
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL.with(|x| x.clone())
    }

    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }

    pub fn integer(value: i64) -> Rc<Object> {
        Rc::new(Object::Integer(value))
    }

    pub fn string(value: impl Into<Rc<str>>) -> Rc<Object> {
        Rc::new(Object::String(value.into()))
    }

    pub fn array(elements: Vec<Rc<Object>>) -> Rc<Object> {
        Rc::new(Object::Array(elements))
    }

    pub fn hash(pairs: HashMap<HashKey, (Rc<Object>, Rc<Object>)>) -> Rc<Object> {
        Rc::new(Object::Hash(pairs))
    }

    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: ast::BlockStatement,
        env: Environment,
    ) -> Rc<Object> {
        Rc::new(Object::Function(Function {
            parameters,
            body,
            env,
        }))
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::String(_) => ObjectKind::String,
            Object::Array(_) => ObjectKind::Array,
            Object::Hash(_) => ObjectKind::Hash,
            Object::Function(_) => ObjectKind::Function,
            Object::Builtin(_) => ObjectKind::Builtin,
            Object::Quote(_) => ObjectKind::Quote,
            Object::Null => ObjectKind::Null,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => f.write_str(value),
            Object::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Object::Hash(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.values().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Object::Function(function) => write!(f, "{}", function),
            Object::Builtin(_) => f.write_str("builtin function"),
            Object::Quote(node) => write!(f, "QUOTE({})", node),
            Object::Null => f.write_str("null"),
        }
    }
}

/// The only kinds that may serve as hash keys; hashing works on this
/// canonical encoding so `1`, `true` and `"1"` cannot collide.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(Rc<str>),
}

pub fn object_to_key(object: &Rc<Object>) -> Result<HashKey, EvaluationError> {
    match object.as_ref() {
        Object::Integer(value) => Ok(HashKey::Integer(*value)),
        Object::Boolean(value) => Ok(HashKey::Boolean(*value)),
        Object::String(value) => Ok(HashKey::String(value.clone())),
        other => Err(EvaluationError::WrongIndexOperands {
            left: ObjectKind::Hash,
            index: other.kind(),
        }),
    }
}

#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<ast::Identifier>,
    pub body: ast::BlockStatement,
    pub env: Environment,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && self.env.ptr_eq(&other.env)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("ptr", &(self as *const Function as usize))
            .finish()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.name.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "fn({}) {{{}}}", parameters, self.body)
    }
}

#[derive(Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub func: fn(Vec<Rc<Object>>) -> Result<Rc<Object>, EvaluationError>,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.func as usize == other.func as usize
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

/// Carries the two sentinels that unwind through nested blocks: an early
/// `return` and a runtime error. Block statements pass both through with
/// `?`; the call boundary unwraps `Return` exactly once.
#[derive(Debug, PartialEq)]
pub enum QuickReturn {
    Return(Rc<Object>),
    Error(EvaluationError),
}

impl From<EvaluationError> for QuickReturn {
    fn from(error: EvaluationError) -> Self {
        QuickReturn::Error(error)
    }
}

#[derive(Debug, PartialEq, Error)]
pub enum EvaluationError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(Rc<str>),
    #[error("wrong number of arguments for {name}: expected {expected}, got {actual}")]
    WrongArgumentCount {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("wrong argument type for {name}: expected {expected}, got {actual}")]
    WrongArgumentType {
        name: &'static str,
        expected: ObjectKind,
        actual: ObjectKind,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("wrong operand type for {operator}: {operator}{operand}")]
    WrongPrefixOperand {
        operator: &'static str,
        operand: ObjectKind,
    },
    #[error("wrong operand types for {operator}: {left} {operator} {right}")]
    WrongInfixOperands {
        operator: &'static str,
        left: ObjectKind,
        right: ObjectKind,
    },
    #[error("wrong operand type for call: {0}")]
    CallNotSupported(ObjectKind),
    #[error("wrong index types for []: {left}[{index}]")]
    WrongIndexOperands { left: ObjectKind, index: ObjectKind },
    #[error("macro literals cannot be evaluated")]
    MacroNotExpanded,
}
