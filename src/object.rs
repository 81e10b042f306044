//! Objects produced when evaluating the Monkey programming language.

use crate::ast;

use std::cell::RefCell;
use std::collections::HashMap;
use std::error;
use std::fmt;
use std::rc::Rc;
use std::result;

/// Objects produced when evaluating Monkey source code, along with their
/// associated data if applicable.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Null,
    Integer(i64),
    Boolean(bool),
    String(String),
    ReturnValue(Box<Object>),
    Function(Function),
    Builtin(Builtin),
}

impl Object {
    /// Produces the type name of this object as used in runtime error
    /// messages, such as `type mismatch: INTEGER + BOOLEAN`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "NULL",
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Null => write!(f, "null"),
            Object::Integer(i) => i.fmt(f),
            Object::Boolean(b) => b.fmt(f),
            Object::String(s) => s.fmt(f),
            Object::ReturnValue(r) => write!(f, "return({})", r),
            Object::Function(func) => func.fmt(f),
            Object::Builtin(b) => b.fmt(f),
        }
    }
}

/// An execution environment used when evaluating Monkey source code: a
/// mapping from identifier names to objects, plus an optional link to the
/// enclosing environment.
///
/// Environments are shared behind `Rc<RefCell<...>>` rather than cloned, so
/// that a closure observes later bindings made in the scope it captured.
#[derive(Debug)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a new `Environment` with no enclosing scope.
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// Creates an `Environment` enclosed by `outer`, for use within a
    /// function call. The outer environment is shared, not cloned.
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        let mut env = Self::new();
        env.outer = Some(outer);
        env
    }

    /// Retrieves the object associated with an identifier name, walking the
    /// chain of enclosing environments, or returns `None` if no object is
    /// associated with `name` anywhere in the chain.
    pub fn get(&self, name: &str) -> Option<Object> {
        match (self.store.get(name), &self.outer) {
            // We found a binding in this environment; no need to consult the
            // outer environment.
            (Some(obj), _) => Some(obj.clone()),
            // We did not find a binding; try the outer environment.
            (None, Some(outer)) => outer.borrow().get(name),
            // We found no binding and there is no outer environment.
            (None, _) => None,
        }
    }

    /// Binds an object in this environment with the identifier `name`.
    /// Writes always target the innermost frame.
    pub fn set(&mut self, name: String, obj: &Object) -> Object {
        self.store.insert(name, obj.clone());
        obj.clone()
    }
}

/// The object representation of a Monkey function: its parameters, body,
/// and the environment captured at the point of the literal's evaluation.
#[derive(Clone, Debug)]
pub struct Function {
    pub parameters: Vec<ast::Identifier>,
    pub body: ast::BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        // Captured environments compare by identity; comparing contents
        // diverges on recursive closures.
        self.parameters == other.parameters
            && self.body == other.body
            && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();

        write!(f, "fn({}) {{\n{}\n}}", params.join(", "), self.body)
    }
}

/// A function built into the interpreter and addressed by name, rather than
/// bound in an environment.
#[derive(Clone, Debug, PartialEq)]
pub enum Builtin {
    Len,
}

impl Builtin {
    /// Resolves `name` to a built-in function, if one exists by that name.
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "len" => Some(Builtin::Len),
            _ => None,
        }
    }

    /// The name a built-in is addressed by in source code.
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Len => "len",
        }
    }

    /// Invokes this built-in on `args`, producing an `Object` or an error
    /// describing why the arguments were rejected.
    pub fn apply(&self, args: &[Object]) -> Result<Object> {
        match self {
            Builtin::Len => self.len(args),
        }
    }

    // len produces the length in bytes of its single string argument.
    fn len(&self, args: &[Object]) -> Result<Object> {
        match args {
            [Object::String(s)] => Ok(Object::Integer(s.len() as i64)),
            [other] => Err(self.reject(format!("argument {} is not a string", other))),
            _ => Err(self.reject(format!("expected 1 argument, but got {}", args.len()))),
        }
    }

    fn reject(&self, reason: String) -> Error {
        Error::BadArguments {
            builtin: self.clone(),
            reason,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A specialized `Result` for operations on objects.
pub type Result<T> = result::Result<T, Error>;

/// An error raised while operating on objects directly, outside the
/// evaluator's own error channel.
#[derive(Debug, PartialEq)]
pub enum Error {
    BadArguments { builtin: Builtin, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::BadArguments { builtin, reason } => {
                write!(f, "built-in {}: {}", builtin, reason)
            }
        }
    }
}

impl error::Error for Error {
    fn cause(&self) -> Option<&dyn error::Error> {
        None
    }
}
