//! An AST evaluator for the Monkey programming language.

use crate::ast;
use crate::object::{self, Environment, Object};
use crate::token::Token;

use std::cell::RefCell;
use std::error;
use std::fmt;
use std::rc::Rc;
use std::result;

/// Evaluates an `ast::Node` against an environment and produces an
/// `object::Object`.
///
/// Runtime errors propagate with priority: once a subexpression produces an
/// error, enclosing evaluations return it unchanged without evaluating
/// further siblings.
pub fn eval(node: ast::Node, env: &Rc<RefCell<Environment>>) -> Result<Object> {
    match node {
        ast::Node::Program(prog) => eval_program(prog, env),
        ast::Node::Statement(stmt) => match stmt {
            ast::Statement::Block(block) => eval_block_statement(block, env),
            ast::Statement::Expression(expr) => eval(ast::Node::Expression(expr), env),
            ast::Statement::Let(stmt) => {
                let obj = eval(ast::Node::Expression(stmt.value), env)?;

                // eval succeeded; capture this binding in our environment.
                env.borrow_mut().set(stmt.name.value, &obj);
                Ok(obj)
            }
            ast::Statement::Return(ret) => Ok(Object::ReturnValue(Box::new(eval(
                ast::Node::Expression(ret.value),
                env,
            )?))),
        },
        ast::Node::Expression(expr) => match expr {
            ast::Expression::Integer(i) => Ok(Object::Integer(i)),
            ast::Expression::Boolean(b) => Ok(Object::Boolean(b)),
            ast::Expression::String(s) => Ok(Object::String(s)),
            ast::Expression::Prefix(p) => eval_prefix_expression(p, env),
            ast::Expression::Infix(i) => eval_infix_expression(i, env),
            ast::Expression::If(stmt) => eval_if_expression(stmt, env),
            ast::Expression::Identifier(id) => eval_identifier(id.value, env),
            ast::Expression::Function(func) => Ok(Object::Function(object::Function {
                parameters: func.parameters,
                body: func.body,

                // Capture by reference: the closure shares the environment
                // active at this point, and observes later writes to it.
                env: Rc::clone(env),
            })),
            ast::Expression::Call(call) => {
                let func = eval(ast::Node::Expression(*call.function), env)?;

                // Arguments evaluate left to right; the first error wins.
                let args = eval_expressions(call.arguments, env)?;

                match func {
                    Object::Function(f) => apply_function(f, &args),
                    // Built-ins use their own execution logic.
                    Object::Builtin(b) => b.apply(&args).map_err(Error::Object),
                    other => Err(Error::NotAFunction(other.type_name())),
                }
            }
        },
    }
}

/// Evaluates a program and returns the result.
fn eval_program(prog: ast::Program, env: &Rc<RefCell<Environment>>) -> Result<Object> {
    let mut result = Object::Null;

    for stmt in prog.statements {
        result = eval(ast::Node::Statement(stmt), env)?;

        // Handle early return statements if applicable, unwrapping the inner
        // value and terminating the program.
        if let Object::ReturnValue(value) = result {
            return Ok(*value);
        }
    }

    Ok(result)
}

/// Evaluates a block statement and returns the result.
fn eval_block_statement(
    block: ast::BlockStatement,
    env: &Rc<RefCell<Environment>>,
) -> Result<Object> {
    let mut result = Object::Null;

    for stmt in block.statements {
        result = eval(ast::Node::Statement(stmt), env)?;

        // Handle early return statements if applicable, but do not unwrap the
        // inner value so that only this block statement terminates, and not
        // the entire program.
        if let Object::ReturnValue(_) = result {
            return Ok(result);
        }
    }

    Ok(result)
}

/// Evaluates a prefix expression to produce an Object.
fn eval_prefix_expression(
    expr: ast::PrefixExpression,
    env: &Rc<RefCell<Environment>>,
) -> Result<Object> {
    // Evaluate the right side before applying the prefix operator.
    let right = eval(ast::Node::Expression(*expr.right), env)?;

    match expr.operator {
        // Logical negation: only false and null are falsey.
        Token::Bang => match right {
            Object::Boolean(b) => Ok(Object::Boolean(!b)),
            Object::Null => Ok(Object::Boolean(true)),
            _ => Ok(Object::Boolean(false)),
        },
        // Negative numbers.
        Token::Minus => match right {
            Object::Integer(i) => Ok(Object::Integer(i.wrapping_neg())),

            other => Err(Error::UnknownOperator(format!(
                "-{}",
                other.type_name()
            ))),
        },

        op => Err(Error::UnknownOperator(format!(
            "{}{}",
            op,
            right.type_name()
        ))),
    }
}

/// Evaluates an infix expression to produce an Object.
fn eval_infix_expression(
    expr: ast::InfixExpression,
    env: &Rc<RefCell<Environment>>,
) -> Result<Object> {
    let left = eval(ast::Node::Expression(*expr.left), env)?;
    let right = eval(ast::Node::Expression(*expr.right), env)?;

    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => {
            eval_integer_infix_expression(expr.operator, l, r)
        }

        (Object::Boolean(l), Object::Boolean(r)) => match expr.operator {
            Token::Equal => Ok(Object::Boolean(l == r)),
            Token::NotEqual => Ok(Object::Boolean(l != r)),

            op => Err(Error::UnknownOperator(format!(
                "BOOLEAN {} BOOLEAN",
                op
            ))),
        },

        (Object::String(l), Object::String(r)) => match expr.operator {
            Token::Plus => Ok(Object::String(l + &r)),

            op => Err(Error::UnknownOperator(format!("STRING {} STRING", op))),
        },

        // Operands of differing types never mix; matching types reaching
        // this point have no operators defined on them at all.
        (l, r) => {
            let operands = format!("{} {} {}", l.type_name(), expr.operator, r.type_name());

            if l.type_name() == r.type_name() {
                Err(Error::UnknownOperator(operands))
            } else {
                Err(Error::TypeMismatch(operands))
            }
        }
    }
}

// Evaluates `l (op) r` for two integer operands. Arithmetic wraps on
// overflow; division truncates toward zero.
fn eval_integer_infix_expression(op: Token, l: i64, r: i64) -> Result<Object> {
    match op {
        Token::Plus => Ok(Object::Integer(l.wrapping_add(r))),
        Token::Minus => Ok(Object::Integer(l.wrapping_sub(r))),
        Token::Asterisk => Ok(Object::Integer(l.wrapping_mul(r))),
        Token::Slash => {
            if r == 0 {
                Err(Error::DivisionByZero)
            } else {
                Ok(Object::Integer(l.wrapping_div(r)))
            }
        }

        Token::LessThan => Ok(Object::Boolean(l < r)),
        Token::GreaterThan => Ok(Object::Boolean(l > r)),
        Token::Equal => Ok(Object::Boolean(l == r)),
        Token::NotEqual => Ok(Object::Boolean(l != r)),

        op => Err(Error::UnknownOperator(format!("INTEGER {} INTEGER", op))),
    }
}

/// Evaluates an if/else expression to produce an Object.
fn eval_if_expression(expr: ast::IfExpression, env: &Rc<RefCell<Environment>>) -> Result<Object> {
    let condition = eval(ast::Node::Expression(*expr.condition), env)?;

    if is_truthy(&condition) {
        eval(
            ast::Node::Statement(ast::Statement::Block(expr.consequence)),
            env,
        )
    } else if let Some(alt) = expr.alternative {
        eval(ast::Node::Statement(ast::Statement::Block(alt)), env)
    } else {
        Ok(Object::Null)
    }
}

/// Evaluates an object bound to an identifier and returns the result.
fn eval_identifier(id: String, env: &Rc<RefCell<Environment>>) -> Result<Object> {
    match object::Builtin::lookup(&id) {
        // Found a built-in.
        Some(b) => Ok(Object::Builtin(b)),

        // Didn't find a built-in, look for user-defined identifiers.
        None => env
            .borrow()
            .get(&id)
            .ok_or_else(|| Error::IdentifierNotFound(id)),
    }
}

/// Evaluates several expressions and produces objects for each of them.
fn eval_expressions(
    expressions: Vec<ast::Expression>,
    env: &Rc<RefCell<Environment>>,
) -> Result<Vec<Object>> {
    let mut results = vec![];

    for expr in expressions {
        results.push(eval(ast::Node::Expression(expr), env)?);
    }

    Ok(results)
}

/// Applies a function with arguments to produce a result object.
fn apply_function(function: object::Function, args: &[Object]) -> Result<Object> {
    // Bind function arguments in an environment enclosed by the function's
    // captured environment.
    let extended_env = Rc::new(RefCell::new(extend_function_env(&function, args)?));
    let evaluated = eval(
        ast::Node::Statement(ast::Statement::Block(function.body)),
        &extended_env,
    )?;

    // If the function had an early return, unwrap exactly one level so the
    // return value does not escape past the call.
    if let Object::ReturnValue(ret) = evaluated {
        Ok(*ret)
    } else {
        Ok(evaluated)
    }
}

// Extends a function's environment to bind its arguments positionally.
fn extend_function_env(func: &object::Function, args: &[Object]) -> Result<Environment> {
    if func.parameters.len() != args.len() {
        return Err(Error::WrongNumberOfArguments {
            want: func.parameters.len(),
            got: args.len(),
        });
    }

    let mut env = Environment::new_enclosed(Rc::clone(&func.env));

    for (param, arg) in func.parameters.iter().zip(args) {
        env.set(param.value.clone(), arg);
    }

    Ok(env)
}

/// Determines if an object is truthy in Monkey: only false and null are not.
fn is_truthy(obj: &Object) -> bool {
    !matches!(obj, Object::Boolean(false) | Object::Null)
}

/// A specialized `Result` for evaluation.
pub type Result<T> = result::Result<T, Error>;

/// A runtime error raised while evaluating a program.
#[derive(Debug, PartialEq)]
pub enum Error {
    TypeMismatch(String),
    UnknownOperator(String),
    IdentifierNotFound(String),
    NotAFunction(&'static str),
    DivisionByZero,
    WrongNumberOfArguments { want: usize, got: usize },
    Object(object::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TypeMismatch(operands) => write!(f, "type mismatch: {}", operands),
            Error::UnknownOperator(operands) => write!(f, "unknown operator: {}", operands),
            Error::IdentifierNotFound(id) => write!(f, "identifier not found: {}", id),
            Error::NotAFunction(kind) => write!(f, "not a function: {}", kind),
            Error::DivisionByZero => write!(f, "division by zero"),
            Error::WrongNumberOfArguments { want, got } => write!(
                f,
                "expected {} arguments, but got {}",
                want, got
            ),
            Error::Object(err) => err.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn cause(&self) -> Option<&dyn error::Error> {
        match self {
            Error::Object(err) => Some(err),
            _ => None,
        }
    }
}
