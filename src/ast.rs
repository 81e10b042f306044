//! An abstract syntax tree for the Monkey programming language.
//!
//! Every node renders to a source-equivalent string via `Display`, with
//! prefix and infix expressions fully parenthesized. These renderings are
//! the ground truth that parser precedence tests assert against.

use crate::token::Token;

use std::fmt;

/// Any node in the syntax tree; the evaluator's entry type.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Program(Program),
    Statement(Statement),
    Expression(Expression),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Program(p) => p.fmt(f),
            Node::Statement(s) => s.fmt(f),
            Node::Expression(e) => e.fmt(f),
        }
    }
}

/// The top level structure of a Monkey program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    /// The statements that make up the `Program`.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Creates a new `Program` for use with a `parser::Parser`.
    pub fn new() -> Self {
        Program { statements: vec![] }
    }

    /// Produces the literal of the token that introduced this program: the
    /// first statement's, or the empty string for an empty program.
    pub fn token_literal(&self) -> String {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in &self.statements {
            stmt.fmt(f)?;
        }

        Ok(())
    }
}

/// Possible statement types in Monkey.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(Expression),
    Block(BlockStatement),
}

impl Statement {
    /// Produces the literal of the token that introduced this statement.
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let(_) => "let".to_string(),
            Statement::Return(_) => "return".to_string(),
            Statement::Expression(expr) => expr.token_literal(),
            Statement::Block(_) => "{".to_string(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Let(stmt) => write!(f, "let {} = {};", stmt.name, stmt.value),
            Statement::Return(stmt) => write!(f, "return {};", stmt.value),
            Statement::Expression(expr) => expr.fmt(f),
            Statement::Block(block) => block.fmt(f),
        }
    }
}

/// A statement that binds an expression to an identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct LetStatement {
    pub name: Identifier,
    pub value: Expression,
}

/// A statement that returns a value.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub value: Expression,
}

/// A brace-delimited sequence of statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in &self.statements {
            stmt.fmt(f)?;
        }

        Ok(())
    }
}

/// A computed expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(i64),
    Boolean(bool),
    String(String),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
}

impl Expression {
    /// Produces the literal of the token that introduced this expression.
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(id) => id.value.clone(),
            Expression::Integer(i) => i.to_string(),
            Expression::Boolean(b) => b.to_string(),
            Expression::String(s) => s.clone(),
            Expression::Prefix(pre) => pre.operator.literal(),
            Expression::Infix(inf) => inf.operator.literal(),
            Expression::If(_) => "if".to_string(),
            Expression::Function(_) => "fn".to_string(),
            Expression::Call(_) => "(".to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Identifier(id) => id.fmt(f),
            Expression::Integer(i) => i.fmt(f),
            Expression::Boolean(b) => b.fmt(f),
            Expression::String(s) => s.fmt(f),
            Expression::Prefix(pre) => write!(f, "({}{})", pre.operator, pre.right),
            Expression::Infix(inf) => {
                write!(f, "({} {} {})", inf.left, inf.operator, inf.right)
            }
            Expression::If(stmt) => {
                write!(f, "if{} {}", stmt.condition, stmt.consequence)?;

                if let Some(alt) = &stmt.alternative {
                    write!(f, "else {}", alt)?;
                }

                Ok(())
            }
            Expression::Function(func) => {
                let params: Vec<String> =
                    func.parameters.iter().map(|p| p.to_string()).collect();

                write!(f, "fn({}) {}", params.join(", "), func.body)
            }
            Expression::Call(call) => {
                let args: Vec<String> =
                    call.arguments.iter().map(|a| a.to_string()).collect();

                write!(f, "{}({})", call.function, args.join(", "))
            }
        }
    }
}

/// A programmer-created identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub value: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An expression preceded by a unary operator.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixExpression {
    pub operator: Token,
    pub right: Box<Expression>,
}

/// Two expressions joined by a binary operator.
#[derive(Clone, Debug, PartialEq)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

/// A conditional with an optional alternative block.
#[derive(Clone, Debug, PartialEq)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// A function literal: parameters plus a body block.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

/// Invocation of a function expression with arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpression {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}
