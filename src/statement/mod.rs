//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a `while` loop is always a statement.

use crate::{parser::expression::Expression, scanner::Token};

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
	/// An expression used as a statement.
	Expression(Expression<'a>),
	/// A print statement.
	Print(Expression<'a>),
	/// A variable declaration statement.
	VarDeclaration {
		/// The token of the variable being declared.
		name_token:  Token<'a>,
		/// An optional initializer expression.
		initializer: Option<Expression<'a>>,
	},
	/// A block of statements, run in its own scope.
	Block(Vec<Statement<'a>>),
	If {
		condition:   Expression<'a>,
		then_branch: Box<Statement<'a>>,
		else_branch: Option<Box<Statement<'a>>>,
	},
	While {
		condition: Expression<'a>,
		body:      Box<Statement<'a>>,
	},
	/// Leave the innermost enclosing loop.
	Break(Token<'a>),
	/// Skip to the next condition check of the innermost enclosing loop.
	Continue(Token<'a>),
}

impl std::fmt::Display for Statement<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Expression(expression) => write!(f, "(; {expression})"),
			Statement::Print(expression) => write!(f, "(print {expression})"),
			Statement::VarDeclaration { name_token, initializer: Some(initializer) } => {
				write!(f, "(var {} {initializer})", name_token.lexeme)
			}
			Statement::VarDeclaration { name_token, initializer: None } => write!(f, "(var {})", name_token.lexeme),
			Statement::Block(statements) => {
				write!(f, "(block")?;
				for statement in statements {
					write!(f, " {statement}")?;
				}
				write!(f, ")")
			}
			Statement::If { condition, then_branch, else_branch: Some(else_branch) } => {
				write!(f, "(if {condition} {then_branch} {else_branch})")
			}
			Statement::If { condition, then_branch, else_branch: None } => write!(f, "(if {condition} {then_branch})"),
			Statement::While { condition, body } => write!(f, "(while {condition} {body})"),
			Statement::Break(_) => write!(f, "(break)"),
			Statement::Continue(_) => write!(f, "(continue)"),
		}
	}
}
