//! Expression AST nodes
//!
//! An `Expression` is a tree structure representing code like `-123 *
//! (45.67)` as nested nodes. Its `Display` is the parenthesized form used for
//! diagnostics.

use std::borrow::Cow;

use Expression::*;
use LiteralValue::*;

use crate::scanner::{Token, TokenType};

/// Expression AST nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
	Literal(LiteralValue<'a>),
	Variable(Token<'a>),
	Unary { operator: Token<'a>, right: Box<Expression<'a>> },
	Binary { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	/// `and` / `or`, kept apart from `Binary` because the right side may be skipped.
	Logical { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	Grouping(Box<Expression<'a>>),
	Assign { target: Token<'a>, value: Box<Expression<'a>> },
}

impl<'a> Expression<'a> {
	pub fn unary(operator: Token<'a>, right: Box<Self>) -> Box<Self> { Box::new(Expression::Unary { operator, right }) }

	pub fn binary(left: Box<Self>, operator: Token<'a>, right: Box<Self>) -> Box<Self> {
		Box::new(Expression::Binary { left, operator, right })
	}

	pub fn logical(left: Box<Self>, operator: Token<'a>, right: Box<Self>) -> Box<Self> {
		Box::new(Expression::Logical { left, operator, right })
	}

	pub fn grouping(expr: Box<Self>) -> Box<Self> { Box::new(Expression::Grouping(expr)) }

	pub fn assign(name: Token<'a>, value: Box<Self>) -> Box<Self> {
		Box::new(Expression::Assign { target: name, value })
	}
}

/// Literal values in the AST
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue<'a> {
	Number(f64),
	StringLiteral(Cow<'a, str>),
	Boolean(bool),
	Nil,
}

impl<'a> TryFrom<Token<'a>> for Expression<'a> {
	type Error = anyhow::Error;

	fn try_from(token: Token<'a>) -> Result<Self, Self::Error> {
		use TokenType::*;

		Ok(match token.r#type {
			NumberLiteral(n) => Literal(Number(n)),
			TokenType::StringLiteral(s) => Literal(LiteralValue::StringLiteral(s)),
			True => Literal(Boolean(true)),
			False => Literal(Boolean(false)),
			TokenType::Nil => Literal(LiteralValue::Nil),
			Identifier(_) => Expression::Variable(token),
			_ => anyhow::bail!("Cannot convert token {:?} to Expression", token),
		})
	}
}

impl std::fmt::Display for Expression<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal(lit) => write!(f, "{lit}"),
			Unary { operator, right } => write!(f, "({} {right})", operator.lexeme),
			Binary { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Logical { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Grouping(expression) => write!(f, "(group {expression})"),
			Variable(token) => write!(f, "{}", token.lexeme),
			Assign { target: name, value } => write!(f, "(= {} {value})", name.lexeme),
		}
	}
}

impl std::fmt::Display for LiteralValue<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Number(n) => write!(f, "{n}"),
			LiteralValue::StringLiteral(s) => write!(f, "{s:?}"),
			Boolean(b) => write!(f, "{b}"),
			LiteralValue::Nil => write!(f, "nil"),
		}
	}
}
