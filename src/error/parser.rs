use crate::{parser::MAX_NESTING, scanner::{Token, TokenType}};

#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

/// A syntax error, located at the token the parser gave up on.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}, column {column} at {found}: {type}")]
pub struct ParseError {
	line:   usize,
	column: usize,
	/// `'lexeme'` of the offending token, or `end` at end of input.
	found:  String,
	r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(token: &Token<'_>, r#type: ParseErrorType) -> Self {
		let found =
			if matches!(token.r#type, TokenType::Eof) { "end".to_string() } else { format!("'{}'", token.lexeme) };
		Self { line: token.line, column: token.column, found, r#type }
	}

	pub fn line(&self) -> usize { self.line }

	pub fn column(&self) -> usize { self.column }

	pub fn r#type(&self) -> &ParseErrorType { &self.r#type }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	ExpectedExpression,
	/// A specific token was required, e.g. `';' after value`.
	Expected(&'static str),
	InvalidAssignmentTarget,
	/// `break` or `continue` outside of any `while` body.
	OutsideLoop(&'static str),
	/// More than `MAX_NESTING` blocks, bodies or subexpressions open at once.
	TooDeeplyNested,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectedExpression => {
				write!(f, "Expect expression")
			}
			Expected(what) => {
				write!(f, "Expect {what}")
			}
			InvalidAssignmentTarget => {
				write!(f, "Invalid assignment target")
			}
			OutsideLoop(keyword) => {
				write!(f, "Can't use '{keyword}' outside of a loop")
			}
			TooDeeplyNested => {
				write!(f, "Nesting deeper than {MAX_NESTING} levels")
			}
		}
	}
}
