use crate::scanner::Token;

/// Errors that can occur during interpretation
#[derive(thiserror::Error, Debug)]
pub enum InterpreterError {
	/// A located error in the running program
	#[error(transparent)]
	Runtime(#[from] RuntimeError),
	/// The output sink rejected a print
	#[error("Failed write output: {0}")]
	Output(#[from] std::io::Error),
}

/// A runtime error located at the token whose evaluation failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}, column {column}: {type}")]
pub struct RuntimeError {
	line:   usize,
	column: usize,
	r#type: RuntimeErrorType,
}

impl RuntimeError {
	pub fn new(token: &Token<'_>, r#type: RuntimeErrorType) -> Self {
		Self { line: token.line, column: token.column, r#type }
	}

	pub fn line(&self) -> usize { self.line }

	pub fn column(&self) -> usize { self.column }

	pub fn r#type(&self) -> &RuntimeErrorType { &self.r#type }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
	UndefinedVariable(String),
	/// Operand of a unary operator, carrying the operator lexeme.
	OperandMustBeNumber(String),
	OperandsMustBeNumbers(String),
	/// Operands of `+` or a comparison that are not two numbers or two strings.
	OperandsMustMatch(String),
	OperandMustBeBoolean(String),
}

impl std::fmt::Display for RuntimeErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use RuntimeErrorType::*;
		match self {
			UndefinedVariable(name) => write!(f, "Undefined variable '{name}'"),
			OperandMustBeNumber(op) => write!(f, "Operand of '{op}' must be a number"),
			OperandsMustBeNumbers(op) => write!(f, "Operands of '{op}' must be numbers"),
			OperandsMustMatch(op) => write!(f, "Operands of '{op}' must be two numbers or two strings"),
			OperandMustBeBoolean(op) => write!(f, "Operands of '{op}' must be booleans"),
		}
	}
}
