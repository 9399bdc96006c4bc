pub mod interpreter;
pub mod parser;
pub mod scanner;

use std::fmt::Display;

/// LoxError is the top-level error type for the interpreter pipeline.
#[derive(thiserror::Error, Debug)]
pub enum LoxError {
	/// Internal compiler error, should never happen
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Every error the scanner ran into during one pass
	#[error("Generated {} scanner errors:\n{}", .0.len(), display_errors(.0))]
	ScannerErrors(Vec<scanner::ScanError>),
	/// Every error the parser recorded during one pass
	#[error("Generated {} parser errors:\n{}", .0.len(), display_errors(.0))]
	ParserErrors(Vec<parser::ParseError>),
	/// The error that stopped the interpreter
	#[error("Runtime error:\n{0}")]
	RuntimeError(#[from] interpreter::InterpreterError),
}

impl LoxError {
	/// Exit code a batch run reports for this error.
	pub fn exit_code(&self) -> u8 {
		match self {
			LoxError::ScannerErrors(_) | LoxError::ParserErrors(_) => 65,
			LoxError::RuntimeError(_) => 70,
			LoxError::InternalError(_) => 1,
		}
	}
}

fn display_errors<E: Display>(errors: &[E]) -> String {
	errors.iter().map(|e| e.to_string()).collect::<Vec<String>>().join("\n")
}
