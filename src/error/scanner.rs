/// Scanner related errors
#[derive(thiserror::Error, Debug)]
pub enum ScannerError {
	/// Internal compiler error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered during scanning
	#[error(transparent)]
	ScanError(#[from] ScanError),
}

/// A specific scanning error with its location and type.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}, column {column}: {type}")]
pub struct ScanError {
	/// The line number where the error occurred.
	line:   usize,
	/// The column, in characters, where the error occurred.
	column: usize,
	/// The type of scanning error.
	r#type: ScanErrorType,
}

impl ScanError {
	pub fn new(line: usize, column: usize, r#type: ScanErrorType) -> Self { Self { line, column, r#type } }

	pub fn line(&self) -> usize { self.line }

	pub fn column(&self) -> usize { self.column }

	pub fn r#type(&self) -> &ScanErrorType { &self.r#type }
}

/// Types of scanning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanErrorType {
	/// Error for unterminated block comments.
	UnterminatedBlockComment,
	/// Error for unexpected characters.
	UnexpectedCharacter(char),
	/// Error for unterminated strings.
	UnterminatedString,
	/// Error for an unknown `\` escape inside a string.
	InvalidEscape(char),
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			UnterminatedBlockComment => {
				write!(f, "Unterminated block comment")
			}
			UnexpectedCharacter(c) => {
				write!(f, "Unexpected character '{c}'")
			}
			UnterminatedString => {
				write!(f, "Unterminated string")
			}
			InvalidEscape(c) => {
				write!(f, "Invalid escape sequence '\\{c}'")
			}
		}
	}
}
