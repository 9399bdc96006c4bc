//! # Treelox
//!
//! A tree-walking interpreter for a subset of Lox: expressions, variables,
//! block scoping, `if`/`while` control flow, `break`/`continue` and `print`.
//!
//! User's source code: `var average = (min + max) / 2;`

//! ## Scanning
//!
//! Takes in the characters and converts them into tokens. Single characters
//! `(`, `;`, numbers `123`, string literals `"hi!"`, identifiers `min` are all
//! tokens, each carrying the line and column it starts at.
//!
//! Whitespaces and comments are dropped. So the tokens are
//! `["var", "average", "=", "(", "min", "+", "max", ")", "/", "2", ";", EOF]`.
//!
//! Every lexical error in the source is collected before the scanner gives up.

//! ## Parsing
//!
//! A recursive descent parser builds the statement list and its expression
//! trees from the tokens.
//!
//! ``` markdown
//! average (Statement::VarDeclaration)
//! └── / (Expression::Binary)
//!     ├── (group) (Expression::Grouping)
//!     │   └── + (Expression::Binary)
//!     │       ├── min (Expression::Variable)
//!     │       └── max (Expression::Variable)
//!     └── 2 (Expression::Literal)
//! ```
//!
//! On a syntax error the parser records it, skips to the next statement
//! boundary and goes on, so one run reports every syntax error it can find.

//! ## Interpreting
//!
//! The interpreter executes the statements in order against a chain of
//! scopes. The global scope lives as long as the [`Treelox`] driving it, so a
//! REPL keeps its variables from line to line. The first runtime error stops
//! the run.

pub mod cli;
mod environment;
mod error;
mod interpreter;
mod parser;
mod runner;
mod scanner;
mod statement;

pub use environment::Environment;
pub use error::{
	LoxError,
	interpreter::{InterpreterError, RuntimeError, RuntimeErrorType},
	parser::{ParseError, ParseErrorType, ParserError},
	scanner::{ScanError, ScanErrorType, ScannerError},
};
pub use interpreter::{Interpreter, value::Value};
pub use parser::{
	Parser,
	expression::{Expression, LiteralValue},
};
pub use runner::Treelox;
pub use scanner::{Scanner, Token, TokenType};
pub use statement::Statement;
