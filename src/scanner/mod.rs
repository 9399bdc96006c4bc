//! Turns source text into tokens.
//!
//! Keywords are part of the shape of the language’s grammar, so the parser
//! often has code like, “If the next token is `while` then do . . . ” That
//! means the parser wants to know not just that it has a lexeme for some
//! identifier, but that it has a reserved word, and which keyword it is. So at
//! the point that we recognize a lexeme, we also remember which kind of lexeme
//! it represents.
//!
//! Literal tokens carry the value the scanner already computed while walking
//! the literal's characters: numbers as `f64`, strings with their escapes
//! resolved.
//!
//! We can’t easily detect a `reserved word` until we’ve reached the end of what
//! might instead be an identifier, this is `maximal munch`.
mod token;

use std::{borrow::Cow, iter::Peekable, str::CharIndices};

use TokenType::*;
use anyhow::Context;
pub use token::*;

use crate::{LoxError, ScanError, ScanErrorType, ScannerError};

/// A scanner for source code
pub struct Scanner<'a> {
	/// User input source code
	source:       &'a str,
	/// User input source code iterator
	source_iter:  Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:        usize,
	/// Points past the character last consumed
	cursor:       usize,
	/// Line of the next character, starting at 1.
	line:         usize,
	/// Column of the next character, starting at 1.
	column:       usize,
	/// Where the current lexeme starts, for tokens and errors.
	start_line:   usize,
	start_column: usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1, column: 1, start_line: 1, start_column: 1 }
	}

	/// Scan all tokens from the source code.
	///
	/// Every scan error is collected; the pass goes on after each one so a
	/// single run reports all of them.
	#[tracing::instrument(level = "debug", skip_all)]
	pub fn scan_tokens(mut self) -> Result<Vec<Token<'a>>, LoxError> {
		let mut tokens = Vec::new();
		let mut errors = Vec::new();
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			self.start_line = self.line;
			self.start_column = self.column;
			match self.scan_token(&mut tokens) {
				Err(ScannerError::ScanError(e)) => {
					tracing::trace!(error = %e, "scan error");
					errors.push(e);
				}
				Err(ScannerError::InternalError(e)) => {
					return Err(e.into());
				}
				Ok(_) => {}
			}
		}
		if !errors.is_empty() {
			tracing::debug!(count = errors.len(), "scanning failed");
			return Err(LoxError::ScannerErrors(errors));
		}
		tokens.push(Token::new(Eof, "", self.line, self.column));
		tracing::debug!(count = tokens.len(), "scanned tokens");
		Ok(tokens)
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self, tokens: &mut Vec<Token<'a>>) -> Result<(), ScannerError> {
		let next_char = self.advance().context("Unexpected EOF")?;
		#[rustfmt::skip]
		let r#type = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			',' => Comma,
			'.' => Dot,
			'-' => Minus,
			'+' => Plus,
			';' => Semicolon,
			'*' => Star,
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'/' => if self.match_next('/') {
				while self.peek().is_some_and(|c| c != '\n') { self.advance(); }
				Comment
			} else if self.match_next('*') {
				self.block_comment()?
			} else { Slash },
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => NewLine,
			'"' => self.string()?,
			c if c.is_ascii_digit() => self.number()?,
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			_ => return Err(self.error(ScanErrorType::UnexpectedCharacter(next_char))),
		};

		if !r#type.is_ignored() {
			let lexeme = &self.source[self.start..self.cursor];
			tokens.push(Token::new(r#type, lexeme, self.start_line, self.start_column));
		}

		Ok(())
	}

	/// An error located at the start of the current lexeme
	fn error(&self, r#type: ScanErrorType) -> ScannerError {
		ScanError::new(self.start_line, self.start_column, r#type).into()
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character, keeping line and column in step
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		if c == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	/// Skip a `/* ... */` comment, the opening already consumed
	fn block_comment(&mut self) -> Result<TokenType<'a>, ScannerError> {
		while let Some(c) = self.peek() {
			if c == '*' && self.peek_second().is_some_and(|c| c == '/') {
				self.advance(); // consume '*'
				self.advance(); // consume '/'
				return Ok(Comment);
			}
			self.advance();
		}
		Err(self.error(ScanErrorType::UnterminatedBlockComment))
	}

	/// Scan a string literal.
	///
	/// Strings without escapes borrow the source; the first `\` switches to an
	/// owned buffer. A bad escape is reported only after the closing quote so
	/// scanning resumes behind the whole literal.
	fn string(&mut self) -> Result<TokenType<'a>, ScannerError> {
		let mut unescaped: Option<String> = None;
		let mut segment_start = self.start + 1;
		let mut invalid_escape = None;
		loop {
			match self.peek() {
				None => return Err(self.error(ScanErrorType::UnterminatedString)),
				Some('"') => break,
				Some('\\') => {
					let buffer = unescaped.get_or_insert_with(String::new);
					buffer.push_str(&self.source[segment_start..self.cursor]);
					let (line, column) = (self.line, self.column);
					self.advance(); // consume '\'
					let Some(escaped) = self.advance() else {
						return Err(self.error(ScanErrorType::UnterminatedString));
					};
					match unescape(escaped) {
						Some(c) => buffer.push(c),
						None => {
							invalid_escape.get_or_insert(ScanError::new(line, column, ScanErrorType::InvalidEscape(escaped)));
						}
					}
					segment_start = self.cursor;
				}
				Some(_) => {
					self.advance();
				}
			}
		}

		let closing = self.cursor;
		self.advance(); // The closing "
		if let Some(error) = invalid_escape {
			return Err(error.into());
		}
		let value = match unescaped {
			Some(mut buffer) => {
				buffer.push_str(&self.source[segment_start..closing]);
				Cow::Owned(buffer)
			}
			None => Cow::Borrowed(&self.source[self.start + 1..closing]),
		};
		Ok(StringLiteral(value))
	}

	/// Scan a number literal
	fn number(&mut self) -> Result<TokenType<'a>, ScannerError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		// Look for a fractional part.
		if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
			self.advance(); // consume '.'
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
		}

		let s = &self.source[self.start..self.cursor];
		Ok(NumberLiteral(s.parse().context("Failed to parse number literal")?))
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType<'a> {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		TokenType::keyword_or_identifier(text)
	}
}

fn unescape(c: char) -> Option<char> {
	Some(match c {
		'n' => '\n',
		't' => '\t',
		'r' => '\r',
		'0' => '\0',
		'\\' => '\\',
		'"' => '"',
		_ => return None,
	})
}
