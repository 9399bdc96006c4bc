use std::borrow::Cow;

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
	pub r#type: TokenType<'a>,
	/// The exact source text the token was scanned from.
	pub lexeme: &'a str,
	/// Line of the token's first character, starting at 1.
	pub line:   usize,
	/// Column of the token's first character, in characters, starting at 1.
	pub column: usize,
}

impl<'a> Token<'a> {
	pub fn new(r#type: TokenType<'a>, lexeme: &'a str, line: usize, column: usize) -> Self {
		Self { r#type, lexeme, line, column }
	}
}

/// The different types of tokens. Literal tokens carry their scanned value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType<'a> {
	// Dropped by the scanner before parsing.
	NewLine,
	/// ` `, `\r` or `\t`.
	EmptyChar,
	/// `// ...` to end of line, or `/* ... */` across lines.
	Comment,

	// Punctuation and operators.
	LeftParen,
	RightParen,
	LeftBrace,
	RightBrace,
	Comma,
	Dot,
	Minus,
	Plus,
	Semicolon,
	Slash,
	Star,
	Bang,
	BangEqual,
	Equal,
	EqualEqual,
	Greater,
	GreaterEqual,
	Less,
	LessEqual,

	Identifier(&'a str),
	/// Escapes already resolved; borrows the source when there were none.
	StringLiteral(Cow<'a, str>),
	NumberLiteral(f64),

	// Keywords. `class`, `fun`, `for`, `return`, `super` and `this` are
	// reserved words with no statement of their own.
	And,
	Break,
	Class,
	Continue,
	Else,
	False,
	Fun,
	For,
	If,
	Nil,
	Or,
	Print,
	Return,
	Super,
	This,
	True,
	Var,
	While,

	Eof,
}

impl<'a> TokenType<'a> {
	pub fn is_ignored(&self) -> bool {
		matches!(self, TokenType::EmptyChar | TokenType::NewLine | TokenType::Comment)
	}

	/// Tokens the parser resynchronizes on after a syntax error.
	pub fn starts_statement(&self) -> bool {
		use TokenType::*;
		matches!(self, Class | Fun | Var | For | If | While | Print | Return | Break | Continue)
	}

	pub fn keyword_or_identifier(value: &'a str) -> Self {
		match value {
			"and" => TokenType::And,
			"break" => TokenType::Break,
			"class" => TokenType::Class,
			"continue" => TokenType::Continue,
			"else" => TokenType::Else,
			"false" => TokenType::False,
			"for" => TokenType::For,
			"fun" => TokenType::Fun,
			"if" => TokenType::If,
			"nil" => TokenType::Nil,
			"or" => TokenType::Or,
			"print" => TokenType::Print,
			"return" => TokenType::Return,
			"super" => TokenType::Super,
			"this" => TokenType::This,
			"true" => TokenType::True,
			"var" => TokenType::Var,
			"while" => TokenType::While,
			_ => TokenType::Identifier(value),
		}
	}
}
