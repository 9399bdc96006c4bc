//! The `Scanner` use `Lexical grammar`, implement `alphabet` as `Characters`,
//! `string` as `Lexeme` or `Token`
//! The `Parser` use `Syntactic grammar`, implement `alphabet` as `Tokens`,
//! `string` as `Statement`
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|=|Right
//! Or|or|Left
//! And|and|Left
//! Equality|== !=|Left
//! Comparison|< > <= >=|Left
//! Term|+ -|Left
//! Factor|* /|Left
//! Unary|! -|Right
//!
//! Grammar:
//!
//! ``` BNF
//! program        → declaration* EOF ;
//! declaration    → varDecl | statement ;
//! varDecl        → "var" IDENTIFIER ( "=" expression )? ";" ;
//! statement      → printStmt | block | ifStmt | whileStmt | breakStmt | continueStmt | exprStmt ;
//! printStmt      → "print" expression ";" ;
//! block          → "{" declaration* "}" ;
//! ifStmt         → "if" "(" expression ")" statement ( "else" statement )? ;
//! whileStmt      → "while" "(" expression ")" statement ;
//! breakStmt      → "break" ";" ;
//! continueStmt   → "continue" ";" ;
//! exprStmt       → expression ";" ;
//! expression     → assignment ;
//! assignment     → IDENTIFIER "=" assignment | logic_or ;
//! logic_or       → logic_and ( "or" logic_and )* ;
//! logic_and      → equality ( "and" equality )* ;
//! equality       → comparison ( ( "!=" | "==" ) comparison )* ;
//! comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
//! term           → factor ( ( "-" | "+" ) factor )* ;
//! factor         → unary ( ( "/" | "*" ) unary )* ;
//! unary          → ( "!" | "-" ) unary | primary ;
//! primary        → NUMBER | STRING | "true" | "false" | "nil" | IDENTIFIER | "(" expression ")" ;
//! ```
//!
//! A syntax error never stops the pass. It is recorded, the parser
//! synchronizes on the next statement boundary, and all recorded errors are
//! returned together once the token stream is exhausted.

pub(crate) mod expression;

use std::{iter::Peekable, vec::IntoIter};

use TokenType::*;
use anyhow::anyhow;

use crate::{LoxError, error::parser::{ParseError, ParseErrorType, ParserError}, parser::expression::Expression, scanner::{Token, TokenType}, statement::Statement};

/// Deepest nesting of blocks, statement bodies, groupings, unary operators
/// and assignments the parser accepts.
pub(crate) const MAX_NESTING: usize = 32;

/// Recursive descent parser over a scanned token stream.
pub struct Parser<'a> {
	/// The tokens to parse, terminated by `Eof`.
	tokens:     Peekable<IntoIter<Token<'a>>>,
	/// Every syntax error recorded so far.
	errors:     Vec<ParseError>,
	/// How many `while` bodies enclose the statement being parsed.
	loop_depth: usize,
	/// How many nested constructs enclose the one being parsed.
	depth:      usize,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self {
		Self { tokens: tokens.into_iter().peekable(), errors: Vec::new(), loop_depth: 0, depth: 0 }
	}

	/// Parse the whole token stream into statements.
	#[tracing::instrument(level = "debug", skip_all)]
	pub fn parse(mut self) -> Result<Vec<Statement<'a>>, LoxError> {
		let statements = match self.program() {
			Ok(statements) => statements,
			Err(ParserError::InternalError(e)) => return Err(e.into()),
			Err(ParserError::ParseError(e)) => {
				self.report(e);
				Vec::new()
			}
		};
		if !self.errors.is_empty() {
			tracing::debug!(count = self.errors.len(), "parsing failed");
			return Err(LoxError::ParserErrors(self.errors));
		}
		tracing::debug!(count = statements.len(), "parsed statements");
		Ok(statements)
	}

	/// Parse declarations until `Eof`, recovering from syntax errors.
	fn program(&mut self) -> Result<Vec<Statement<'a>>, ParserError> {
		let mut statements = Vec::new();
		while !self.is_at_end()? {
			if let Some(statement) = self.declaration()? {
				statements.push(statement);
			}
		}
		Ok(statements)
	}

	/// Parse one declaration. A syntax error is recorded and yields `None`.
	fn declaration(&mut self) -> Result<Option<Statement<'a>>, ParserError> {
		let result = if self.check(&Var)? {
			self.advance()?;
			self.var_declaration()
		} else {
			self.statement()
		};
		match result {
			Ok(statement) => Ok(Some(statement)),
			Err(ParserError::ParseError(error)) => {
				self.report(error);
				self.synchronize()?;
				Ok(None)
			}
			Err(e) => Err(e),
		}
	}

	fn var_declaration(&mut self) -> Result<Statement<'a>, ParserError> {
		let name_token = self.consume(Identifier(""), "variable name")?;
		let initializer = if self.check(&Equal)? {
			self.advance()?;
			Some(*self.expression()?)
		} else {
			None
		};
		self.consume(Semicolon, "';' after variable declaration")?;
		Ok(Statement::VarDeclaration { name_token, initializer })
	}

	fn statement(&mut self) -> Result<Statement<'a>, ParserError> {
		match self.peek()?.r#type {
			Print => {
				self.advance()?;
				let value = *self.expression()?;
				self.consume(Semicolon, "';' after value")?;
				Ok(Statement::Print(value))
			}
			LeftBrace => {
				let brace = self.advance()?;
				Ok(Statement::Block(self.nested(&brace, Self::block)?))
			}
			If => self.if_statement(),
			While => self.while_statement(),
			Break | Continue => self.loop_control(),
			_ => {
				let expression = *self.expression()?;
				self.consume(Semicolon, "';' after expression")?;
				Ok(Statement::Expression(expression))
			}
		}
	}

	/// Parse the declarations of a block, the `{` already consumed.
	fn block(&mut self) -> Result<Vec<Statement<'a>>, ParserError> {
		let mut statements = Vec::new();
		while !matches!(self.peek()?.r#type, RightBrace | Eof) {
			if let Some(statement) = self.declaration()? {
				statements.push(statement);
			}
		}
		self.consume(RightBrace, "'}' after block")?;
		Ok(statements)
	}

	fn if_statement(&mut self) -> Result<Statement<'a>, ParserError> {
		let keyword = self.advance()?;
		self.consume(LeftParen, "'(' after 'if'")?;
		let condition = *self.expression()?;
		self.consume(RightParen, "')' after if condition")?;

		let then_branch = Box::new(self.nested(&keyword, Self::statement)?);
		let else_branch = if self.check(&Else)? {
			let keyword = self.advance()?;
			Some(Box::new(self.nested(&keyword, Self::statement)?))
		} else {
			None
		};
		Ok(Statement::If { condition, then_branch, else_branch })
	}

	fn while_statement(&mut self) -> Result<Statement<'a>, ParserError> {
		let keyword = self.advance()?;
		self.consume(LeftParen, "'(' after 'while'")?;
		let condition = *self.expression()?;
		self.consume(RightParen, "')' after condition")?;

		self.loop_depth += 1;
		let body = self.nested(&keyword, Self::statement);
		self.loop_depth -= 1;
		Ok(Statement::While { condition, body: Box::new(body?) })
	}

	/// Parse `break;` or `continue;`, only legal inside a `while` body.
	fn loop_control(&mut self) -> Result<Statement<'a>, ParserError> {
		let keyword = self.advance()?;
		let is_break = matches!(keyword.r#type, Break);
		if self.loop_depth == 0 {
			let name = if is_break { "break" } else { "continue" };
			return Err(ParseError::new(&keyword, ParseErrorType::OutsideLoop(name)).into());
		}
		self.consume(Semicolon, if is_break { "';' after 'break'" } else { "';' after 'continue'" })?;
		Ok(if is_break { Statement::Break(keyword) } else { Statement::Continue(keyword) })
	}

	/// Parse an expression.
	fn expression(&mut self) -> Result<Box<Expression<'a>>, ParserError> { self.assignment() }

	/// Parse assignment, right associative. An invalid target is recorded
	/// without unwinding, the parser is still in a known state.
	fn assignment(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let expression = self.or()?;
		if self.check(&Equal)? {
			let equals = self.advance()?;
			let value = self.nested(&equals, Self::assignment)?;
			return match *expression {
				Expression::Variable(target) => Ok(Expression::assign(target, value)),
				expression => {
					self.report(ParseError::new(&equals, ParseErrorType::InvalidAssignmentTarget));
					Ok(Box::new(expression))
				}
			};
		}
		Ok(expression)
	}

	/// Parse `or` expressions.
	fn or(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.and()?;
		while matches!(self.peek()?.r#type, Or) {
			expression = Expression::logical(expression, self.advance()?, self.and()?)
		}
		Ok(expression)
	}

	/// Parse `and` expressions.
	fn and(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.equality()?;
		while matches!(self.peek()?.r#type, And) {
			expression = Expression::logical(expression, self.advance()?, self.equality()?)
		}
		Ok(expression)
	}

	/// Parse equality expressions.
	fn equality(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.comparison()?;
		while matches!(self.peek()?.r#type, BangEqual | EqualEqual) {
			expression = Expression::binary(expression, self.advance()?, self.comparison()?)
		}
		Ok(expression)
	}

	/// Parse comparison expressions.
	fn comparison(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.term()?;
		while matches!(self.peek()?.r#type, Greater | GreaterEqual | Less | LessEqual) {
			expression = Expression::binary(expression, self.advance()?, self.term()?)
		}
		Ok(expression)
	}

	/// Parse term expressions.
	fn term(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.factor()?;
		while matches!(self.peek()?.r#type, Minus | Plus) {
			expression = Expression::binary(expression, self.advance()?, self.factor()?)
		}
		Ok(expression)
	}

	/// Parse factor expressions.
	fn factor(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.unary()?;
		while matches!(self.peek()?.r#type, Slash | Star) {
			expression = Expression::binary(expression, self.advance()?, self.unary()?)
		}
		Ok(expression)
	}

	/// Parse unary expressions.
	fn unary(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		if matches!(self.peek()?.r#type, Bang | Minus) {
			let operator = self.advance()?;
			let right = self.nested(&operator, Self::unary)?;
			return Ok(Expression::unary(operator, right));
		}
		self.primary()
	}

	/// Parse primary expressions.
	fn primary(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		match self.peek()?.r#type {
			False | True | Nil | NumberLiteral(_) | StringLiteral(_) | Identifier(_) => {
				let token = self.advance()?;
				Ok(Box::new(token.try_into()?))
			}
			LeftParen => {
				let paren = self.advance()?;
				let expr = self.nested(&paren, Self::expression)?;
				self.consume(RightParen, "')' after expression")?;
				Ok(Expression::grouping(expr))
			}
			_ => Err(ParseError::new(self.peek()?, ParseErrorType::ExpectedExpression).into()),
		}
	}

	/// Run `parse` one nesting level below `opening`, or fail on `opening`
	/// once `MAX_NESTING` levels are open.
	fn nested<T>(
		&mut self, opening: &Token<'a>, parse: impl FnOnce(&mut Self) -> Result<T, ParserError>,
	) -> Result<T, ParserError> {
		if self.depth >= MAX_NESTING {
			return Err(ParseError::new(opening, ParseErrorType::TooDeeplyNested).into());
		}
		self.depth += 1;
		let result = parse(self);
		self.depth -= 1;
		result
	}

	/// Advance to the next token. `Eof` is never consumed.
	fn advance(&mut self) -> Result<Token<'a>, ParserError> {
		if self.is_at_end()? {
			return Ok(self.peek()?.clone());
		}
		self.tokens.next().ok_or_else(|| anyhow!("Unexpected EOF").into())
	}

	/// Peek at the current token.
	fn peek(&mut self) -> Result<&Token<'a>, ParserError> {
		self.tokens.peek().ok_or_else(|| anyhow!("Token stream ended without Eof").into())
	}

	fn is_at_end(&mut self) -> Result<bool, ParserError> { Ok(matches!(self.peek()?.r#type, Eof)) }

	/// Whether the current token has the same kind as `expected`, payload ignored.
	fn check(&mut self, expected: &TokenType<'a>) -> Result<bool, ParserError> {
		Ok(std::mem::discriminant(&self.peek()?.r#type) == std::mem::discriminant(expected))
	}

	/// Consume a token of the `expected` kind or fail with `Expect {what}`.
	fn consume(&mut self, expected: TokenType<'a>, what: &'static str) -> Result<Token<'a>, ParserError> {
		if self.check(&expected)? {
			return self.advance();
		}
		Err(ParseError::new(self.peek()?, ParseErrorType::Expected(what)).into())
	}

	fn report(&mut self, error: ParseError) {
		tracing::trace!(%error, "parse error");
		self.errors.push(error);
	}

	/// Discard tokens until a statement boundary: just past a `;`, or right
	/// before a keyword that starts a statement.
	fn synchronize(&mut self) -> Result<(), ParserError> {
		let mut previous = self.advance()?;
		loop {
			if matches!(previous.r#type, Semicolon) {
				return Ok(());
			}
			let next = &self.peek()?.r#type;
			if matches!(next, Eof) || next.starts_statement() {
				return Ok(());
			}
			previous = self.advance()?;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::Scanner;

	/// Parse `input` as one expression statement and print its tree.
	fn parse(input: &str, equals: &str) {
		let source = format!("{input};");
		let tokens = Scanner::new(&source).scan_tokens().unwrap();
		let statements = Parser::new(tokens).parse().unwrap();
		assert_eq!(statements.len(), 1);
		match &statements[0] {
			Statement::Expression(expression) => assert_eq!(expression.to_string(), equals),
			other => panic!("expected an expression statement, got {other}"),
		}
	}

	/// Run the recovering pass and return what it produced and recorded.
	fn recover(input: &str) -> (Vec<String>, Vec<ParseError>) {
		let tokens = Scanner::new(input).scan_tokens().unwrap();
		let mut parser = Parser::new(tokens);
		let statements = parser.program().unwrap();
		(statements.iter().map(|statement| statement.to_string()).collect(), parser.errors)
	}

	#[test]
	fn parse_expressions() {
		parse("3 + 4 * (-2 - 1)", "(+ 3 (* 4 (group (- (- 2) 1))))");
		parse("1 + 2 * 3 / 4 - 5", "(- (+ 1 (/ (* 2 3) 4)) 5)");
		parse("8 + 800.3 * 123 / 65 - (2 + 3)", "(- (+ 8 (/ (* 800.3 123) 65)) (group (+ 2 3)))");
		parse("10 - 3 - 2", "(- (- 10 3) 2)");
	}

	#[test]
	fn parse_comparison() {
		parse("1 < 2", "(< 1 2)");
		parse("1 <= 2", "(<= 1 2)");
		parse("1 > 2", "(> 1 2)");
		parse("1 >= 2", "(>= 1 2)");
		parse("1 < 2 < 3", "(< (< 1 2) 3)");
	}

	#[test]
	fn parse_equality() {
		parse("1 == 2", "(== 1 2)");
		parse("1 != 2", "(!= 1 2)");
		parse("1 == 2 == 3", "(== (== 1 2) 3)");
		parse("1 != 2 == 3", "(== (!= 1 2) 3)");
	}

	#[test]
	fn parse_unary() {
		parse("-123", "(- 123)");
		parse("!true", "(! true)");
		parse("-(-123)", "(- (group (- 123)))");
		parse("!!true", "(! (! true))");
		parse("-1 + 2", "(+ (- 1) 2)");
	}

	#[test]
	fn parse_literals() {
		parse("42", "42");
		parse("3.5", "3.5");
		parse("\"hello\"", "\"hello\"");
		parse("true", "true");
		parse("false", "false");
		parse("nil", "nil");
		parse("name", "name");
	}

	#[test]
	fn parse_grouping() {
		parse("(1 + 2) * 3", "(* (group (+ 1 2)) 3)");
		parse("1 * (2 + 3)", "(* 1 (group (+ 2 3)))");
		parse("((1))", "(group (group 1))");
	}

	#[test]
	fn parse_logical() {
		parse("a or b and c", "(or a (and b c))");
		parse("a and b or c", "(or (and a b) c)");
		parse("a == b and c", "(and (== a b) c)");
		parse("a or b or c", "(or (or a b) c)");
	}

	#[test]
	fn parse_assignment() {
		parse("a = 1", "(= a 1)");
		parse("a = b = c", "(= a (= b c))");
		parse("a = b or c", "(= a (or b c))");
	}

	#[test]
	fn parse_complex() {
		parse("1 + 2 == 3", "(== (+ 1 2) 3)");
		parse("1 + 2 != 3 - 4", "(!= (+ 1 2) (- 3 4))");
		parse("!(1 < 2)", "(! (group (< 1 2)))");
		parse("1 + 2 * 3 < 4 - 5 / 6", "(< (+ 1 (* 2 3)) (- 4 (/ 5 6)))");
	}

	#[test]
	fn invalid_assignment_target() {
		let (statements, errors) = recover("a + b = c; (a) = 1; print 1;");
		assert_eq!(statements, vec!["(; (+ a b))", "(; (group a))", "(print 1)"]);
		assert_eq!(errors.len(), 2);
		assert_eq!(errors[0].r#type(), &ParseErrorType::InvalidAssignmentTarget);
		assert_eq!((errors[0].line(), errors[0].column()), (1, 7));
	}

	#[test]
	fn synchronize_on_semicolon() {
		let (statements, errors) = recover("var = 1; print 2;\nprint (3;\nprint 4;");
		assert_eq!(statements, vec!["(print 2)", "(print 4)"]);
		assert_eq!(errors.len(), 2);
		assert_eq!(errors[0].r#type(), &ParseErrorType::Expected("variable name"));
		assert_eq!(errors[1].r#type(), &ParseErrorType::Expected("')' after expression"));
		assert_eq!(errors[1].line(), 2);
	}

	#[test]
	fn synchronize_on_statement_keyword() {
		let (statements, errors) = recover("1 + + 2 var x = 1; print x;");
		assert_eq!(statements, vec!["(var x 1)", "(print x)"]);
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].r#type(), &ParseErrorType::ExpectedExpression);
	}

	#[test]
	fn recover_inside_block() {
		let (statements, errors) = recover("{ print ; print 1; } print 2;");
		assert_eq!(statements, vec!["(block (print 1))", "(print 2)"]);
		assert_eq!(errors.len(), 1);
	}

	#[test]
	fn missing_semicolon_at_end() {
		let (statements, errors) = recover("print 1");
		assert!(statements.is_empty());
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].to_string(), "line 1, column 8 at end: Expect ';' after value");
	}

	#[test]
	fn loop_control_outside_loop() {
		let (statements, errors) = recover("break; { continue; } while (true) { if (x) break; continue; }");
		assert_eq!(statements.len(), 2);
		assert_eq!(errors.len(), 2);
		assert_eq!(errors[0].r#type(), &ParseErrorType::OutsideLoop("break"));
		assert_eq!(errors[1].r#type(), &ParseErrorType::OutsideLoop("continue"));
		assert_eq!(statements[1], "(while true (block (if x (break)) (continue)))");
	}

	#[test]
	fn parse_reports_all_errors() {
		let tokens = Scanner::new("print ; var 1; x = ;").scan_tokens().unwrap();
		match Parser::new(tokens).parse() {
			Err(LoxError::ParserErrors(errors)) => assert_eq!(errors.len(), 3),
			other => panic!("expected parser errors, got {other:?}"),
		}
	}

	#[test]
	fn parse_without_eof_is_internal_error() {
		let mut tokens = Scanner::new("print 1;").scan_tokens().unwrap();
		tokens.pop();
		assert!(matches!(Parser::new(tokens).parse(), Err(LoxError::InternalError(_))));
	}

	#[test]
	fn nesting_up_to_the_limit() {
		let parens = format!("{}1{};", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
		let (statements, errors) = recover(&parens);
		assert_eq!((statements.len(), errors.len()), (1, 0));

		let blocks = format!("{}print 1;{}", "{".repeat(MAX_NESTING), "}".repeat(MAX_NESTING));
		let (statements, errors) = recover(&blocks);
		assert_eq!((statements.len(), errors.len()), (1, 0));
	}

	#[test]
	fn too_deeply_nested_parens() {
		let source = format!("print {}1{}; print 2;", "(".repeat(200), ")".repeat(200));
		let (statements, errors) = recover(&source);
		assert_eq!(statements, vec!["(print 2)"]);
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].r#type(), &ParseErrorType::TooDeeplyNested);
		assert_eq!((errors[0].line(), errors[0].column()), (1, 6 + MAX_NESTING + 1));
		assert_eq!(errors[0].to_string(), format!("line 1, column 39 at '(': Nesting deeper than {MAX_NESTING} levels"));
	}

	#[test]
	fn too_deeply_nested_unary() {
		let (_, errors) = recover(&format!("print {}1;", "-".repeat(100)));
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].r#type(), &ParseErrorType::TooDeeplyNested);
		assert_eq!(errors[0].column(), 6 + MAX_NESTING + 1);
	}

	#[test]
	fn too_deeply_nested_blocks() {
		let source = format!("{}print 1;{}", "{".repeat(500), "}".repeat(500));
		let (statements, errors) = recover(&source);
		assert_eq!(statements.len(), 1);
		assert_eq!(errors[0].r#type(), &ParseErrorType::TooDeeplyNested);
		assert_eq!((errors[0].line(), errors[0].column()), (1, MAX_NESTING + 1));
		assert_eq!(errors.len(), 2);
	}

	#[test]
	fn too_deeply_nested_statement_bodies() {
		let (_, errors) = recover(&format!("{}print 1;", "if (true) ".repeat(40)));
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].r#type(), &ParseErrorType::TooDeeplyNested);
		assert_eq!(errors[0].column(), MAX_NESTING * 10 + 1);
	}
}
