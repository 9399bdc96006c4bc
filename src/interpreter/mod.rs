//! Tree-walking interpreter.
//!
//! The interpreter walks the statements produced by the parser in order,
//! recursively evaluating each expression (children before the operator) and
//! computing its runtime value.
//!
//! # Expression Types
//!
//! - **Literals**: `nil`, booleans, numbers, strings
//! - **Unary**: `-` (negation), `!` (logical NOT of the operand's truthiness)
//! - **Binary**: `+`, `-`, `*`, `/`, comparisons, equality
//! - **Logical**: `and`, `or` over booleans, short-circuiting
//! - **Grouping**: Parenthesized expressions
//! - **Variable** and **Assign**: lookups and updates through the scope chain

pub(crate) mod value;

use std::io::{Stdout, Write};

use Expression::*;
use value::Value;

use crate::{environment::Environment, error::interpreter::{InterpreterError, RuntimeError, RuntimeErrorType}, parser::expression::{Expression, LiteralValue}, scanner::{Token, TokenType}, statement::Statement};

/// How a statement finished. Loop control unwinds to the nearest `while`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
	Normal,
	Break,
	Continue,
}

/// Interpreter that executes statements, printing to `output`.
pub struct Interpreter<W: Write = Stdout> {
	/// The current scope; it owns every enclosing scope.
	environment: Box<Environment>,
	output:      W,
}

impl Interpreter {
	pub fn new() -> Self { Self::with_output(std::io::stdout()) }
}

impl Default for Interpreter {
	fn default() -> Self { Self::new() }
}

impl<W: Write> Interpreter<W> {
	pub fn with_output(output: W) -> Self { Self { environment: Box::default(), output } }

	pub fn output(&self) -> &W { &self.output }

	pub fn into_output(self) -> W { self.output }

	pub fn environment(&self) -> &Environment { &self.environment }

	/// Execute `statements` in order. The first runtime error stops the run.
	#[tracing::instrument(level = "debug", skip_all)]
	pub fn interpret(&mut self, statements: &[Statement<'_>]) -> Result<(), InterpreterError> {
		let result = statements.iter().try_for_each(|statement| self.execute(statement).map(drop));
		if let Err(e) = &result {
			tracing::debug!(error = %e, "interpretation stopped");
		}
		let flushed = self.output.flush().map_err(InterpreterError::from);
		result.and(flushed)
	}

	fn execute(&mut self, statement: &Statement<'_>) -> Result<Flow, InterpreterError> {
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(expression)?;
			}
			Statement::Print(expression) => {
				let value = self.evaluate(expression)?;
				writeln!(self.output, "{value}")?;
			}
			Statement::VarDeclaration { name_token, initializer } => {
				let value = match initializer {
					Some(initializer_expr) => self.evaluate(initializer_expr)?,
					None => Value::Nil,
				};
				self.environment.define(name_token, value);
			}
			Statement::Block(statements) => return self.execute_block(statements),
			Statement::If { condition, then_branch, else_branch } => {
				if self.evaluate(condition)?.to_bool() {
					return self.execute(then_branch);
				} else if let Some(else_branch) = else_branch {
					return self.execute(else_branch);
				}
			}
			Statement::While { condition, body } => {
				while self.evaluate(condition)?.to_bool() {
					if self.execute(body)? == Flow::Break {
						break;
					}
				}
			}
			Statement::Break(keyword) => {
				tracing::trace!(line = keyword.line, "break");
				return Ok(Flow::Break);
			}
			Statement::Continue(keyword) => {
				tracing::trace!(line = keyword.line, "continue");
				return Ok(Flow::Continue);
			}
		}
		Ok(Flow::Normal)
	}

	/// Run `statements` in a new scope nested in the current one. The outer
	/// scope is restored on every exit path, errors and loop control included.
	fn execute_block(&mut self, statements: &[Statement<'_>]) -> Result<Flow, InterpreterError> {
		let outer = std::mem::take(&mut self.environment);
		self.environment = Box::new(Environment::new(Some(outer)));
		tracing::trace!(depth = self.environment.depth(), "enter scope");

		let mut result = Ok(Flow::Normal);
		for statement in statements {
			result = self.execute(statement);
			if !matches!(result, Ok(Flow::Normal)) {
				break;
			}
		}

		if let Some(outer) = self.environment.outer.take() {
			self.environment = outer;
		}
		tracing::trace!(depth = self.environment.depth(), "exit scope");
		result
	}

	/// Evaluate the given expression and return its value.
	fn evaluate(&mut self, expr: &Expression<'_>) -> Result<Value, RuntimeError> {
		Ok(match expr {
			Literal(lit) => match lit {
				LiteralValue::Nil => Value::Nil,
				LiteralValue::Boolean(b) => Value::Boolean(*b),
				LiteralValue::Number(n) => Value::Number(*n),
				LiteralValue::StringLiteral(s) => Value::Str(s.to_string()),
			},
			Unary { operator, right } => {
				let right_value = self.evaluate(right)?;
				match (&operator.r#type, &right_value) {
					(TokenType::Minus, Value::Number(n)) => Value::Number(-n),
					(TokenType::Bang, v) => Value::Boolean(!v.to_bool()),
					_ => {
						return Err(RuntimeError::new(
							operator,
							RuntimeErrorType::OperandMustBeNumber(operator.lexeme.to_string()),
						));
					}
				}
			}
			Binary { left, operator, right } => {
				let left_value = self.evaluate(left)?;
				let right_value = self.evaluate(right)?;
				left_value.binary_op(operator, &right_value).map_err(|e| RuntimeError::new(operator, e))?
			}
			Logical { left, operator, right } => {
				let left_value = self.boolean_operand(left, operator)?;
				let decided = if matches!(operator.r#type, TokenType::Or) { left_value } else { !left_value };
				if decided { Value::Boolean(left_value) } else { Value::Boolean(self.boolean_operand(right, operator)?) }
			}
			Grouping(inner) => self.evaluate(inner)?,
			Variable(token) => self.environment.get(token).cloned().ok_or_else(|| {
				RuntimeError::new(token, RuntimeErrorType::UndefinedVariable(token.lexeme.to_string()))
			})?,
			Assign { target, value } => {
				let value = self.evaluate(value)?;
				self.environment.assign(target, value.clone())?;
				value
			}
		})
	}

	/// Evaluate an operand of `and`/`or`, which must be a boolean.
	fn boolean_operand(&mut self, operand: &Expression<'_>, operator: &Token<'_>) -> Result<bool, RuntimeError> {
		match self.evaluate(operand)? {
			Value::Boolean(b) => Ok(b),
			_ => Err(RuntimeError::new(operator, RuntimeErrorType::OperandMustBeBoolean(operator.lexeme.to_string()))),
		}
	}
}
