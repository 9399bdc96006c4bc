use std::{cmp::Ordering, fmt::Display};

use Value::*;

use crate::{error::interpreter::RuntimeErrorType, scanner::{Token, TokenType}};

/// Value represents a runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Nil,
	Boolean(bool),
	Number(f64),
	Str(String),
}

/// How a value prints: `nil`, `true`/`false`, numbers in their shortest
/// round-trip form without a forced `.0`, and strings as their raw text.
impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Nil => write!(f, "nil"),
			Boolean(b) => write!(f, "{b}"),
			Number(n) => write!(f, "{n}"),
			Str(s) => write!(f, "{s}"),
		}
	}
}

impl Value {
	/// Performs a binary operation between two values.
	pub fn binary_op(&self, operator: &Token<'_>, right: &Self) -> Result<Value, RuntimeErrorType> {
		use TokenType::*;

		let op = || operator.lexeme.to_string();
		match operator.r#type {
			Plus => self.plus(right).ok_or_else(|| RuntimeErrorType::OperandsMustMatch(op())),
			Minus => self.minus(right).ok_or_else(|| RuntimeErrorType::OperandsMustBeNumbers(op())),
			Star => self.star(right).ok_or_else(|| RuntimeErrorType::OperandsMustBeNumbers(op())),
			Slash => self.slash(right).ok_or_else(|| RuntimeErrorType::OperandsMustBeNumbers(op())),
			Greater | GreaterEqual | Less | LessEqual => {
				let ordering = self.compare(right).ok_or_else(|| RuntimeErrorType::OperandsMustMatch(op()))?;
				Ok(Boolean(ordering.is_some_and(|ordering| match operator.r#type {
					Greater => ordering.is_gt(),
					GreaterEqual => ordering.is_ge(),
					Less => ordering.is_lt(),
					_ => ordering.is_le(),
				})))
			}
			EqualEqual => Ok(Boolean(self.equal(right))),
			BangEqual => Ok(Boolean(!self.equal(right))),
			_ => Err(RuntimeErrorType::OperandsMustMatch(op())),
		}
	}

	/// Determines if the value is considered "true" in a boolean context.
	pub fn to_bool(&self) -> bool {
		match self {
			Nil => false,
			Boolean(b) => *b,
			Str(s) => !s.is_empty(),
			Number(n) => *n != 0.0,
		}
	}

	/// Tries to add two numbers or concatenate two strings.
	pub fn plus(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Number(l), Number(r)) => Some(Number(l + r)),
			(Str(l), Str(r)) => Some(Str(format!("{l}{r}"))),
			_ => None,
		}
	}

	/// Tries to subtract two values.
	pub fn minus(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Number(l), Number(r)) => Some(Number(l - r)),
			_ => None,
		}
	}

	/// Tries to multiply two values together.
	pub fn star(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Number(l), Number(r)) => Some(Number(l * r)),
			_ => None,
		}
	}

	/// Tries to divide two values. Division by zero follows IEEE 754.
	pub fn slash(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Number(l), Number(r)) => Some(Number(l / r)),
			_ => None,
		}
	}

	/// Orders two numbers or two strings, `None` for any other pair. NaN is
	/// unordered, so every comparison against it is false.
	fn compare(&self, other: &Self) -> Option<Option<Ordering>> {
		match (self, other) {
			(Number(l), Number(r)) => Some(l.partial_cmp(r)),
			(Str(l), Str(r)) => Some(Some(l.cmp(r))),
			_ => None,
		}
	}

	/// Structural equality. Values of different kinds are never equal.
	pub fn equal(&self, other: &Self) -> bool {
		match (self, other) {
			(Nil, Nil) => true,
			(Boolean(l), Boolean(r)) => l == r,
			(Number(l), Number(r)) => l == r,
			(Str(l), Str(r)) => l == r,
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn operator(lexeme: &str) -> Token<'_> {
		let r#type = match lexeme {
			"+" => TokenType::Plus,
			"-" => TokenType::Minus,
			"*" => TokenType::Star,
			"/" => TokenType::Slash,
			"<" => TokenType::Less,
			"<=" => TokenType::LessEqual,
			">" => TokenType::Greater,
			">=" => TokenType::GreaterEqual,
			"==" => TokenType::EqualEqual,
			"!=" => TokenType::BangEqual,
			_ => unreachable!("not a binary operator: {lexeme}"),
		};
		Token::new(r#type, lexeme, 1, 1)
	}

	fn apply(left: Value, op: &str, right: Value) -> Result<Value, RuntimeErrorType> {
		left.binary_op(&operator(op), &right)
	}

	#[test]
	fn display() {
		assert_eq!(Nil.to_string(), "nil");
		assert_eq!(Boolean(true).to_string(), "true");
		assert_eq!(Number(3.0).to_string(), "3");
		assert_eq!(Number(2.5).to_string(), "2.5");
		assert_eq!(Number(-0.125).to_string(), "-0.125");
		assert_eq!(Number(0.1 + 0.2).to_string(), "0.30000000000000004");
		assert_eq!(Number(1e21).to_string(), "1000000000000000000000");
		assert_eq!(Str("raw \"text\"".to_string()).to_string(), "raw \"text\"");
	}

	#[test]
	fn truthiness() {
		assert!(!Nil.to_bool());
		assert!(!Boolean(false).to_bool());
		assert!(Boolean(true).to_bool());
		assert!(!Number(0.0).to_bool());
		assert!(!Number(-0.0).to_bool());
		assert!(Number(-1.0).to_bool());
		assert!(!Str(String::new()).to_bool());
		assert!(Str("0".to_string()).to_bool());
	}

	#[test]
	fn arithmetic() {
		assert_eq!(apply(Number(1.0), "+", Number(2.0)), Ok(Number(3.0)));
		assert_eq!(apply(Number(10.0), "-", Number(3.0)), Ok(Number(7.0)));
		assert_eq!(apply(Number(4.0), "*", Number(2.5)), Ok(Number(10.0)));
		assert_eq!(apply(Number(1.0), "/", Number(4.0)), Ok(Number(0.25)));
		assert_eq!(apply(Str("a".into()), "+", Str("b".into())), Ok(Str("ab".into())));
	}

	#[test]
	fn arithmetic_type_errors() {
		assert_eq!(apply(Number(1.0), "+", Boolean(true)), Err(RuntimeErrorType::OperandsMustMatch("+".into())));
		assert_eq!(apply(Str("a".into()), "+", Number(1.0)), Err(RuntimeErrorType::OperandsMustMatch("+".into())));
		assert_eq!(apply(Str("a".into()), "-", Str("b".into())), Err(RuntimeErrorType::OperandsMustBeNumbers("-".into())));
		assert_eq!(apply(Nil, "*", Number(1.0)), Err(RuntimeErrorType::OperandsMustBeNumbers("*".into())));
		assert_eq!(apply(Number(1.0), "/", Nil), Err(RuntimeErrorType::OperandsMustBeNumbers("/".into())));
	}

	#[test]
	fn division_by_zero() {
		assert_eq!(apply(Number(1.0), "/", Number(0.0)), Ok(Number(f64::INFINITY)));
		assert_eq!(apply(Number(-1.0), "/", Number(0.0)), Ok(Number(f64::NEG_INFINITY)));
		match apply(Number(0.0), "/", Number(0.0)) {
			Ok(Number(n)) => assert!(n.is_nan()),
			other => panic!("expected NaN, got {other:?}"),
		}
	}

	#[test]
	fn comparison() {
		assert_eq!(apply(Number(1.0), "<", Number(2.0)), Ok(Boolean(true)));
		assert_eq!(apply(Number(2.0), "<=", Number(2.0)), Ok(Boolean(true)));
		assert_eq!(apply(Number(1.0), ">", Number(2.0)), Ok(Boolean(false)));
		assert_eq!(apply(Number(2.0), ">=", Number(3.0)), Ok(Boolean(false)));
		assert_eq!(apply(Str("apple".into()), "<", Str("banana".into())), Ok(Boolean(true)));
		assert_eq!(apply(Str("b".into()), ">=", Str("b".into())), Ok(Boolean(true)));
		assert_eq!(apply(Number(1.0), "<", Str("2".into())), Err(RuntimeErrorType::OperandsMustMatch("<".into())));
		assert_eq!(apply(Nil, ">", Nil), Err(RuntimeErrorType::OperandsMustMatch(">".into())));
	}

	#[test]
	fn comparison_with_nan_is_false() {
		for op in ["<", "<=", ">", ">="] {
			assert_eq!(apply(Number(f64::NAN), op, Number(1.0)), Ok(Boolean(false)), "NaN {op} 1");
			assert_eq!(apply(Number(1.0), op, Number(f64::NAN)), Ok(Boolean(false)), "1 {op} NaN");
		}
	}

	#[test]
	fn equality() {
		assert_eq!(apply(Nil, "==", Nil), Ok(Boolean(true)));
		assert_eq!(apply(Nil, "==", Boolean(false)), Ok(Boolean(false)));
		assert_eq!(apply(Str("a".into()), "==", Str("a".into())), Ok(Boolean(true)));
		assert_eq!(apply(Number(1.0), "==", Str("1".into())), Ok(Boolean(false)));
		assert_eq!(apply(Number(1.0), "!=", Number(2.0)), Ok(Boolean(true)));
		assert_eq!(apply(Boolean(true), "!=", Boolean(true)), Ok(Boolean(false)));
	}
}
