//! Lexical scopes.
//!
//! Each block gets its own `Environment` whose `outer` is the scope the block
//! appears in. The chain is an owned tree: a child frame owns its parent while
//! it is the current frame, and hands it back when the block ends.

use std::collections::HashMap;

use crate::{error::interpreter::{RuntimeError, RuntimeErrorType}, interpreter::value::Value, scanner::Token};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
	variables: HashMap<String, Value>,
	pub outer: Option<Box<Environment>>,
}

impl Environment {
	pub fn new(outer: Option<Box<Environment>>) -> Self { Self { variables: HashMap::new(), outer } }

	/// A variable statement doesn’t just define a new variable, it can also be
	/// used to redefine an existing variable.
	pub fn define(&mut self, token: &Token<'_>, value: Value) { self.variables.insert(token.lexeme.to_string(), value); }

	/// Look a variable up, walking outwards from this frame.
	pub fn get(&self, token: &Token<'_>) -> Option<&Value> {
		self.variables.get(token.lexeme).or_else(|| self.outer.as_ref().and_then(|env| env.get(token)))
	}

	/// Assign a value to an existing variable in the nearest frame that has it.
	pub fn assign(&mut self, token: &Token<'_>, value: Value) -> Result<(), RuntimeError> {
		if let Some(v) = self.variables.get_mut(token.lexeme) {
			*v = value;
			Ok(())
		} else if let Some(outer) = self.outer.as_mut() {
			outer.assign(token, value)
		} else {
			Err(RuntimeError::new(token, RuntimeErrorType::UndefinedVariable(token.lexeme.to_string())))
		}
	}

	/// Number of frames enclosing this one; the global frame has depth 0.
	pub fn depth(&self) -> usize { self.outer.as_ref().map_or(0, |outer| outer.depth() + 1) }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::TokenType;

	fn name(lexeme: &str) -> Token<'_> { Token::new(TokenType::Identifier(lexeme), lexeme, 3, 5) }

	#[test]
	fn define_and_get() {
		let mut env = Environment::default();
		assert_eq!(env.get(&name("a")), None);
		env.define(&name("a"), Value::Number(1.0));
		assert_eq!(env.get(&name("a")), Some(&Value::Number(1.0)));
		env.define(&name("a"), Value::Str("again".to_string()));
		assert_eq!(env.get(&name("a")), Some(&Value::Str("again".to_string())));
	}

	#[test]
	fn get_walks_outwards() {
		let mut global = Environment::default();
		global.define(&name("a"), Value::Boolean(true));
		let mut inner = Environment::new(Some(Box::new(global)));
		inner.define(&name("b"), Value::Nil);
		assert_eq!(inner.get(&name("a")), Some(&Value::Boolean(true)));
		assert_eq!(inner.get(&name("b")), Some(&Value::Nil));
		assert_eq!(inner.depth(), 1);
	}

	#[test]
	fn define_shadows_outer() {
		let mut global = Environment::default();
		global.define(&name("a"), Value::Number(1.0));
		let mut inner = Environment::new(Some(Box::new(global)));
		inner.define(&name("a"), Value::Number(2.0));
		assert_eq!(inner.get(&name("a")), Some(&Value::Number(2.0)));
		let global = inner.outer.take().unwrap();
		assert_eq!(global.get(&name("a")), Some(&Value::Number(1.0)));
	}

	#[test]
	fn assign_updates_nearest_frame() {
		let mut global = Environment::default();
		global.define(&name("a"), Value::Number(1.0));
		let mut inner = Environment::new(Some(Box::new(global)));
		inner.assign(&name("a"), Value::Number(2.0)).unwrap();
		assert_eq!(inner.get(&name("a")), Some(&Value::Number(2.0)));
		assert!(inner.variables.is_empty());
		let global = inner.outer.take().unwrap();
		assert_eq!(global.get(&name("a")), Some(&Value::Number(2.0)));
	}

	#[test]
	fn assign_undefined() {
		let mut env = Environment::new(Some(Box::default()));
		let error = env.assign(&name("missing"), Value::Nil).unwrap_err();
		assert_eq!(error.r#type(), &RuntimeErrorType::UndefinedVariable("missing".to_string()));
		assert_eq!((error.line(), error.column()), (3, 5));
		assert_eq!(env.get(&name("missing")), None);
	}
}
