use std::{
	fs::read_to_string,
	io::{BufRead, Stdout, Write},
	path::Path,
};

use anyhow::Context;

use crate::{LoxError, interpreter::Interpreter, parser::Parser, scanner::Scanner};

/// Treelox drives the scanner, parser and interpreter over a source text.
///
/// Variables defined by one [`Treelox::run`] stay visible to the next, which
/// is what keeps REPL state alive between lines.
pub struct Treelox<W: Write = Stdout> {
	interpreter: Interpreter<W>,
	print_ast:   bool,
}

impl Treelox {
	/// Create a Treelox printing to stdout.
	pub fn new() -> Self { Self::with_output(std::io::stdout()) }
}

impl Default for Treelox {
	fn default() -> Self { Self::new() }
}

impl<W: Write> Treelox<W> {
	/// Create a Treelox printing program output to `output`.
	pub fn with_output(output: W) -> Self { Self { interpreter: Interpreter::with_output(output), print_ast: false } }

	/// Dump every parsed statement to stderr before it runs.
	pub fn print_ast(mut self, print_ast: bool) -> Self {
		self.print_ast = print_ast;
		self
	}

	pub fn output(&self) -> &W { self.interpreter.output() }

	pub fn into_output(self) -> W { self.interpreter.into_output() }

	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoxError> {
		let path = path.as_ref();
		let source = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
		tracing::debug!(path = %path.display(), bytes = source.len(), "loaded source file");
		self.run(&source)
	}

	/// Run the REPL prompt on stdin.
	pub fn run_prompt(&mut self) { self.repl(std::io::stdin().lock(), &mut std::io::stdout()) }

	/// Run the Treelox on the given source code.
	#[tracing::instrument(level = "debug", skip_all)]
	pub fn run(&mut self, source: &str) -> Result<(), LoxError> {
		let tokens = Scanner::new(source).scan_tokens()?;
		let statements = Parser::new(tokens).parse()?;
		if self.print_ast {
			for statement in &statements {
				eprintln!("{statement}");
			}
		}
		self.interpreter.interpret(&statements)?;

		Ok(())
	}

	/// Read lines from `input` until it runs dry, writing prompts to `prompt`.
	/// An error in one line is reported and the loop goes on.
	fn repl<R: BufRead, P: Write>(&mut self, mut input: R, prompt: &mut P) {
		let mut line = String::new();
		loop {
			line.clear();
			if let Err(e) = write!(prompt, "> ").and_then(|()| prompt.flush()) {
				eprintln!("Failed flush: {e}");
			}
			match input.read_line(&mut line) {
				Ok(0) => {
					if let Err(e) = writeln!(prompt, "\nExited treelox repl") {
						eprintln!("Failed write prompt: {e}");
					}
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			if let Err(e) = self.run(line.trim()) {
				eprintln!("Failed run prompt: {e}");
			}
		}
	}
}
