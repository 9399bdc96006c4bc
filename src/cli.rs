use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "treelox", version, after_long_help = "A tree-walking interpreter for a subset of Lox.")]
pub struct Cli {
	/// Print the parsed statements to stderr before running them
	#[arg(long, global = true)]
	pub print_ast: bool,
	#[command(subcommand)]
	pub mode:      Mode,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Mode {
	/// Input file
	File { path: PathBuf },
	/// Input prompt
	Repl,
}
