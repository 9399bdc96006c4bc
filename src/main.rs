use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use treelox::cli::*;

fn main() -> ExitCode {
	init_tracing();
	let cli = Cli::parse();
	let mut treelox = treelox::Treelox::new().print_ast(cli.print_ast);

	match cli.mode {
		Mode::File { path } => {
			if let Err(e) = treelox.run_file(&path) {
				eprintln!("Failed run file: {e}");
				return ExitCode::from(e.exit_code());
			}
		}
		Mode::Repl => treelox.run_prompt(),
	}
	ExitCode::SUCCESS
}

/// Logs go to stderr, filtered by `TREELOX_LOG`, then `RUST_LOG`, then `warn`.
fn init_tracing() {
	let filter = EnvFilter::try_from_env("TREELOX_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}
