//! agents-proof CLI — record and verify a digest of the repository's agent docs.

use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "agents-proof",
    version,
    about = "Record and verify a digest of AGENTS.md and related docs"
)]
struct Cli {
    #[command(flatten)]
    args: agents_proof::cli::ProofArgs,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("error: {}", io);
            }
            std::process::exit(agents_proof::cli::parse_error_code(&e));
        }
    };
    let usage = Cli::command().render_help().to_string();
    match agents_proof::cli::run(&cli.args, &usage) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
