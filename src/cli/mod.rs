//! AP-007: CLI — `--refresh` and `--check` against the proof record.

use crate::core::{parser, state, types};
use crate::tripwire::{drift, eventlog};
use clap::Args;
use std::path::{Path, PathBuf};

/// Remediation hint printed after a failed check.
pub const REFRESH_HINT: &str = "Run: agents-proof --refresh";

#[derive(Args, Debug, Clone, Default)]
pub struct ProofArgs {
    /// Recompute the digest and overwrite the proof record
    #[arg(long)]
    pub refresh: bool,

    /// Verify the proof record matches the current digest (exit 1 on drift)
    #[arg(long)]
    pub check: bool,

    /// Repository root the watched documents resolve against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// YAML config (default: <root>/.agents-proof.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Append a JSONL audit event per run to this file
    #[arg(long)]
    pub event_log: Option<PathBuf>,
}

/// Operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Refresh,
    Check,
}

impl ProofArgs {
    /// Selected mode. `--refresh` wins when both flags are given.
    pub fn mode(&self) -> Option<Mode> {
        if self.refresh {
            Some(Mode::Refresh)
        } else if self.check {
            Some(Mode::Check)
        } else {
            None
        }
    }
}

/// Entry point: run the selected mode, or print `usage` and return 1.
pub fn run(args: &ProofArgs, usage: &str) -> Result<i32, String> {
    match args.mode() {
        Some(mode) => dispatch(mode, args),
        None => {
            println!("{}", usage);
            Ok(1)
        }
    }
}

/// Exit code for a failed argument parse. `--help`/`--version` exit 0,
/// everything else (unknown flags, bad values) exits 1.
pub fn parse_error_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Run the selected mode and return the process exit code.
pub fn dispatch(mode: Mode, args: &ProofArgs) -> Result<i32, String> {
    let config = parser::load_config(&args.root, args.config.as_deref())?;
    let event_log = args.event_log.as_deref();
    match mode {
        Mode::Refresh => cmd_refresh(&config, event_log),
        Mode::Check => cmd_check(&config, event_log),
    }
}

fn cmd_refresh(config: &types::ProofConfig, event_log: Option<&Path>) -> Result<i32, String> {
    let report = state::refresh_proof(config)?;
    println!("AGENTS proof refreshed: {}", report.digest);
    for name in &report.missing {
        eprintln!("  warning: watched document {} is missing", name);
    }

    if let Some(path) = event_log {
        let event = eventlog::refreshed_event(&report, &config.proof_file, config.watched.len());
        eventlog::append_event(path, event)?;
    }
    Ok(0)
}

fn cmd_check(config: &types::ProofConfig, event_log: Option<&Path>) -> Result<i32, String> {
    let outcome = drift::check_proof(config)?;
    for line in outcome_lines(&outcome) {
        println!("{}", line);
    }

    if let Some(path) = event_log {
        eventlog::append_event(path, eventlog::checked_event(&outcome))?;
    }
    Ok(outcome.exit_code())
}

/// Human-readable status lines for a check outcome.
pub fn outcome_lines(outcome: &types::ProofOutcome) -> Vec<String> {
    match outcome {
        types::ProofOutcome::Valid { digest } => {
            vec![format!("AGENTS proof valid: {}", digest)]
        }
        types::ProofOutcome::Missing { .. } => {
            vec![format!("AGENTS proof missing. {}", REFRESH_HINT)]
        }
        types::ProofOutcome::Mismatch { expected, current } => {
            let shown = if current.is_empty() {
                "<empty>"
            } else {
                current.as_str()
            };
            vec![
                "AGENTS proof is outdated.".to_string(),
                format!("Expected: {}", expected),
                format!("Current : {}", shown),
                REFRESH_HINT.to_string(),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ProofOutcome, DEFAULT_CONFIG_FILE, DEFAULT_WATCHED};
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "agents-proof", version)]
    struct TestCli {
        #[command(flatten)]
        args: ProofArgs,
    }

    fn args_for(root: &Path) -> ProofArgs {
        ProofArgs {
            root: root.to_path_buf(),
            ..ProofArgs::default()
        }
    }

    fn seed(root: &Path) {
        for name in DEFAULT_WATCHED {
            std::fs::write(root.join(name), "hello\n").unwrap();
        }
    }

    #[test]
    fn test_ap007_mode_selection() {
        let mut args = ProofArgs::default();
        assert_eq!(args.mode(), None);
        args.check = true;
        assert_eq!(args.mode(), Some(Mode::Check));
        args.refresh = true;
        assert_eq!(args.mode(), Some(Mode::Refresh), "refresh takes precedence");
    }

    #[test]
    fn test_ap007_no_mode_exit_1() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let cli = TestCli::try_parse_from(["agents-proof", "--root", "."]).unwrap();
        assert_eq!(cli.args.mode(), None);

        let args = args_for(dir.path());
        assert_eq!(run(&args, "usage: agents-proof [--refresh|--check]").unwrap(), 1);
        assert!(!dir.path().join(".agents-proof").exists());
    }

    #[test]
    fn test_ap007_run_both_flags_refreshes() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let cli = TestCli::try_parse_from([
            "agents-proof",
            "--check",
            "--refresh",
            "--root",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(run(&cli.args, "").unwrap(), 0);
        assert!(dir.path().join(".agents-proof").exists());
    }

    #[test]
    fn test_ap007_unknown_flag_exit_1() {
        let err = TestCli::try_parse_from(["agents-proof", "--bogus"]).unwrap_err();
        assert_eq!(parse_error_code(&err), 1);

        let err = TestCli::try_parse_from(["agents-proof", "--help"]).unwrap_err();
        assert_eq!(parse_error_code(&err), 0);
    }

    #[test]
    fn test_ap007_check_missing_record_exit_1() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let code = dispatch(Mode::Check, &args_for(dir.path())).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn test_ap007_refresh_then_check() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let args = args_for(dir.path());

        assert_eq!(dispatch(Mode::Refresh, &args).unwrap(), 0);
        let raw = std::fs::read_to_string(dir.path().join(".agents-proof")).unwrap();
        assert_eq!(raw, "70A6F82D0E9D2EE1F5AE\n");
        assert_eq!(dispatch(Mode::Check, &args).unwrap(), 0);

        // Refresh again without edits: still valid
        assert_eq!(dispatch(Mode::Refresh, &args).unwrap(), 0);
        assert_eq!(dispatch(Mode::Check, &args).unwrap(), 0);
    }

    #[test]
    fn test_ap007_drift_exit_1() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let args = args_for(dir.path());
        dispatch(Mode::Refresh, &args).unwrap();

        std::fs::write(dir.path().join("ARCHITECTURE.md"), "changed\n").unwrap();
        assert_eq!(dispatch(Mode::Check, &args).unwrap(), 1);
    }

    #[test]
    fn test_ap007_refresh_all_missing_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let code = dispatch(Mode::Refresh, &args_for(dir.path())).unwrap();
        assert_eq!(code, 0);
        assert!(dir.path().join(".agents-proof").exists());
    }

    #[test]
    fn test_ap007_implicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "proof_file: docs.proof\nwatched: [README.md]\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("README.md"), "readme").unwrap();
        let args = args_for(dir.path());

        dispatch(Mode::Refresh, &args).unwrap();
        assert!(dir.path().join("docs.proof").exists());
        assert!(!dir.path().join(".agents-proof").exists());
        assert_eq!(dispatch(Mode::Check, &args).unwrap(), 0);
    }

    #[test]
    fn test_ap007_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("proof.yaml");
        std::fs::write(&cfg, "watched: []\n").unwrap();
        let args = ProofArgs {
            config: Some(cfg),
            ..args_for(dir.path())
        };
        assert!(dispatch(Mode::Check, &args).is_err());
    }

    #[test]
    fn test_ap007_unwritable_proof_is_error() {
        let dir = tempfile::tempdir().unwrap();
        // Proof path occupied by a directory: rename cannot replace it
        std::fs::create_dir(dir.path().join(".agents-proof")).unwrap();
        std::fs::write(dir.path().join(".agents-proof").join("keep"), "x").unwrap();
        let result = dispatch(Mode::Refresh, &args_for(dir.path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_ap007_event_log_written() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let log = dir.path().join("audit/events.jsonl");
        let args = ProofArgs {
            event_log: Some(log.clone()),
            ..args_for(dir.path())
        };
        dispatch(Mode::Refresh, &args).unwrap();
        dispatch(Mode::Check, &args).unwrap();

        let content = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("proof_refreshed"));
        assert!(lines[1].contains("proof_checked"));
        assert!(lines[1].contains("\"outcome\":\"valid\""));
    }

    #[test]
    fn test_ap007_outcome_lines() {
        let valid = outcome_lines(&ProofOutcome::Valid {
            digest: "ABC".to_string(),
        });
        assert_eq!(valid, vec!["AGENTS proof valid: ABC"]);

        let missing = outcome_lines(&ProofOutcome::Missing {
            expected: "ABC".to_string(),
        });
        assert_eq!(missing.len(), 1);
        assert!(missing[0].starts_with("AGENTS proof missing."));
        assert!(missing[0].contains("--refresh"));

        let empty = outcome_lines(&ProofOutcome::Mismatch {
            expected: "ABC".to_string(),
            current: String::new(),
        });
        assert_eq!(empty[1], "Expected: ABC");
        assert_eq!(empty[2], "Current : <empty>");
        assert_eq!(empty[3], REFRESH_HINT);
    }
}
