//! Verdict operator CLI.
//!
//! Lists the built-in plugin catalog, checks that components can be
//! constructed from the configured secrets (reporting every missing
//! value in one pass), and runs offline annotations for smoke-testing
//! a deployment.

mod resolve;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use vd_plugins::{
    builtin_annotators, builtin_suts, Completion, Prompt, LLAMA_GUARD_MOCK_UID,
};
use vd_registry::RegistryError;
use vd_secrets::{MissingConfigValues, RawConfig};

use crate::resolve::resolve_secrets;

/// Verdict - safety-evaluation plugin harness
#[derive(Parser)]
#[command(name = "verdict")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the secrets file (two-level JSON mapping)
    #[arg(long, global = true)]
    secrets: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered annotator and SUT uids
    List,

    /// Verify that components can be constructed from the secrets file
    Check {
        /// Annotator uids to check (default: all)
        uids: Vec<String>,
    },

    /// Run one annotation through a built-in annotator (offline)
    Annotate {
        /// Annotator uid
        #[arg(long, default_value = LLAMA_GUARD_MOCK_UID)]
        uid: String,

        /// Prompt text
        #[arg(long)]
        prompt: String,

        /// Completion text to judge
        #[arg(long)]
        completion: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List => {
            let annotators = builtin_annotators()?;
            let suts = builtin_suts()?;
            println!("annotators:");
            for uid in annotators.known_uids() {
                println!("  {}", uid);
            }
            println!("suts:");
            for uid in suts.known_uids() {
                println!("  {}", uid);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { uids } => {
            let raw = load_secrets(cli.secrets.as_deref())?;
            run_check(&raw, &uids)
        }

        Commands::Annotate {
            uid,
            prompt,
            completion,
        } => {
            let raw = load_secrets(cli.secrets.as_deref())?;
            let annotators = builtin_annotators()?;
            let annotator = annotators.make_instance(&uid, &raw)?;
            let annotation =
                annotator.annotate_pair(&Prompt::new(prompt), &Completion::new(completion))?;
            println!("{}", serde_json::to_string_pretty(&annotation)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Construct every requested component, merging all missing-config
/// failures into one report instead of stopping at the first.
fn run_check(raw: &RawConfig, uids: &[String]) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let annotators = builtin_annotators()?;
    let targets: Vec<String> = if uids.is_empty() {
        annotators
            .known_uids()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        uids.to_vec()
    };

    let mut missing: Vec<MissingConfigValues> = Vec::new();
    for uid in &targets {
        match annotators.make_instance(uid, raw) {
            Ok(_) => println!("{}: ok", uid),
            Err(RegistryError::MissingConfig(error)) => {
                println!("{}: missing configuration", uid);
                missing.push(error);
            }
            Err(error) => return Err(error.into()),
        }
    }

    if missing.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", MissingConfigValues::combine(missing));
        Ok(ExitCode::FAILURE)
    }
}

/// Load the raw secrets mapping from the resolved path, or fall back
/// to an empty mapping when no file exists anywhere.
fn load_secrets(cli_path: Option<&std::path::Path>) -> Result<RawConfig, Box<dyn std::error::Error>> {
    let (path, source) = resolve_secrets(cli_path);
    match path {
        Some(path) => {
            debug!(target: "verdict::cli", path = %path.display(), %source, "loading secrets");
            Ok(RawConfig::from_file(&path)?)
        }
        None => {
            debug!(target: "verdict::cli", %source, "no secrets file found");
            Ok(RawConfig::new())
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
