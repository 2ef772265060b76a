//! Command-line front end for the matrix operations dialog.
//!
//! Loads a TOML job, lays out an in-memory form for the job's mode, runs
//! the operation and prints the visible result fields.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, ValueEnum};
use matops::{FieldGroup, Job, MemoryForm, Mode, SessionState, MAX_DECIMALS};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    fn use_ansi(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal(),
        }
    }
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The TOML job file to run
    job: PathBuf,
    /// Override the job's mode
    #[arg(short, long)]
    mode: Option<Mode>,
    /// Override the number of decimals written to result fields
    #[arg(
        short,
        long,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_DECIMALS as u64),
    )]
    decimals: Option<usize>,
    /// Whether or not colored log output should be used
    #[arg(short, long, value_enum, default_value_t = Color::Auto)]
    color: Color,
}

fn main() {
    let args = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(args.color.use_ansi())
                .with_writer(std::io::stderr),
        )
        .init();

    let mut job = match Job::load(&args.job) {
        Ok(job) => {
            info!(path = ?args.job, mode = %job.mode, "loaded job file");
            job
        }
        Err(matops::MatopsError::IoError(err)) => {
            error!(path = ?args.job, %err, "failed to read job file");
            exit(2);
        }
        Err(err) => {
            error!(path = ?args.job, %err, "failed to parse job file");
            exit(3);
        }
    };
    if let Some(mode) = args.mode {
        job.mode = mode;
    }
    if let Some(decimals) = args.decimals {
        job.settings.decimals = decimals;
    }

    let mut form = MemoryForm::new(job.settings.decimals);
    let mut session = SessionState::default();
    session.configure(job.mode, &mut form, &job.settings);

    if let Err(err) = job.fill_form(session.mode(), &mut form) {
        error!(%err, mode = %job.mode, expected = %job.first_shape(), "job inputs do not fit the mode");
        eprintln!("{}", err.user_message());
        exit(4);
    }

    match session.execute(&mut form, &job.settings) {
        Ok(value) => {
            info!(shape = %value.shape(), "operation succeeded");
            print!("{}", form.render(FieldGroup::Result));
        }
        Err(err) => {
            error!(%err, "operation failed");
            eprintln!("{}", err.user_message());
            exit(4);
        }
    }
}
