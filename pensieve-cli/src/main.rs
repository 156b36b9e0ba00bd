//! pnsv - Pensieve container checker
//!
//! Verifies that files are well-formed Pensieve containers, optionally
//! dumping every field on the way.

mod commands;

use clap::{CommandFactory, Parser};
use commands::{check_file, dump_file};
use pensieve_archive::{MAJOR, MINOR};
use pensieve_core::ErrorCode;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

/// Long flags that are also accepted with a single dash.
const SINGLE_DASH_FLAGS: &[&str] = &["-help", "-version", "-verbose", "-check"];

#[derive(Parser, Debug)]
#[command(name = "pnsv")]
#[command(about = "Pensieve container checker")]
#[command(override_usage = "pnsv [OPTIONS] <files>...")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Prints this message
    #[arg(long)]
    help: bool,

    /// Prints the version of the container format
    #[arg(long)]
    version: bool,

    /// Dumps every field while checking
    #[arg(long)]
    verbose: bool,

    /// Checks the file correctness
    #[arg(long)]
    check: bool,

    /// Container files
    files: Vec<PathBuf>,
}

fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();
    if args.len() <= 1 {
        print_usage();
        std::process::exit(-1);
    }

    let cli = match Cli::try_parse_from(normalize_args(args)) {
        Ok(cli) => cli,
        Err(e) => {
            eprint!("{}", e);
            print_usage();
            std::process::exit(-1);
        }
    };

    init_tracing(cli.verbose);

    if cli.help {
        print_usage();
        std::process::exit(0);
    }
    if cli.version {
        print_version();
        std::process::exit(0);
    }
    if !cli.check {
        print_usage();
        std::process::exit(-1);
    }

    match cmd_check(&cli.files, cli.verbose) {
        Ok(0) => {}
        Ok(failed) => {
            tracing::warn!("{} of {} files failed", failed, cli.files.len());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Check every file, returning how many did not load cleanly.
fn cmd_check(files: &[PathBuf], verbose: bool) -> io::Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut failed = 0;
    for file in files {
        let code = if verbose {
            dump_file(file, &mut out)?
        } else {
            check_file(file, &mut out)?
        };
        if code != ErrorCode::Ok {
            failed += 1;
        }
    }
    Ok(failed)
}

/// Rewrite `-flag` into `--flag` for the known long flags.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let single_dash = arg
                .to_str()
                .is_some_and(|s| SINGLE_DASH_FLAGS.contains(&s));
            if single_dash {
                let mut long = OsString::from("-");
                long.push(&arg);
                long
            } else {
                arg
            }
        })
        .collect()
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn print_version() {
    println!("Pensieve cli interface");
    println!("Version: {}.{}", MAJOR, MINOR);
}

fn print_usage() {
    print_version();
    println!();
    println!("{}", Cli::command().render_help());
}
