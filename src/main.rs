use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};

use quintet::source;

struct Config {
    input_path: PathBuf,
    timings: bool,
}

impl Config {
    fn from_args() -> Self {
        let matches = Command::new("quintet")
            .about("Counts how many players matched 2, 3, 4 or 5 winning numbers")
            .arg(
                Arg::new("input-file")
                    .help("File with one player per line, five numbers per player")
                    .value_parser(value_parser!(PathBuf))
                    .required(true),
            )
            .arg(
                Arg::new("quiet-timings")
                    .long("quiet-timings")
                    .help("Don't report per-query time on stderr")
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        let input_path = matches
            .get_one::<PathBuf>("input-file")
            .cloned()
            .unwrap_or_default();
        Self {
            input_path,
            timings: !matches.get_flag("quiet-timings"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_args();

    let build = source::load_index(&config.input_path)
        .with_context(|| format!("failed to index {:?}", config.input_path))?;
    for d in &build.diagnostics {
        eprintln!(
            "Warning: {} at player index {}, no numbers set for this player.",
            d.error, d.index
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "READY")?;
    out.flush()?;

    let stdin = io::stdin();
    let stderr = io::stderr();
    let mut err = stderr.lock();
    let timings: Option<&mut dyn Write> = if config.timings {
        Some(&mut err)
    } else {
        None
    };
    source::serve(&build.index, stdin.lock(), out, timings).context("failed to answer queries")?;
    Ok(())
}
