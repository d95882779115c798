use std::io::{self, Read, Write};
use std::process;

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::{LevelFilter, debug};
use serde_json::json;
use slre::Capture;

const EXIT_ERROR: i32 = 1;

/// Match a pattern against a subject and print where it ends.
#[derive(Parser, Debug)]
#[command(name = "slre", version, about)]
struct Cli {
    /// Pattern to match.
    pattern: String,

    /// Text to match against. Read from standard input when omitted.
    subject: Option<String>,

    /// Replace the first group of every match with TEXT and print the result.
    #[arg(short, long, value_name = "TEXT", conflicts_with = "json")]
    replace: Option<String>,

    /// Print the end offset and captures as JSON.
    #[arg(long)]
    json: bool,

    /// Log analysis and matching steps (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_subject(subject: Option<String>) -> anyhow::Result<Vec<u8>> {
    match subject {
        Some(subject) => Ok(subject.into_bytes()),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("can not read standard input")?;
            Ok(buf)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let subject = read_subject(cli.subject)?;
    debug!("subject of {} bytes", subject.len());

    let mut stdout = io::stdout().lock();

    if let Some(replacement) = cli.replace {
        let out = slre::replace(&cli.pattern, &subject, replacement.as_bytes())?;
        stdout.write_all(&out)?;
        writeln!(stdout)?;
        return Ok(());
    }

    let mut caps = vec![Capture::default(); slre::capture_count(&cli.pattern)?];
    let end = slre::matches(&cli.pattern, &subject, Some(&mut caps))?;

    // A group that took part in the match always consumed input
    let captures: Vec<Option<Capture>> = caps
        .iter()
        .map(|cap| (cap.len > 0).then_some(*cap))
        .collect();

    if cli.json {
        writeln!(stdout, "{}", json!({ "end": end, "captures": captures }))?;
        return Ok(());
    }

    writeln!(stdout, "end: {end}")?;
    for (i, cap) in captures.iter().enumerate() {
        match cap {
            Some(cap) => writeln!(
                stdout,
                "{}: {}..{} \"{}\"",
                i + 1,
                cap.start,
                cap.end(),
                cap.as_bytes(&subject).escape_ascii()
            )?,
            None => writeln!(stdout, "{}: -", i + 1)?,
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(EXIT_ERROR);
    }
}
