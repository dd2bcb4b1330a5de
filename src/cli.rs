//! CLI argument parsing via `clap`, plus the interactive prompt fallback.
//!
//! When both `--level` and `--version` are supplied the run proceeds
//! non-interactively (CI mode); otherwise the remaining inputs are asked
//! for on standard input, validating level and version until correct.

use crate::models::{OutputFormat, ScanRequest, WcagLevel, WcagVersion};
use crate::utils::warn_prefix;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "a11y-checker",
    about = "AI-assisted WCAG accessibility scanner",
    long_about = "Scans a source tree and asks an OpenAI-compatible model for a WCAG \
accessibility audit of every supported file, rendering results as a console \
table, console list, or PDF report.",
    after_help = "Examples:\n  a11y-checker --level AA --version 2.1\n  a11y-checker --level A --version 2.2 --format pdf --dir ./src",
    disable_version_flag = true
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(long, value_enum, help = "WCAG accessibility level")]
    pub level: Option<WcagLevel>,
    #[arg(long = "version", value_enum, help = "WCAG version")]
    pub wcag_version: Option<WcagVersion>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, help = "Output format")]
    pub format: OutputFormat,
    #[arg(long, default_value = ".", help = "Directory to scan")]
    pub dir: PathBuf,
}

/// Print `question`, flush, and read one trimmed line from stdin.
/// Errors with `UnexpectedEof` when stdin is closed so validation loops
/// terminate instead of spinning on empty reads.
pub fn prompt(question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    read_trimmed_line(&mut io::stdin().lock())
}

fn read_trimmed_line(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

/// Resolve the full [`ScanRequest`] from flags or interactive prompts.
pub fn resolve_inputs(cli: &Cli) -> anyhow::Result<ScanRequest> {
    if let (Some(level), Some(version)) = (cli.level, cli.wcag_version) {
        return Ok(ScanRequest {
            level,
            version,
            format: cli.format,
            root: cli.dir.clone(),
        });
    }

    println!("\n👋 Welcome to AI Accessibility Checker\n");

    let level = loop {
        let answer = prompt("🧩 Which WCAG accessibility level? (A / AA / AAA): ")?;
        match answer.parse::<WcagLevel>() {
            Ok(level) => break level,
            Err(_) => println!("{} Please enter a valid level (A / AA / AAA).", warn_prefix()),
        }
    };

    let version = loop {
        let answer = prompt("📘 Which WCAG version? (2.0 / 2.1 / 2.2): ")?;
        match answer.parse::<WcagVersion>() {
            Ok(version) => break version,
            Err(_) => println!(
                "{} Please enter a valid version (2.0 / 2.1 / 2.2).",
                warn_prefix()
            ),
        }
    };

    let answer = prompt("📊 How would you like results? (table / list / pdf): ")?;
    let format = answer.parse::<OutputFormat>().unwrap_or_else(|_| {
        println!("{} Invalid choice. Defaulting to 'table'.", warn_prefix());
        OutputFormat::Table
    });

    let answer = prompt("📂 Enter the directory path to scan (leave blank for current directory): ")?;
    let root = if answer.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(answer)
    };

    Ok(ScanRequest {
        level,
        version,
        format,
        root,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noninteractive_when_level_and_version_set() {
        let cli = Cli::parse_from([
            "a11y-checker",
            "--level",
            "AA",
            "--version",
            "2.1",
            "--format",
            "pdf",
            "--dir",
            "/tmp/site",
        ]);
        let request = resolve_inputs(&cli).unwrap();
        assert_eq!(request.level, WcagLevel::Aa);
        assert_eq!(request.version, WcagVersion::V2_1);
        assert_eq!(request.format, OutputFormat::Pdf);
        assert_eq!(request.root, PathBuf::from("/tmp/site"));
    }

    #[test]
    fn test_format_defaults_to_table() {
        let cli = Cli::parse_from(["a11y-checker", "--level", "A", "--version", "2.0"]);
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.dir, PathBuf::from("."));
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["a11y-checker", "--level", "B", "--version", "2.0"]).is_err());
    }

    #[test]
    fn test_read_trimmed_line_trims() {
        let mut input = io::Cursor::new("  AA  \n");
        assert_eq!(read_trimmed_line(&mut input).unwrap(), "AA");
    }

    #[test]
    fn test_read_trimmed_line_errors_at_eof() {
        let mut closed = io::Cursor::new("");
        let err = read_trimmed_line(&mut closed).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
