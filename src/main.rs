//! a11y-checker binary entry point.
//! Gates on transmission consent and an API credential, resolves inputs,
//! then runs the scan pipeline and prints or exports results.

use a11y_checker::cli::{self, Cli};
use a11y_checker::models::{OutputFormat, ScanResult};
use a11y_checker::utils::{error_prefix, info_prefix, success_prefix, warn_prefix};
use a11y_checker::{config, discovery, output, pdf, scanner};
use clap::Parser;
use std::path::Path;

/// Set to the literal "true" to skip the interactive consent prompt.
const ACK_ENV: &str = "AI_CHECKER_ACKNOWLEDGED";
const API_KEY_ENV: &str = "OPENAI_API_KEY";

fn main() {
    let cli = Cli::parse();

    if !confirm_transmission() {
        println!("Exiting. You must acknowledge before running.");
        return;
    }

    let api_key = match load_api_key() {
        Some(key) => key,
        None => {
            eprintln!(
                "{} OpenAI API key not found in .env file or environment variable.",
                error_prefix()
            );
            eprintln!("Please create a .env file with:\n\n  OPENAI_API_KEY=your_key_here");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&cli, api_key) {
        eprintln!("{} {:#}", error_prefix(), e);
        std::process::exit(1);
    }
}

/// Consent gate: file contents are sent to a third-party API, so require
/// an explicit acknowledgment unless the env flag is already set.
fn confirm_transmission() -> bool {
    if std::env::var(ACK_ENV).map(|v| v == "true").unwrap_or(false) {
        return true;
    }
    println!(
        "{} This tool sends your code snippets to the OpenAI API for processing.",
        warn_prefix()
    );
    println!("Please ensure your project has no contractual or compliance restrictions before continuing.");
    match cli::prompt("Do you acknowledge and wish to continue? (yes/no): ") {
        Ok(answer) => answer.eq_ignore_ascii_case("yes"),
        Err(_) => false,
    }
}

/// Credential from the environment, falling back to a local `.env` file.
fn load_api_key() -> Option<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            return Some(key);
        }
    }
    let _ = dotenvy::dotenv();
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

fn run(cli: &Cli, api_key: String) -> anyhow::Result<()> {
    let request = cli::resolve_inputs(cli)?;

    let (cfg, found) = config::load(Path::new("."))?;
    if !found {
        eprintln!(
            "{} No {} found. Using default settings.",
            warn_prefix(),
            config::CONFIG_FILE
        );
    }

    let files = discovery::find_supported_files(&request.root, &cfg);
    if files.is_empty() {
        println!(
            "{} No supported files found in the specified directory.",
            warn_prefix()
        );
        return Ok(());
    }

    println!(
        "\n{} Scanning {} file(s) for WCAG {} ({}) issues...\n",
        info_prefix(),
        files.len(),
        request.version,
        request.level
    );

    let client = scanner::ModelClient::new(api_key);
    let mut results: Vec<ScanResult> = Vec::with_capacity(files.len());

    // One file at a time; any per-file failure folds to zero issues so
    // the scan always reaches the end of the file set.
    for file in files {
        println!("📄 Scanning: {}", file.display());
        let issues = match std::fs::read_to_string(&file) {
            Ok(content) => {
                let base_name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| file.display().to_string());
                client.analyze_file(&content, &base_name, request.level, request.version, &cfg.model)
            }
            Err(e) => {
                eprintln!("{} Could not read {}: {}", warn_prefix(), file.display(), e);
                Vec::new()
            }
        };
        let result = ScanResult::new(file, issues);
        output::print_file_result(&result, request.format);
        results.push(result);
    }

    if request.format == OutputFormat::Pdf {
        let name = pdf::export_report(&results, &request, Path::new("."))?;
        println!("\n{} PDF report generated: {}", success_prefix(), name);
    }

    Ok(())
}
