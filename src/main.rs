use anyhow::{Context, Result};
use clap::Parser;
use sqlite_validator::{EntryPoint, SourceAnchor, ValidationReport, Validator, ValidatorConfig};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlcheck")]
#[command(about = "Validate SQLite query literals with labeled interpolations")]
struct Args {
    /// Query literals to validate (reads stdin when none and no --file)
    queries: Vec<String>,

    /// Read one query literal per line from this file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Validate as the unsafe entry point (mutes the drop warning)
    #[arg(long = "unsafe")]
    unsafe_entry: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// JSON configuration file (otherwise SQLITE_VALIDATOR_* env vars)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ValidatorConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ValidatorConfig::from_env()?,
    };
    let validator = Validator::new(config);
    let entry_point = if args.unsafe_entry { EntryPoint::Unsafe } else { EntryPoint::Checked };

    let queries = collect_queries(&args)?;
    debug!(count = queries.len(), ?entry_point, "Validating queries");

    let mut failed = false;
    for query in &queries {
        let report = match validator.validate(query, entry_point) {
            Ok(report) => report,
            Err(e) => {
                error!("{}", e);
                eprintln!("{}: {}", query, e);
                failed = true;
                continue;
            }
        };
        failed |= report.has_errors();

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_report(query, &report, entry_point.name(validator.config()));
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn collect_queries(args: &Args) -> Result<Vec<String>> {
    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(non_blank_lines(content.lines()));
    }
    if !args.queries.is_empty() {
        return Ok(args.queries.clone());
    }

    let mut input = String::new();
    std::io::stdin().lock().read_to_string(&mut input)?;
    Ok(non_blank_lines(input.lines()))
}

fn non_blank_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .map(|line| line.as_ref().to_string())
        .collect()
}

fn print_report(query: &str, report: &ValidationReport, entry_name: &str) {
    for diagnostic in report.diagnostics() {
        println!("{}", diagnostic);
        println!("  --> {}", describe_anchor(query, &diagnostic.anchor, entry_name));
        for fix_it in &diagnostic.fix_its {
            println!(
                "  help: {} (`{}` -> `{}`)",
                fix_it.description,
                anchor_text(query, &fix_it.anchor, entry_name),
                fix_it.replacement
            );
        }
    }

    if let Some(expansion) = report.expansion() {
        println!("{}", expansion);
    }
}

fn describe_anchor(query: &str, anchor: &SourceAnchor, entry_name: &str) -> String {
    match anchor {
        SourceAnchor::Literal(range) => {
            format!("{}!(\"{}\") at {}..{}", entry_name, query, range.start, range.end)
        }
        SourceAnchor::Invocation | SourceAnchor::EntryPointName => {
            format!("{}!(\"{}\")", entry_name, query)
        }
    }
}

fn anchor_text<'a>(query: &'a str, anchor: &SourceAnchor, entry_name: &'a str) -> &'a str {
    match anchor {
        SourceAnchor::Literal(range) => query.get(range.clone()).unwrap_or(query),
        SourceAnchor::EntryPointName => entry_name,
        SourceAnchor::Invocation => query,
    }
}
