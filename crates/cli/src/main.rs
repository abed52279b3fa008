// ABOUTME: CLI for capturing shadow-flattened document snapshots.
// ABOUTME: Loads HTML from files, stdin, or URLs and prints snapshot HTML, text, or a JSON envelope.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Parser;
use serde_json::json;
use shadowflat_snapshot::{clone_html, collect_text, Snapshot, SnapshotOptions};

/// Capture shadow-flattened snapshots of HTML documents and output them.
#[derive(Parser, Debug)]
#[command(name = "shadowflat")]
#[command(about = "Capture a shadow-flattened snapshot of an HTML document", long_about = None)]
struct Args {
    /// HTML file path(s) or http/https URL(s). Use "-" to read one document from stdin.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Output format: html (default) or text
    #[arg(short = 'f', long = "format", default_value = "html")]
    format: String,

    /// Document section to render: document (default), head, or body
    #[arg(long = "section", default_value = "document")]
    section: String,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output a JSON envelope per target instead of raw content
    #[arg(long = "json")]
    json_output: bool,

    /// Lower-case tag name to exclude, in addition to the built-in set (repeatable)
    #[arg(long = "exclude-tag")]
    exclude_tags: Vec<String>,

    /// Class name to exclude (repeatable)
    #[arg(long = "exclude-class")]
    exclude_classes: Vec<String>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Html,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Document,
    Head,
    Body,
}

fn parse_format(format: &str) -> Format {
    match format.to_lowercase().as_str() {
        "text" | "txt" => Format::Text,
        _ => Format::Html,
    }
}

fn parse_section(section: &str) -> Section {
    match section.to_lowercase().as_str() {
        "head" => Section::Head,
        "body" => Section::Body,
        _ => Section::Document,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let format = parse_format(&args.format);
    let section = parse_section(&args.section);
    let options = SnapshotOptions::builder()
        .exclude_tags(args.exclude_tags.clone())
        .exclude_classes(args.exclude_classes.clone())
        .build();

    let start = Instant::now();
    let mut rendered: Vec<String> = Vec::new();
    let mut envelopes: Vec<serde_json::Value> = Vec::new();
    let mut had_error = false;

    for target in &args.targets {
        match capture_target(target, &options, format, section) {
            Ok(content) => {
                envelopes.push(json!({
                    "target": target,
                    "ok": true,
                    "content": content.clone(),
                    "error": null
                }));
                rendered.push(content);
            }
            Err(err) => {
                eprintln!("error capturing {}: {}", target, err);
                envelopes.push(json!({
                    "target": target,
                    "ok": false,
                    "content": null,
                    "error": err.to_string()
                }));
                had_error = true;
            }
        }
    }

    let output = if args.json_output {
        if envelopes.len() == 1 {
            serde_json::to_string_pretty(&envelopes[0]).unwrap()
        } else {
            serde_json::to_string_pretty(&envelopes).unwrap()
        }
    } else {
        rendered.join("\n\n")
    };

    if let Some(path) = &args.output {
        if let Err(err) = fs::write(path, &output) {
            eprintln!("error writing to {:?}: {}", path, err);
            had_error = true;
        }
    } else if !output.is_empty() {
        println!("{}", output);
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", start.elapsed().as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn capture_target(
    target: &str,
    options: &SnapshotOptions,
    format: Format,
    section: Section,
) -> Result<String> {
    let html = load_target(target)?;
    let snapshot = clone_html(&html, options);
    Ok(render(&snapshot, format, section))
}

fn render(snapshot: &Snapshot, format: Format, section: Section) -> String {
    match format {
        Format::Html => match section {
            Section::Document => snapshot.to_html(),
            Section::Head => snapshot.head_html(),
            Section::Body => snapshot.body_html(),
        },
        Format::Text => match section {
            Section::Document => snapshot.text_content(),
            Section::Head => collect_text(snapshot.head()),
            Section::Body => collect_text(snapshot.body()),
        },
    }
}

fn load_target(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    if target.starts_with("http://") || target.starts_with("https://") {
        let response = reqwest::blocking::get(target)?.error_for_status()?;
        return Ok(response.text()?);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}
