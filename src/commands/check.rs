use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use stencil::check::check_template_root;
use stencil::config::load_user_config;
use stencil::template::resolve_template_root;

pub fn run(path: Option<String>, json: bool) -> Result<()> {
    let template_root = match path {
        Some(p) => PathBuf::from(p),
        None => {
            let user_config = load_user_config()?.unwrap_or_default();
            resolve_template_root(None, Some(&user_config))?
        }
    };

    if !json {
        println!(
            "{} {}",
            style("Checking template root at").bold(),
            style(template_root.display()).cyan()
        );
    }

    let report = check_template_root(&template_root)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).into_diagnostic()?
        );
    } else {
        println!("  Template version: {}", report.template_version);
        println!(
            "  Entries: {} rendered, {} copied",
            report.rendered_entries, report.copied_entries
        );
        for (format, count) in &report.formats {
            println!("    {format}: {count}");
        }

        if !report.warnings.is_empty() {
            println!("\n{}", style("Warnings:").yellow().bold());
            for w in &report.warnings {
                println!("  {} {}", style("⚠").yellow(), w);
            }
        }

        if !report.errors.is_empty() {
            println!("\n{}", style("Errors:").red().bold());
            for e in &report.errors {
                println!("  {} {}", style("✗").red(), e);
            }
        }
    }

    if !report.is_clean() {
        if !json {
            println!(
                "\n{} Template root has {} error(s)",
                style("✗").red().bold(),
                report.errors.len()
            );
        }
        std::process::exit(1);
    }

    if !json {
        println!("\n{} Template root is valid!", style("✓").green().bold());
    }

    Ok(())
}
