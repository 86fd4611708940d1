use std::path::{Path, PathBuf};

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use stencil::report::{FileOutcome, FileResult, GenerationReport};
use stencil::{GenerateOptions, ServicePlan};

#[allow(clippy::too_many_arguments)]
pub fn run(
    name: Option<String>,
    parent: Option<String>,
    templates: Option<String>,
    staged: bool,
    strict: bool,
    dry_run: bool,
    verbose: bool,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n.trim().to_string(),
        None => stencil::prompt::prompt_service_name()?,
    };

    let options = GenerateOptions {
        name,
        parent_dir: parent.map(PathBuf::from),
        templates: templates.map(PathBuf::from),
        staged,
    };

    let service = stencil::plan_service(options)?;

    if dry_run {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&dry_run_report(&service)).into_diagnostic()?
            );
        } else {
            print_dry_run(&service, verbose);
        }
        return Ok(());
    }

    let report = stencil::execute_service(service)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).into_diagnostic()?
        );
    } else {
        print_report(&report);
    }

    if strict && !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

/// Machine-readable view of a planned generation: one line item per file
/// plus any render failures, without the rendered content itself.
#[derive(Serialize)]
struct DryRunReport<'a> {
    destination_root: &'a Path,
    files: Vec<DryRunFile<'a>>,
    failures: &'a [FileResult],
}

#[derive(Serialize)]
struct DryRunFile<'a> {
    dest_rel: &'a Path,
    action: &'static str,
    bytes: usize,
}

fn dry_run_report(service: &ServicePlan) -> DryRunReport<'_> {
    DryRunReport {
        destination_root: &service.destination_root,
        files: service
            .plan
            .files
            .iter()
            .map(|f| DryRunFile {
                dest_rel: &f.dest_rel,
                action: if f.is_copy { "copy" } else { "render" },
                bytes: f.content.len(),
            })
            .collect(),
        failures: &service.plan.failures,
    }
}

fn print_dry_run(service: &ServicePlan, verbose: bool) {
    let rendered_count = service.plan.files.iter().filter(|f| !f.is_copy).count();
    let copied_count = service.plan.files.iter().filter(|f| f.is_copy).count();

    println!(
        "\n{} Dry run: files that would be generated in {}",
        style("==>").cyan().bold(),
        style(service.destination_root.display()).cyan()
    );

    for file in &service.plan.files {
        let action = if file.is_copy { "copy  " } else { "render" };
        println!("  {} {}", style(action).green(), file.dest_rel.display());

        if verbose {
            println!("  {}", style("──────").dim());
            if file.is_copy {
                println!(
                    "  {}",
                    style(format!("[copied verbatim, {} bytes]", file.content.len())).dim()
                );
            } else {
                let content = String::from_utf8_lossy(&file.content);
                for line in content.lines() {
                    println!("  {line}");
                }
            }
            println!("  {}", style("──────").dim());
            println!();
        }
    }

    for failure in &service.plan.failures {
        if let FileOutcome::Failed { reason } = &failure.outcome {
            println!(
                "  {} {}: {reason}",
                style("failed").red(),
                failure.dest_rel.display()
            );
        }
    }

    println!("\nSummary: {rendered_count} rendered, {copied_count} copied");

    println!(
        "\n{} Dry run: no files written.",
        style("\u{2139}").blue().bold()
    );
}

fn print_report(report: &GenerationReport) {
    let rendered_count = report
        .results
        .iter()
        .filter(|r| r.outcome == FileOutcome::Rendered)
        .count();
    let copied_count = report
        .results
        .iter()
        .filter(|r| r.outcome == FileOutcome::Copied)
        .count();

    println!(
        "\n{} Service generated at {}",
        style("✓").green().bold(),
        style(report.destination_root.display()).cyan()
    );
    println!("  {rendered_count} files rendered, {copied_count} files copied");

    if !report.is_success() {
        println!("\n{}", style("Failures:").red().bold());
        for failure in report.failures() {
            if let FileOutcome::Failed { reason } = &failure.outcome {
                println!(
                    "  {} {}: {reason}",
                    style("✗").red(),
                    failure.dest_rel.display()
                );
            }
        }
        println!(
            "  {} of {} files failed",
            report.failed(),
            report.results.len()
        );
    }
}
