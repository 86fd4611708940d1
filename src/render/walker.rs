use std::path::{Path, PathBuf};

use crate::error::{Result, StencilError};
use crate::render::context::RenderContext;
use crate::render::stamp::stamp;
use crate::render::tokens::{substitute, TokenTable};
use crate::report::{FileOutcome, FileResult, GenerationReport};
use crate::template::{EntryOp, TemplateEntry};

/// A file that would be created during generation.
pub struct PlannedFile {
    /// Path relative to the destination root.
    pub dest_rel: PathBuf,
    /// The file content (rendered text or copied bytes).
    pub content: Vec<u8>,
    /// Whether this file is copied verbatim (true) or rendered (false).
    pub is_copy: bool,
}

/// The result of rendering every entry in memory, before any write.
pub struct GenerationPlan {
    pub files: Vec<PlannedFile>,
    /// Entries that could not be rendered. Carried into the final report
    /// so one bad source never aborts the run.
    pub failures: Vec<FileResult>,
}

/// Render every entry into memory without touching the destination.
///
/// A source that cannot be read as text (missing, binary behind a
/// template suffix, invalid UTF-8) becomes a `Failed` result and
/// planning continues with the next entry.
pub fn plan_render(
    template_root: &Path,
    entries: impl IntoIterator<Item = TemplateEntry>,
    context: &RenderContext,
) -> GenerationPlan {
    let table = TokenTable::new(context);
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for entry in entries {
        let src_path = template_root.join(&entry.source_rel);
        match entry.op {
            EntryOp::Copy => match std::fs::read(&src_path) {
                Ok(content) => files.push(PlannedFile {
                    dest_rel: entry.dest_rel,
                    content,
                    is_copy: true,
                }),
                Err(e) => failures.push(FileResult {
                    dest_rel: entry.dest_rel,
                    outcome: FileOutcome::Failed {
                        reason: format!("reading {}: {e}", src_path.display()),
                    },
                }),
            },
            EntryOp::Render => match read_template_text(&src_path) {
                Ok(text) => {
                    let substituted = substitute(&text, &table);
                    let stamped = stamp(&substituted, entry.format, &context.template_version);
                    files.push(PlannedFile {
                        dest_rel: entry.dest_rel,
                        content: stamped.into_bytes(),
                        is_copy: false,
                    });
                }
                Err(reason) => failures.push(FileResult {
                    dest_rel: entry.dest_rel,
                    outcome: FileOutcome::Failed { reason },
                }),
            },
        }
    }

    GenerationPlan { files, failures }
}

/// Write the files from a generation plan under the destination root.
///
/// Creating the destination root itself is the one fatal step; after
/// that, each file that cannot be written becomes a `Failed` result and
/// the rest of the plan still goes out. Existing files at planned paths
/// are overwritten; everything else in the destination is left alone.
pub fn execute_plan(plan: &GenerationPlan, destination_root: &Path) -> Result<GenerationReport> {
    std::fs::create_dir_all(destination_root).map_err(|e| {
        StencilError::DestinationRootUnavailable {
            path: destination_root.to_path_buf(),
            source: e,
        }
    })?;

    let mut results = Vec::with_capacity(plan.files.len() + plan.failures.len());

    for file in &plan.files {
        let dest_path = destination_root.join(&file.dest_rel);
        let outcome = match write_planned(&dest_path, &file.content) {
            Ok(()) if file.is_copy => FileOutcome::Copied,
            Ok(()) => FileOutcome::Rendered,
            Err(reason) => FileOutcome::Failed { reason },
        };
        results.push(FileResult {
            dest_rel: file.dest_rel.clone(),
            outcome,
        });
    }

    results.extend(plan.failures.iter().cloned());

    Ok(GenerationReport {
        destination_root: destination_root.to_path_buf(),
        results,
    })
}

/// Render and write in one call.
pub fn materialize(
    template_root: &Path,
    entries: impl IntoIterator<Item = TemplateEntry>,
    context: &RenderContext,
    destination_root: &Path,
) -> Result<GenerationReport> {
    let plan = plan_render(template_root, entries, context);
    execute_plan(&plan, destination_root)
}

fn write_planned(dest_path: &Path, content: &[u8]) -> std::result::Result<(), String> {
    if let Some(parent) = dest_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("creating directory {}: {e}", parent.display()))?;
    }
    std::fs::write(dest_path, content).map_err(|e| format!("writing {}: {e}", dest_path.display()))
}

fn read_template_text(src_path: &Path) -> std::result::Result<String, String> {
    if is_binary_file(src_path) {
        return Err(format!(
            "{} carries the template suffix but has binary content",
            src_path.display()
        ));
    }
    std::fs::read_to_string(src_path).map_err(|e| format!("reading {}: {e}", src_path.display()))
}

/// Detect binary files using content_inspector (BOM-aware, null-byte scanning).
///
/// Reads only the first 8KB to avoid unnecessary allocation for large files.
pub(crate) fn is_binary_file(path: &Path) -> bool {
    use std::io::Read;

    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };

    let mut buf = [0u8; 8192];
    let Ok(n) = file.take(8192).read(&mut buf) else {
        return false;
    };

    !content_inspector::inspect(&buf[..n]).is_text()
}
