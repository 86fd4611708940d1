use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::render::tokens::find_unrecognized;
use crate::render::walker::is_binary_file;
use crate::template::{enumerate, resolve_template_version, EntryOp, TemplateEntry};

/// Result of validating a template root.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub template_root: PathBuf,
    pub template_version: String,
    pub rendered_entries: usize,
    pub copied_entries: usize,
    /// Destination-format counts, keyed by format label.
    pub formats: BTreeMap<String, usize>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a template root without writing anything.
///
/// Warnings flag likely template mistakes: unrecognized `{{...}}` markers
/// and binary content behind a template suffix. Errors flag destination
/// collisions, where two sources would materialize at the same path.
pub fn check_template_root(template_root: &Path) -> Result<CheckReport> {
    let entries: Vec<TemplateEntry> = enumerate(template_root)?.collect();
    let template_version = resolve_template_version(template_root);

    let mut formats: BTreeMap<String, usize> = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut seen_dests: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();

    let mut rendered_entries = 0;
    let mut copied_entries = 0;

    for entry in &entries {
        *formats.entry(entry.format.label().to_string()).or_insert(0) += 1;

        if let Some(previous) = seen_dests.insert(entry.dest_rel.clone(), entry.source_rel.clone())
        {
            errors.push(format!(
                "{} and {} both materialize at {}",
                previous.display(),
                entry.source_rel.display(),
                entry.dest_rel.display()
            ));
        }

        match entry.op {
            EntryOp::Copy => copied_entries += 1,
            EntryOp::Render => {
                rendered_entries += 1;
                check_render_source(template_root, entry, &mut warnings);
            }
        }
    }

    Ok(CheckReport {
        template_root: template_root.to_path_buf(),
        template_version,
        rendered_entries,
        copied_entries,
        formats,
        warnings,
        errors,
    })
}

fn check_render_source(template_root: &Path, entry: &TemplateEntry, warnings: &mut Vec<String>) {
    let src_path = template_root.join(&entry.source_rel);

    if is_binary_file(&src_path) {
        warnings.push(format!(
            "{} carries the template suffix but has binary content",
            entry.source_rel.display()
        ));
        return;
    }

    match std::fs::read_to_string(&src_path) {
        Ok(content) => {
            for marker in find_unrecognized(&content) {
                warnings.push(format!(
                    "{}: unrecognized marker {marker}",
                    entry.source_rel.display()
                ));
            }
        }
        Err(e) => warnings.push(format!(
            "could not read {}: {e}",
            entry.source_rel.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_template(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn clean_tree_reports_counts_and_version() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "VERSION", b"2.0.0\n");
        write_template(dir.path(), "README.md.template", b"# {{SERVICE_NAME}}\n");
        write_template(dir.path(), "core.clj.template", b"(ns {{NS_NAME}}.core)\n");
        write_template(dir.path(), ".gitignore", b"target/\n");

        let report = check_template_root(dir.path()).unwrap();
        assert!(report.is_clean());
        assert!(report.warnings.is_empty());
        assert_eq!(report.template_version, "2.0.0");
        assert_eq!(report.rendered_entries, 2);
        assert_eq!(report.copied_entries, 1);
        assert_eq!(report.formats.get("markdown"), Some(&1));
        assert_eq!(report.formats.get("clojure/edn"), Some(&1));
    }

    #[test]
    fn unrecognized_marker_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "README.md.template", b"# {{SRVICE_NAME}}\n");

        let report = check_template_root(dir.path()).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("{{SRVICE_NAME}}"));
    }

    #[test]
    fn binary_behind_template_suffix_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let bytes: Vec<u8> = (0..=255).collect();
        write_template(dir.path(), "data.edn.template", &bytes);

        let report = check_template_root(dir.path()).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("binary content"));
    }

    #[test]
    fn destination_collision_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "deps.edn", b"{}\n");
        write_template(dir.path(), "deps.edn.template", b"{:paths [\"src\"]}\n");

        let report = check_template_root(dir.path()).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("deps.edn"));
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_template_root(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn report_serializes_for_json_output() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "README.md.template", b"# {{SERVICE_NAME}}\n");

        let report = check_template_root(dir.path()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["rendered_entries"], 1);
        assert!(value["errors"].as_array().unwrap().is_empty());
    }
}
