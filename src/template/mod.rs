pub mod source;

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{Result, StencilError};
use crate::render::stamp::Format;

pub use source::{resolve_template_root, resolve_template_version, VERSION_FILE};

/// Suffix that marks a source file as renderable. Files without it are
/// copied byte-for-byte.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Entries never materialized: the version marker, VCS metadata, editor
/// droppings.
const IGNORED: &[&str] = &["VERSION", ".git/**", "**/.DS_Store", "**/*.swp"];

/// How the materializer treats one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOp {
    /// Substitute markers, stamp, write as text.
    Render,
    /// Copy verbatim.
    Copy,
}

/// One source file in the template tree, mapped to its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Path relative to the template root.
    pub source_rel: PathBuf,
    /// Path relative to the destination root: the source path with the
    /// template suffix stripped from the file name. Directory components
    /// are never rewritten.
    pub dest_rel: PathBuf,
    /// Derived from the destination extension; decides the version stamp.
    pub format: Format,
    pub op: EntryOp,
}

fn ignore_set() -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in IGNORED {
        builder.add(Glob::new(pattern).expect("builtin ignore pattern must parse"));
    }
    builder.build().expect("builtin ignore set must build")
}

/// Walk the template root and map every regular file to a `TemplateEntry`.
///
/// Fails fast if the root is missing or unreadable. Siblings are visited
/// in file-name order, so an unchanged tree always yields the same
/// sequence.
pub fn enumerate(template_root: &Path) -> Result<impl Iterator<Item = TemplateEntry>> {
    // Check readability up front; WalkDir alone would silently yield nothing.
    std::fs::read_dir(template_root).map_err(|e| StencilError::TemplateTreeUnreadable {
        path: template_root.to_path_buf(),
        reason: e.to_string(),
    })?;

    let root = template_root.to_path_buf();
    let ignored = ignore_set();

    let iter = WalkDir::new(template_root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let source_rel = entry
                .path()
                .strip_prefix(&root)
                .expect("walked entry must live under the template root")
                .to_path_buf();
            if ignored.is_match(&source_rel) {
                return None;
            }
            Some(entry_for(source_rel))
        });

    Ok(iter)
}

fn entry_for(source_rel: PathBuf) -> TemplateEntry {
    let (dest_rel, op) = match strip_template_suffix(&source_rel) {
        Some(dest) => (dest, EntryOp::Render),
        None => (source_rel.clone(), EntryOp::Copy),
    };
    let format = Format::from_path(&dest_rel);
    TemplateEntry {
        source_rel,
        dest_rel,
        format,
        op,
    }
}

/// Strip the template suffix from the file name, leaving directories
/// untouched. A file named exactly `.template` has no remaining name and
/// is treated as a plain copy.
fn strip_template_suffix(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stripped = name.strip_suffix(TEMPLATE_SUFFIX)?;
    if stripped.is_empty() {
        return None;
    }
    Some(path.with_file_name(stripped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"content").unwrap();
    }

    fn entries(root: &Path) -> Vec<TemplateEntry> {
        enumerate(root).unwrap().collect()
    }

    // ── Suffix and format mapping ───────────────────────────────────────

    #[test]
    fn suffixed_file_renders_to_stripped_destination() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/service/core.clj.template");

        let all = entries(dir.path());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].source_rel, PathBuf::from("src/service/core.clj.template"));
        assert_eq!(all[0].dest_rel, PathBuf::from("src/service/core.clj"));
        assert_eq!(all[0].format, Format::ClojureEdn);
        assert_eq!(all[0].op, EntryOp::Render);
    }

    #[test]
    fn unsuffixed_file_is_copied_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".gitignore");

        let all = entries(dir.path());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].dest_rel, PathBuf::from(".gitignore"));
        assert_eq!(all[0].op, EntryOp::Copy);
    }

    #[test]
    fn format_comes_from_destination_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "config/service.json.template");
        touch(dir.path(), ".github/workflows/ci.yml.template");
        touch(dir.path(), "README.md.template");
        touch(dir.path(), "Makefile.template");

        let formats: Vec<(PathBuf, Format)> = entries(dir.path())
            .into_iter()
            .map(|e| (e.dest_rel, e.format))
            .collect();
        assert!(formats.contains(&(PathBuf::from("config/service.json"), Format::Json)));
        assert!(formats.contains(&(PathBuf::from(".github/workflows/ci.yml"), Format::Yaml)));
        assert!(formats.contains(&(PathBuf::from("README.md"), Format::Markdown)));
        assert!(formats.contains(&(PathBuf::from("Makefile"), Format::Plain)));
    }

    #[test]
    fn bare_suffix_name_is_not_stripped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "conf/.template");

        let all = entries(dir.path());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].dest_rel, PathBuf::from("conf/.template"));
        assert_eq!(all[0].op, EntryOp::Copy);
    }

    // ── Ignore set ──────────────────────────────────────────────────────

    #[test]
    fn version_marker_and_vcs_litter_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "VERSION");
        touch(dir.path(), ".git/config");
        touch(dir.path(), "src/.DS_Store");
        touch(dir.path(), "src/core.clj.swp");
        touch(dir.path(), "README.md.template");

        let all = entries(dir.path());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].dest_rel, PathBuf::from("README.md"));
    }

    #[test]
    fn nested_version_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "docs/VERSION");

        let all = entries(dir.path());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].dest_rel, PathBuf::from("docs/VERSION"));
    }

    // ── Enumeration behavior ────────────────────────────────────────────

    #[test]
    fn enumeration_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.txt.template");
        touch(dir.path(), "a/z.txt.template");
        touch(dir.path(), "a/y.txt");
        touch(dir.path(), "c.txt");

        let first = entries(dir.path());
        let second = entries(dir.path());
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn missing_root_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-tree");
        let err = enumerate(&missing).err().unwrap();
        assert!(matches!(err, StencilError::TemplateTreeUnreadable { .. }));
    }

    #[test]
    fn root_that_is_a_file_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("flat");
        std::fs::write(&file, b"not a directory").unwrap();
        let err = enumerate(&file).err().unwrap();
        assert!(matches!(err, StencilError::TemplateTreeUnreadable { .. }));
    }

    #[test]
    fn directories_themselves_are_not_entries() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a/b/c.txt.template");

        let all = entries(dir.path());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].dest_rel, PathBuf::from("a/b/c.txt"));
    }
}
