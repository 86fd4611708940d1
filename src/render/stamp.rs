use std::path::Path;

/// Output formats with distinct version-comment syntax.
///
/// Derived once per file from the destination extension and dispatched in
/// [`stamp`]; nothing else inspects extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    ClojureEdn,
    Json,
    Yaml,
    Markdown,
    Plain,
}

impl Format {
    /// Derive the format from a destination path's extension.
    ///
    /// Unknown or missing extensions map to [`Format::Plain`].
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("clj" | "cljc" | "cljs" | "edn") => Format::ClojureEdn,
            Some("json") => Format::Json,
            Some("yaml" | "yml") => Format::Yaml,
            Some("md" | "markdown") => Format::Markdown,
            _ => Format::Plain,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Format::ClojureEdn => "clojure/edn",
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Markdown => "markdown",
            Format::Plain => "plain",
        }
    }
}

/// Prepend the format-appropriate version marker as the first line.
///
/// Plain output carries no stamp. JSON has no native comments, so the
/// marker is a `"//"` key/value line by convention; the result is not
/// guaranteed to parse as JSON. The engine invokes this exactly once per
/// rendered file; stamping twice yields two marker lines.
pub fn stamp(rendered: &str, format: Format, version: &str) -> String {
    let marker = match format {
        Format::ClojureEdn => format!(";; Template version: {version}"),
        Format::Json => format!("\"//\": \"Template version: {version}\""),
        Format::Yaml => format!("# Template version: {version}"),
        Format::Markdown => format!("<!-- Template version: {version} -->"),
        Format::Plain => return rendered.to_string(),
    };
    format!("{marker}\n{rendered}")
}
