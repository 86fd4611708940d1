use crate::error::{Result, StencilError};

/// Values shared by every file rendered in one generation run.
///
/// Built once per run, then passed around by shared reference; nothing
/// mutates it after construction.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The service name exactly as the caller supplied it.
    pub service_name: String,
    /// Namespace-safe identifier derived from the service name.
    pub namespace: String,
    /// Version string stamped into every rendered file.
    pub template_version: String,
}

impl RenderContext {
    pub fn new(service_name: &str, template_version: impl Into<String>) -> Result<Self> {
        let namespace = normalize_namespace(service_name)?;
        Ok(Self {
            service_name: service_name.to_string(),
            namespace,
            template_version: template_version.into(),
        })
    }
}

/// Derive a namespace-safe identifier from a human-supplied service name.
///
/// Lower-cases the input and collapses every run of characters outside
/// `[a-z0-9]` into a single `_`, stripping leading and trailing `_`.
/// Normalizing an already-normalized name returns it unchanged.
pub fn normalize_namespace(service_name: &str) -> Result<String> {
    let trimmed = service_name.trim();
    if trimmed.is_empty() {
        return Err(StencilError::InvalidName {
            name: service_name.to_string(),
            reason: "name is empty".to_string(),
        });
    }

    let lowered = trimmed.to_lowercase();
    let mut namespace = String::with_capacity(lowered.len());
    let mut pending_separator = false;
    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !namespace.is_empty() {
                namespace.push('_');
            }
            pending_separator = false;
            namespace.push(ch);
        } else {
            pending_separator = true;
        }
    }

    if namespace.is_empty() {
        return Err(StencilError::InvalidName {
            name: service_name.to_string(),
            reason: "no usable characters after normalization".to_string(),
        });
    }
    if namespace.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(StencilError::InvalidName {
            name: service_name.to_string(),
            reason: format!("namespace '{namespace}' starts with a digit"),
        });
    }

    Ok(namespace)
}
