use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};
use crate::render::RenderContext;

/// File name of the generation manifest written into every project root.
pub const MANIFEST_FILE: &str = ".stencil.toml";

/// Record of which template set produced a generated project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub generator: GeneratorInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub service_name: String,
    pub namespace: String,
    pub template_version: String,
    pub stencil_version: String,
}

impl Manifest {
    pub fn from_context(context: &RenderContext) -> Self {
        Self {
            generator: GeneratorInfo {
                service_name: context.service_name.clone(),
                namespace: context.namespace.clone(),
                template_version: context.template_version.clone(),
                stencil_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Write the manifest into a generated project root. The directory must
/// already exist.
pub fn write_manifest(output_dir: &Path, context: &RenderContext) -> Result<()> {
    let path = output_dir.join(MANIFEST_FILE);

    let content = toml::to_string_pretty(&Manifest::from_context(context)).map_err(|e| {
        StencilError::Io {
            context: format!("serializing manifest {}", path.display()),
            source: std::io::Error::other(e),
        }
    })?;

    std::fs::write(&path, content).map_err(|e| StencilError::Io {
        context: format!("writing manifest {}", path.display()),
        source: e,
    })
}

/// Read the manifest back out of a generated project root.
pub fn read_manifest(project_dir: &Path) -> Result<Manifest> {
    let path = project_dir.join(MANIFEST_FILE);

    let content = std::fs::read_to_string(&path).map_err(|e| StencilError::Io {
        context: format!("reading manifest {}", path.display()),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| StencilError::ConfigParse { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RenderContext {
        RenderContext::new("payment-service", "1.4.0").unwrap()
    }

    #[test]
    fn write_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), &context()).unwrap();

        let manifest = read_manifest(dir.path()).unwrap();
        assert_eq!(manifest.generator.service_name, "payment-service");
        assert_eq!(manifest.generator.namespace, "payment_service");
        assert_eq!(manifest.generator.template_version, "1.4.0");
        assert_eq!(manifest.generator.stencil_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn manifest_is_well_formed_toml() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), &context()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let parsed: toml::Value = toml::from_str(&content).unwrap();
        let generator = parsed.get("generator").unwrap().as_table().unwrap();
        assert_eq!(
            generator.get("template_version").unwrap().as_str().unwrap(),
            "1.4.0"
        );
    }

    #[test]
    fn write_fails_when_directory_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not/created");
        assert!(write_manifest(&missing, &context()).is_err());
    }

    #[test]
    fn read_fails_when_manifest_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_manifest(dir.path()).is_err());
    }
}
