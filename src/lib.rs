pub mod check;
pub mod config;
pub mod error;
pub mod manifest;
pub mod prompt;
pub mod render;
pub mod report;
pub mod template;

use std::path::PathBuf;

use crate::error::{Result, StencilError};
use crate::render::{execute_plan, normalize_namespace, plan_render, GenerationPlan, RenderContext};
use crate::report::GenerationReport;
use crate::template::{enumerate, resolve_template_root, resolve_template_version};

pub struct GenerateOptions {
    pub name: String,
    pub parent_dir: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub staged: bool,
}

/// Everything needed to execute a generation that has been planned but
/// not yet written.
pub struct ServicePlan {
    pub plan: GenerationPlan,
    pub context: RenderContext,
    pub template_root: PathBuf,
    pub destination_root: PathBuf,
    pub staged: bool,
}

/// Plan a service generation: resolve the template root, build the render
/// context, and render every entry in memory.
///
/// This performs all preparation but does **not** write anything under
/// the destination. Name problems surface before any filesystem access.
pub fn plan_service(options: GenerateOptions) -> Result<ServicePlan> {
    let namespace = normalize_namespace(&options.name)?;
    validate_destination_name(&options.name)?;

    let user_config = config::load_user_config()?.unwrap_or_default();

    let template_root = resolve_template_root(options.templates.as_deref(), Some(&user_config))?;
    let context = RenderContext {
        service_name: options.name.clone(),
        namespace,
        template_version: resolve_template_version(&template_root),
    };

    let parent_dir = match options.parent_dir.or(user_config.parent_dir) {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| StencilError::Io {
            context: "getting current directory".into(),
            source: e,
        })?,
    };
    let destination_root = parent_dir.join(&options.name);

    let entries = enumerate(&template_root)?;
    let plan = plan_render(&template_root, entries, &context);

    Ok(ServicePlan {
        plan,
        context,
        template_root,
        destination_root,
        staged: options.staged,
    })
}

/// Execute a previously planned generation: write files, then the manifest.
pub fn execute_service(service: ServicePlan) -> Result<GenerationReport> {
    if service.staged {
        execute_staged(&service)
    } else {
        let report = execute_plan(&service.plan, &service.destination_root)?;
        manifest::write_manifest(&service.destination_root, &service.context)?;
        Ok(report)
    }
}

/// Generate a service project in one call.
pub fn generate(options: GenerateOptions) -> Result<GenerationReport> {
    let plan = plan_service(options)?;
    execute_service(plan)
}

/// Render into a temporary sibling directory and rename it over the
/// destination once everything is written. The destination must not
/// already exist; a half-written tree never lands at the final path.
fn execute_staged(service: &ServicePlan) -> Result<GenerationReport> {
    let destination = &service.destination_root;
    if destination.exists() {
        return Err(StencilError::DestinationExists {
            path: destination.clone(),
        });
    }

    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| StencilError::DestinationRootUnavailable {
        path: destination.clone(),
        source: e,
    })?;

    let staging = tempfile::Builder::new()
        .prefix(".stencil-stage-")
        .tempdir_in(&parent)
        .map_err(|e| StencilError::Io {
            context: format!("creating staging directory in {}", parent.display()),
            source: e,
        })?;

    let report = execute_plan(&service.plan, staging.path())?;
    manifest::write_manifest(staging.path(), &service.context)?;

    let staged_path = staging.keep();
    std::fs::rename(&staged_path, destination).map_err(|e| {
        let _ = std::fs::remove_dir_all(&staged_path);
        StencilError::DestinationRootUnavailable {
            path: destination.clone(),
            source: e,
        }
    })?;

    Ok(GenerationReport {
        destination_root: destination.clone(),
        results: report.results,
    })
}

/// Names become destination directory names, so anything the filesystem
/// would interpret as more than one component is rejected up front.
fn validate_destination_name(name: &str) -> Result<()> {
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(StencilError::InvalidName {
            name: name.to_string(),
            reason: "cannot be used as a directory name".to_string(),
        });
    }
    Ok(())
}
