use crate::{
    blueprint::{Blueprint, BlueprintError},
    errors::IoError,
    materialize::{self, Options, Summary},
    preview::preview_as_tree,
};
use std::path::Path;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum OssaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Blueprint(#[from] BlueprintError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

/// Materializes the blueprint manifest at `manifest` under the `destination`
/// root directory.
///
/// # Errors
///
/// Returns an [`OssaError`] if:
///
/// - The manifest cannot be read, parsed, or validated.
/// - A directory or file cannot be created or written to.
pub fn generate(manifest: &str, destination: &str, options: &Options) -> Result<Summary, OssaError> {
    let blueprint = Blueprint::from_file(manifest)?;

    log::debug!(
        "materializing {} entries under '{}'",
        blueprint.entries.len(),
        destination
    );

    let summary = materialize::materialize(&blueprint, Path::new(destination), options)?;

    Ok(summary)
}

/// Prints the tree that a generate run of `manifest` would create under
/// `destination`, without performing any filesystem mutation.
///
/// # Errors
///
/// Returns an [`OssaError`] if the manifest cannot be read, parsed, or
/// validated.
pub fn preview(manifest: &str, destination: &str) -> Result<(), OssaError> {
    let blueprint = Blueprint::from_file(manifest)?;

    preview_as_tree(&blueprint, Path::new(destination));

    Ok(())
}
