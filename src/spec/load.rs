use super::lint::{format_issues, lint_parameters};
use super::types::ParameterMeta;
use anyhow::Context;
use std::path::Path;
use tracing::info;

/// Parse a list of parameter descriptors from YAML or JSON text.
///
/// The document must be a sequence of Swagger 2.0 style parameter objects.
/// Descriptors are linted after parsing; any issue fails the load.
///
/// ```rust
/// let params = brrtguard::spec::load_parameters(r#"
/// - name: id
///   in: path
///   type: integer
///   required: true
/// "#).unwrap();
/// assert_eq!(params[0].name, "id");
/// ```
pub fn load_parameters(source: &str) -> anyhow::Result<Vec<ParameterMeta>> {
    let params: Vec<ParameterMeta> =
        serde_yaml::from_str(source).context("Failed to parse parameter descriptors")?;

    let issues = lint_parameters(&params);
    if !issues.is_empty() {
        anyhow::bail!(
            "{} descriptor issue(s) found:\n{}",
            issues.len(),
            format_issues(&issues)
        );
    }
    Ok(params)
}

/// Read and parse a descriptor file (`.yaml`, `.yml` or `.json`).
pub fn load_parameters_from_path(path: impl AsRef<Path>) -> anyhow::Result<Vec<ParameterMeta>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor file {}", path.display()))?;
    let params = load_parameters(&content)
        .with_context(|| format!("Invalid descriptor file {}", path.display()))?;
    info!(
        path = %path.display(),
        parameter_count = params.len(),
        "Parameter descriptors loaded"
    );
    Ok(params)
}
