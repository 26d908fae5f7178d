//! YAML parser for API definitions
//!
//! Parses and validates API definition files.

use crate::error::{Error, Result, ResultExt};
use crate::loader::types::ApiDefinition;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load an API definition from a YAML file
///
/// # Examples
///
/// ```ignore
/// let api = load_definition("./blog.yaml")?;
/// let mut posts = api.manager("Post")?.all();
/// ```
pub fn load_definition(path: impl AsRef<Path>) -> Result<ApiDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read definition file '{}'", path.display()))?;
    load_definition_from_str(&content)
}

/// Load an API definition from a YAML string
pub fn load_definition_from_str(yaml: &str) -> Result<ApiDefinition> {
    let mut def: ApiDefinition = serde_yaml::from_str(yaml)?;

    def.models = def.models.into_iter().map(|m| m.normalized()).collect();
    validate_definition(&def)?;

    debug!(api = %def.name, models = def.models.len(), "Loaded API definition");
    Ok(def)
}

/// Validate an API definition
fn validate_definition(def: &ApiDefinition) -> Result<()> {
    if def.name.is_empty() {
        return Err(Error::config("API name cannot be empty"));
    }

    if def.http.timeout_secs == 0 {
        return Err(Error::config("http.timeout_secs must be positive"));
    }
    if def.http.requests_per_second == Some(0) {
        return Err(Error::config("http.requests_per_second must be positive"));
    }

    if def.models.is_empty() {
        return Err(Error::config("Definition must have at least one model"));
    }

    let names: HashSet<_> = def.models.iter().map(|m| &m.name).collect();
    if names.len() != def.models.len() {
        return Err(Error::config("Duplicate model names found"));
    }

    for model in &def.models {
        model.validate()?;
    }

    Ok(())
}
