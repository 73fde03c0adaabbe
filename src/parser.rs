//! Terraform plan JSON parsing.
//!
//! Reads the machine-readable plan representation that
//! `terraform show -json plan.out` produces into a typed model. Only the
//! fields the renderer needs are modeled; everything else in the document is
//! ignored.

use crate::error::ParseError;
use crate::tree::Value;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A parsed plan document.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub format_version: Option<String>,
    #[serde(default)]
    pub terraform_version: Option<String>,
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
    #[serde(default)]
    pub output_changes: Option<Value>,
}

/// One resource whose state the plan touches.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceChange {
    pub address: String,
    #[serde(default)]
    pub mode: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub action_reason: Option<String>,
    pub change: Change,
}

/// The change trees for one resource. `before`/`after` hold the values,
/// `after_unknown` and the sensitive trees mirror their shape with booleans,
/// and `replace_paths` lists the attribute paths that force replacement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub before: Option<Value>,
    #[serde(default)]
    pub after: Option<Value>,
    #[serde(default)]
    pub after_unknown: Option<Value>,
    #[serde(default)]
    pub after_sensitive: Option<Value>,
    #[serde(default)]
    pub before_sensitive: Option<Value>,
    #[serde(default)]
    pub replace_paths: Option<Value>,
}

/// Parses a plan from a file on disk.
pub fn parse_file(path: &Path) -> Result<Plan, ParseError> {
    if !path.exists() {
        return Err(ParseError::file_not_found(path.display().to_string()));
    }
    let content = fs::read_to_string(path)
        .map_err(|source| ParseError::read_error(path.display().to_string(), source))?;
    parse_str(&content, &path.display().to_string())
}

/// Parses a plan from an in-memory JSON document. `origin` names the source
/// in error messages.
pub fn parse_str(content: &str, origin: &str) -> Result<Plan, ParseError> {
    let plan: Plan = serde_json::from_str(content)
        .map_err(|source| ParseError::json_error(origin, source))?;
    check_format_version(&plan)?;
    Ok(plan)
}

/// The renderer understands plan format 1.x and the pre-1.0 formats that
/// share its change-tree layout.
fn check_format_version(plan: &Plan) -> Result<(), ParseError> {
    match plan.format_version.as_deref() {
        None => Ok(()),
        Some(version) if version.starts_with("1.") || version == "0.1" || version == "0.2" => {
            Ok(())
        }
        Some(version) => Err(ParseError::unsupported_version(version)),
    }
}
