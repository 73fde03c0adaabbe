//! Attribute paths and lookups into the unknown/sensitive shadow trees.
//!
//! A path is the list of object keys and array indices leading from the root
//! of a change tree to one attribute. The `after_unknown` and
//! `after_sensitive` trees mirror the value tree's shape with booleans at the
//! flagged positions, and `replace_paths` lists the paths whose change forces
//! the resource to be replaced.

use crate::tree::Value;
use std::collections::HashSet;

/// Joins path segments with `.` (`rule.0.port`).
pub fn format_path(path: &[String]) -> String {
    path.join(".")
}

/// Returns `path` extended by one segment.
pub fn child_path(path: &[String], segment: impl ToString) -> Vec<String> {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(segment.to_string());
    child
}

/// Walks a shadow tree along `path`. A `true` met at or before the end of
/// the path flags the whole subtree; anything unresolvable means not
/// flagged.
fn is_flagged(tree: Option<&Value>, path: &[String]) -> bool {
    let Some(mut current) = tree else {
        return false;
    };
    for segment in path {
        current = match current {
            Value::Bool(true) => return true,
            Value::Object(_) => match current.get(segment) {
                Some(child) => child,
                None => return false,
            },
            Value::Array(items) => {
                match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                    Some(child) => child,
                    None => return false,
                }
            }
            _ => return false,
        };
    }
    matches!(current, Value::Bool(true))
}

/// Whether the attribute at `path` is unknown (known after apply).
pub fn is_unknown(unknown: Option<&Value>, path: &[String]) -> bool {
    is_flagged(unknown, path)
}

/// Whether the attribute at `path` is sensitive.
pub fn is_sensitive(sensitive: Option<&Value>, path: &[String]) -> bool {
    is_flagged(sensitive, path)
}

/// Resolves `path` inside a value tree, descending objects by key and arrays
/// by index.
pub fn child_value<'a>(tree: Option<&'a Value>, path: &[String]) -> Option<&'a Value> {
    let mut current = tree?;
    for segment in path {
        current = match current {
            Value::Object(_) => current.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Collects a plan's `replace_paths` (an array of paths, each an array of
/// string and integer segments) into formatted path strings.
pub fn collect_replace_paths(raw: Option<&Value>) -> HashSet<String> {
    let mut paths = HashSet::new();
    let Some(Value::Array(entries)) = raw else {
        return paths;
    };
    for entry in entries {
        let Value::Array(segments) = entry else {
            continue;
        };
        let parts: Vec<String> = segments
            .iter()
            .filter_map(|segment| match segment {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.clone()),
                _ => None,
            })
            .collect();
        if !parts.is_empty() {
            paths.insert(parts.join("."));
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_path_joins_with_dots() {
        assert_eq!(format_path(&path(&["rule", "0", "port"])), "rule.0.port");
        assert_eq!(format_path(&path(&["ami"])), "ami");
    }

    #[test]
    fn test_unknown_lookup() {
        let unknown: Value = serde_json::from_str(r#"{"id": true, "tags": {"env": true}}"#)
            .expect("valid JSON");
        assert!(is_unknown(Some(&unknown), &path(&["id"])));
        assert!(is_unknown(Some(&unknown), &path(&["tags", "env"])));
        assert!(!is_unknown(Some(&unknown), &path(&["name"])));
        assert!(!is_unknown(None, &path(&["id"])));
    }

    #[test]
    fn test_true_flags_whole_subtree() {
        let sensitive: Value =
            serde_json::from_str(r#"{"cred": true}"#).expect("valid JSON");
        assert!(is_sensitive(Some(&sensitive), &path(&["cred"])));
        assert!(is_sensitive(Some(&sensitive), &path(&["cred", "0", "user"])));
    }

    #[test]
    fn test_array_index_lookup() {
        let unknown: Value =
            serde_json::from_str(r#"{"rule": [false, {"id": true}]}"#).expect("valid JSON");
        assert!(is_unknown(Some(&unknown), &path(&["rule", "1", "id"])));
        assert!(!is_unknown(Some(&unknown), &path(&["rule", "0"])));
        assert!(!is_unknown(Some(&unknown), &path(&["rule", "9", "id"])));
    }

    #[test]
    fn test_false_root_is_never_flagged() {
        let sensitive = Value::Bool(false);
        assert!(!is_sensitive(Some(&sensitive), &path(&["anything"])));
    }

    #[test]
    fn test_child_value() {
        let tree: Value = serde_json::from_str(r#"{"rule": [{"port": 80}]}"#)
            .expect("valid JSON");
        let port = child_value(Some(&tree), &path(&["rule", "0", "port"]));
        assert_eq!(port, Some(&Value::Number("80".to_string())));
        assert_eq!(child_value(Some(&tree), &path(&["rule", "2"])), None);
    }

    #[test]
    fn test_collect_replace_paths() {
        let raw: Value = serde_json::from_str(r#"[["zone"], ["rule", 0, "port"]]"#)
            .expect("valid JSON");
        let paths = collect_replace_paths(Some(&raw));
        assert!(paths.contains("zone"));
        assert!(paths.contains("rule.0.port"));
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_collect_replace_paths_absent() {
        assert!(collect_replace_paths(None).is_empty());
        assert!(collect_replace_paths(Some(&Value::Null)).is_empty());
    }
}
