//! Fragment generation and discovery — drives `buf generate` and loads the
//! per-service OpenAPI YAML files it leaves behind.

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run `buf generate` with `out_dir` as its output target.
///
/// The generator's exit status is never fatal: a missing binary or a failed
/// run is logged and the pipeline continues with whatever fragments exist,
/// possibly none.
pub fn generate(out_dir: &Path) {
    let status = Command::new("buf")
        .arg("generate")
        .arg("-o")
        .arg(out_dir)
        .status();

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!("buf generate exited with {}", status),
        Err(err) => tracing::warn!("Failed to run buf generate: {}", err),
    }
}

/// Find every `.yaml` file anywhere under `dir`.
///
/// Paths are sorted lexicographically so merge precedence between fragments
/// does not depend on filesystem traversal order.
pub fn collect(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut fragments = Vec::new();
    collect_into(dir, &mut fragments)?;
    fragments.sort();
    Ok(fragments)
}

fn collect_into(dir: &Path, fragments: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, fragments)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("yaml") {
            fragments.push(path);
        }
    }

    Ok(())
}

/// Parse one fragment file. The top level must be a mapping.
pub fn load(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fragment {}", path.display()))?;

    let fragment: Value = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse fragment {}", path.display()))?;

    if !fragment.is_mapping() {
        anyhow::bail!("Fragment {} is not a mapping at its top level", path.display());
    }

    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_collect_recurses_and_sorts() {
        let dir = TempDir::new().unwrap();
        let b = write(dir.path(), "nested/deeper/b.yaml", "b: 1");
        let a = write(dir.path(), "a.yaml", "a: 1");
        write(dir.path(), "ignored.json", "{}");
        write(dir.path(), "ignored.yml", "ignored: true");

        let found = collect(dir.path()).unwrap();

        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn test_collect_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(collect(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_load_mapping_fragment() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "svc.yaml", "paths:\n  /a:\n    get: {}");

        let fragment = load(&path).unwrap();

        assert!(fragment.is_mapping());
        assert!(fragment["paths"]["/a"].is_mapping());
    }

    #[test]
    fn test_load_rejects_non_mapping_top_level() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "list.yaml", "- just\n- a\n- sequence");

        let err = load(&path).unwrap_err();

        assert!(err.to_string().contains("not a mapping"));
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "broken.yaml", "key: [unclosed");

        assert!(load(&path).is_err());
    }
}
