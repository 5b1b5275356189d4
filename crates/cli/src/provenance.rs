use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `<stem>.provenance.json` next to `artifact`: tool version, code
/// revision, the subcommand and its parameters.
pub fn write_sidecar(artifact: &Path, command: &str, params: Value) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    let doc = json!({
        "tool": "hullstep",
        "version": hullstep::VERSION,
        "code_rev": code_rev(),
        "command": command,
        "params": params,
        "outputs": [artifact.to_string_lossy()],
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "provenance written");
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` at build time, else at run time, else `"unknown"`.
fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_owned())
}
