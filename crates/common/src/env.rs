//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Create the parent directory of the data file; warn if the optional
/// frontend directory is configured but missing.
pub async fn ensure_env(data_file: &str, frontend_dir: Option<&str>) -> anyhow::Result<()> {
    if let Some(frontend_dir) = frontend_dir {
        if tokio::fs::metadata(frontend_dir).await.is_err() {
            warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
        }
    }
    if let Some(parent) = Path::new(data_file).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}
