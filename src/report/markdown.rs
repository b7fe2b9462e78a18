use std::path::{Path, PathBuf};

use tokio::fs::{self, DirBuilder};
use tokio::io::AsyncWriteExt;

use crate::error::{Result, SweepError};

/// Write a rendered license report to `module_dir/report_path`, creating the
/// parent directory if needed and replacing any previous report.
pub async fn write_report(module_dir: &Path, report_path: &Path, body: &[u8]) -> Result<PathBuf> {
    let target = module_dir.join(report_path);

    if let Some(parent) = target.parent() {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o755);
        builder.create(parent).await.map_err(|source| SweepError::Persist {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let persist_err = |source| SweepError::Persist {
        path: target.clone(),
        source,
    };
    let mut file = fs::File::create(&target).await.map_err(persist_err)?;
    file.write_all(body).await.map_err(persist_err)?;
    file.flush().await.map_err(persist_err)?;

    log::info!("wrote {}", target.display());
    Ok(target)
}
