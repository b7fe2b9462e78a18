use std::path::PathBuf;

use thiserror::Error;

/// Failures of a sweep over module roots.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A directory under the root could not be read; the walk is aborted.
    #[error("could not traverse {}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("no directories with {descriptor} found under {}", root.display())]
    NoModulesFound { root: PathBuf, descriptor: String },

    #[error("could not run {program} in {}", dir.display())]
    Spawn {
        program: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scanner exited unsuccessfully for a reason other than license violations.
    #[error("{program} failed in {} ({status}): {stderr}", dir.display())]
    Scanner {
        program: String,
        dir: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("found {count} violations in {}", dir.display())]
    ViolationsFound { dir: PathBuf, count: usize },

    #[error("could not write {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = SweepError> = std::result::Result<T, E>;
