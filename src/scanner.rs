//! Adapter over the external `go-licenses` binary.
//!
//! Both modes run the scanner with its working directory set to the module
//! root and the package pattern `.`:
//!
//! - `check . --disallowed_types=<a,b>` reports offending packages on stderr
//!   with lines containing `"<Category> license type"`.
//! - `report . --template=<file>` renders the template to stdout.

use std::path::Path;
use std::process::{Output, Stdio};

use tokio::process::Command;

use crate::error::{Result, SweepError};
use crate::models::{LicenseType, Violations};
use crate::report::template::TemplateFile;

/// go-licenses prefixes every offending package with one of these.
const VIOLATION_MARKERS: [&str; 4] = [
    "Reciprocal license type",
    "Forbidden license type",
    "Notice license type",
    "Restricted license type",
];

/// Extract the distinct stderr lines that report a disallowed license.
pub fn parse_violations(stderr: &str) -> Violations {
    stderr
        .lines()
        .filter(|line| VIOLATION_MARKERS.iter().any(|marker| line.contains(marker)))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct Scanner {
    program: String,
}

impl Scanner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `check` in `dir` and return the violations it reported.
    ///
    /// A successful exit means no violations. A failing exit status is
    /// expected when violations exist; without any recognizable violation
    /// line it is a scanner error.
    pub async fn check(&self, dir: &Path, disallowed: &[LicenseType]) -> Result<Violations> {
        let types: Vec<&str> = disallowed.iter().map(LicenseType::as_str).collect();
        let args = [
            "check".to_string(),
            ".".to_string(),
            format!("--disallowed_types={}", types.join(",")),
        ];
        let output = self.run(dir, &args).await?;

        if output.status.success() {
            log::info!("checked licenses in {}", dir.display());
            return Ok(Violations::new());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let violations = parse_violations(&stderr);

        if violations.is_empty() {
            return Err(SweepError::Scanner {
                program: self.program.clone(),
                dir: dir.to_path_buf(),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        for line in &violations {
            log::warn!("violation in {}: {line}", dir.display());
        }
        log::info!("checked licenses in {}", dir.display());
        Ok(violations)
    }

    /// Run `report` in `dir` with the embedded template and return the
    /// rendered document.
    ///
    /// The template file lives in `dir` only for the duration of the call.
    pub async fn report(&self, dir: &Path) -> Result<Vec<u8>> {
        let template = TemplateFile::create_in(dir)?;
        let args = [
            "report".to_string(),
            ".".to_string(),
            format!("--template={}", template.path().display()),
        ];
        let output = self.run(dir, &args).await;
        drop(template);
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SweepError::Scanner {
                program: self.program.clone(),
                dir: dir.to_path_buf(),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(output.stdout)
    }

    async fn run(&self, dir: &Path, args: &[String]) -> Result<Output> {
        log::debug!("running `{} {}` in {}", self.program, args.join(" "), dir.display());

        Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| SweepError::Spawn {
                program: self.program.clone(),
                dir: dir.to_path_buf(),
                source,
            })
    }
}
