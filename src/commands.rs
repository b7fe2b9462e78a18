use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::error::SweepError;
use crate::locator::require_module_roots;
use crate::models::{CheckOutcome, LicenseType};
use crate::orchestrator::{first_error, TaskGroup};
use crate::report;
use crate::scanner::Scanner;

/// Everything a subcommand needs, built once per invocation.
#[derive(Debug)]
pub struct Sweep {
    pub config: Config,
    pub scanner: Scanner,
    pub quiet: bool,
}

impl Sweep {
    pub fn new(config: Config, quiet: bool) -> Self {
        let scanner = Scanner::new(config.scanner.clone());
        Self {
            config,
            scanner,
            quiet,
        }
    }

    fn modules(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let dirs = require_module_roots(root, &self.config.descriptor)?;
        log::info!("found {} modules under {}", dirs.len(), root.display());
        Ok(dirs)
    }

    fn task_group<T: Send + 'static>(&self, message: &'static str) -> Result<TaskGroup<T>> {
        let pb = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )?
                    .progress_chars("#>-"),
            );
            pb.set_message(message);
            pb
        };
        Ok(TaskGroup::new(self.config.jobs).with_progress(pb))
    }

    /// Check every module under `root` and fail on the first module with
    /// violations or scanner error.
    pub async fn check(&self, root: &Path, disallowed: &[LicenseType], json: bool) -> Result<()> {
        let dirs = self.modules(root)?;
        let disallowed: Arc<[LicenseType]> = if disallowed.is_empty() {
            self.config.disallowed_types.as_slice().into()
        } else {
            disallowed.into()
        };

        let mut group = self.task_group("checking")?;
        for dir in dirs {
            let scanner = self.scanner.clone();
            let disallowed = Arc::clone(&disallowed);
            group.spawn(async move {
                log::info!("checking licenses in {}", dir.display());
                let violations = scanner.check(&dir, &disallowed).await?;
                Ok::<_, SweepError>(CheckOutcome { dir, violations })
            });
        }

        log::debug!("dispatched {} checks", group.len());

        let mut outcomes = Vec::new();
        let mut failed = 0;
        let mut results: Vec<crate::error::Result<()>> = Vec::new();
        for result in group.wait_all().await {
            match result {
                Ok(outcome) => {
                    if !outcome.is_clean() {
                        results.push(Err(SweepError::ViolationsFound {
                            dir: outcome.dir.clone(),
                            count: outcome.violations.len(),
                        }));
                    }
                    outcomes.push(outcome);
                }
                Err(e) => {
                    failed += 1;
                    results.push(Err(e));
                }
            }
        }
        outcomes.sort_by(|a, b| a.dir.cmp(&b.dir));

        if json {
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        } else if !self.quiet {
            report::terminal::render_check(&outcomes, failed);
        }

        first_error(results)?;
        Ok(())
    }

    /// Generate and persist a license report for every module under `root`.
    pub async fn report(&self, root: &Path) -> Result<()> {
        let dirs = self.modules(root)?;
        let report_path = Arc::new(self.config.report_path.clone());

        let mut group = self.task_group("reporting")?;
        for dir in dirs {
            let scanner = self.scanner.clone();
            let report_path = Arc::clone(&report_path);
            group.spawn(async move {
                log::info!("creating license report in {}", dir.display());
                let body = scanner.report(&dir).await?;
                report::markdown::write_report(&dir, &report_path, &body).await?;
                Ok::<_, SweepError>(())
            });
        }

        log::debug!("dispatched {} reports", group.len());

        group.wait().await?;
        Ok(())
    }
}
