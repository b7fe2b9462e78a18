use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, SweepError};

/// go-licenses report template rendering a Markdown page of package/license
/// rows, skipping packages whose license could not be classified.
pub const REPORT_TEMPLATE: &str = r#"---
hub-title: Licenses
---

The following tools / packages are used in this plugin:

| Name | License |
|------|---------|
{{- range . }}
{{- if ne .LicenseName "Unknown" }}
| {{ .Name }} | {{ .LicenseName }} |
{{- end }}
{{- end }}"#;

/// The report template written to disk for the lifetime of this value.
///
/// The file is removed on drop, which covers scanner failures and panics
/// alike.
#[derive(Debug)]
pub struct TemplateFile {
    file: NamedTempFile,
}

impl TemplateFile {
    /// Write [`REPORT_TEMPLATE`] to a fresh hidden file inside `dir`.
    pub fn create_in(dir: &Path) -> Result<Self> {
        let persist_err = |source| SweepError::Persist {
            path: dir.to_path_buf(),
            source,
        };

        let mut file = tempfile::Builder::new()
            .prefix(".license-template-")
            .suffix(".tpl")
            .tempfile_in(dir)
            .map_err(persist_err)?;
        file.write_all(REPORT_TEMPLATE.as_bytes()).map_err(persist_err)?;
        file.flush().map_err(persist_err)?;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
