//! Output produced by a sweep.
//!
//! - [`template`]: the embedded go-licenses template, materialized as a
//!   scoped temporary file while `report` runs.
//! - [`markdown`]: persists the rendered report inside each module.
//! - [`terminal`]: colored summary table for `check`.

pub mod markdown;
pub mod template;
pub mod terminal;
