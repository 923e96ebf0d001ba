//! `enc locations`: list the location catalog.
//!
//! Catalog entries are reference data, so no caller identity is needed.

use crate::cmd;
use crate::output::{OutputMode, render_list};
use std::path::Path;

pub fn run_locations(output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let service = cmd::open_service(project_root)?;
    render_list(service.list_locations(), output)?;
    Ok(())
}
