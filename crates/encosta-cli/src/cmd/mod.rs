//! Command handlers for the `enc` binary.
//!
//! Each submodule owns one subcommand. The shared plumbing here opens the
//! file-backed service for a project root and turns a claimed caller id into
//! a verified [`Identity`].

pub mod completions;
pub mod init;
pub mod list;
pub mod locations;
pub mod report;
pub mod review;
pub mod user;

use crate::identity;
use crate::output::{self, CliError, OutputMode};
use anyhow::Result;
use encosta_core::config::{load_project_config, load_user_config};
use encosta_core::model::Identity;
use encosta_core::store::FileStore;
use encosta_core::{ReportError, ReportService};
use std::path::Path;
use tracing::debug;

/// The service every command talks to: records live as JSON collections
/// under `<project_root>/.encosta/`.
pub type Service = ReportService<FileStore>;

/// Open the service for the project rooted at `project_root`.
///
/// Reads `.encosta/config.toml` for catalog overrides; a missing config file
/// means the builtin zone catalog.
pub fn open_service(project_root: &Path) -> Result<Service> {
    let config = load_project_config(project_root)?;
    Ok(ReportService::new(
        FileStore::open(project_root),
        config.catalog(),
    ))
}

/// Resolve the caller id and verify it against the user registry.
///
/// Resolution order is `--as`, then `ENCOSTA_IDENTITY`, then the default
/// identity from the user-level config. The resolved id is only a claim
/// until a registered user with that id is found; the returned [`Identity`]
/// carries that user's stored role, never a role the caller asserted.
pub fn authenticate_caller(
    service: &Service,
    caller_flag: Option<&str>,
    output: OutputMode,
) -> Result<Identity> {
    let user_config = load_user_config()?;
    let caller_id = match identity::require_caller(caller_flag, user_config.identity.as_deref()) {
        Ok(id) => id,
        Err(e) => {
            output::render_error(
                output,
                &CliError::with_details(
                    e.to_string(),
                    "Pass --as <USER_ID>, set ENCOSTA_IDENTITY, or configure a default identity",
                    e.code,
                ),
            )?;
            anyhow::bail!("{e}");
        }
    };

    match service.find_user(&caller_id) {
        Ok(Some(found)) => {
            debug!(caller = %found.id, role = %found.role, "verified caller identity");
            Ok(Identity {
                id: found.id,
                role: found.role,
            })
        }
        Ok(None) => {
            output::render_error(
                output,
                &CliError::with_details(
                    format!("no registered user with id {caller_id}"),
                    "Register the user first with `enc user add`",
                    "unknown_user",
                ),
            )?;
            anyhow::bail!("no registered user with id {caller_id}");
        }
        Err(err) => fail(output, &err),
    }
}

/// Render a domain error in the active output mode, then abort the command
/// with a non-zero exit.
pub fn fail<T>(output: OutputMode, err: &ReportError) -> Result<T> {
    output::render_error(output, &CliError::from(err))?;
    anyhow::bail!("{err}")
}
