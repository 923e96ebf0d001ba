//! `enc user add` / `enc user list`: manage the user registry.
//!
//! Registration is open so a fresh project can create its first admin
//! without a chicken-and-egg problem; listing is reviewer-gated.

use crate::cmd;
use crate::output::{self, CliError, OutputMode, render_item, render_list};
use clap::Args;
use encosta_core::model::{Role, UserRecord};
use std::path::Path;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Unique user id. Referenced later by `--as` and stored on reports.
    #[arg(long)]
    pub id: String,

    /// Display name.
    #[arg(long)]
    pub name: String,

    /// Contact email.
    #[arg(long)]
    pub email: String,

    /// Role: admin, reviewer, or reporter. Legacy role names
    /// (doctor, patient) are accepted and mapped.
    #[arg(long)]
    pub role: String,
}

pub fn run_add(args: &AddArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let role = match args.role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => {
            output::render_error(
                output,
                &CliError::with_details(
                    e.to_string(),
                    "Use admin, reviewer, or reporter",
                    "invalid_role",
                ),
            )?;
            anyhow::bail!("{e}");
        }
    };

    let service = cmd::open_service(project_root)?;
    let record = UserRecord {
        id: args.id.clone(),
        name: args.name.clone(),
        email: args.email.clone(),
        role,
    };

    match service.register_user(record) {
        Ok(registered) => render_item(&registered, output)?,
        Err(err) => return cmd::fail(output, &err),
    }
    Ok(())
}

pub fn run_list(
    caller_flag: Option<&str>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let service = cmd::open_service(project_root)?;
    let caller = cmd::authenticate_caller(&service, caller_flag, output)?;

    match service.list_users(Some(&caller)) {
        Ok(users) => render_list(&users, output)?,
        Err(err) => return cmd::fail(output, &err),
    }
    Ok(())
}
