//! `enc list`: list reports visible to the caller.

use crate::cmd;
use crate::output::{OutputMode, render_list};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List every report regardless of the caller's default scope.
    ///
    /// Reviewing roles already see everything; for reporters this flag is
    /// refused rather than silently narrowed.
    #[arg(long)]
    pub all: bool,
}

pub fn run_list(
    args: &ListArgs,
    caller_flag: Option<&str>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let service = cmd::open_service(project_root)?;
    let caller = cmd::authenticate_caller(&service, caller_flag, output)?;

    let result = if args.all {
        service.list_all_reports(Some(&caller))
    } else {
        service.list_reports_for_caller(Some(&caller))
    };

    match result {
        Ok(reports) => render_list(&reports, output)?,
        Err(err) => return cmd::fail(output, &err),
    }
    Ok(())
}
