//! `enc confirm` / `enc cancel`: decide a pending report.
//!
//! Both subcommands share the same argument shape and handler; the requested
//! target status is the only difference, so `main` passes it in.

use crate::cmd;
use crate::output::{OutputMode, render_item};
use clap::Args;
use encosta_core::model::Status;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Id of the report to decide.
    #[arg(value_name = "REPORT_ID")]
    pub id: String,
}

pub fn run_review(
    args: &ReviewArgs,
    requested: Status,
    caller_flag: Option<&str>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let service = cmd::open_service(project_root)?;
    let caller = cmd::authenticate_caller(&service, caller_flag, output)?;

    match service.transition_report(Some(&caller), &args.id, requested) {
        Ok(record) => render_item(&record, output)?,
        Err(err) => return cmd::fail(output, &err),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_args_take_a_positional_id() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ReviewArgs,
        }
        let w = Wrapper::parse_from(["test", "1714763897000"]);
        assert_eq!(w.args.id, "1714763897000");
    }
}
