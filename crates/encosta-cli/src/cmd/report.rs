//! `enc report`: submit a new landslide-risk report.

use crate::cmd;
use crate::output::{OutputMode, render_item};
use clap::Args;
use encosta_core::model::ReportDraft;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Observation date (DD/MM/YYYY).
    #[arg(long)]
    pub date: String,

    /// Observation time (HH:MM). May be left empty.
    #[arg(long, default_value = "")]
    pub time: String,

    /// Soil moisture: dry, humid, or waterlogged. Legacy Portuguese labels
    /// (Seco, Úmido, Encharcado) are accepted too.
    #[arg(long)]
    pub moisture: String,

    /// Soil slope: flat, mild, or steep. Legacy Portuguese labels
    /// (Plano, Leve, Íngreme) are accepted too.
    #[arg(long)]
    pub slope: String,

    /// Catalog id of the observed location (see `enc locations`).
    #[arg(long, value_name = "LOCATION_ID")]
    pub location: String,
}

pub fn run_report(
    args: &ReportArgs,
    caller_flag: Option<&str>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let service = cmd::open_service(project_root)?;
    let caller = cmd::authenticate_caller(&service, caller_flag, output)?;

    let draft = ReportDraft {
        date: args.date.clone(),
        time: args.time.clone(),
        soil_moisture: args.moisture.clone(),
        soil_slope: args.slope.clone(),
        location_id: args.location.clone(),
    };

    match service.create_report(Some(&caller), draft) {
        Ok(record) => render_item(&record, output)?,
        Err(err) => return cmd::fail(output, &err),
    }
    Ok(())
}
