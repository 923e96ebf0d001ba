use crate::output::{self, OutputMode};
use anyhow::{Context as _, Result};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force re-initialization even if `.encosta/` already exists.
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TOML: &str = "# Landslide-risk project configuration.\n\
    #\n\
    # The builtin catalog covers the five S\u{e3}o Paulo zones (ids 1-5). To track\n\
    # different locations, uncomment the entries below and list your own; any\n\
    # entry here replaces the builtin catalog entirely.\n\
    #\n\
    # [[catalog.locations]]\n\
    # id = \"n1\"\n\
    # name = \"Morro do Marco\"\n\
    # region = \"Santos\"\n\
    # image_ref = \"https://example.com/morro-do-marco.jpg\"\n";

const GITIGNORE: &str = "*.lock\n*.json.tmp\n";

/// Execute `enc init`. Creates the project skeleton:
///
/// ```text
/// .encosta/
///   config.toml    (commented catalog template)
///   .gitignore     (lock and temp-write artifacts)
/// ```
///
/// The JSON collections (`reports.json`, `users.json`) are not created here;
/// they appear on first write and absent collections read as empty.
///
/// # Errors
///
/// Returns an error if `.encosta/` already exists and `--force` is not set,
/// or if any filesystem operation fails.
pub fn run_init(
    args: &InitArgs,
    project_root: &Path,
    output: OutputMode,
    quiet: bool,
) -> Result<()> {
    let encosta_dir = project_root.join(".encosta");

    if encosta_dir.exists() && !args.force {
        anyhow::bail!(".encosta/ already exists. Use `enc init --force` to reinitialize.");
    }

    std::fs::create_dir_all(&encosta_dir)
        .with_context(|| format!("Failed to create directory: {}", encosta_dir.display()))?;

    let config_path = encosta_dir.join("config.toml");
    std::fs::write(&config_path, CONFIG_TOML)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    let gitignore_path = encosta_dir.join(".gitignore");
    std::fs::write(&gitignore_path, GITIGNORE)
        .with_context(|| format!("Failed to write .gitignore: {}", gitignore_path.display()))?;

    output::render_success(output, "Initialized .encosta/ project structure.")?;

    // Onboarding hints
    if !quiet && !output.is_json() {
        println!();
        println!("Next steps:");
        println!("  Register the first users:");
        println!("    enc user add --id a1 --name Ana --email ana@example.com --role admin");
        println!("    enc user add --id p1 --name Rui --email rui@example.com --role reporter");
        println!();
        println!("  Submit the first report:");
        println!("    enc report --as p1 --date 10/05/2024 --time 14:30 \\");
        println!("        --moisture humid --slope steep --location 3");
    }

    Ok(())
}
