//! `cdi-hook plan` — Display what a hook plan would create.

use std::path::PathBuf;

use cdihook_core::filesystem::symlink::resolve_symlinks;
use cdihook_core::plan::load_plan;
use clap::Args;

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the hook plan file.
    pub hooks_file: PathBuf,

    /// Print the resolved plan as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `plan` command.
///
/// Loads the plan and resolves every symlink target relative to its link,
/// without touching any root filesystem.
///
/// # Errors
///
/// Returns an error if the plan cannot be loaded or a link is invalid.
pub fn execute(args: &PlanArgs) -> anyhow::Result<()> {
    let plan = load_plan(&args.hooks_file)?;
    let symlinks = resolve_symlinks(&plan.symlinks)?;

    if args.json {
        let links: Vec<_> = symlinks
            .iter()
            .map(|s| {
                serde_json::json!({
                    "link": s.link.display().to_string(),
                    "target": s.target.display().to_string(),
                })
            })
            .collect();
        let doc = serde_json::json!({
            "symlinks": links,
            "ld_cache_updates": plan.ld_cache_updates,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Hook plan: {}", args.hooks_file.display());
    if !plan.container_rootfs.is_empty() {
        println!("  computed for: {}", plan.container_rootfs);
    }
    println!();

    let width = output::link_column_width(symlinks.iter().map(|s| s.link.as_path()));
    for symlink in &symlinks {
        println!("  + {}", output::format_symlink(&symlink.link, &symlink.target, width));
    }
    println!("  {} symlink(s).", symlinks.len());

    if !plan.ld_cache_updates.is_empty() {
        println!();
        println!("  Linker search paths:");
        for update in &plan.ld_cache_updates {
            println!("    {update}");
        }
    }

    Ok(())
}
