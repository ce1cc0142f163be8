use std::path::Path;

use crate::config::{CONFIG_FILE, CliOverrides, Config, ISSUES_DIR, load_config};
use crate::error::Result;
use crate::format::{EnvReport, VcsReport, print_json};
use crate::vcs::{self, parse_status_report};

/// Execute the env command.
///
/// # Errors
///
/// Returns an error if the issues directory cannot be located.
pub fn execute(json: bool, overrides: &CliOverrides) -> Result<()> {
    let config = load_config(overrides)?;
    let report = build_report(&config);

    if json {
        return print_json(&report);
    }

    println!("Settings used by this command:\n");
    println!("Editor: {}", report.editor);
    println!("Root Directory: {}", report.root);
    println!("Issues Directory: {}", report.issues_dir);
    println!(
        "Settings file: {}",
        report.config_file.as_deref().unwrap_or("(none)")
    );
    println!();
    match &report.vcs {
        Some(vcs) => {
            println!("VCS Type: {}", vcs.type_name);
            println!("{} Directory: {}", vcs.type_name, vcs.root);
            if vcs.pending.is_empty() {
                println!("Need Committing or Staging: (nothing)");
            } else {
                println!("Need Committing or Staging:");
                for entry in &vcs.pending {
                    println!("    {entry}");
                }
            }
        }
        None => println!("VCS Type: None (purge and commit commands unavailable)"),
    }
    Ok(())
}

fn build_report(config: &Config) -> EnvReport {
    let config_path = config.root.join(CONFIG_FILE);
    let vcs = vcs::detect_vcs(&config.root).map(|detected| {
        let gateway = detected.gateway(&config.root);
        let pending = match gateway.status_report(Path::new(ISSUES_DIR)) {
            Ok(raw) => parse_status_report(&raw)
                .iter()
                .map(vcs::StatusRecord::to_wire)
                .collect(),
            Err(e) => {
                tracing::warn!("Could not query VCS status: {e}");
                Vec::new()
            }
        };
        VcsReport {
            type_name: gateway.type_name().to_string(),
            root: detected.repo_root.display().to_string(),
            pending,
        }
    });

    EnvReport {
        editor: config.editor.clone(),
        root: config.root.display().to_string(),
        issues_dir: config.issues_dir.display().to_string(),
        config_file: config_path
            .is_file()
            .then(|| config_path.display().to_string()),
        description_file: config.description_file.clone(),
        autoclose: config.autoclose,
        vcs,
    }
}
