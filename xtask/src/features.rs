use std::process::Command;

use anyhow::{Context, Result};

const PACKAGE: &str = "psnlink-common";

/// Tier combinations of `psnlink-common` that downstream crates rely on.
const FEATURE_COMBINATIONS: &[&[&str]] = &[
    &[], // default
    &["runtime"],
    &["platform"],
    &["test-utils"],
];

/// Check that every tier of the common crate compiles on its own.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} {PACKAGE} feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, features) in FEATURE_COMBINATIONS.iter().enumerate() {
        let joined = features.join(",");
        let is_default = features.is_empty();
        let display_label = if is_default { "default".to_string() } else { joined.clone() };

        println!(
            "\n[{}/{}] cargo check -p {PACKAGE}{}",
            index + 1,
            FEATURE_COMBINATIONS.len(),
            if is_default { String::new() } else { format!(" --features {joined}") }
        );

        let mut command = Command::new("cargo");
        command.args(["check", "-p", PACKAGE]);
        if !is_default {
            command.args(["--features", joined.as_str()]);
        }

        let status = command
            .status()
            .with_context(|| format!("Failed to run cargo check for '{display_label}'"))?;

        if !status.success() {
            anyhow::bail!("Feature combination '{display_label}' failed to compile");
        }

        println!("✅ Features '{display_label}' compiled successfully");
    }

    println!("\n✅ All {} feature combinations compile successfully!", FEATURE_COMBINATIONS.len());

    Ok(())
}
