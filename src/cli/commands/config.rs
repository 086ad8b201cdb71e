//! Config command handler

use crate::args::ConfigSubcommand;
use relgraph::config::Config;
use std::io::{self, Write};

/// Dispatch config subcommands
///
/// # Errors
/// Returns a printable message for unknown keys, bad values or save failures
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None => {
            show(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            if show(config, key.as_deref()) {
                Ok(())
            } else {
                Err(format!("✗ Unknown config key: '{}'", key.unwrap_or_default()))
            }
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value).map_err(|e| format!("✗ {e}"))?;
            save(config)?;
            println!("✓ Set {key} = {value}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults).map_err(|e| format!("✗ {e}"))?;
            save(config)?;
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

/// Print one value or the whole configuration; `false` if the key is unknown
fn show(config: &Config, key: Option<&str>) -> bool {
    match key {
        Some(key) => config.get(key).map(|value| println!("{value}")).is_some(),
        None => {
            println!("\n=== Configuration ({}) ===\n", Config::get_config_file_path().display());
            print!("{config}");
            true
        }
    }
}

fn save(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();
    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
