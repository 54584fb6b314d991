use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lesson_tree_lib::Settings;
use lesson_tree_lib::settings::{ENV_SNAPSHOT_DIR, ENV_TIMEOUT_SECS, ENV_USER_AGENT, settings_path};

use crate::CliError;

/// Show the settings file location and the effective settings.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    log::info!(
        "{}",
        "lesson-tree settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    for var in [ENV_USER_AGENT, ENV_TIMEOUT_SECS, ENV_SNAPSHOT_DIR] {
        if let Ok(value) = std::env::var(var) {
            log::info!("  Override: ${var} = {value}");
        }
    }
    log::info!("");

    let settings = Settings::load()?;
    for line in settings.to_toml()?.lines() {
        log::info!("  {line}");
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
