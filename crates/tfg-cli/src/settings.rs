//! Runtime configuration for `tfgctl`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use tfg_core::defense::DEFAULT_DURATION_MINUTES;

/// Settings read from `tfgctl.toml`, then `TFG_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite file backing the directory. A leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:              PathBuf,
  /// Half-width of the window used by schedule-conflict lookups.
  #[serde(default = "default_conflict_window")]
  pub conflict_window_minutes: u32,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/tfg/directory.db") }

fn default_conflict_window() -> u32 { DEFAULT_DURATION_MINUTES }

impl Settings {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TFG"))
      .build()
      .context("failed to read config file")?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Path::new("/nonexistent/tfgctl.toml")).unwrap();
    assert_eq!(settings.conflict_window_minutes, 30);
    assert!(settings.store_path.ends_with("directory.db"));
  }

  #[test]
  fn absolute_paths_are_left_alone() {
    assert_eq!(expand_tilde(Path::new("/var/tfg.db")), PathBuf::from("/var/tfg.db"));
  }
}
