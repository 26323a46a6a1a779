//! Command-line options

use super::settings_persistence::{default_settings_path, SettingsPath};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Chess board with drag-and-drop moves and engine preferences", long_about = None)]
pub struct Cli {
    /// Preferences file to read at startup and write on save
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Log filter, in `RUST_LOG` syntax
    #[arg(long, default_value = "info,wgpu=error,naga=warn")]
    pub log_filter: String,
}

impl Cli {
    pub fn settings_path(&self) -> SettingsPath {
        SettingsPath(self.settings.clone().unwrap_or_else(default_settings_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_override() {
        let cli = Cli::parse_from(["chessboy", "--settings", "/tmp/prefs.json"]);
        assert_eq!(cli.settings_path(), SettingsPath(PathBuf::from("/tmp/prefs.json")));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["chessboy"]);
        assert_eq!(cli.settings_path(), SettingsPath(default_settings_path()));
        assert!(cli.log_filter.starts_with("info"));
    }
}
