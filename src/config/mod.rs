pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::cipher::CipherMode;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::LibraryConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "small-library")]
#[command(about = "Track books, members and checkouts in an encrypted local file")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "library.toml")]
    pub config: PathBuf,

    /// Override the data file from the configuration
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Override the cipher mode (aes128-ecb or aes128-gcm)
    #[arg(long, global = true)]
    pub cipher: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a book to the catalogue
    AddBook {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
    },
    /// Register a member
    AddMember {
        #[arg(long)]
        name: String,
    },
    /// Issue a book to a member
    Issue {
        #[arg(long)]
        book_id: String,
        #[arg(long)]
        member_id: String,
    },
    /// Return a book issued to a member
    Return {
        #[arg(long)]
        book_id: String,
        #[arg(long)]
        member_id: String,
    },
    /// Print one of the library views
    List {
        #[arg(value_enum, default_value_t = View::All)]
        view: View,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Available,
    Issued,
    History,
    Members,
    All,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<LibraryConfig> {
        let mut config = LibraryConfig::load_or_default(&self.config)?;

        if let Some(data_file) = &self.data_file {
            config.storage.data_file = data_file.clone();
            tracing::debug!("Data file overridden to: {}", data_file.display());
        }
        if let Some(cipher) = &self.cipher {
            config.encryption.mode = cipher.parse::<CipherMode>()?;
            tracing::debug!("Cipher mode overridden to: {}", config.encryption.mode);
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::path::Path;

    #[test]
    fn test_parse_issue_command() {
        let cli = CliConfig::parse_from([
            "small-library",
            "issue",
            "--book-id",
            "3",
            "--member-id",
            "1",
        ]);
        match cli.command {
            Command::Issue { book_id, member_id } => {
                assert_eq!(book_id, "3");
                assert_eq!(member_id, "1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_list_defaults_to_all() {
        let cli = CliConfig::parse_from(["small-library", "list"]);
        assert!(matches!(cli.command, Command::List { view: View::All }));
    }

    #[test]
    fn test_overrides_apply_over_defaults() {
        let cli = CliConfig::parse_from([
            "small-library",
            "--config",
            "/nonexistent/library.toml",
            "--data-file",
            "custom.enc",
            "--cipher",
            "aes128-gcm",
            "list",
            "members",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.data_file(), Path::new("custom.enc"));
        assert_eq!(config.cipher_mode(), CipherMode::Aes128Gcm);
    }

    #[test]
    fn test_bad_cipher_override_is_rejected() {
        let cli = CliConfig::parse_from([
            "small-library",
            "--config",
            "/nonexistent/library.toml",
            "--cipher",
            "des",
            "list",
        ]);
        assert!(cli.resolve().is_err());
    }
}
