use crate::core::cipher::{CipherMode, DEFAULT_KEY, KEY_LEN};
use crate::core::ConfigProvider;
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "libraryData.enc";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub encryption: EncryptionConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct EncryptionConfig {
    #[serde(default)]
    pub mode: CipherMode,
    #[serde(default = "default_key")]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            mode: CipherMode::default(),
            key: default_key(),
        }
    }
}

impl std::fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("mode", &self.mode)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl LibraryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LibraryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Like `from_file`, but a missing file means built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LibraryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LIBRARY_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LibraryError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let data_file = self.storage.data_file.to_string_lossy();
        crate::utils::validation::validate_path("storage.data_file", &data_file)?;

        if self.encryption.key.starts_with("${") {
            return Err(LibraryError::MissingConfigError {
                field: format!("encryption.key (unset {})", self.encryption.key),
            });
        }
        crate::utils::validation::validate_key_length(
            "encryption.key",
            &self.encryption.key,
            KEY_LEN,
        )?;

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn uses_default_key(&self) -> bool {
        self.encryption.key == DEFAULT_KEY
    }
}

impl ConfigProvider for LibraryConfig {
    fn data_file(&self) -> &Path {
        &self.storage.data_file
    }

    fn cipher_mode(&self) -> CipherMode {
        self.encryption.mode
    }

    fn cipher_key(&self) -> &[u8] {
        self.encryption.key.as_bytes()
    }
}

impl Validate for LibraryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
