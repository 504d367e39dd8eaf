//! Command-line configuration.
//!
//! Settings come from a TOML file and can be overridden through environment variables:
//!
//! | Variable              | Effect                                   |
//! |-----------------------|------------------------------------------|
//! | `RESUME_PDF_CONFIG`   | path of the configuration file           |
//! | `RESUME_PDF_DATA_DIR` | directory holding the account store      |
//! | `RESUME_PDF_OUTPUT`   | where rendered PDFs are written          |
//!
//! Without `RESUME_PDF_CONFIG` the file is `config.toml` inside the data directory. A missing
//! file means defaults.
//!
//! The data directory defaults to `resume_pdf` under the platform data directory
//! (`~/.local/share` on Linux), then to `~/.resume_pdf`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::{ResumePdfBuilder, DOWNLOAD_FILE_NAME};
use crate::fonts::DEFAULT_FONT_SIZE;
use crate::layout::{PageGeometry, PaperSize};
use crate::store::JsonFileStorage;

pub const CONFIG_ENV: &str = "RESUME_PDF_CONFIG";
pub const DATA_DIR_ENV: &str = "RESUME_PDF_DATA_DIR";
pub const OUTPUT_ENV: &str = "RESUME_PDF_OUTPUT";

const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_DIR_NAME: &str = "resume_pdf";
const HOME_DATA_DIR_NAME: &str = ".resume_pdf";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {} is malformed", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no data directory configured and no home directory found; set {DATA_DIR_ENV}")]
    NoDataDir,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account store location; the platform default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub output_file: PathBuf,
    pub paper: PaperSize,
    pub margin_mm: f32,
    pub default_font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_file: PathBuf::from(DOWNLOAD_FILE_NAME),
            paper: PaperSize::A4,
            margin_mm: PageGeometry::DEFAULT_MARGIN_MM,
            default_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    resolve_data_dir(dirs::data_dir(), dirs::home_dir())
}

fn resolve_data_dir(
    data_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(data_dir) = data_dir {
        return Ok(data_dir.join(DATA_DIR_NAME));
    }
    if let Some(home) = home_dir {
        return Ok(home.join(HOME_DATA_DIR_NAME));
    }
    Err(ConfigError::NoDataDir)
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

impl Config {
    /// Loads the configuration from the default location and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = match env_path(CONFIG_ENV) {
            Some(path) => path,
            None => {
                let dir = match env_path(DATA_DIR_ENV) {
                    Some(dir) => dir,
                    None => default_data_dir()?,
                };
                dir.join(CONFIG_FILE_NAME)
            }
        };
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// Loads `path`, or defaults if it does not exist. No environment overrides are applied.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self) {
        if let Some(dir) = env_path(DATA_DIR_ENV) {
            self.data_dir = Some(dir);
        }
        if let Some(output) = env_path(OUTPUT_ENV) {
            self.output_file = output;
        }
    }

    /// The configured data directory, or the platform default.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// The JSON account store inside the data directory.
    pub fn storage(&self) -> Result<JsonFileStorage, ConfigError> {
        Ok(JsonFileStorage::in_dir(self.data_dir()?))
    }

    /// A PDF builder with this configuration's page setup.
    pub fn pdf_builder(&self) -> ResumePdfBuilder {
        ResumePdfBuilder::new()
            .with_paper(self.paper)
            .with_margin(self.margin_mm)
            .with_fallback_font_size(self.default_font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/no/such/config.toml")).expect("defaults");
        assert_eq!(config.output_file, PathBuf::from("resume.pdf"));
        assert_eq!(config.paper, PaperSize::A4);
        assert_eq!(config.margin_mm, 20.0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "paper = \"letter\"\ndefault_font_size = 12.0\n").expect("write");

        let config = Config::load_from(&path).expect("parses");
        assert_eq!(config.paper, PaperSize::Letter);
        assert_eq!(config.default_font_size, 12.0);
        assert_eq!(config.margin_mm, 20.0);
        assert_eq!(config.pdf_builder().geometry().width, 215.9);
    }

    #[test]
    fn data_dir_prefers_platform_directory() {
        let resolved = resolve_data_dir(
            Some(PathBuf::from("/data")),
            Some(PathBuf::from("/home/jane")),
        )
        .expect("resolved");
        assert_eq!(resolved, PathBuf::from("/data/resume_pdf"));

        let resolved = resolve_data_dir(None, Some(PathBuf::from("/home/jane"))).expect("resolved");
        assert_eq!(resolved, PathBuf::from("/home/jane/.resume_pdf"));
    }

    #[test]
    fn missing_home_directory_is_an_error() {
        assert!(matches!(
            resolve_data_dir(None, None),
            Err(ConfigError::NoDataDir)
        ));
    }

    #[test]
    fn configured_data_dir_is_used_for_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let store = dir.path().join("store");
        std::fs::write(&path, format!("data_dir = {:?}\n", store.display().to_string()))
            .expect("write");

        let config = Config::load_from(&path).expect("parses");
        assert_eq!(config.data_dir().expect("data dir"), store);
        assert!(config
            .storage()
            .expect("storage")
            .path()
            .starts_with(&store));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "paper = [").expect("write");
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
