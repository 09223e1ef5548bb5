use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Environment variable overriding `api.url`
pub const API_URL_ENV: &str = "SHELF_API_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  /// Custom title for header (defaults to the API host if not set)
  pub title: Option<String>,
  #[serde(default)]
  pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  #[serde(default = "default_api_url")]
  pub url: String,
  /// Per-request timeout. Requests wait indefinitely when unset.
  pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: default_api_url(),
      timeout_secs: None,
    }
  }
}

fn default_api_url() -> String {
  DEFAULT_API_URL.to_string()
}

impl ApiConfig {
  /// Parsed base URL, always ending in `/` so endpoint paths join below it.
  pub fn base_url(&self) -> Result<Url> {
    let mut url =
      Url::parse(&self.url).map_err(|e| eyre!("Invalid API url '{}': {}", self.url, e))?;
    if url.cannot_be_a_base() {
      return Err(eyre!("Invalid API url '{}': not a base url", self.url));
    }
    if !url.path().ends_with('/') {
      let path = format!("{}/", url.path());
      url.set_path(&path);
    }
    Ok(url)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
  /// Filter directive, e.g. "info" or "shelf=debug"
  #[serde(default = "default_log_level")]
  pub level: String,
  /// Directory for log files (default: $XDG_DATA_HOME/shelf/logs)
  pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      directory: None,
    }
  }
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./shelf.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/shelf/config.yaml
  ///
  /// Without a file every setting takes its default.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("shelf.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("shelf").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    // An empty file deserializes to null, not to an empty mapping.
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    let config: Config = serde_yaml::from_str(contents).map_err(|e| eyre!("{}", e))?;
    config.api.base_url()?;
    Ok(config)
  }

  /// Apply the API url override, flag first, then environment.
  pub fn with_overrides(
    self,
    flag_url: Option<String>,
    env: impl Fn(&str) -> Option<String>,
  ) -> Result<Self> {
    let url = flag_url.or_else(|| env(API_URL_ENV).filter(|u| !u.is_empty()));

    let config = match url {
      Some(url) => Config {
        api: ApiConfig { url, ..self.api },
        ..self
      },
      None => self,
    };
    config.api.base_url()?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn no_env(_: &str) -> Option<String> {
    None
  }

  #[test]
  fn test_full_config() {
    let yaml = r#"
api:
  url: https://shop.example.com/store
  timeout_secs: 10
title: Corner Shop
logging:
  level: shelf=debug
  directory: /tmp/shelf-logs
"#;
    let config = Config::parse(yaml).unwrap();
    assert_eq!(config.api.url, "https://shop.example.com/store");
    assert_eq!(config.api.timeout_secs, Some(10));
    assert_eq!(config.title.as_deref(), Some("Corner Shop"));
    assert_eq!(config.logging.level, "shelf=debug");
    assert_eq!(
      config.logging.directory,
      Some(PathBuf::from("/tmp/shelf-logs"))
    );
  }

  #[test]
  fn test_defaults_fill_missing_sections() {
    let config = Config::parse("title: Kiosk\n").unwrap();
    assert_eq!(config.api.url, DEFAULT_API_URL);
    assert_eq!(config.api.timeout_secs, None);
    assert_eq!(config.logging.level, "info");
  }

  #[test]
  fn test_empty_file_is_default() {
    let config = Config::parse("  \n").unwrap();
    assert_eq!(config.api.url, DEFAULT_API_URL);
  }

  #[test]
  fn test_invalid_url_is_rejected() {
    assert!(Config::parse("api:\n  url: not a url\n").is_err());
  }

  #[test]
  fn test_base_url_gets_trailing_slash() {
    let api = ApiConfig {
      url: "https://shop.example.com/store".into(),
      timeout_secs: None,
    };
    assert_eq!(
      api.base_url().unwrap().as_str(),
      "https://shop.example.com/store/"
    );
  }

  #[test]
  fn test_flag_beats_env() {
    let config = Config::default()
      .with_overrides(Some("http://flag:1".into()), |_| {
        Some("http://env:2".into())
      })
      .unwrap();
    assert_eq!(config.api.url, "http://flag:1");
  }

  #[test]
  fn test_env_beats_file() {
    let file = Config::parse("api:\n  url: http://file:3\n").unwrap();
    let config = file
      .with_overrides(None, |name| {
        (name == API_URL_ENV).then(|| "http://env:2".to_string())
      })
      .unwrap();
    assert_eq!(config.api.url, "http://env:2");
  }

  #[test]
  fn test_no_override_keeps_file_value() {
    let file = Config::parse("api:\n  url: http://file:3\n  timeout_secs: 4\n").unwrap();
    let config = file.with_overrides(None, no_env).unwrap();
    assert_eq!(config.api.url, "http://file:3");
    assert_eq!(config.api.timeout_secs, Some(4));
  }

  #[test]
  fn test_load_missing_explicit_path_fails() {
    let err = Config::load(Some(Path::new("/nonexistent/shelf.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }
}
