//! Configuration management for prismaop
//!
//! Tenant settings live in an INI file with a `[prismacloud]` section,
//! matching the layout the console automation tooling already uses.
//! The file is parsed exactly once per invocation into an immutable
//! [`Config`] that is passed to every component.

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::{ConfigError, Result};

/// Default page size for offset-paginated endpoints.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default number of paged requests between proactive re-logins.
///
/// The vendor token carries no usable TTL, so staleness is assumed by
/// request count rather than measured.
pub const DEFAULT_REAUTH_EVERY: u64 = 50;

const SECTION: &str = "prismacloud";

/// Immutable application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// CSPM API base URL (login, accounts, alerts, CSPM collections)
    pub cspm_api_url: String,

    /// CWP console base URL (defenders, discovery, images, CWP collections)
    pub cwp_api_url: String,

    /// Tenant access key / username
    pub username: String,

    /// Tenant secret key / password
    pub password: String,

    /// Records per paginated request
    pub page_size: usize,

    /// Paged requests between proactive re-logins
    pub reauth_every_pages: u64,
}

impl Config {
    /// Default config file path: `config.ini` in the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.ini")
    }

    /// Load configuration from `path`, or the default location when `None`.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);
        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let section = ini
            .section(Some(SECTION))
            .ok_or(ConfigError::ParseError(format!(
                "missing [{SECTION}] section"
            )))?;

        let required = |key: &'static str| -> Result<String> {
            section
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingKey(key).into())
        };

        let config = Self {
            cspm_api_url: trim_base_url(&required("cspm_api_url")?),
            cwp_api_url: trim_base_url(&required("cwp_api_url")?),
            username: required("username")?,
            password: required("password")?,
            page_size: parse_optional(section.get("page_size"), DEFAULT_PAGE_SIZE)?,
            reauth_every_pages: parse_optional(
                section.get("reauth_every_pages"),
                DEFAULT_REAUTH_EVERY,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, or the default location when `None`.
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);
        self.save_to(&path)
    }

    /// Save configuration to a specific file with owner-only permissions.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut ini = Ini::new();
        ini.with_section(Some(SECTION))
            .set("cspm_api_url", &self.cspm_api_url)
            .set("cwp_api_url", &self.cwp_api_url)
            .set("username", &self.username)
            .set("password", &self.password);

        ini.write_to_file(path)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;

        // Credentials file: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be non-zero".to_string()).into());
        }
        if self.reauth_every_pages == 0 {
            return Err(
                ConfigError::Invalid("reauth_every_pages must be non-zero".to_string()).into(),
            );
        }
        Ok(())
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_optional<T: std::str::FromStr>(value: Option<&str>, default: T) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid numeric value: {raw}")).into()),
    }
}
