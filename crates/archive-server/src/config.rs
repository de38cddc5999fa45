use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub max_items_per_page: u32,
    pub storage_dir: PathBuf,
    pub cdn_dir: PathBuf,
    pub attachments_dir: PathBuf,
    pub avatars_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys fall back to defaults; set but
    /// unparseable keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_dir: PathBuf = lookup("ARCHIVE_STORAGE_DIR")
            .unwrap_or_else(|| "./storage".into())
            .into();
        let files_dir = storage_dir.join("files");

        let max_items_per_page: u32 = parse_or(&lookup, "ARCHIVE_MAX_ITEMS_PER_PAGE", 100)?;
        if max_items_per_page == 0 {
            anyhow::bail!("ARCHIVE_MAX_ITEMS_PER_PAGE must be at least 1");
        }

        Ok(Self {
            host: lookup("ARCHIVE_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "ARCHIVE_PORT", 8000)?,
            debug: lookup("ARCHIVE_DEBUG").is_some_and(|v| parse_flag(&v)),
            max_items_per_page,
            cdn_dir: lookup("ARCHIVE_CDN_DIR")
                .unwrap_or_else(|| "./cdn".into())
                .into(),
            attachments_dir: lookup("ARCHIVE_ATTACHMENTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| files_dir.join("attachments")),
            avatars_dir: lookup("ARCHIVE_AVATARS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| files_dir.join("avatars")),
            storage_dir,
        })
    }

    /// Default `RUST_LOG` filter when none is set.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "archive=debug,archive_api=debug,archive_store=debug,tower_http=debug"
        } else {
            "archive=info,archive_api=info,archive_store=info,tower_http=info"
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid {} value '{}'", key, raw)),
        None => Ok(default),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
