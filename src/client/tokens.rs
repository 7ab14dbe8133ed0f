use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::TokenStore;

/// Tokens held only for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    access: Option<String>,
    refresh: Option<String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.access.clone()
    }

    fn set_access_token(&mut self, value: &str) {
        self.access = Some(value.to_string());
    }

    fn remove_access_token(&mut self) {
        self.access = None;
    }

    fn refresh_token(&self) -> Option<String> {
        self.refresh.clone()
    }

    fn set_refresh_token(&mut self, value: &str) {
        self.refresh = Some(value.to_string());
    }

    fn remove_refresh_token(&mut self) {
        self.refresh = None;
    }
}

/// On-disk layout of [`FileTokenStore`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenFile {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Tokens persisted as JSON, rewritten on every change
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    data: TokenFile,
}

impl FileTokenStore {
    /// Open `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read token file: {:?}", path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse token file: {:?}", path))?
        } else {
            TokenFile::default()
        };

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the tokens were last written
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.data.updated_at
    }

    fn persist(&mut self) {
        self.data.updated_at = Some(Utc::now());
        if let Err(e) = self.write() {
            log::warn!("Token store not persisted: {:#}", e);
        }
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write token file: {:?}", self.path))
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        self.data.access_token.clone()
    }

    fn set_access_token(&mut self, value: &str) {
        self.data.access_token = Some(value.to_string());
        self.persist();
    }

    fn remove_access_token(&mut self) {
        self.data.access_token = None;
        self.persist();
    }

    fn refresh_token(&self) -> Option<String> {
        self.data.refresh_token.clone()
    }

    fn set_refresh_token(&mut self, value: &str) {
        self.data.refresh_token = Some(value.to_string());
        self.persist();
    }

    fn remove_refresh_token(&mut self) {
        self.data.refresh_token = None;
        self.persist();
    }
}
