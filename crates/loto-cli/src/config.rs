use std::path::{Path, PathBuf};

use anyhow::Context;
use loto_ledger::{timestamp_clock, DrawLedger, RestoreReport, DEFAULT_TIMESTAMP_FORMAT, HISTORY_KEY};
use loto_store::{FileStore, LayeredStore, Scope};
use serde::{Deserialize, Serialize};

/// Settings read from `loto.toml`. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotoConfig {
    /// Durable scope: history survives across sessions.
    pub data_dir: PathBuf,
    /// Mirror every write into a second, session-scoped directory.
    pub session_scope: bool,
    /// Root of the session scopes. Each data directory gets its own
    /// subdirectory, see [`LotoConfig::session_scope_dir`].
    pub session_dir: PathBuf,
    pub history_key: String,
    /// chrono strftime layout for entry timestamps.
    pub timestamp_format: String,
}

impl Default for LotoConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".loto"),
            session_scope: true,
            session_dir: std::env::temp_dir().join("loto-session"),
            history_key: HISTORY_KEY.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl LotoConfig {
    pub const FILE_NAME: &'static str = "loto.toml";

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `loto.toml` in the working
    /// directory is used if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let local = PathBuf::from(Self::FILE_NAME);
                if !local.exists() {
                    return Ok(Self::default());
                }
                local
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    /// Session scope directory for the configured `data_dir`.
    ///
    /// Named after the absolute data directory path, so two ledgers never
    /// read each other's session copy.
    pub fn session_scope_dir(&self) -> anyhow::Result<PathBuf> {
        let absolute = std::path::absolute(&self.data_dir)
            .with_context(|| format!("resolving data dir {}", self.data_dir.display()))?;
        Ok(self.session_dir.join(scope_dir_name(&absolute)))
    }

    /// Storage scopes in read-priority order: durable, then session.
    pub fn open_store(&self) -> anyhow::Result<LayeredStore> {
        let mut scopes = vec![Scope::new("durable", FileStore::open(&self.data_dir))];
        if self.session_scope {
            scopes.push(Scope::new("session", FileStore::open(self.session_scope_dir()?)));
        }
        Ok(LayeredStore::new(scopes)?)
    }

    /// Open the ledger described by this configuration and restore history.
    pub fn open_ledger(&self) -> anyhow::Result<(DrawLedger<LayeredStore>, RestoreReport)> {
        let clock = timestamp_clock(&self.timestamp_format)?;
        let mut ledger = DrawLedger::new(self.open_store()?)
            .with_key(self.history_key.clone())
            .with_clock(clock);
        let report = ledger.restore().context("restoring draw history")?;
        Ok((ledger, report))
    }
}

/// Flatten a path into a single directory name (`/srv/loto` -> `srv_loto`).
fn scope_dir_name(path: &Path) -> String {
    let name: String = path
        .to_string_lossy()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let name = name.trim_matches('_');
    if name.is_empty() {
        "root".to_string()
    } else {
        name.to_string()
    }
}
