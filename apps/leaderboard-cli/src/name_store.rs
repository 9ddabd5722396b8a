//! Remembers the last display name used for `submit`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "name";

#[derive(Debug, Clone)]
pub struct NameStore {
    path: PathBuf,
}

impl NameStore {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(FILE_NAME),
        }
    }

    /// `$LEADERBOARD_STATE_DIR`, else `$HOME/.leaderboard`. `None` when
    /// neither is set.
    pub fn from_env() -> Option<Self> {
        let dir = std::env::var_os("LEADERBOARD_STATE_DIR")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".leaderboard")))?;
        Some(Self::in_dir(dir))
    }

    /// The stored name, if any. A missing or blank file reads as `None`.
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let name = raw.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    pub fn save(&self, name: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, name)
    }
}
