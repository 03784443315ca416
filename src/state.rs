use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;

const DIGEST_FILE: &str = "current_social_events.sha256";
const TEXT_FILE: &str = "current_social_events.txt";

/// Lowercase hex SHA-256 of the UTF-8 bytes. Pure function: identical block
/// text always yields the identical digest.
pub fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// On-disk state carried between runs: the previous block's digest and the
/// previous block text, as two flat files in one directory.
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn digest_path(&self) -> PathBuf {
        self.dir.join(DIGEST_FILE)
    }

    fn text_path(&self) -> PathBuf {
        self.dir.join(TEXT_FILE)
    }

    /// Previous digest, or `None` on the first-ever run. Absence is not an
    /// error; the digest line is trimmed on read.
    pub fn read_digest(&self) -> Result<Option<String>> {
        read_optional(&self.digest_path()).map(|opt| opt.map(|s| s.trim().to_string()))
    }

    /// Previous block text verbatim, or `None` if never persisted.
    pub fn read_text(&self) -> Result<Option<String>> {
        read_optional(&self.text_path())
    }

    /// Overwrite both state files with the current run's values. Called
    /// unconditionally after the digest comparison, so the next run always
    /// compares against the latest content.
    pub fn write(&self, digest: &str, block: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.digest_path(), digest)?;
        fs::write(self.text_path(), block)?;
        debug!("Persisted state to {}", self.dir.display());
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Tests ──
