use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;

/// Append-only key/value sink for step outputs consumed by the automation
/// runner. Pluggable so that local/manual invocations (no sink configured)
/// are a silent no-op rather than an error.
pub trait OutputSink {
    fn emit(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Writes GitHub Actions step outputs in the multi-line heredoc form:
/// `name<<__EOF__\n<value>\n__EOF__\n`, appended to the output file.
pub struct GithubOutput {
    path: PathBuf,
}

impl GithubOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink selected from the environment: the file named by `GITHUB_OUTPUT`
    /// when set, otherwise a no-op sink.
    pub fn from_env() -> Box<dyn OutputSink> {
        match std::env::var("GITHUB_OUTPUT") {
            Ok(path) if !path.is_empty() => Box::new(GithubOutput::new(path)),
            _ => Box::new(NullOutput),
        }
    }
}

impl OutputSink for GithubOutput {
    fn emit(&mut self, name: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write!(file, "{name}<<__EOF__\n{value}\n__EOF__\n")?;
        debug!("Emitted output {name}");
        Ok(())
    }
}

/// Sink used when no output file is configured.
pub struct NullOutput;

impl OutputSink for NullOutput {
    fn emit(&mut self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn github_output_appends_delimited_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gh_output");
        let mut sink = GithubOutput::new(&path);

        sink.emit("changed", "true").unwrap();
        sink.emit("url", "https://example.com/page").unwrap();
        sink.emit("content", "Concert\nFriday").unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "changed<<__EOF__\ntrue\n__EOF__\n\
             url<<__EOF__\nhttps://example.com/page\n__EOF__\n\
             content<<__EOF__\nConcert\nFriday\n__EOF__\n"
        );
    }

    #[test]
    fn github_output_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gh_output");
        fs::write(&path, "earlier<<__EOF__\nx\n__EOF__\n").unwrap();

        let mut sink = GithubOutput::new(&path);
        sink.emit("changed", "false").unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("earlier<<__EOF__\n"));
        assert!(written.ends_with("changed<<__EOF__\nfalse\n__EOF__\n"));
    }

    #[test]
    fn null_output_is_a_no_op() {
        let mut sink = NullOutput;
        sink.emit("changed", "true").unwrap();
    }
}
