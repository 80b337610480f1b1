//! Plain-text mirror of the chat history
//!
//! One line per message, `"{sender}: {message}\n"`. The file is opened for
//! every write and closed again; no handle is kept between calls.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::db::Sender;

/// Append-only chat log file
#[derive(Debug, Clone)]
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, creating the file if needed
    pub fn append(&self, sender: Sender, message: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{}: {}", sender, message)?;
        file.flush()
    }

    /// Truncate the log to zero length, creating it if missing
    pub fn truncate(&self) -> io::Result<()> {
        File::create(&self.path)?;
        Ok(())
    }

    /// Read the log back line by line. A missing file reads as empty.
    pub fn read_lines(&self) -> io::Result<Vec<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_append_writes_sender_prefixed_lines() {
        let dir = tempdir().unwrap();
        let log = ChatLog::new(dir.path().join("chat_log.txt"));

        log.append(Sender::You, "hello").unwrap();
        log.append(Sender::Bot, "Hey bestie! ✨").unwrap();

        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw, "You: hello\nBot: Hey bestie! ✨\n");
    }

    #[test]
    fn test_truncate_empties_file() {
        let dir = tempdir().unwrap();
        let log = ChatLog::new(dir.path().join("chat_log.txt"));

        log.append(Sender::You, "hello").unwrap();
        log.truncate().unwrap();

        assert_eq!(std::fs::metadata(log.path()).unwrap().len(), 0);
        assert!(log.read_lines().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let log = ChatLog::new(dir.path().join("nope.txt"));
        assert!(log.read_lines().unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_path_errors() {
        let dir = tempdir().unwrap();
        let log = ChatLog::new(dir.path().join("missing").join("chat_log.txt"));
        assert!(log.append(Sender::You, "hi").is_err());
    }
}
