//! Persisting session parameters to and from files

use crate::format::format_entries;
use crate::parameters::SessionParameters;
use chrono::Utc;
use cmis_core::{Error, Result};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

impl SessionParameters {
    /// Write the parameters, sorted by key, preceded by a comment header and
    /// a timestamp
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_to<W: Write>(&self, mut writer: W, comment: Option<&str>) -> Result<()> {
        let mut header = String::new();
        if let Some(comment) = comment {
            for line in comment.lines() {
                header.push_str("# ");
                header.push_str(line);
                header.push('\n');
            }
        }
        header.push_str(&format!("# {}\n", Utc::now().to_rfc2822()));

        let mut entries: Vec<(&str, &str)> = self.iter().collect();
        entries.sort_unstable_by_key(|(key, _)| *key);

        writer.write_all(header.as_bytes())?;
        writer.write_all(format_entries(entries).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Propagates read failures and malformed escapes.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Store to a file, replacing it
    ///
    /// # Errors
    ///
    /// `FileSystem` if the file cannot be written.
    pub fn store(&self, path: &Path, comment: Option<&str>) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::file_system(path, "create", e))?;
        self.write_to(std::io::BufWriter::new(file), comment)
            .map_err(|e| match e {
                Error::FileSystem { source, .. } => Error::file_system(path, "write", source),
                other => other,
            })?;
        debug!("Stored {} session parameters to {}", self.len(), path.display());
        Ok(())
    }

    /// Load from a file
    ///
    /// # Errors
    ///
    /// `FileSystem` if the file cannot be read, `Configuration` if it is
    /// malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::file_system(path, "read", e))?;
        let parameters = Self::parse(&text)?;
        debug!("Loaded {} session parameters from {}", parameters.len(), path.display());
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmis_core::constants as keys;
    use tempfile::TempDir;

    #[test]
    fn test_store_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.properties");

        let mut parameters = SessionParameters::new();
        parameters
            .set_browser_binding("http://localhost:8080/cmis/browser")
            .set_basic_authentication("admin", "secret")
            .set_timeouts(5000, 30000);
        parameters.store(&path, Some("test session\nsecond line")).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# test session\n# second line\n# "));

        let loaded = SessionParameters::load(&path).unwrap();
        assert_eq!(loaded.len(), parameters.len());
        for (key, value) in parameters.iter() {
            assert_eq!(loaded.get(key), Some(value));
        }
        assert_eq!(loaded.get_int(keys::READ_TIMEOUT, 0), 30000);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = SessionParameters::load(&temp_dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_write_to_and_read_from_memory() {
        let mut parameters = SessionParameters::new();
        parameters.set_local_binding("in-memory");

        let mut buffer = Vec::new();
        parameters.write_to(&mut buffer, None).unwrap();
        let read_back = SessionParameters::read_from(buffer.as_slice()).unwrap();
        assert_eq!(read_back, parameters);
    }

    #[test]
    fn test_written_lines_are_sorted() {
        let mut parameters = SessionParameters::new();
        parameters.set("b", "2");
        parameters.set("c", "3");
        parameters.set("a", "1");

        let mut buffer = Vec::new();
        parameters.write_to(&mut buffer, None).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(lines, vec!["a=1", "b=2", "c=3"]);
    }
}
