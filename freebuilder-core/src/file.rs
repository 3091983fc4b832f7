use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Trait for types that represent a generated source file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, leaving it untouched when the content is
    /// already up to date (keeps downstream incremental builds quiet)
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let content = self.render();

        if let Ok(existing) = std::fs::read_to_string(&path)
            && existing == content
        {
            return Ok(WriteResult::Unchanged);
        }

        write_file(&path, &content)?;
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the same content
    Unchanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hello;

    impl GeneratedFile for Hello {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("com").join("example").join("Hello.java")
        }

        fn render(&self) -> String {
            "class Hello {}\n".to_string()
        }
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Hello.write(dir.path()).unwrap(), WriteResult::Written);

        let written = std::fs::read_to_string(dir.path().join("com/example/Hello.java")).unwrap();
        assert_eq!(written, "class Hello {}\n");
    }

    #[test]
    fn test_write_skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        Hello.write(dir.path()).unwrap();
        assert_eq!(Hello.write(dir.path()).unwrap(), WriteResult::Unchanged);
    }
}
