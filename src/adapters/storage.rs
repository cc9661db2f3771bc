use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 結果輸出位置：指定路徑就寫檔，否則寫到 stdout
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    path: Option<PathBuf>,
}

impl OutputSink {
    pub fn new(path: Option<impl AsRef<Path>>) -> Self {
        Self {
            path: path.map(|p| p.as_ref().to_path_buf()),
        }
    }

    pub fn stdout() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn write(&self, content: &str) -> Result<()> {
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, content)?;
                tracing::info!("📁 Output saved to: {}", path.display());
            }
            None => {
                let mut out = std::io::stdout().lock();
                out.write_all(content.as_bytes())?;
                if !content.ends_with('\n') {
                    out.write_all(b"\n")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested/out/profile.json");

        let sink = OutputSink::new(Some(&target));
        sink.write("{}").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
        assert_eq!(sink.path(), Some(target.as_path()));
    }

    #[test]
    fn test_stdout_sink_has_no_path() {
        assert!(OutputSink::stdout().path().is_none());
    }
}
