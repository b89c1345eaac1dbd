//! Test helpers for staging resource directories on disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub(super) const TWO_ROWS: &str = "A1,Alice,120.5,31.2\nA2,Bob,121.0,31.5\n";

pub(super) struct ResourceDirs {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ResourceDirs {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Create `name` under the root holding `file` with `contents`.
    pub(super) fn with_resource(&self, name: &str, file: &str, contents: &str) -> Utf8PathBuf {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).expect("create resource dir");
        fs::write(dir.join(file), contents).expect("write resource");
        dir
    }
}

pub(super) fn report_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("report should be valid JSON")
}
