//! Resolution of named data resources.
//!
//! A [`ResourceLocator`] turns a logical resource name such as
//! `chinapoi.txt` into a byte stream. [`BundledResources`] serves blobs
//! compiled into the binary; [`DirectoryLocator`] searches an ordered list of
//! directories using capability-based IO, taking the first match.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::{self, Cursor, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::debug;
use thiserror::Error;

/// Name of the address dataset shipped with this crate.
pub const CHINA_POI_RESOURCE: &str = "chinapoi.txt";

const CHINA_POI_BYTES: &[u8] = include_bytes!("../resources/chinapoi.txt");

/// Errors raised while resolving a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No candidate location held the resource.
    #[error("couldn't locate resource {name}")]
    NotFound {
        /// Logical resource name.
        name: String,
    },
    /// The resource exists but could not be opened.
    #[error("failed to open resource {name}: {source}")]
    Io {
        /// Logical resource name.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Opens data resources by logical name.
pub trait ResourceLocator {
    /// Open the resource called `name` for reading.
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, ResourceError>;
}

impl<T: ResourceLocator + ?Sized> ResourceLocator for Box<T> {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, ResourceError> {
        (**self).open(name)
    }
}

/// Resources held in memory.
///
/// The default set contains the address dataset bundled with this crate.
///
/// # Examples
/// ```
/// use std::io::Read;
/// use address_data::{BundledResources, ResourceLocator};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let resources = BundledResources::empty().with_resource("tiny.txt", &b"A1,Alice,120.5,31.2"[..]);
/// let mut text = String::new();
/// resources.open("tiny.txt")?.read_to_string(&mut text)?;
/// assert_eq!(text, "A1,Alice,120.5,31.2");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BundledResources {
    blobs: HashMap<String, Cow<'static, [u8]>>,
}

impl BundledResources {
    /// A locator that holds no resources.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            blobs: HashMap::new(),
        }
    }

    /// Add or replace the resource called `name`.
    #[must_use]
    pub fn with_resource(
        mut self,
        name: impl Into<String>,
        contents: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        self.blobs.insert(name.into(), contents.into());
        self
    }

    /// Whether a resource called `name` is held.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }
}

impl Default for BundledResources {
    fn default() -> Self {
        Self::empty().with_resource(CHINA_POI_RESOURCE, CHINA_POI_BYTES)
    }
}

impl ResourceLocator for BundledResources {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, ResourceError> {
        let blob = self.blobs.get(name).ok_or_else(|| ResourceError::NotFound {
            name: name.to_owned(),
        })?;
        debug!("serving bundled resource {name} ({} bytes)", blob.len());
        Ok(Box::new(Cursor::new(blob.clone())))
    }
}

/// Searches directories in order for a named file.
///
/// Directories that do not exist or are not directories are skipped, as are
/// entries that exist but are not regular files. Names are resolved relative to each directory and
/// cannot escape it.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLocator {
    dirs: Vec<Utf8PathBuf>,
}

impl DirectoryLocator {
    /// Search `dirs` in the given order.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Directories searched, in order.
    #[must_use]
    pub fn dirs(&self) -> &[Utf8PathBuf] {
        &self.dirs
    }

    fn open_in(dir: &Utf8Path, name: &str) -> io::Result<Option<fs_utf8::File>> {
        let handle = match fs_utf8::Dir::open_ambient_dir(dir, ambient_authority()) {
            Ok(handle) => handle,
            Err(err) if is_unusable_dir(&err) => return Ok(None),
            Err(err) => return Err(err),
        };
        match handle.metadata(name) {
            Ok(meta) if meta.is_file() => handle.open(name).map(Some),
            Ok(_) => Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn is_unusable_dir(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

impl ResourceLocator for DirectoryLocator {
    fn open(&self, name: &str) -> Result<Box<dyn Read + Send>, ResourceError> {
        for dir in &self.dirs {
            debug!("looking for resource {name} in {dir}");
            let found = Self::open_in(dir, name).map_err(|source| ResourceError::Io {
                name: name.to_owned(),
                source,
            })?;
            if let Some(file) = found {
                debug!("resolved resource {name} in {dir}");
                return Ok(Box::new(file));
            }
        }
        Err(ResourceError::NotFound {
            name: name.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    struct Dirs {
        _root: TempDir,
        first: Utf8PathBuf,
        second: Utf8PathBuf,
    }

    #[fixture]
    fn dirs() -> Dirs {
        let root = TempDir::new().expect("tempdir");
        let base = Utf8PathBuf::from_path_buf(root.path().to_path_buf()).expect("utf-8 tempdir");
        let first = base.join("first");
        let second = base.join("second");
        fs::create_dir_all(&first).expect("create first");
        fs::create_dir_all(&second).expect("create second");
        Dirs {
            _root: root,
            first,
            second,
        }
    }

    fn read_all(locator: &dyn ResourceLocator, name: &str) -> String {
        let mut text = String::new();
        locator
            .open(name)
            .expect("resource should resolve")
            .read_to_string(&mut text)
            .expect("read resource");
        text
    }

    #[rstest]
    fn default_bundle_holds_china_poi() {
        let resources = BundledResources::default();
        assert!(resources.contains(CHINA_POI_RESOURCE));
        assert!(!read_all(&resources, CHINA_POI_RESOURCE).is_empty());
    }

    #[rstest]
    fn bundle_reports_missing_names() {
        let err = BundledResources::empty()
            .open(CHINA_POI_RESOURCE)
            .err()
            .expect("empty bundle");
        assert!(matches!(err, ResourceError::NotFound { name } if name == CHINA_POI_RESOURCE));
    }

    #[rstest]
    fn first_directory_wins(dirs: Dirs) {
        fs::write(dirs.first.join("data.txt"), "first").expect("write first");
        fs::write(dirs.second.join("data.txt"), "second").expect("write second");
        let locator = DirectoryLocator::new([dirs.first.clone(), dirs.second.clone()]);
        assert_eq!(read_all(&locator, "data.txt"), "first");
    }

    #[rstest]
    fn skips_missing_directories_and_subdirectories(dirs: Dirs) {
        fs::create_dir_all(dirs.first.join("data.txt")).expect("directory named like resource");
        fs::write(dirs.second.join("data.txt"), "second").expect("write second");
        let locator = DirectoryLocator::new([
            dirs.first.join("absent"),
            dirs.first.clone(),
            dirs.second.clone(),
        ]);
        assert_eq!(read_all(&locator, "data.txt"), "second");
    }

    #[rstest]
    fn skips_search_entries_that_are_files(dirs: Dirs) {
        let plain_file = dirs.first.join("not-a-dir");
        fs::write(&plain_file, "plain").expect("write plain file");
        fs::write(dirs.second.join("data.txt"), "second").expect("write second");
        let locator = DirectoryLocator::new([plain_file, dirs.second.clone()]);
        assert_eq!(read_all(&locator, "data.txt"), "second");
    }

    #[rstest]
    fn reports_not_found_after_searching_all(dirs: Dirs) {
        let locator = DirectoryLocator::new([dirs.first, dirs.second]);
        let err = locator.open("data.txt").err().expect("nothing to find");
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }
}
