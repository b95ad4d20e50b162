//! Persistence of the canonical listing query between sessions.
//!
//! Stores only ever see the canonical string. Decoding, and falling back to
//! defaults when the stored text is unusable, is the controller's job.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::listing::ListingError;

/// Somewhere the canonical query string can be kept.
#[cfg_attr(test, mockall::automock)]
pub trait QueryStore {
    /// Returns the stored canonical string, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Io`] when the backing storage cannot be read.
    fn load(&self) -> Result<Option<String>, ListingError>;

    /// Replaces the stored canonical string.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Io`] when the backing storage cannot be written.
    fn save(&mut self, canonical: &str) -> Result<(), ListingError>;
}

/// Keeps the query in memory for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryQueryStore {
    saved: Option<String>,
}

impl MemoryQueryStore {
    /// Creates a store that already holds `canonical`.
    #[must_use]
    pub fn with_saved(canonical: impl Into<String>) -> Self {
        Self {
            saved: Some(canonical.into()),
        }
    }

    /// Returns the stored string without going through [`QueryStore`].
    #[must_use]
    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }
}

impl QueryStore for MemoryQueryStore {
    fn load(&self) -> Result<Option<String>, ListingError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, canonical: &str) -> Result<(), ListingError> {
        self.saved = Some(canonical.to_owned());
        Ok(())
    }
}

/// Keeps the query in a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQueryStore {
    path: Utf8PathBuf,
}

impl FileQueryStore {
    /// Creates a store backed by `path`; the file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl QueryStore for FileQueryStore {
    fn load(&self) -> Result<Option<String>, ListingError> {
        let file_name = file_name(&self.path)?;
        let dir = match open_parent(&self.path, false) {
            Ok(dir) => dir,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(io_error(
                    format!("failed to open directory of state file '{}'", self.path),
                    &error,
                ));
            }
        };

        match dir.read_to_string(file_name) {
            Ok(contents) => Ok(Some(contents.trim().to_owned())),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(io_error(
                format!("failed to read state file '{}'", self.path),
                &error,
            )),
        }
    }

    fn save(&mut self, canonical: &str) -> Result<(), ListingError> {
        let file_name = file_name(&self.path)?;
        let dir = open_parent(&self.path, true).map_err(|error| {
            io_error(
                format!("failed to create directory of state file '{}'", self.path),
                &error,
            )
        })?;
        dir.write(file_name, format!("{canonical}\n"))
            .map_err(|error| io_error(format!("failed to write state file '{}'", self.path), &error))
    }
}

fn file_name(path: &Utf8Path) -> Result<&str, ListingError> {
    path.file_name().ok_or_else(|| ListingError::Io {
        message: format!("invalid state file path '{path}': no file name"),
    })
}

fn io_error(context: String, error: &io::Error) -> ListingError {
    ListingError::Io {
        message: format!("{context}: {error}"),
    }
}

/// Opens the directory holding `path`, creating it first when `create` is set.
fn open_parent(path: &Utf8Path, create: bool) -> io::Result<Dir> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let (base, relative) = if parent.is_absolute() {
        let relative = parent
            .strip_prefix("/")
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
        (Dir::open_ambient_dir("/", ambient_authority())?, relative)
    } else {
        (Dir::open_ambient_dir(".", ambient_authority())?, parent)
    };

    if relative.as_str().is_empty() || relative == Utf8Path::new(".") {
        return Ok(base);
    }
    if create {
        base.create_dir_all(relative)?;
    }
    base.open_dir(relative)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn state_path(temp: &TempDir, relative: &str) -> Result<Utf8PathBuf, Box<dyn std::error::Error>> {
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| format!("temp dir is not UTF-8: {}", path.display()))?;
        Ok(root.join(relative))
    }

    #[test]
    fn memory_store_round_trips() -> TestResult {
        let mut store = MemoryQueryStore::default();
        assert_eq!(store.load()?, None);
        store.save("page=2&size=10")?;
        assert_eq!(store.load()?.as_deref(), Some("page=2&size=10"));
        Ok(())
    }

    #[test]
    fn missing_file_loads_as_nothing() -> TestResult {
        let temp = TempDir::new()?;
        let store = FileQueryStore::new(state_path(&temp, "absent/state.txt")?);
        assert_eq!(store.load()?, None);
        Ok(())
    }

    #[test]
    fn save_creates_parent_directories() -> TestResult {
        let temp = TempDir::new()?;
        let path = state_path(&temp, "nested/dir/state.txt")?;
        let mut store = FileQueryStore::new(path.clone());

        store.save("page=3&size=20&s:gc.price=asc")?;

        assert!(path.is_file());
        assert_eq!(
            FileQueryStore::new(path).load()?.as_deref(),
            Some("page=3&size=20&s:gc.price=asc")
        );
        Ok(())
    }

    #[test]
    fn save_overwrites_previous_state() -> TestResult {
        let temp = TempDir::new()?;
        let mut store = FileQueryStore::new(state_path(&temp, "state.txt")?);
        store.save("page=1&size=10")?;
        store.save("page=5&size=50")?;
        assert_eq!(store.load()?.as_deref(), Some("page=5&size=50"));
        Ok(())
    }
}
