//! Local storage of extracted entries.
//!
//! Every entry is kept as `SCP-<NNN>.txt` in one directory. The file holds
//! the unwrapped document so it can be re-laid out for any terminal width.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::entry_number::{EntryNumber, extract_number};
use crate::{Result, ScpError};

/// Directory of saved entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    dir: PathBuf,
}

impl Archive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<documents>/SCP`, falling back to `<home>/SCP` and then `./SCP`.
    pub fn default_dir() -> PathBuf {
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("SCP")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the archive directory if needed.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path of the saved copy of `number`, whether or not it exists.
    pub fn path_for(&self, number: EntryNumber) -> PathBuf {
        self.dir.join(number.file_name())
    }

    /// Entry numbers found in the archive's file names.
    ///
    /// A directory that does not exist yet holds no entries.
    pub fn saved_numbers(&self) -> Result<BTreeSet<u32>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(e.into()),
        };

        let mut numbers = BTreeSet::new();
        for entry in entries {
            let name = entry?.file_name();
            if let Some(number) = extract_number(&name.to_string_lossy()) {
                numbers.insert(number);
            }
        }
        Ok(numbers)
    }

    /// Whether a saved copy of `number` exists.
    pub fn contains(&self, number: EntryNumber) -> Result<bool> {
        Ok(self.saved_numbers()?.contains(&number.get()))
    }

    /// Reads the saved copy of `number`.
    pub fn load(&self, number: EntryNumber) -> Result<String> {
        let path = self.path_for(number);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ScpError::NotArchived(number.padded())),
            Err(e) => Err(e.into()),
        }
    }

    /// Saves an extracted document under the identifier found in its text.
    ///
    /// Returns the written path. Text without an `SCP-<digits>` identifier is
    /// rejected with [`ScpError::NoEntryNumber`].
    pub fn save(&self, text: &str) -> Result<PathBuf> {
        let number = EntryNumber::find_in(text).ok_or(ScpError::NoEntryNumber)?;
        self.save_as(number, text)
    }

    /// Saves `text` as the copy of `number`, replacing any previous one.
    pub fn save_as(&self, number: EntryNumber, text: &str) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.path_for(number);
        fs::write(&path, text)?;
        debug!(path = %path.display(), "saved entry");
        Ok(path)
    }
}
