use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::models::RegistrationBook;

/// Trait for registration book persistence
pub trait RegistrationStorage: Send + Sync {
    /// Load the registration book from storage
    ///
    /// A missing or unreadable-as-JSON file yields an empty book; the caller
    /// never fails for those cases.
    fn load(&self) -> Result<RegistrationBook>;

    /// Save the registration book to storage
    fn save(&self, book: &RegistrationBook) -> Result<()>;

    /// Get the storage file path
    fn path(&self) -> &PathBuf;
}

/// JSON-file implementation of RegistrationStorage
/// Uses atomic write pattern with .tmp file for safety
pub struct JsonRegistrationStorage {
    path: PathBuf,
}

impl JsonRegistrationStorage {
    pub fn new(path: PathBuf) -> Self {
        JsonRegistrationStorage { path }
    }
}

impl RegistrationStorage for JsonRegistrationStorage {
    fn load(&self) -> Result<RegistrationBook> {
        // If file doesn't exist, return an empty book
        if !self.path.exists() {
            log::info!(
                "Registration file not found at {:?}, starting with an empty book",
                self.path
            );
            return Ok(RegistrationBook::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read registrations from {:?}", self.path))?;

        match serde_json::from_str::<RegistrationBook>(&contents) {
            Ok(mut book) => {
                // Restore the id counter after deserialization
                book.rebuild_next_id();
                log::info!("Loaded {} registrations from {:?}", book.len(), self.path);
                Ok(book)
            }
            Err(e) => {
                // Corrupted file - back it up and start empty
                let backup_path = self.path.with_extension("json.corrupted");
                log::warn!(
                    "Registration file corrupted, backing up to {:?}: {}",
                    backup_path,
                    e
                );

                if let Err(backup_err) = fs::rename(&self.path, &backup_path) {
                    log::error!("Failed to backup corrupted file: {}", backup_err);
                }

                Ok(RegistrationBook::new())
            }
        }
    }

    fn save(&self, book: &RegistrationBook) -> Result<()> {
        let json = serde_json::to_string_pretty(book)
            .with_context(|| "Failed to serialize registration book")?;

        // Atomic write pattern: write to .tmp, then rename
        let tmp_path = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&tmp_path, &json)
            .with_context(|| format!("Failed to write to temporary file {:?}", tmp_path))?;

        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to rename {:?} to {:?}", tmp_path, self.path))?;

        log::debug!("Saved {} registrations to {:?}", book.len(), self.path);

        Ok(())
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegistrationDraft;
    use tempfile::TempDir;

    fn draft(serial: &str) -> RegistrationDraft {
        RegistrationDraft::new(
            "Ada Obi",
            format!("LCU/CS/2023/{serial}"),
            "CSC101",
            "Intro to Computing",
        )
    }

    #[test]
    fn test_load_missing_file_yields_empty_book() {
        let dir = TempDir::new().unwrap();
        let storage = JsonRegistrationStorage::new(dir.path().join("registrations.json"));

        let book = storage.load().unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn test_save_load_round_trip_preserves_order_and_values() {
        let dir = TempDir::new().unwrap();
        let storage = JsonRegistrationStorage::new(dir.path().join("registrations.json"));

        let mut book = RegistrationBook::new();
        book.add(draft("001"));
        book.add(draft("002"));
        book.add(draft("003"));

        storage.save(&book).unwrap();
        let reloaded = storage.load().unwrap();

        assert_eq!(reloaded, book);
        let serials: Vec<&str> = reloaded
            .entries()
            .iter()
            .map(|r| r.matric_number.as_str())
            .collect();
        assert_eq!(
            serials,
            vec!["LCU/CS/2023/001", "LCU/CS/2023/002", "LCU/CS/2023/003"]
        );
    }

    #[test]
    fn test_numeric_looking_fields_stay_text() {
        let dir = TempDir::new().unwrap();
        let storage = JsonRegistrationStorage::new(dir.path().join("registrations.json"));

        let mut book = RegistrationBook::new();
        book.add(RegistrationDraft::new(
            "007",
            "LCU/CS/2023/007",
            "101",
            "0042",
        ));

        storage.save(&book).unwrap();
        let reloaded = storage.load().unwrap();

        let reg = &reloaded.entries()[0];
        assert_eq!(reg.student_name, "007");
        assert_eq!(reg.course_code, "101");
        assert_eq!(reg.course_title, "0042");
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty_book() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registrations.json");
        fs::write(&path, "{not json at all").unwrap();

        let storage = JsonRegistrationStorage::new(path.clone());
        let book = storage.load().unwrap();

        assert!(book.is_empty());
        // Original content is preserved as a backup
        assert!(path.with_extension("json.corrupted").exists());
        assert!(!path.exists());
    }

    #[test]
    fn test_saved_empty_book_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonRegistrationStorage::new(dir.path().join("registrations.json"));

        let mut book = RegistrationBook::new();
        book.add(draft("001"));
        book.clear();

        storage.save(&book).unwrap();
        assert!(storage.load().unwrap().is_empty());
    }
}
