use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use shared::persist::{PersistError, SessionStorage};

/// Stores each key as a file under a state directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, key: &str) -> PathBuf {
        // ':' is not allowed in file names everywhere
        self.dir.join(format!("{}.json", key.replace(':', "_")))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(PersistError::Storage(error.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir).map_err(|error| PersistError::Storage(error.to_string()))?;
        fs::write(self.path(key), value).map_err(|error| PersistError::Storage(error.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(PersistError::Storage(error.to_string())),
        }
    }
}
