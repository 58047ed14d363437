use crate::error::StoreError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Exclusive `<target>.lock` used to replace a file atomically.
///
/// Bytes go to the lock file; `commit` renames it over the target. A lock
/// that is dropped uncommitted is deleted and the target is left untouched.
pub struct Lockfile {
    target: PathBuf,
    lock_path: PathBuf,
    file: Option<fs::File>,
}

/// Replace `target` with `data` in one step.
pub fn write_atomic(target: impl AsRef<Path>, data: &[u8]) -> Result<(), StoreError> {
    let mut lock = Lockfile::acquire(target)?;
    lock.write_all(data)?;
    lock.commit()
}

fn lock_path_for(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    target.with_file_name(name)
}

impl Lockfile {
    pub fn acquire(target: impl AsRef<Path>) -> Result<Self, StoreError> {
        let target = target.as_ref().to_path_buf();
        let lock_path = lock_path_for(&target);

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    StoreError::LockConflict(lock_path.display().to_string())
                }
                _ => StoreError::Io(e),
            })?;

        Ok(Self {
            target,
            lock_path,
            file: Some(file),
        })
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), StoreError> {
        let file = self.file.as_mut().ok_or_else(|| {
            StoreError::LockConflict(format!("{} already released", self.lock_path.display()))
        })?;
        file.write_all(data)?;
        file.sync_all()?;
        Ok(())
    }

    pub fn commit(mut self) -> Result<(), StoreError> {
        // Close the handle before the rename.
        self.file.take();
        if let Err(e) = fs::rename(&self.lock_path, &self.target) {
            let _ = fs::remove_file(&self.lock_path);
            return Err(e.into());
        }
        Ok(())
    }
}

impl Drop for Lockfile {
    fn drop(&mut self) {
        if self.file.is_some() {
            let _ = fs::remove_file(&self.lock_path);
        }
    }
}
