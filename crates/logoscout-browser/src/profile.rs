use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// The Chrome user-data directory backing a run.
///
/// A temporary profile keeps runs isolated and is removed on drop; a
/// persistent one lets an operator keep cookies (and already-cleared CAPTCHA
/// state) between runs.
pub enum Profile {
    Temporary(PathBuf),
    Persistent(PathBuf),
}

impl Profile {
    /// Create a throwaway profile directory, deleted when the value drops.
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::tempdir().map_err(|e| Error::Io(e.into()))?;
        Ok(Profile::Temporary(dir.keep()))
    }

    /// Use (and create if needed) a profile directory at the given path.
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(Error::Io)?;
        }
        Ok(Profile::Persistent(path))
    }

    pub fn path(&self) -> &Path {
        match self {
            Profile::Temporary(p) | Profile::Persistent(p) => p,
        }
    }
}

impl Drop for Profile {
    fn drop(&mut self) {
        if let Profile::Temporary(path) = self
            && path.exists()
        {
            let _ = std::fs::remove_dir_all(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_profile_is_removed_on_drop() {
        let profile = Profile::temporary().unwrap();
        let path = profile.path().to_path_buf();

        assert!(path.is_dir());
        drop(profile);
        assert!(!path.exists());
    }

    #[test]
    fn test_persistent_profile_survives_drop() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile_path = temp_dir.path().join("operator-profile");

        let profile = Profile::persistent(profile_path.clone()).unwrap();
        assert!(profile_path.is_dir());

        drop(profile);
        assert!(profile_path.exists());
    }

    #[test]
    fn test_persistent_profile_creates_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile_path = temp_dir.path().join("fresh");

        assert!(!profile_path.exists());
        let _profile = Profile::persistent(profile_path.clone()).unwrap();
        assert!(profile_path.is_dir());
    }
}
