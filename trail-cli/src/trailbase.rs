//! Locating the trail database.
//!
//! The database lives at `.trails/trailbase` under the directory where
//! `trails init` ran. Commands search for it from the working directory
//! upward through parent directories.

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Trails directory name.
pub const TRAILS_DIR: &str = ".trails";

/// Database filename (inside .trails/).
pub const TRAILBASE_FILE: &str = "trailbase";

/// Find the database by walking up from `start_path`.
///
/// Returns an error if no database is found.
pub fn find_trailbase(start_path: &str) -> Result<PathBuf> {
    find_trailbase_optional(start_path)
        .ok_or_else(|| anyhow::anyhow!("No trail database found. Run 'trails init <dataset.json>' first."))
}

/// Like [`find_trailbase`], returning `None` if no database is found.
pub fn find_trailbase_optional(start_path: &str) -> Option<PathBuf> {
    let start = Path::new(start_path).canonicalize().ok()?;
    find_trailbase_from(&start)
}

pub fn find_trailbase_from(start: &Path) -> Option<PathBuf> {
    let mut current = start;

    loop {
        if let Some(path) = find_trailbase_in(current) {
            return Some(path);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Check for the database in a specific directory (no traversal).
pub fn find_trailbase_in(root: &Path) -> Option<PathBuf> {
    let path = trailbase_path(root);
    path.exists().then_some(path)
}

/// Returns the `.trails` path without checking if it exists.
pub fn trails_dir(root: &Path) -> PathBuf {
    root.join(TRAILS_DIR)
}

/// Returns the `.trails/trailbase` path without checking if it exists.
pub fn trailbase_path(root: &Path) -> PathBuf {
    trails_dir(root).join(TRAILBASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_trailbase_in() {
        let dir = TempDir::new().unwrap();
        assert!(find_trailbase_in(dir.path()).is_none());

        fs::create_dir_all(trails_dir(dir.path())).unwrap();
        fs::write(trailbase_path(dir.path()), "").unwrap();

        let result = find_trailbase_in(dir.path()).unwrap();
        assert!(result.ends_with(".trails/trailbase"));
    }

    #[test]
    fn test_find_trailbase_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(trails_dir(dir.path())).unwrap();
        fs::write(trailbase_path(dir.path()), "").unwrap();

        let nested = dir.path().join("dolomiti").join("brenta");
        fs::create_dir_all(&nested).unwrap();

        let found = find_trailbase_from(&nested.canonicalize().unwrap()).unwrap();
        assert_eq!(
            found,
            trailbase_path(&dir.path().canonicalize().unwrap())
        );
    }

    #[test]
    fn test_find_trailbase_missing() {
        let dir = TempDir::new().unwrap();
        let err = find_trailbase(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("trails init"));
    }
}
