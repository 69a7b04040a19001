use chrono::NaiveDate;

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Checks that `path` refers to an existing regular file.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if it does not.
pub fn resolve_input(path: &Path) -> Result<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::NotFound(path.to_path_buf()))
    }
}

/// Returns the dated output directory for `input`: `Orders_<YYYY-MM-DD>`,
/// sibling to the input file.
#[must_use]
pub fn orders_dir(input: &Path, today: NaiveDate) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("Orders_{}", today.format("%Y-%m-%d")))
}

/// Creates the dated output directory for `input` if it does not already
/// exist, and returns its path.
///
/// Creation is idempotent: re-running on the same day reuses the directory,
/// and any order files already inside it are left alone.
///
/// # Errors
///
/// Returns [`Error::OutputDir`] if the directory cannot be created.
pub fn prepare_output_dir(input: &Path, today: NaiveDate) -> Result<PathBuf> {
    let dir = orders_dir(input, today);
    fs::create_dir_all(&dir).map_err(|source| Error::OutputDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    #[test]
    fn resolve_input_fn_accepts_existing_file() {
        let path = Path::new("testdata/sales.csv");
        assert_eq!(resolve_input(path).unwrap(), path);
    }

    #[test]
    fn resolve_input_fn_rejects_missing_path_and_directory() {
        assert!(matches!(
            resolve_input(Path::new("testdata/no_such_file.csv")),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            resolve_input(Path::new("testdata")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn orders_dir_fn_is_dated_sibling_of_input() {
        let dir = orders_dir(Path::new("/data/sales.csv"), day());
        assert_eq!(dir, PathBuf::from("/data/Orders_2026-08-28"));
    }

    #[test]
    fn prepare_output_dir_fn_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("sales.csv");
        let dir = prepare_output_dir(&input, day()).unwrap();
        assert!(dir.is_dir());
        // Second run on the same day reuses the directory.
        assert_eq!(prepare_output_dir(&input, day()).unwrap(), dir);
    }
}
