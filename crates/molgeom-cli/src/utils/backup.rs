use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Moves an existing file out of the way before it is overwritten.
///
/// The file is renamed to `<name>_bak-<n>` with the smallest `n >= 1` that is not taken.
/// Returns the backup path, or `None` when there was nothing to move.
pub fn backup_existing(path: &Path) -> io::Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let backup = (1u64..)
        .map(|n| backup_path(path, n))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| io::Error::other("no free backup name"))?;
    std::fs::rename(path, &backup)?;
    info!("Backed up existing {:?} to {:?}", path, backup);
    Ok(Some(backup))
}

fn backup_path(path: &Path, n: u64) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!("_bak-{n}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_needs_no_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dists.dat");
        assert_eq!(backup_existing(&path).unwrap(), None);
    }

    #[test]
    fn existing_file_moves_to_first_free_backup_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dists.dat");
        fs::write(&path, "old").unwrap();
        fs::write(dir.path().join("dists.dat_bak-1"), "older").unwrap();

        let backup = backup_existing(&path).unwrap();

        assert_eq!(backup, Some(dir.path().join("dists.dat_bak-2")));
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(dir.path().join("dists.dat_bak-2")).unwrap(), "old");
        assert_eq!(fs::read_to_string(dir.path().join("dists.dat_bak-1")).unwrap(), "older");
    }
}
