use anyhow::Context;
use std::io::Write;
use std::path::Path;


/// Replaces `path` with `contents`, or leaves it untouched on failure.
pub fn write_atomically(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new(".")
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;

    file.write_all(contents)
        .and_then(|_| file.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;

    file.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::write_atomically;

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sql");
        std::fs::write(&path, "old").unwrap();

        write_atomically(&path, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.sql");
        assert!(write_atomically(&path, b"new").is_err());
        assert!(!path.exists());
    }
}
