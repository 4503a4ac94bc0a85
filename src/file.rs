use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::Error;

pub(crate) fn read(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|err| Error::io(path, err))
}

/// write `bytes` to a temporary file next to `path`, then rename it over `path`
///
/// Either the whole content ends up at `path` or `path` is left untouched.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut file = NamedTempFile::new_in(&dir).map_err(|err| Error::io(&dir, err))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|err| Error::io(file.path(), err))?;
    file.persist(path).map_err(|err| Error::io(path, err.error))?;
    Ok(())
}
