use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

pub fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

// Returns the first of the candidates that exists
pub fn resolve_input(candidates: &[PathBuf]) -> Result<PathBuf> {
    for path in candidates {
        if path.is_file() {
            return Ok(path.clone());
        }
    }
    match candidates.first() {
        Some(path) => Err(Error::MissingInput { path: path.clone() }),
        None => Err(Error::MissingInput { path: PathBuf::new() }),
    }
}

pub fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingInput { path: path.to_path_buf() },
        _ => Error::io(path, e),
    })
}

// Opens a text input, decompressing on the fly if the name ends in .gz
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = open_file(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Writes an output file through a temporary file in the same directory and
/// renames it into place once `fill` has succeeded. A failure leaves no file
/// at `path`. Output is gzip-compressed if the name ends in .gz.
pub fn write_atomically<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(tmp);

    let written = if is_gzipped(path) {
        let mut gz = GzEncoder::new(&mut out, Compression::fast());
        fill(&mut gz).and_then(|_| gz.finish().map(|_| ()))
    } else {
        fill(&mut out)
    };
    written.map_err(|e| Error::io(path, e))?;

    let tmp = out.into_inner().map_err(|e| Error::io(path, e.into_error()))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
