use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::files::open_file;

const ELEMENT_BYTES: usize = std::mem::size_of::<u64>();

/// What to do with the leading size element of a binary dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderCheck {
    /// The header must equal the number of elements that follow it.
    #[default]
    Strict,
    /// Drop the header without looking at it.
    Skip,
}

/// Loads a flat array of native-endian u64 values and drops the leading
/// header element.
pub fn load_cells(path: &Path, check: HeaderCheck) -> Result<Vec<u64>> {
    let mut file = open_file(path)?;
    let mut bytes = Vec::<u8>::new();
    file.read_to_end(&mut bytes).map_err(|e| Error::io(path, e))?;
    decode_cells(&bytes, path, check)
}

pub fn decode_cells(bytes: &[u8], path: &Path, check: HeaderCheck) -> Result<Vec<u64>> {
    if bytes.len() % ELEMENT_BYTES != 0 {
        return Err(Error::Format {
            path: path.to_path_buf(),
            reason: format!("length {} is not a multiple of {} bytes", bytes.len(), ELEMENT_BYTES),
        });
    }

    let mut elements = bytes
        .chunks_exact(ELEMENT_BYTES)
        .map(|chunk| {
            let mut word = [0u8; ELEMENT_BYTES];
            word.copy_from_slice(chunk);
            u64::from_ne_bytes(word)
        });

    let header = elements.next().ok_or_else(|| Error::Format {
        path: path.to_path_buf(),
        reason: "file is empty, the size header is missing".to_owned(),
    })?;
    let cells: Vec<u64> = elements.collect();

    if check == HeaderCheck::Strict && header != cells.len() as u64 {
        return Err(Error::HeaderMismatch {
            path: path.to_path_buf(),
            header,
            actual: cells.len(),
        });
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(values: &[u64]) -> Vec<u8> {
        values.iter().flat_map(|x| x.to_ne_bytes()).collect()
    }

    #[test]
    fn drops_the_header() {
        let bytes = encode(&[4, 10, 20, 20, 30]);
        let cells = decode_cells(&bytes, Path::new("OSM"), HeaderCheck::Strict).unwrap();
        assert_eq!(cells, vec![10, 20, 20, 30]);
    }

    #[test]
    fn returns_k_elements_for_k_plus_one_integers() {
        for k in 0..20u64 {
            let mut values = vec![k];
            values.extend((0..k).map(|i| i * 3));
            let cells =
                decode_cells(&encode(&values), Path::new("OSM"), HeaderCheck::Skip).unwrap();
            assert_eq!(cells.len() as u64, k);
        }
    }

    #[test]
    fn header_mismatch_is_an_error_unless_skipped() {
        let bytes = encode(&[99, 1, 2, 3]);
        let err = decode_cells(&bytes, Path::new("OSM"), HeaderCheck::Strict).unwrap_err();
        assert!(matches!(err, Error::HeaderMismatch { header: 99, actual: 3, .. }));

        let cells = decode_cells(&bytes, Path::new("OSM"), HeaderCheck::Skip).unwrap();
        assert_eq!(cells, vec![1, 2, 3]);
    }

    #[test]
    fn truncated_file_is_a_format_error() {
        let mut bytes = encode(&[2, 1, 2]);
        bytes.pop();
        let err = decode_cells(&bytes, Path::new("OSM"), HeaderCheck::Skip).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn empty_file_is_a_format_error() {
        let err = decode_cells(&[], Path::new("OSM"), HeaderCheck::Skip).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("OSM");
        std::fs::write(&path, encode(&[2, u64::MAX, 0])).unwrap();
        assert_eq!(load_cells(&path, HeaderCheck::Strict).unwrap(), vec![u64::MAX, 0]);
    }
}
