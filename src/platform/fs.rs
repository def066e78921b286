// Thermograph - platform/fs.rs
//
// Filesystem helpers for local exports.

use std::io::{self, Read};
use std::path::Path;

/// Read a file as text, refusing anything larger than `max_bytes`.
///
/// Invalid UTF-8 is replaced rather than rejected, so a stray byte in one
/// cell cannot make the whole export unreadable.
pub fn read_file_lossy(path: &Path, max_bytes: u64) -> io::Result<Option<String>> {
    let file = std::fs::File::open(path)?;
    let mut bytes = Vec::new();
    // Read one byte past the limit to detect oversize files.
    file.take(max_bytes + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_lossy_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.csv");
        std::fs::write(&path, b"a,b\n1,\xff\n").unwrap();
        let text = read_file_lossy(&path, 1024).unwrap().unwrap();
        assert!(text.starts_with("a,b\n1,"));
        assert!(text.contains('\u{fffd}'));
    }

    #[test]
    fn test_oversize_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.csv");
        std::fs::write(&path, vec![b'x'; 32]).unwrap();
        assert!(read_file_lossy(&path, 16).unwrap().is_none());
        assert!(read_file_lossy(&path, 32).unwrap().is_some());
    }
}
