use std::path::Path;

use super::ExtractionError;

/// Reads the file as UTF-8, silently dropping byte sequences that do not decode.
pub fn extract_plain(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    Ok(decode_utf8_dropping_invalid(&bytes))
}

pub(crate) fn decode_utf8_dropping_invalid(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                // `valid_up_to` marks a prefix that always decodes.
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    // Truncated sequence at end of input.
                    None => return out,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_utf8_passes_through() {
        assert_eq!(decode_utf8_dropping_invalid("Zoë, SRE".as_bytes()), "Zoë, SRE");
    }

    #[test]
    fn test_invalid_bytes_are_dropped() {
        let bytes = b"Py\xFFthon \xC3\x28SQL";
        assert_eq!(decode_utf8_dropping_invalid(bytes), "Python (SQL");
    }

    #[test]
    fn test_truncated_trailing_sequence_is_dropped() {
        let bytes = b"docker \xE2\x82";
        assert_eq!(decode_utf8_dropping_invalid(bytes), "docker ");
    }

    #[test]
    fn test_extract_plain_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, b"Java\xFE developer").unwrap();
        assert_eq!(extract_plain(&path).unwrap(), "Java developer");
    }
}
