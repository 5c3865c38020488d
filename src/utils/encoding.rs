//! Binary sniffing, encoding detection and lossy decoding

use chardetng::EncodingDetector;
use encoding_rs::{DecoderResult, Encoding, UTF_8};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::domain::{BINARY_SNIFF_BYTES, ENCODING_SNIFF_BYTES};

/// Text decoded from raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static Encoding,
    /// Malformed byte sequences that were dropped
    pub malformed: usize,
}

/// Check whether the first 1 KiB of a file contains a null byte.
///
/// UTF-16 text is reported as binary too; the check is deliberately coarse.
pub fn is_binary_file(path: &Path) -> io::Result<bool> {
    let mut prefix = Vec::with_capacity(BINARY_SNIFF_BYTES);
    File::open(path)?.take(BINARY_SNIFF_BYTES as u64).read_to_end(&mut prefix)?;
    Ok(prefix.contains(&0))
}

/// Guess the encoding of a byte sample.
///
/// A byte-order mark wins. Otherwise chardetng looks at the first
/// [`ENCODING_SNIFF_BYTES`] bytes; samples without any non-ASCII byte carry
/// no evidence and fall back to UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let sample = &bytes[..bytes.len().min(ENCODING_SNIFF_BYTES)];
    if sample.is_ascii() {
        return UTF_8;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}

/// Decode `bytes` with `encoding`, dropping malformed sequences instead of failing.
pub fn decode_lossy(bytes: &[u8], encoding: &'static Encoding) -> DecodedText {
    let mut decoder = encoding.new_decoder_with_bom_removal();
    let mut text = String::with_capacity(
        decoder.max_utf8_buffer_length_without_replacement(bytes.len()).unwrap_or(bytes.len()),
    );
    let mut malformed = 0usize;
    let mut input = bytes;

    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(input, &mut text, true);
        input = &input[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(input.len())
                    .unwrap_or(input.len().saturating_mul(3));
                text.reserve(needed.max(16));
            }
            DecoderResult::Malformed(_, _) => malformed += 1,
        }
    }

    DecodedText { text, encoding, malformed }
}

/// Read a file and decode it with its detected encoding.
///
/// Read errors are logged and yield empty content so the caller can keep going.
pub fn read_file_safe(path: &Path) -> DecodedText {
    match std::fs::read(path) {
        Ok(bytes) => {
            let encoding = detect_encoding(&bytes);
            let decoded = decode_lossy(&bytes, encoding);
            if decoded.malformed > 0 {
                tracing::debug!(
                    "Dropped {} malformed sequence(s) decoding {} as {}",
                    decoded.malformed,
                    path.display(),
                    encoding.name()
                );
            }
            decoded
        }
        Err(e) => {
            tracing::warn!("Error reading {}: {}", path.display(), e);
            DecodedText { text: String::new(), encoding: UTF_8, malformed: 0 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, WINDOWS_1252};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn null_byte_in_prefix_is_binary() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("b.bin");
        fs::write(&bin, b"abc\0def").unwrap();
        let text = temp.path().join("a.txt");
        fs::write(&text, b"hello").unwrap();

        assert!(is_binary_file(&bin).unwrap());
        assert!(!is_binary_file(&text).unwrap());
    }

    #[test]
    fn null_byte_past_prefix_is_not_sniffed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("late.txt");
        let mut bytes = vec![b'a'; BINARY_SNIFF_BYTES];
        bytes.push(0);
        fs::write(&path, &bytes).unwrap();

        assert!(!is_binary_file(&path).unwrap());
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(is_binary_file(&temp.path().join("nope")).is_err());
    }

    #[test]
    fn ascii_and_empty_fall_back_to_utf8() {
        assert_eq!(detect_encoding(b"fn main() {}\n"), UTF_8);
        assert_eq!(detect_encoding(b""), UTF_8);
    }

    #[test]
    fn bom_overrides_detection() {
        assert_eq!(detect_encoding(b"\xEF\xBB\xBFhi"), UTF_8);
        assert_eq!(detect_encoding(b"\xFF\xFEh\0i\0"), UTF_16LE);
    }

    #[test]
    fn utf8_text_is_detected() {
        let bytes = "// café déjà vu, naïve façade\n".repeat(8);
        assert_eq!(detect_encoding(bytes.as_bytes()), UTF_8);
    }

    #[test]
    fn latin1_text_decodes_to_original_characters() {
        let text = "Le café est très chaud à Paris. Où êtes-vous? Déjà midi.\n".repeat(4);
        let (bytes, _, _) = WINDOWS_1252.encode(&text);
        let encoding = detect_encoding(&bytes);
        let decoded = decode_lossy(&bytes, encoding);
        assert!(decoded.text.contains("café"), "decoded as {}: {}", encoding.name(), decoded.text);
        assert_eq!(decoded.malformed, 0);
    }

    #[test]
    fn malformed_sequences_are_dropped() {
        let decoded = decode_lossy(b"ab\xFFcd", UTF_8);
        assert_eq!(decoded.text, "abcd");
        assert_eq!(decoded.malformed, 1);
    }

    #[test]
    fn decoding_strips_bom() {
        let decoded = decode_lossy(b"\xEF\xBB\xBFhello", UTF_8);
        assert_eq!(decoded.text, "hello");
    }

    #[test]
    fn read_file_safe_yields_empty_on_error() {
        let temp = TempDir::new().unwrap();
        let decoded = read_file_safe(&temp.path().join("missing.txt"));
        assert!(decoded.text.is_empty());
        assert_eq!(decoded.encoding, UTF_8);
    }

    #[test]
    fn read_file_safe_decodes_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        fs::write(&path, "hello\n").unwrap();
        assert_eq!(read_file_safe(&path).text, "hello\n");
    }
}
