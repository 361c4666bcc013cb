//! Plain text decoding.

/// Decode uploaded bytes as UTF-8.
///
/// Invalid sequences become U+FFFD. Nothing is trimmed or normalised and a
/// leading byte order mark is kept, so any valid UTF-8 input comes back unchanged.
///
/// ```rust
/// use resume_extract::extraction::text::decode;
///
/// assert_eq!(decode("Ünïcödé résumé\n".as_bytes()), "Ünïcödé résumé\n");
/// assert_eq!(decode(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
/// ```
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
