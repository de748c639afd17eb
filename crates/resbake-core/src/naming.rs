//! Identifier helpers for generated C symbols.
//!
//! File and directory names become parts of C identifiers. Each byte that is
//! not ASCII alphanumeric is replaced by `_`, so the byte length of a name is
//! preserved and `logo.png` becomes `logo_png`.

use std::ffi::OsStr;

/// Replacement used for every byte that cannot appear in an identifier
const REPLACEMENT: char = '_';

/// Sanitize a name into an identifier fragment.
///
/// Works byte by byte: multi-byte UTF-8 sequences turn into one `_` per byte.
pub fn sanitize(name: &str) -> String {
    sanitize_bytes(name.as_bytes())
}

/// Sanitize a platform name, including names that are not valid UTF-8.
pub fn sanitize_os(name: &OsStr) -> String {
    sanitize_bytes(name.as_encoded_bytes())
}

fn sanitize_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_alphanumeric() {
                b as char
            } else {
                REPLACEMENT
            }
        })
        .collect()
}

/// Uppercase the alphabetic characters of a name for use as an include guard.
///
/// Everything else, underscores included, passes through unchanged.
pub fn uppercase_guard(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// Join a namespace prefix and a name fragment with `_`.
pub fn join_prefix(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(p) => format!("{}{}{}", p, REPLACEMENT, name),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_extension_dot() {
        assert_eq!(sanitize("logo.png"), "logo_png");
        assert_eq!(sanitize("shader.frag.glsl"), "shader_frag_glsl");
    }

    #[test]
    fn test_sanitize_is_noop_on_identifiers() {
        assert_eq!(sanitize("already_valid9"), "already_valid9");
    }

    #[test]
    fn test_sanitize_has_no_segment_awareness() {
        assert_eq!(sanitize("a/b\\c d-e"), "a_b_c_d_e");
    }

    #[test]
    fn test_sanitize_preserves_byte_length() {
        for name in ["", ".", "é.txt", "日本.json", "a b\tc", "x~1#2@3"] {
            let out = sanitize(name);
            assert_eq!(out.len(), name.len(), "length changed for {:?}", name);
            assert!(out.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_sanitize_os_non_utf8() {
        use std::os::unix::ffi::OsStrExt;
        let name = OsStr::from_bytes(b"bad\xffname.bin");
        assert_eq!(sanitize_os(name), "bad_name_bin");
    }

    #[test]
    fn test_uppercase_guard() {
        assert_eq!(uppercase_guard("resources"), "RESOURCES");
        assert_eq!(uppercase_guard("my_res_2"), "MY_RES_2");
        assert_eq!(uppercase_guard("ALREADY"), "ALREADY");
    }

    #[test]
    fn test_join_prefix() {
        assert_eq!(join_prefix(None, "a_txt"), "a_txt");
        assert_eq!(join_prefix(Some("P"), "a_txt"), "P_a_txt");
        assert_eq!(join_prefix(Some("P_sub"), "b_bin"), "P_sub_b_bin");
    }
}
