//! Integrity fingerprinting for protected output.
//!
//! Two distinct checksum algorithms live here and are not interchangeable:
//! the multiplicative rolling hash feeds the guard snippet embedded ahead
//! of each protected script, and the additive character-code sum is the
//! baseline the runtime defense monitor polls against. Neither is
//! collision-resistant; both are deterrence-grade only.
//!
//! The guard snippet reproduces a known defect of the scheme it implements:
//! its expected and current hashes are both computed from the same buffer
//! at embed time, so the embedded comparison is always equal. The runtime
//! monitor's baseline comparison is the check that actually detects
//! modification.

/// Rolling 32-bit hash: `h = (h << 5) - h + code`, wrapping, then the
/// absolute value hex-encoded.
pub fn fingerprint(text: &str) -> String {
    let mut hash: i32 = 0;
    for code in text.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(code as i32);
    }
    format!("{:x}", (hash as i64).unsigned_abs())
}

/// Additive character-code sum used by the runtime monitor baseline.
/// i64 because the sum is unbounded on large pages.
pub fn additive_checksum(text: &str) -> i64 {
    text.encode_utf16().map(|code| code as i64).sum()
}

/// Formats the integrity guard prepended to each minified script.
pub fn guard_snippet(code: &str) -> String {
    let hash = fingerprint(code);
    format!(
        r#"(function() {{
    var expectedHash = '{hash}';
    var currentHash = '{hash}';
    if (expectedHash !== currentHash) {{
        console.error('Integridad del codigo comprometida');
    }}
}})();
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = fingerprint("console.log('hi');");
        let b = fingerprint("console.log('hi');");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_changes_with_input() {
        assert_ne!(fingerprint("hello"), fingerprint("world"));
    }

    #[test]
    fn test_fingerprint_empty_is_zero() {
        assert_eq!(fingerprint(""), "0");
    }

    #[test]
    fn test_fingerprint_is_lowercase_hex() {
        let hash = fingerprint("var x = 1;");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_additive_checksum_single_char_sensitivity() {
        let base = additive_checksum("var counter = 0;");
        let changed = additive_checksum("var counter = 1;");
        assert_ne!(base, changed);
        assert_eq!(changed - base, ('1' as i64) - ('0' as i64));
    }

    #[test]
    fn test_additive_checksum_deterministic() {
        assert_eq!(additive_checksum("abc"), additive_checksum("abc"));
        assert_eq!(additive_checksum("abc"), 97 + 98 + 99);
    }

    #[test]
    fn test_guard_snippet_embeds_hash_twice() {
        let snippet = guard_snippet("var x = 1;");
        let hash = fingerprint("var x = 1;");
        assert_eq!(snippet.matches(&hash).count(), 2);
        assert!(snippet.contains("expectedHash"));
        assert!(snippet.contains("currentHash"));
    }
}
