//! # Entry Text Hashing
//!
//! A 32-bit FNV-1a variant. Every byte is widened as a signed char before
//! the xor, so bytes `>= 0x80` contribute a sign-extended value; ASCII text
//! hashes exactly as plain FNV-1a.

/// FNV-1a 32-bit offset basis.
pub const FNV_SEED: u32 = 2166136261;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 16777619;

/// Hash entry text.
#[inline]
pub fn hash_text(text: &[u8]) -> u32 {
    let mut h = FNV_SEED;
    for &b in text {
        h ^= b as i8 as u32;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_vectors() {
        assert_eq!(hash_text(b""), 0x811c9dc5);
        assert_eq!(hash_text(b"a"), 0xe40c292c);
        assert_eq!(hash_text(b"foobar"), 0xbf9cf968);
        assert_eq!(hash_text(b"</s>"), 0xd79c9359);
    }

    #[test]
    fn test_high_bytes_sign_extend() {
        // "é" is [0xc3, 0xa9]; plain FNV-1a would give 0x1e9de8c1.
        assert_eq!(hash_text("é".as_bytes()), 0x3cfa68c1);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(hash_text(b"stable"), hash_text(b"stable"));
        assert_ne!(hash_text(b"ab"), hash_text(b"ba"));
    }
}
