//! Name lookup tokens
//!
//! The service indexes items by a one-way hash of the lowercased name so it
//! can detect same-name siblings without learning the name itself.

use sha2::{Digest, Sha512};

/// Hash a plaintext item name into the service's lookup token:
/// `hex(SHA-512(lowercase(name)))`, 128 hex characters.
///
/// Pure and deterministic; names differing only in case share a token.
pub fn hash_name(name: &str) -> String {
    hex::encode(Sha512::digest(name.to_lowercase().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_answer() {
        assert_eq!(
            hash_name("Report.PDF"),
            "e338ba15319e9884819d51943b1c1a2f06a8a0ebe9388618c6650262e28235df\
             4ba69516d5ddd5305cf2630f7690d5d0454f67c3d589a1d20daae47077426219"
        );
    }

    #[test]
    fn test_is_plain_sha512_of_lowercased_name() {
        let expected = hex::encode(Sha512::digest(b"report.pdf"));
        assert_eq!(hash_name("report.pdf"), expected);
        assert_eq!(hash_name("REPORT.pdf"), expected);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(hash_name("Report.PDF"), hash_name("report.pdf"));
    }

    #[test]
    fn test_different_names_different_tokens() {
        assert_ne!(hash_name("file_a.txt"), hash_name("file_b.txt"));
    }

    #[test]
    fn test_token_shape() {
        let token = hash_name("");
        assert_eq!(token.len(), 128);
        assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(token.starts_with("cf83e1357eefb8bd"));
    }

    proptest! {
        #[test]
        fn deterministic(name in "\\PC{0,64}") {
            prop_assert_eq!(hash_name(&name), hash_name(&name));
        }

        #[test]
        fn token_is_128_hex_chars(name in "\\PC{0,64}") {
            let token = hash_name(&name);
            prop_assert_eq!(token.len(), 128);
            prop_assert!(token.bytes().all(|b| b.is_ascii_hexdigit()));
        }

        #[test]
        fn distinct_lowercase_names_differ(a in "[a-z0-9._-]{1,32}", b in "[a-z0-9._-]{1,32}") {
            prop_assume!(a != b);
            prop_assert_ne!(hash_name(&a), hash_name(&b));
        }
    }
}
