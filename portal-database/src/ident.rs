use sha2::{Digest, Sha256};

/// Derive the opaque external identifier for a numeric primary key.
///
/// Sequential row ids would leak volume and ordering if exposed in URLs, so
/// every entity carries a one-way SHA-256 digest of its id as the public
/// handle. The digest is taken over the decimal string form of the id.
pub fn hash_id(id: i32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_id(42), hash_id(42));
        assert_ne!(hash_id(42), hash_id(43));
    }

    #[test]
    fn hash_is_sha256_of_decimal_string() {
        // sha256("1")
        assert_eq!(
            hash_id(1),
            "6b86b273ff34fce19d6b804eff5a3f5747ada4eaa22f1d49c01e52ddb7875b4b"
        );
    }

    #[test]
    fn hash_is_fixed_length_hex() {
        let digest = hash_id(123456);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
