//! Password verification.
//!
//! Stored credentials are bcrypt hashes, but accounts created before hashing
//! was introduced still hold cleartext passwords. Verification dispatches on
//! the stored value's shape so both keep working.

/// Check a presented password against the stored credential.
///
/// Stored values starting with `$2` are treated as bcrypt hashes; anything
/// else is compared directly as a legacy cleartext password. Malformed hashes
/// fail verification rather than erroring.
pub fn verify(presented: &str, stored: &str) -> bool {
    if stored.starts_with("$2") {
        bcrypt::verify(presented, stored).unwrap_or(false)
    } else {
        presented == stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bcrypt_hashes_verify_round_trip() {
        let hash = bcrypt::hash("s3cret", bcrypt::DEFAULT_COST).expect("hash password");
        assert!(verify("s3cret", &hash));
        assert!(!verify("wrong", &hash));
    }

    #[rstest]
    #[case("pw123", "pw123", true)]
    #[case("pw123", "other", false)]
    #[case("", "", true)]
    fn legacy_cleartext_compares_directly(
        #[case] presented: &str,
        #[case] stored: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(verify(presented, stored), expected);
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify("anything", "$2-not-a-real-hash"));
    }
}
