//! Key generation for metadata records
//!
//! Every metadata record is stamped with an opaque identifier exactly once,
//! when it is constructed. The strategy is pluggable through [`KeyProvider`].

use uuid::Uuid;

/// Strategy producing unique opaque identifiers
pub trait KeyProvider: Send + Sync {
    /// Produce a new key. Called once per record at construction time.
    fn generate_key(&self) -> String;
}

/// Default provider: 32 uppercase hex digits from a random v4 UUID
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeyProvider;

impl UuidKeyProvider {
    /// Create a new UUID key provider
    pub fn new() -> Self {
        Self
    }
}

impl KeyProvider for UuidKeyProvider {
    fn generate_key(&self) -> String {
        Uuid::new_v4().simple().to_string().to_uppercase()
    }
}

impl<F> KeyProvider for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate_key(&self) -> String {
        self()
    }
}

/// Generate a key with the default provider
pub fn generate_key() -> String {
    UuidKeyProvider.generate_key()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_key_format() {
        let key = UuidKeyProvider::new().generate_key();
        assert_eq!(key.len(), 32);
        assert!(
            key.chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[test]
    fn test_uuid_keys_are_unique() {
        let keys: HashSet<String> = (0..100).map(|_| generate_key()).collect();
        assert_eq!(keys.len(), 100);
    }

    #[test]
    fn test_closure_provider() {
        let provider = || "FIXED".to_string();
        assert_eq!(provider.generate_key(), "FIXED");
    }
}
