//! Admin authentication gate
//!
//! Not a security boundary: it keeps casual visitors out of the editor and
//! nothing more. The secret is injected at runtime through a
//! [`CredentialVerifier`]; the "logged in" state is a sentinel value in the
//! storage port.

use crate::config::{AdminConfig, SiteConfig};
use crate::storage::{Storage, StorageError};

/// Storage key of the authenticated flag
pub const DEFAULT_AUTH_KEY: &str = "admin_authenticated";

/// Value stored under the auth key while logged in
const AUTHENTICATED: &str = "true";

/// Checks a submitted credential
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, candidate: &str) -> bool;
}

/// Anything that can answer "is the admin logged in?"
pub trait Gate {
    fn is_authenticated(&self) -> bool;
}

/// A single shared secret compared by exact equality
#[derive(Clone)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Secret from the environment variable named in the config, falling
    /// back to the config value. `None` when neither is set.
    pub fn from_config(admin: &AdminConfig) -> Option<Self> {
        let from_env = std::env::var(&admin.password_env)
            .ok()
            .filter(|s| !s.is_empty());

        match from_env.or_else(|| admin.password.clone().filter(|s| !s.is_empty())) {
            Some(secret) => Some(Self::new(secret)),
            None => {
                tracing::warn!(
                    "No admin secret configured; set {} to enable login",
                    admin.password_env
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

impl CredentialVerifier for SharedSecret {
    fn verify(&self, candidate: &str) -> bool {
        let expected = self.secret.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        // examine every byte so timing does not reveal the mismatch position
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// Verifier that rejects everything, used when no secret is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl CredentialVerifier for DenyAll {
    fn verify(&self, _candidate: &str) -> bool {
        false
    }
}

impl<V: CredentialVerifier + ?Sized> CredentialVerifier for Box<V> {
    fn verify(&self, candidate: &str) -> bool {
        (**self).verify(candidate)
    }
}

/// The configured verifier: the shared secret if one is set, otherwise deny
pub fn verifier_from_config(config: &SiteConfig) -> Box<dyn CredentialVerifier> {
    match SharedSecret::from_config(&config.admin) {
        Some(secret) => Box::new(secret),
        None => Box::new(DenyAll),
    }
}

/// Login state persisted next to the posts
pub struct AuthGate<S, V> {
    storage: S,
    verifier: V,
    key: String,
}

impl<S: Storage, V: CredentialVerifier> AuthGate<S, V> {
    pub fn new(storage: S, verifier: V) -> Self {
        Self {
            storage,
            verifier,
            key: DEFAULT_AUTH_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    /// Check `password` and remember a successful login
    ///
    /// A wrong password is `Ok(false)`; the flag is left as it was.
    pub fn login(&self, password: &str) -> Result<bool, StorageError> {
        if !self.verifier.verify(password) {
            tracing::info!("Admin login failed");
            return Ok(false);
        }
        self.storage.set(&self.key, AUTHENTICATED)?;
        tracing::info!("Admin logged in");
        Ok(true)
    }

    /// Forget the login
    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)?;
        tracing::info!("Admin logged out");
        Ok(())
    }
}

impl<S: Storage, V: CredentialVerifier> Gate for AuthGate<S, V> {
    fn is_authenticated(&self) -> bool {
        match self.storage.get(&self.key) {
            Ok(value) => value.as_deref() == Some(AUTHENTICATED),
            Err(e) => {
                tracing::warn!("Could not read auth flag: {}", e);
                false
            }
        }
    }
}

/// Fixed login state for unit tests
#[cfg(test)]
impl Gate for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn gate(storage: &MemoryStorage) -> AuthGate<&MemoryStorage, SharedSecret> {
        AuthGate::new(storage, SharedSecret::new("s3cret"))
    }

    #[test]
    fn test_shared_secret_exact_match() {
        let secret = SharedSecret::new("s3cret");
        assert!(secret.verify("s3cret"));
        assert!(!secret.verify("s3cre"));
        assert!(!secret.verify("S3CRET"));
        assert!(!secret.verify(""));
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", SharedSecret::new("s3cret"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_login_sets_flag() {
        let storage = MemoryStorage::new();
        let gate = gate(&storage);
        assert!(!gate.is_authenticated());

        assert!(gate.login("s3cret").unwrap());
        assert!(gate.is_authenticated());
        assert_eq!(storage.get(DEFAULT_AUTH_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_failed_login_leaves_state() {
        let storage = MemoryStorage::new();
        let gate = gate(&storage);
        assert!(!gate.login("wrong").unwrap());
        assert!(!gate.is_authenticated());
        // no lockout
        assert!(gate.login("s3cret").unwrap());
    }

    #[test]
    fn test_logout_clears_flag() {
        let storage = MemoryStorage::new();
        let gate = gate(&storage);
        gate.login("s3cret").unwrap();
        gate.logout().unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_only_true_sentinel_counts() {
        let storage = MemoryStorage::with_entries([(DEFAULT_AUTH_KEY, "yes")]);
        assert!(!gate(&storage).is_authenticated());
    }

    #[test]
    fn test_deny_all_without_secret() {
        let mut config = SiteConfig::default();
        config.admin.password_env = "FOLIO_TEST_UNSET_SECRET_VAR".to_string();
        config.admin.password = None;

        let storage = MemoryStorage::new();
        let gate = AuthGate::new(&storage, verifier_from_config(&config));
        assert!(!gate.login("").unwrap());
        assert!(!gate.login("anything").unwrap());
    }

    #[test]
    fn test_config_password_fallback() {
        let mut config = SiteConfig::default();
        config.admin.password_env = "FOLIO_TEST_UNSET_SECRET_VAR".to_string();
        config.admin.password = Some("from-config".to_string());

        let storage = MemoryStorage::new();
        let gate = AuthGate::new(&storage, verifier_from_config(&config)).with_key("flag");
        assert!(gate.login("from-config").unwrap());
        assert_eq!(storage.get("flag").unwrap().as_deref(), Some("true"));
    }
}
