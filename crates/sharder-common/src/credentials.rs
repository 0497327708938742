use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid credential entry #{index}: expected user:password")]
    MalformedCredential { index: usize },

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Operator allow-list, loaded once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    entries: Vec<Credential>,
}

impl CredentialStore {
    /// Parses `user1:pass1,user2:pass2,...`.
    ///
    /// Entries are split on `,` and then on the single `:` of each pair.
    /// Whitespace is significant. An entry with zero or several colons, or
    /// with an empty side, rejects the whole list.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for (index, entry) in raw.split(',').enumerate() {
            let mut parts = entry.split(':');
            let (Some(username), Some(password), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(ConfigError::MalformedCredential { index });
            };
            if username.is_empty() || password.is_empty() {
                return Err(ConfigError::MalformedCredential { index });
            }
            entries.push(Credential {
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        Ok(Self { entries })
    }

    pub fn contains(&self, username: &str, password: &str) -> bool {
        self.entries
            .iter()
            .any(|c| c.username == username && c.password == password)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lists_exact_pairs() {
        let store = CredentialStore::parse("alice:s3cret,bob:hunter2").unwrap();
        assert_eq!(store.len(), 2);

        let pairs: Vec<(&str, &str)> = store
            .iter()
            .map(|c| (c.username.as_str(), c.password.as_str()))
            .collect();
        assert_eq!(pairs, vec![("alice", "s3cret"), ("bob", "hunter2")]);
    }

    #[test]
    fn test_contains_is_exact() {
        let store = CredentialStore::parse("alice:s3cret").unwrap();
        assert!(store.contains("alice", "s3cret"));
        assert!(!store.contains("alice", "S3cret"));
        assert!(!store.contains("alice ", "s3cret"));
        assert!(!store.contains("bob", "s3cret"));
        assert!(!store.contains("", ""));
    }

    #[test]
    fn test_parse_rejects_missing_colon() {
        assert_eq!(
            CredentialStore::parse("alice:s3cret,bob").unwrap_err(),
            ConfigError::MalformedCredential { index: 1 }
        );
    }

    #[test]
    fn test_parse_rejects_extra_colon() {
        assert_eq!(
            CredentialStore::parse("alice:s3:cret").unwrap_err(),
            ConfigError::MalformedCredential { index: 0 }
        );
    }

    #[test]
    fn test_parse_rejects_empty_entries() {
        assert!(CredentialStore::parse("").is_err());
        assert!(CredentialStore::parse("alice:s3cret,").is_err());
        assert!(CredentialStore::parse(":s3cret").is_err());
        assert!(CredentialStore::parse("alice:").is_err());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let store = CredentialStore::parse("alice:s3cret").unwrap();
        let dbg = format!("{store:?}");
        assert!(dbg.contains("alice"));
        assert!(!dbg.contains("s3cret"));
    }
}
