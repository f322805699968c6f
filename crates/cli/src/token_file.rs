//! File-backed token persistence.
//!
//! The SDK's token store is process-local; the CLI persists it to a file
//! between invocations so a login survives until an explicit logout or a
//! backend 401 clears it.

use std::io;
use std::path::PathBuf;

use pomade_client::token::{Credential, TokenStore};

const DEFAULT_TOKEN_FILE: &str = ".pomade-token";

/// Where the session token lives between invocations.
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Resolve the token file path from `POMADE_TOKEN_FILE`.
    #[must_use]
    pub fn from_env() -> Self {
        let path = std::env::var("POMADE_TOKEN_FILE")
            .map_or_else(|_| PathBuf::from(DEFAULT_TOKEN_FILE), PathBuf::from);
        Self { path }
    }

    /// Load the persisted credential, if one exists.
    #[must_use]
    pub fn load(&self) -> Option<Credential> {
        let token = std::fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Credential::new(token))
    }

    /// Write the store's current state back to disk: the credential when
    /// one is present, nothing (file removed) when it was cleared.
    pub fn sync(&self, tokens: &TokenStore) -> io::Result<()> {
        match tokens.get() {
            Some(credential) => std::fs::write(&self.path, credential.token()),
            None => match std::fs::remove_file(&self.path) {
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_roundtrip() {
        let dir = std::env::temp_dir().join("pomade-token-test");
        std::fs::create_dir_all(&dir).unwrap();
        let file = TokenFile {
            path: dir.join("token"),
        };

        let tokens = TokenStore::with_credential(Credential::new("abc"));
        file.sync(&tokens).unwrap();
        assert_eq!(file.load(), Some(Credential::new("abc")));

        tokens.clear();
        file.sync(&tokens).unwrap();
        assert!(file.load().is_none());
        // Removing an already-absent file is not an error.
        file.sync(&tokens).unwrap();
    }
}
