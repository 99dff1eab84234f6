//! Authentication Session
//!
//! The signed-in user is a JSON record `{ email, name }` under
//! [`USER_KEY`](crate::storage::USER_KEY). Any credentials are accepted; the
//! record's presence is what "authenticated" means. The scene store never
//! checks this itself, gating belongs to whatever drives the store.

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StorageError, USER_KEY};

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// Authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    user: Option<User>,
}

impl AuthState {
    /// Signed-out state
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the stored session
    ///
    /// A record that fails to parse is treated as signed out.
    pub fn load(storage: &dyn KeyValueStore) -> Result<Self, StorageError> {
        let Some(raw) = storage.get(USER_KEY)? else {
            return Ok(Self::new());
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Self { user: Some(user) }),
            Err(e) => {
                log::warn!("ignoring unreadable user record: {}", e);
                Ok(Self::new())
            }
        }
    }

    /// Sign in and persist the session
    ///
    /// The password is not checked. Without a name, the local part of the
    /// email is used.
    pub fn login(
        &mut self,
        storage: &mut dyn KeyValueStore,
        email: &str,
        _password: &str,
        name: Option<&str>,
    ) -> Result<&User, StorageError> {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => email.split('@').next().unwrap_or_default().to_string(),
        };
        let user = User {
            email: email.to_string(),
            name,
        };
        storage.set(USER_KEY, &serde_json::to_string(&user)?)?;
        log::info!("signed in as {}", user.email);
        Ok(self.user.insert(user))
    }

    /// Sign out and forget the stored session
    pub fn logout(&mut self, storage: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        storage.remove(USER_KEY)?;
        if let Some(user) = self.user.take() {
            log::info!("signed out {}", user.email);
        }
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_absent_record_is_signed_out() {
        let storage = MemoryStorage::new();
        let auth = AuthState::load(&storage).unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(auth.user(), None);
    }

    #[test]
    fn test_login_persists_and_reloads() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthState::new();
        auth.login(&mut storage, "ada@example.com", "hunter2", Some("Ada"))
            .unwrap();
        assert!(auth.is_authenticated());

        let reloaded = AuthState::load(&storage).unwrap();
        assert_eq!(
            reloaded.user(),
            Some(&User {
                email: "ada@example.com".into(),
                name: "Ada".into()
            })
        );
    }

    #[test]
    fn test_name_defaults_to_email_local_part() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthState::new();
        let user = auth.login(&mut storage, "grace@navy.mil", "", None).unwrap();
        assert_eq!(user.name, "grace");
    }

    #[test]
    fn test_logout_removes_record() {
        let mut storage = MemoryStorage::new();
        let mut auth = AuthState::new();
        auth.login(&mut storage, "a@b.c", "", None).unwrap();
        auth.logout(&mut storage).unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_record_is_signed_out() {
        let mut storage = MemoryStorage::new();
        storage.set(USER_KEY, "{not json").unwrap();
        assert!(!AuthState::load(&storage).unwrap().is_authenticated());
    }
}
