//! Credential store
//!
//! Owns the account table: registration with domain/duplicate checks,
//! authentication yielding a [`Session`], and owner-only profile edits.
//! Password storage is delegated to a [`CredentialHasher`] — the store
//! never keeps or compares a raw password, and the Argon2id default is the
//! deliberate replacement for the plaintext/reversed-string schemes of the
//! portal variants this crate supersedes.

use crate::config::ClinicConfig;
use crate::error::StoreError;
use crate::session::Session;
use crate::storage::Shared;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use clinic_model::{Account, AccountId, NewAccount, ProfileUpdate};
use std::sync::Arc;

/// Password hashing seam
///
/// Injected so tests can swap in a cheap hasher; production uses
/// [`Argon2Hasher`].
pub trait CredentialHasher: Send + Sync {
    /// Hash a raw password into an opaque storable string
    ///
    /// # Errors
    /// Opaque error if the primitive fails
    fn hash(&self, password: &str) -> anyhow::Result<String>;

    /// Check a raw password against a stored hash
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Argon2id hasher (PHC string format), the production default
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("argon2 hashing failed: {e}"))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        PasswordHash::new(stored)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Account registration and authentication
#[derive(Clone)]
pub struct CredentialStore {
    config: ClinicConfig,
    shared: Arc<Shared>,
    hasher: Arc<dyn CredentialHasher>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub(crate) fn new(
        config: ClinicConfig,
        shared: Arc<Shared>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            config,
            shared,
            hasher,
        }
    }

    /// Register a new account
    ///
    /// # Errors
    /// - `ValidationFailed` for empty name/password or a malformed email
    /// - `InvalidDomain` if a required organizational domain is configured
    ///   and the email does not end with it
    /// - `DuplicateAccount` if the email is already registered (the existing
    ///   account is untouched)
    pub fn register(&self, request: NewAccount) -> Result<AccountId, StoreError> {
        let email = request.email.trim().to_lowercase();

        if request.display_name.trim().is_empty() {
            return Err(StoreError::ValidationFailed("display name is required".to_string()));
        }
        if request.password.is_empty() {
            return Err(StoreError::ValidationFailed("password is required".to_string()));
        }
        let Some((local, _domain)) = email.split_once('@') else {
            return Err(StoreError::ValidationFailed(format!("malformed email: {email}")));
        };
        if local.is_empty() {
            return Err(StoreError::ValidationFailed(format!("malformed email: {email}")));
        }

        if let Some(required) = &self.config.required_email_domain {
            let suffix = format!("@{}", required.trim_start_matches('@'));
            if !email.ends_with(&suffix) {
                return Err(StoreError::InvalidDomain(email));
            }
        }

        let password_hash = self
            .hasher
            .hash(&request.password)
            .map_err(|e| StoreError::ValidationFailed(format!("credential hashing failed: {e}")))?;

        let mut state = self.shared.state.write();
        if state.accounts.contains_key(&email) {
            return Err(StoreError::DuplicateAccount(email));
        }

        let account = Account {
            id: AccountId::new(),
            display_name: request.display_name.trim().to_string(),
            email: email.clone(),
            password_hash,
            role: request.role,
            bio: None,
            phone: None,
            photo_path: None,
            registered_at: Utc::now(),
        };
        let id = account.id;
        state.accounts.insert(email.clone(), account);
        drop(state);
        self.shared.commit()?;

        tracing::info!("registered {} account: {}", request.role, email);
        Ok(id)
    }

    /// Authenticate and open a session
    ///
    /// # Errors
    /// `AuthenticationFailed` for unknown email and wrong password alike —
    /// the caller cannot tell which emails are registered.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let state = self.shared.state.read();
        let Some(account) = state.account(email) else {
            tracing::debug!("authentication failed: unknown account");
            return Err(StoreError::AuthenticationFailed);
        };
        if !self.hasher.verify(password, &account.password_hash) {
            tracing::debug!("authentication failed: bad credential for {}", account.email);
            return Err(StoreError::AuthenticationFailed);
        }

        tracing::info!("authenticated {} as {}", account.email, account.role);
        Ok(Session::for_account(account))
    }

    /// Fetch the session's own account record
    ///
    /// # Errors
    /// `NotFound` if the account is no longer present
    pub fn profile(&self, session: &Session) -> Result<Account, StoreError> {
        let state = self.shared.state.read();
        state
            .account(&session.email)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(session.email.clone()))
    }

    /// Update the session's own profile fields
    ///
    /// Only the owning account can touch its profile; fields left `None`
    /// keep their current value.
    ///
    /// # Errors
    /// `NotFound` if the account is no longer present
    pub fn update_profile(&self, session: &Session, update: ProfileUpdate) -> Result<(), StoreError> {
        let mut state = self.shared.state.write();
        let Some(account) = state.accounts.get_mut(&session.email) else {
            return Err(StoreError::NotFound(session.email.clone()));
        };

        if let Some(name) = update.display_name {
            account.display_name = name;
        }
        if let Some(bio) = update.bio {
            account.bio = Some(bio);
        }
        if let Some(phone) = update.phone {
            account.phone = Some(phone);
        }
        if let Some(path) = update.photo_path {
            account.photo_path = Some(path);
        }
        drop(state);
        self.shared.commit()?;

        tracing::debug!("profile updated for {}", session.email);
        Ok(())
    }

    /// List every account, admin only
    ///
    /// # Errors
    /// `Forbidden` for non-admin sessions
    pub fn list_accounts(&self, session: &Session) -> Result<Vec<Account>, StoreError> {
        if !session.is_admin() {
            return Err(StoreError::forbidden(session.role));
        }
        Ok(self.shared.state.read().accounts.values().cloned().collect())
    }
}
