use super::{SessionError, SessionResult};
use crate::auth::{
    AuthError, Authenticator, Credentials, Organization, Registration, SessionIdentity, User,
};
use crate::config::SessionKeys;
use crate::kv::KeyValueCache;
use log::{info, warn};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn(SessionIdentity),
}

/// Owns the authenticator, the identity cache and the current session state.
pub struct SessionManager<A, C> {
    authenticator: A,
    cache: C,
    keys: SessionKeys,
    state: SessionState,
    loading: bool,
}

impl<A, C> SessionManager<A, C>
where
    A: Authenticator,
    C: KeyValueCache,
{
    /// Creates a signed-out manager in the loading state.
    ///
    /// Call [`SessionManager::restore`] to pick up a cached identity.
    pub fn new(authenticator: A, cache: C, keys: SessionKeys) -> Self {
        Self {
            authenticator,
            cache,
            keys,
            state: SessionState::SignedOut,
            loading: true,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        match &self.state {
            SessionState::SignedIn(identity) => Some(identity),
            SessionState::SignedOut => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.identity().map(|identity| &identity.user)
    }

    pub fn organization(&self) -> Option<&Organization> {
        self.identity().map(|identity| &identity.organization)
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn(_))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn into_cache(self) -> C {
        self.cache
    }

    /// Reads the cached identity pair.
    ///
    /// Both keys must be present; a lone blob is treated as signed out.
    pub fn restore(&mut self) -> SessionResult<Option<&SessionIdentity>> {
        self.loading = true;
        let restored = self.read_cached();
        self.loading = false;

        match restored {
            Ok(Some(identity)) => {
                info!("event=session_restore module=session status=ok");
                self.state = SessionState::SignedIn(identity);
            }
            Ok(None) => {
                info!("event=session_restore module=session status=skipped reason=empty");
                self.state = SessionState::SignedOut;
            }
            Err(err) => {
                warn!("event=session_restore module=session status=error error={err}");
                self.state = SessionState::SignedOut;
                return Err(err);
            }
        }
        Ok(self.identity())
    }

    pub fn sign_in(&mut self, credentials: &Credentials) -> SessionResult<SessionIdentity> {
        credentials.validate().map_err(AuthError::from)?;
        self.loading = true;
        let outcome = self.authenticator.sign_in(credentials);
        self.loading = false;
        self.accept("sign_in", outcome)
    }

    /// Registers a new organization; the password confirmation is checked
    /// before the authenticator is called.
    pub fn register(&mut self, registration: &Registration) -> SessionResult<SessionIdentity> {
        registration.validate().map_err(AuthError::from)?;
        self.loading = true;
        let outcome = self.authenticator.register(registration);
        self.loading = false;
        self.accept("register", outcome)
    }

    /// Clears the state first, then both cache keys.
    ///
    /// Both removes are attempted; the first failure is returned.
    pub fn sign_out(&mut self) -> SessionResult<()> {
        self.state = SessionState::SignedOut;
        let mut first_error = None;
        for key in [&self.keys.user, &self.keys.organization] {
            if let Err(err) = self.cache.remove(key) {
                warn!("event=session_sign_out module=session status=error key={key} error={err}");
                first_error.get_or_insert(err);
            }
        }
        if let Some(err) = first_error {
            return Err(err.into());
        }
        info!("event=session_sign_out module=session status=ok");
        Ok(())
    }

    fn accept(
        &mut self,
        action: &'static str,
        outcome: Result<SessionIdentity, AuthError>,
    ) -> SessionResult<SessionIdentity> {
        let identity = match outcome {
            Ok(identity) => identity,
            Err(err) => {
                warn!("event=session_{action} module=session status=error error={err}");
                return Err(err.into());
            }
        };

        self.write_cached(&identity)?;
        info!(
            "event=session_{action} module=session status=ok role={:?}",
            identity.user.role
        );
        self.state = SessionState::SignedIn(identity.clone());
        Ok(identity)
    }

    fn read_cached(&self) -> SessionResult<Option<SessionIdentity>> {
        let user = self.cache.get(&self.keys.user)?;
        let organization = self.cache.get(&self.keys.organization)?;
        let (Some(user), Some(organization)) = (user, organization) else {
            return Ok(None);
        };

        Ok(Some(SessionIdentity {
            user: decode(&self.keys.user, &user)?,
            organization: decode(&self.keys.organization, &organization)?,
        }))
    }

    fn write_cached(&mut self, identity: &SessionIdentity) -> SessionResult<()> {
        let user = serde_json::to_string(&identity.user).map_err(SessionError::Encode)?;
        let organization =
            serde_json::to_string(&identity.organization).map_err(SessionError::Encode)?;

        let written = self
            .cache
            .set(&self.keys.user, &user)
            .and_then(|()| self.cache.set(&self.keys.organization, &organization));
        if let Err(err) = written {
            // Half-written pairs must not survive into the next restore.
            for key in [&self.keys.user, &self.keys.organization] {
                if let Err(cleanup) = self.cache.remove(key) {
                    warn!(
                        "event=session_cache_rollback module=session status=error error={cleanup}"
                    );
                }
            }
            return Err(err.into());
        }
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> SessionResult<T> {
    serde_json::from_str(raw).map_err(|source| SessionError::Decode {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{SessionManager, SessionState};
    use crate::auth::{Credentials, MockAuthenticator, Registration};
    use crate::config::SessionKeys;
    use crate::kv::{KeyValueCache, KvError, KvResult, MemoryCache};
    use crate::session::SessionError;

    /// Cache that refuses writes to `reject_key` and removes of
    /// `reject_remove_key`.
    struct FailingCache {
        inner: MemoryCache,
        reject_key: &'static str,
        reject_remove_key: &'static str,
    }

    impl KeyValueCache for FailingCache {
        fn get(&self, key: &str) -> KvResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
            if key == self.reject_key {
                return Err(KvError::MissingTable("kv_entries"));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> KvResult<()> {
            if key == self.reject_remove_key {
                return Err(KvError::MissingTable("kv_entries"));
            }
            self.inner.remove(key)
        }
    }

    fn manager() -> SessionManager<MockAuthenticator, MemoryCache> {
        SessionManager::new(
            MockAuthenticator::immediate(),
            MemoryCache::new(),
            SessionKeys::default(),
        )
    }

    #[test]
    fn new_manager_is_loading_until_restore() {
        let mut session = manager();
        assert!(session.is_loading());
        assert_eq!(session.state(), &SessionState::SignedOut);

        assert!(session.restore().unwrap().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn sign_in_writes_both_keys() {
        let mut session = manager();
        session
            .sign_in(&Credentials::new("admin@grace.org", "pw"))
            .unwrap();

        assert!(session.is_signed_in());
        assert!(session.cache().get("user").unwrap().is_some());
        assert!(session.cache().get("church").unwrap().is_some());
    }

    #[test]
    fn lone_user_blob_restores_as_signed_out() {
        let mut cache = MemoryCache::new();
        cache.set("user", "{}").unwrap();
        let mut session = SessionManager::new(
            MockAuthenticator::immediate(),
            cache,
            SessionKeys::default(),
        );

        assert!(session.restore().unwrap().is_none());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn corrupt_blob_is_reported_with_its_key() {
        let mut cache = MemoryCache::new();
        cache.set("user", "not json").unwrap();
        cache.set("church", "{}").unwrap();
        let mut session = SessionManager::new(
            MockAuthenticator::immediate(),
            cache,
            SessionKeys::default(),
        );

        let err = session.restore().unwrap_err();
        assert!(matches!(err, SessionError::Decode { ref key, .. } if key == "user"));
        assert!(!session.is_loading());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn failed_second_write_rolls_back_first_key() {
        let cache = FailingCache {
            inner: MemoryCache::new(),
            reject_key: "church",
            reject_remove_key: "",
        };
        let mut session = SessionManager::new(
            MockAuthenticator::immediate(),
            cache,
            SessionKeys::default(),
        );

        let err = session
            .register(&Registration {
                organization_name: "Grace".to_string(),
                admin_name: "John".to_string(),
                admin_email: "john@grace.org".to_string(),
                denomination: None,
                size: None,
                referral_source: None,
                password: "pw".to_string(),
                password_confirmation: "pw".to_string(),
            })
            .unwrap_err();

        assert!(matches!(err, SessionError::Cache(_)));
        assert!(!session.is_signed_in());
        assert!(session.cache().inner.is_empty());
    }

    #[test]
    fn sign_out_removes_second_key_when_first_remove_fails() {
        let cache = FailingCache {
            inner: MemoryCache::new(),
            reject_key: "",
            reject_remove_key: "user",
        };
        let mut session = SessionManager::new(
            MockAuthenticator::immediate(),
            cache,
            SessionKeys::default(),
        );
        session
            .sign_in(&Credentials::new("admin@grace.org", "pw"))
            .unwrap();

        let err = session.sign_out().unwrap_err();

        assert!(matches!(err, SessionError::Cache(_)));
        assert!(!session.is_signed_in());
        assert!(session.cache().inner.get("church").unwrap().is_none());
        assert!(session.cache().inner.get("user").unwrap().is_some());
    }
}
