//! Session state for the signed-in seller.
//!
//! `Session` is an explicitly owned handle passed to whatever needs the
//! credential. It is either signed out or signed in with an identity and a
//! short-lived bearer credential. The credential may go stale between
//! refreshes, so callers fetch it through `fresh_credential` right before
//! calling the backend.

use async_trait::async_trait;
use bookmarket_core::{ClientError, ClientResult};
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Refresh credentials that expire within this window.
pub const REFRESH_SKEW_SECS: i64 = 5 * 60;

/// Signed-in identity as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Short-lived bearer token (`Authorization: Bearer <idToken>`).
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// A credential with no known expiry.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn expiring_at(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: Some(expires_at),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// True when the credential expires within `skew` of `now`.
    pub fn needs_refresh(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        self.expires_at.is_some_and(|at| at - skew <= now)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Integration with the external identity provider that issues credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Issue a new credential for `user`, replacing `current`.
    async fn refresh(&self, user: &UserIdentity, current: &Credential) -> ClientResult<Credential>;
}

/// Provider for a token supplied by configuration; refresh hands back the same token.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider;

#[async_trait]
impl IdentityProvider for StaticTokenProvider {
    async fn refresh(
        &self,
        _user: &UserIdentity,
        current: &Credential,
    ) -> ClientResult<Credential> {
        Ok(Credential::new(current.token()))
    }
}

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    SignedOut,
    SignedIn {
        user: UserIdentity,
        credential: Credential,
    },
}

#[derive(Debug)]
struct SessionInner {
    state: RwLock<SessionState>,
    changes: watch::Sender<Option<UserIdentity>>,
}

/// Cloneable handle to the shared session.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A signed-out session.
    pub fn new() -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(SessionState::SignedOut),
                changes,
            }),
        }
    }

    /// A session already signed in, e.g. from a configured token.
    pub async fn signed_in(user: UserIdentity, credential: Credential) -> Self {
        let session = Self::new();
        session.sign_in(user, credential).await;
        session
    }

    /// Watch sign-in/sign-out transitions. The current value is the signed-in user.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.inner.changes.subscribe()
    }

    pub async fn sign_in(&self, user: UserIdentity, credential: Credential) {
        tracing::info!(uid = %user.uid, "Signed in");
        *self.inner.state.write().await = SessionState::SignedIn {
            user: user.clone(),
            credential,
        };
        self.inner.changes.send_replace(Some(user));
    }

    pub async fn sign_out(&self) {
        let previous = std::mem::take(&mut *self.inner.state.write().await);
        if let SessionState::SignedIn { user, .. } = previous {
            tracing::info!(uid = %user.uid, "Signed out");
        }
        self.inner.changes.send_replace(None);
    }

    /// The backend rejected the credential; drop back to signed out.
    pub async fn invalidate(&self) {
        tracing::warn!("Session invalidated by backend");
        self.sign_out().await;
    }

    pub async fn is_signed_in(&self) -> bool {
        matches!(*self.inner.state.read().await, SessionState::SignedIn { .. })
    }

    pub async fn current_user(&self) -> Option<UserIdentity> {
        match &*self.inner.state.read().await {
            SessionState::SignedIn { user, .. } => Some(user.clone()),
            SessionState::SignedOut => None,
        }
    }

    /// Snapshot of the stored credential; may be stale.
    pub async fn credential(&self) -> Option<Credential> {
        match &*self.inner.state.read().await {
            SessionState::SignedIn { credential, .. } => Some(credential.clone()),
            SessionState::SignedOut => None,
        }
    }

    /// Credential safe to use now, refreshing through `provider` when close to expiry.
    pub async fn fresh_credential(
        &self,
        provider: &dyn IdentityProvider,
    ) -> ClientResult<Credential> {
        let (user, credential) = match &*self.inner.state.read().await {
            SessionState::SignedIn { user, credential } => (user.clone(), credential.clone()),
            SessionState::SignedOut => {
                return Err(ClientError::Auth("No signed-in user".to_string()))
            }
        };

        if !credential.needs_refresh(Utc::now(), Duration::seconds(REFRESH_SKEW_SECS)) {
            return Ok(credential);
        }

        tracing::debug!(uid = %user.uid, "Refreshing credential");
        let refreshed = match provider.refresh(&user, &credential).await {
            Ok(refreshed) => refreshed,
            Err(err) => {
                if matches!(err, ClientError::Auth(_)) {
                    self.invalidate().await;
                }
                return Err(err);
            }
        };

        let mut state = self.inner.state.write().await;
        match &mut *state {
            // Only store it if the same user is still signed in.
            SessionState::SignedIn {
                user: current,
                credential,
            } if current.uid == user.uid => {
                *credential = refreshed.clone();
                Ok(refreshed)
            }
            _ => Err(ClientError::Auth(
                "Session changed while refreshing credential".to_string(),
            )),
        }
    }
}
