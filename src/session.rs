use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ApiError, ApiResult},
    role::RoleGate,
};

/// Identity
///
/// The signed-in account as reported by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Session
///
/// One signed-in identity plus the bearer token the identity provider issued for it.
/// Passed explicitly to whatever needs it; nothing reads it from ambient state.
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    identity: Identity,
    token: String,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            token: token.into(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Display name, falling back to the email address.
    pub fn author_name(&self) -> &str {
        self.identity
            .display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.identity.email)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("identity", &self.identity)
            .field("token", &"<redacted>")
            .field("started_at", &self.started_at)
            .finish()
    }
}

/// IdentityProvider
///
/// Contract of the external sign-in service. Produces the current session, if any.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_session(&self) -> ApiResult<Option<Session>>;
}

/// StaticIdentityProvider
///
/// Identity provider that always reports the same (optional) session. Used by tests
/// and by the CLI when a token is supplied on the command line.
#[derive(Clone, Default)]
pub struct StaticIdentityProvider {
    session: Option<Session>,
}

impl StaticIdentityProvider {
    pub fn signed_in(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn signed_out() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_session(&self) -> ApiResult<Option<Session>> {
        Ok(self.session.clone())
    }
}

struct ActiveSession {
    session: Session,
    role: Arc<RoleGate>,
}

/// SessionStore
///
/// Holds at most one active session together with its role gate. Invalidation is
/// explicit: `sign_out` on user action, `invalidate` after the backend reports the
/// token as expired. Both drop the cached role along with the session.
#[derive(Clone)]
pub struct SessionStore {
    config: ClientConfig,
    active: Arc<RwLock<Option<ActiveSession>>>,
}

impl SessionStore {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            active: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces any existing session. The role for the new session is resolved lazily.
    pub async fn sign_in(&self, session: Session) -> ApiResult<()> {
        let role = Arc::new(RoleGate::for_session(&self.config, &session)?);
        tracing::info!(session_id = %session.id(), email = %session.email(), "session started");
        *self.active.write().await = Some(ActiveSession { session, role });
        Ok(())
    }

    /// Pulls the current session from the identity provider and signs it in.
    /// Returns whether a session is now active.
    pub async fn sync_from(&self, provider: &dyn IdentityProvider) -> ApiResult<bool> {
        match provider.current_session().await? {
            Some(session) => {
                self.sign_in(session).await?;
                Ok(true)
            }
            None => {
                self.sign_out().await;
                Ok(false)
            }
        }
    }

    pub async fn sign_out(&self) -> Option<Session> {
        let previous = self.active.write().await.take();
        if let Some(active) = &previous {
            tracing::info!(session_id = %active.session.id(), "session ended");
        }
        previous.map(|active| active.session)
    }

    /// Drops the session only if it is still the one identified by `session_id`,
    /// so a stale 401 cannot sign out a newer session.
    pub async fn invalidate(&self, session_id: Uuid) -> bool {
        let mut guard = self.active.write().await;
        match guard.as_ref() {
            Some(active) if active.session.id() == session_id => {
                tracing::warn!(session_id = %session_id, "session invalidated");
                *guard = None;
                true
            }
            _ => false,
        }
    }

    /// Invalidates `session_id` when `err` is a 401. Other errors leave the session alone.
    pub async fn observe_error(&self, session_id: Uuid, err: &ApiError) -> bool {
        match err {
            ApiError::Unauthorized(_) => self.invalidate(session_id).await,
            _ => false,
        }
    }

    pub async fn current(&self) -> Option<Session> {
        self.active
            .read()
            .await
            .as_ref()
            .map(|active| active.session.clone())
    }

    pub async fn role_gate(&self) -> Option<Arc<RoleGate>> {
        self.active
            .read()
            .await
            .as_ref()
            .map(|active| active.role.clone())
    }

    pub async fn is_signed_in(&self) -> bool {
        self.active.read().await.is_some()
    }
}
