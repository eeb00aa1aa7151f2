//! In-memory session store.
//!
//! Sessions are an explicit context object: callers hold a token and pass it
//! to whatever needs the authenticated member. There is no process-global
//! "current user".

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::MemberId;

/// Session token (random UUID)
pub type SessionToken = String;

/// Session data stored after successful OTP verification
#[derive(Clone, Debug)]
pub struct Session {
    pub member_id: MemberId,
    pub phone_number: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// In-memory session store
///
/// Sessions expire after 24 hours
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new session and return the token
    pub async fn create_session(&self, session: Session) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);
        token
    }

    /// Get session by token. Evicts the entry if it has expired.
    pub async fn get_session(&self, token: &str) -> Option<Session> {
        let session = {
            let sessions = self.sessions.read().await;
            sessions.get(token)?.clone()
        };

        // Check if session is expired (24 hours)
        let now = chrono::Utc::now();
        let elapsed = now.signed_duration_since(session.created_at);
        if elapsed.num_hours() >= 24 {
            let mut sessions = self.sessions.write().await;
            sessions.remove(token);
            return None;
        }

        Some(session)
    }

    /// Delete session (sign-out). Returns the removed session, if any.
    pub async fn delete_session(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token)
    }

    /// Clean up expired sessions. `main` runs this on an interval so tokens
    /// that are never presented again still get dropped.
    pub async fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write().await;
        let now = chrono::Utc::now();

        sessions.retain(|_, session| {
            let elapsed = now.signed_duration_since(session.created_at);
            elapsed.num_hours() < 24
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
