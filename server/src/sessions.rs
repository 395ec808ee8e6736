//! Server-side sessions addressed by signed UUID v7 tokens.
//!
//! The cookie carries `<uuid simple>.<base64 HMAC-SHA256>`; the session data
//! itself never leaves the server.

use std::collections::HashMap;

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use anyhow::{Context, Result, anyhow, bail};
use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tokio::sync::RwLock;
use types::{UserId, UserSession};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

struct StoredSession {
    session: UserSession,
    expires_at: Timestamp,
}

pub struct SessionStore {
    secret: SecretString,
    ttl: SignedDuration,
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
}

impl SessionStore {
    pub fn new(secret: SecretString, ttl: SignedDuration) -> Self {
        Self {
            secret,
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Store `session` and return the token for its cookie.
    pub async fn create(&self, session: UserSession) -> Result<String> {
        let id = Uuid::now_v7();
        let token = self.sign(&id)?;
        let expires_at = Timestamp::now()
            .checked_add(self.ttl)
            .context("session expiry out of range")?;

        let mut sessions = self.sessions.write().await;
        let now = Timestamp::now();
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(
            id,
            StoredSession {
                session,
                expires_at,
            },
        );

        Ok(token)
    }

    pub async fn find(&self, token: &str) -> Result<UserSession> {
        let id = self.verify(token)?;
        let sessions = self.sessions.read().await;
        let stored = sessions.get(&id).ok_or_else(|| anyhow!("unknown session"))?;

        if stored.expires_at <= Timestamp::now() {
            bail!("session expired");
        }
        Ok(stored.session.clone())
    }

    pub async fn delete(&self, token: &str) {
        if let Ok(id) = self.verify(token) {
            self.sessions.write().await.remove(&id);
        }
    }

    /// Drop every session belonging to `user_id`, returning how many there were.
    pub async fn revoke_user(&self, user_id: &UserId) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.session.user_id != *user_id);
        let revoked = before - sessions.len();
        if revoked > 0 {
            tracing::info!(user = %user_id, revoked, "revoked sessions");
        }
        revoked
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .context("invalid session secret")
    }

    fn sign(&self, id: &Uuid) -> Result<String> {
        let id_str = id.simple().to_string();
        let mut mac = self.mac()?;
        mac.update(id_str.as_bytes());
        let signature = BASE64_URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{}.{}", id_str, signature))
    }

    fn verify(&self, token: &str) -> Result<Uuid> {
        let Some((id_str, signature_b64)) = token.split_once('.') else {
            bail!("invalid token format");
        };

        let mut mac = self.mac()?;
        mac.update(id_str.as_bytes());
        let signature = BASE64_URL_SAFE_NO_PAD
            .decode(signature_b64)
            .context("invalid token signature encoding")?;
        mac.verify_slice(&signature)
            .map_err(|_| anyhow!("token signature mismatch"))?;

        Uuid::parse_str(id_str).context("invalid session id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::AccountRole;

    fn store(ttl: SignedDuration) -> SessionStore {
        SessionStore::new("test-session-secret".to_string().into(), ttl)
    }

    fn session() -> UserSession {
        UserSession {
            user_id: UserId::new("usr_002"),
            name: "Rahima Begum".to_string(),
            email: "rahima.b@example.com".to_string(),
            role: AccountRole::Rider,
        }
    }

    #[tokio::test]
    async fn created_session_can_be_found_and_deleted() {
        let store = store(SignedDuration::from_hours(1));
        let token = store.create(session()).await.unwrap();

        assert_eq!(store.find(&token).await.unwrap(), session());

        store.delete(&token).await;
        assert!(store.find(&token).await.is_err());
    }

    #[tokio::test]
    async fn revoking_a_user_leaves_other_sessions() {
        let store = store(SignedDuration::from_hours(1));
        let first = store.create(session()).await.unwrap();
        let second = store.create(session()).await.unwrap();
        let other = store
            .create(UserSession {
                user_id: UserId::new("admin"),
                name: "Admin".to_string(),
                email: "admin@ridedash.local".to_string(),
                role: AccountRole::Admin,
            })
            .await
            .unwrap();

        assert_eq!(store.revoke_user(&UserId::new("usr_002")).await, 2);
        assert!(store.find(&first).await.is_err());
        assert!(store.find(&second).await.is_err());
        assert!(store.find(&other).await.is_ok());
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let store = store(SignedDuration::from_hours(1));
        let token = store.create(session()).await.unwrap();

        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::now_v7().simple(), signature);
        assert!(store.find(&forged).await.is_err());
        assert!(store.find("not-a-token").await.is_err());
    }

    #[tokio::test]
    async fn token_from_another_secret_is_rejected() {
        let token = store(SignedDuration::from_hours(1))
            .create(session())
            .await
            .unwrap();
        let other = SessionStore::new("other-secret".to_string().into(), SignedDuration::from_hours(1));
        assert!(other.find(&token).await.is_err());
    }

    #[tokio::test]
    async fn expired_session_is_not_returned() {
        let store = store(SignedDuration::ZERO);
        let token = store.create(session()).await.unwrap();
        assert!(store.find(&token).await.is_err());
    }
}
