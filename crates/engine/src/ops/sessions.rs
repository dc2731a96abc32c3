use chrono::Utc;

use crate::{ResultEngine, Session, User};

use super::{Caller, Engine};

impl Engine {
    /// Authenticate and open a new session.
    pub async fn login(&self, username: &str, password: &str) -> ResultEngine<(User, Session)> {
        let user = self.authenticate(username, password).await?;
        let session = Session::new(user.id, self.session_ttl);
        self.store.insert_session(&session).await?;
        tracing::info!(username = %user.username, "logged in");
        Ok((user, session))
    }

    /// Resolve a session token to its user. Expired sessions are removed
    /// on sight.
    pub async fn resolve_session(&self, token: &str) -> ResultEngine<Option<User>> {
        let Some(session) = self.store.find_session(token).await? else {
            return Ok(None);
        };
        if session.is_expired(Utc::now()) {
            self.store.delete_session(token).await?;
            return Ok(None);
        }
        self.store.find_user(session.user_id).await
    }

    /// Like [`Engine::resolve_session`] but folds a missing token and an
    /// unknown session into [`Caller::Anonymous`].
    pub async fn caller(&self, token: Option<&str>) -> ResultEngine<Caller> {
        let Some(token) = token else {
            return Ok(Caller::Anonymous);
        };
        Ok(match self.resolve_session(token).await? {
            Some(user) => Caller::Authenticated(user),
            None => Caller::Anonymous,
        })
    }

    /// Drop a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> ResultEngine<()> {
        self.store.delete_session(token).await
    }
}
