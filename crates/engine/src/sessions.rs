//! Login sessions backing the session cookie.

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Opaque random token stored in the cookie.
    pub token: String,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: i32, ttl: Duration) -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
            user_id,
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    pub user_id: i32,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Session {
    fn from(value: Model) -> Self {
        Self {
            token: value.token,
            user_id: value.user_id,
            expires_at: value.expires_at,
        }
    }
}

impl From<&Session> for ActiveModel {
    fn from(value: &Session) -> Self {
        Self {
            token: ActiveValue::Set(value.token.clone()),
            user_id: ActiveValue::Set(value.user_id),
            expires_at: ActiveValue::Set(value.expires_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique() {
        let a = Session::new(1, Duration::hours(1));
        let b = Session::new(1, Duration::hours(1));
        assert_ne!(a.token, b.token);
        assert_eq!(a.token.len(), 32);
    }

    #[test]
    fn expiry_is_inclusive() {
        let session = Session::new(1, Duration::zero());
        assert!(session.is_expired(session.expires_at));
        assert!(!session.is_expired(session.expires_at - Duration::seconds(1)));
    }
}
