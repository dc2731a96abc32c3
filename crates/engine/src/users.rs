//! Users table.
//!
//! Managers carry the code of the city they manage; superusers have none.
//! The `password` column stores an argon2 PHC string, never the clear text.

use sea_orm::entity::{ActiveValue, prelude::*};

/// Role assigned to self-service signups.
pub const MANAGER_ROLE: &str = "manager";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub city_code: Option<String>,
    pub role: String,
    pub is_superuser: bool,
    pub is_staff: bool,
}

impl User {
    pub fn is_manager(&self) -> bool {
        self.role == MANAGER_ROLE
    }
}

/// A user that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub city_code: Option<String>,
    pub role: String,
    pub is_superuser: bool,
    pub is_staff: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub password: String,
    pub city_code: Option<String>,
    pub role: String,
    pub is_superuser: bool,
    pub is_staff: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cities::Entity",
        from = "Column::CityCode",
        to = "super::cities::Column::Code",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Cities,
    #[sea_orm(has_many = "super::sessions::Entity")]
    Sessions,
}

impl Related<super::cities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cities.def()
    }
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            password_hash: value.password,
            city_code: value.city_code,
            role: value.role,
            is_superuser: value.is_superuser,
            is_staff: value.is_staff,
        }
    }
}

impl From<&NewUser> for ActiveModel {
    fn from(value: &NewUser) -> Self {
        Self {
            id: ActiveValue::NotSet,
            username: ActiveValue::Set(value.username.clone()),
            email: ActiveValue::Set(value.email.clone()),
            password: ActiveValue::Set(value.password_hash.clone()),
            city_code: ActiveValue::Set(value.city_code.clone()),
            role: ActiveValue::Set(value.role.clone()),
            is_superuser: ActiveValue::Set(value.is_superuser),
            is_staff: ActiveValue::Set(value.is_staff),
        }
    }
}
