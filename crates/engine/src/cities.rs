//! The module contains `City` struct and its implementation.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{ResultEngine, util::required_field};

pub(crate) const CODE_MAX_LEN: usize = 10;
const NAME_MAX_LEN: usize = 100;

/// A city.
///
/// Cities are reference data: they are imported (or created by an
/// administrator) and every hotel and manager points to one of them through
/// its `code`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct City {
    /// Short unique identifier, e.g. `AMS`.
    pub code: String,
    pub name: String,
}

impl City {
    /// Build a validated city. Both fields are trimmed.
    pub fn new(code: &str, name: &str) -> ResultEngine<Self> {
        Ok(Self {
            code: required_field(code, "city code", CODE_MAX_LEN)?,
            name: required_field(name, "city name", NAME_MAX_LEN)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hotels::Entity")]
    Hotels,
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
}

impl Related<super::hotels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotels.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for City {
    fn from(value: Model) -> Self {
        Self {
            code: value.code,
            name: value.name,
        }
    }
}

impl From<&City> for ActiveModel {
    fn from(value: &City) -> Self {
        Self {
            code: ActiveValue::Set(value.code.clone()),
            name: ActiveValue::Set(value.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn new_trims_fields() {
        let city = City::new("  AMS ", " Amsterdam\t").unwrap();
        assert_eq!(city.code, "AMS");
        assert_eq!(city.name, "Amsterdam");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = City::new("AMS", "   ").unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("city name must not be empty".to_string())
        );
    }

    #[test]
    fn long_code_is_rejected() {
        assert!(City::new("ABCDEFGHIJK", "Somewhere").is_err());
        assert!(City::new("ABCDEFGHIJ", "Somewhere").is_ok());
    }
}
