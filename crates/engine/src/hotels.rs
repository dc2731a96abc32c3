//! The module contains `Hotel` struct and its implementation.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{ResultEngine, cities::CODE_MAX_LEN, util::required_field};

const NAME_MAX_LEN: usize = 200;

/// A stored hotel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hotel {
    pub id: i32,
    /// Unique across all hotels, not only within a city.
    pub code: String,
    pub name: String,
    /// Code of the city the hotel is located in.
    pub city_code: String,
}

/// A hotel that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewHotel {
    pub code: String,
    pub name: String,
    pub city_code: String,
}

impl NewHotel {
    /// Build a validated hotel. All fields are trimmed.
    pub fn new(code: &str, name: &str, city_code: &str) -> ResultEngine<Self> {
        Ok(Self {
            code: hotel_code(code)?,
            name: hotel_name(name)?,
            city_code: required_field(city_code, "city code", CODE_MAX_LEN)?,
        })
    }
}

pub(crate) fn hotel_code(value: &str) -> ResultEngine<String> {
    required_field(value, "hotel code", CODE_MAX_LEN)
}

pub(crate) fn hotel_name(value: &str) -> ResultEngine<String> {
    required_field(value, "hotel name", NAME_MAX_LEN)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub city_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cities::Entity",
        from = "Column::CityCode",
        to = "super::cities::Column::Code",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Cities,
}

impl Related<super::cities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Hotel {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            code: value.code,
            name: value.name,
            city_code: value.city_code,
        }
    }
}

impl From<&NewHotel> for ActiveModel {
    fn from(value: &NewHotel) -> Self {
        Self {
            id: ActiveValue::NotSet,
            code: ActiveValue::Set(value.code.clone()),
            name: ActiveValue::Set(value.name.clone()),
            city_code: ActiveValue::Set(value.city_code.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_hotel_trims_fields() {
        let hotel = NewHotel::new(" CCA01 ", " Hotel01 ", " CCA ").unwrap();
        assert_eq!(hotel.code, "CCA01");
        assert_eq!(hotel.name, "Hotel01");
        assert_eq!(hotel.city_code, "CCA");
    }

    #[test]
    #[should_panic(expected = "Validation(\"hotel name must not be empty\")")]
    fn new_hotel_requires_name() {
        NewHotel::new("CCA01", "", "CCA").unwrap();
    }

    #[test]
    #[should_panic(expected = "Validation(\"city code must not be empty\")")]
    fn new_hotel_requires_city() {
        NewHotel::new("CCA01", "Hotel01", " ").unwrap();
    }
}
