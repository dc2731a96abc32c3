//! Idempotent writes used by the CSV importers.

use crate::{City, EngineError, Hotel, NewHotel, ResultEngine};

use super::Engine;

/// Outcome of a get-or-create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Upsert<T> {
    Created(T),
    Existing(T),
}

impl<T> Upsert<T> {
    pub fn created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Created(value) | Self::Existing(value) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Created(value) | Self::Existing(value) => value,
        }
    }
}

impl Engine {
    /// Insert the city unless a city with the same code exists. An existing
    /// city is returned untouched, even when the name differs.
    pub async fn get_or_create_city(&self, code: &str, name: &str) -> ResultEngine<Upsert<City>> {
        let city = City::new(code, name)?;
        if let Some(existing) = self.store.find_city(&city.code).await? {
            return Ok(Upsert::Existing(existing));
        }
        self.store.insert_city(&city).await?;
        Ok(Upsert::Created(city))
    }

    /// Insert the hotel unless a hotel with the same code exists anywhere.
    ///
    /// Returns the hotel together with the name of the city it belongs to.
    /// An unknown `city_code` is [`EngineError::KeyNotFound`] carrying that code.
    pub async fn get_or_create_hotel(
        &self,
        city_code: &str,
        code: &str,
        name: &str,
    ) -> ResultEngine<Upsert<(Hotel, City)>> {
        let city_code = city_code.trim();
        let Some(city) = self.store.find_city(city_code).await? else {
            return Err(EngineError::KeyNotFound(city_code.to_string()));
        };
        let hotel = NewHotel::new(code, name, &city.code)?;

        if let Some(existing) = self.store.find_hotel_by_code(&hotel.code).await? {
            let owner = if existing.city_code == city.code {
                city
            } else {
                self.city(&existing.city_code).await?
            };
            return Ok(Upsert::Existing((existing, owner)));
        }

        let stored = self.store.insert_hotel(&hotel).await?;
        Ok(Upsert::Created((stored, city)))
    }
}
