use crate::{City, EngineError, Hotel, ResultEngine};

use super::Engine;

impl Engine {
    /// Create a city, failing if the code is already taken.
    pub async fn new_city(&self, code: &str, name: &str) -> ResultEngine<City> {
        let city = City::new(code, name)?;
        if self.store.find_city(&city.code).await?.is_some() {
            return Err(EngineError::ExistingKey(city.code));
        }
        self.store.insert_city(&city).await?;
        tracing::info!(code = %city.code, "city created");
        Ok(city)
    }

    pub async fn city(&self, code: &str) -> ResultEngine<City> {
        self.store
            .find_city(code.trim())
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(code.to_string()))
    }

    /// Delete a city. Its hotels go with it; its managers lose their city.
    pub async fn delete_city(&self, code: &str) -> ResultEngine<()> {
        if !self.store.delete_city(code.trim()).await? {
            return Err(EngineError::KeyNotFound(code.to_string()));
        }
        tracing::info!(code, "city deleted");
        Ok(())
    }

    /// Cities whose name starts with `query`, ignoring case, ordered by code.
    ///
    /// An empty query matches nothing rather than everything.
    pub async fn autocomplete_cities(&self, query: &str) -> ResultEngine<Vec<City>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.store.cities_with_name_prefix(query).await
    }

    /// All hotels of a city, ordered by hotel code.
    ///
    /// An unknown city is [`EngineError::KeyNotFound`], never an empty list.
    pub async fn hotels_by_city(&self, city_code: &str) -> ResultEngine<Vec<Hotel>> {
        let city = self.city(city_code).await?;
        self.store.hotels_in_city(&city.code).await
    }

    pub async fn count_cities(&self) -> ResultEngine<u64> {
        self.store.count_cities().await
    }
}
