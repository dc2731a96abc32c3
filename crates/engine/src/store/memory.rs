//! In-process implementation of the repositories.
//!
//! It mirrors the SQL schema rules that matter to the engine: unique codes
//! and usernames, hotels must reference an existing city, deleting a city
//! cascades to its hotels and detaches its users, deleting nothing reports
//! `false`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use sea_orm::DbErr;
use tokio::sync::Mutex;

use crate::{
    City, EngineError, Hotel, NewHotel, NewUser, ResultEngine, Session, User,
    repository::{CityRepository, HotelRepository, SessionRepository, UserRepository},
};

#[derive(Debug, Default)]
struct State {
    cities: BTreeMap<String, City>,
    hotels: BTreeMap<i32, Hotel>,
    users: BTreeMap<i32, User>,
    sessions: HashMap<String, Session>,
    last_hotel_id: i32,
    last_user_id: i32,
}

fn constraint(message: &str) -> EngineError {
    EngineError::Database(DbErr::Custom(message.to_string()))
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CityRepository for MemoryStore {
    async fn find_city(&self, code: &str) -> ResultEngine<Option<City>> {
        Ok(self.state.lock().await.cities.get(code).cloned())
    }

    async fn insert_city(&self, city: &City) -> ResultEngine<()> {
        let mut state = self.state.lock().await;
        if state.cities.contains_key(&city.code) {
            return Err(constraint("UNIQUE constraint failed: cities.code"));
        }
        state.cities.insert(city.code.clone(), city.clone());
        Ok(())
    }

    async fn cities_with_name_prefix(&self, prefix: &str) -> ResultEngine<Vec<City>> {
        let prefix = prefix.to_lowercase();
        // BTreeMap iteration is already ordered by code.
        Ok(self
            .state
            .lock()
            .await
            .cities
            .values()
            .filter(|city| city.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn delete_city(&self, code: &str) -> ResultEngine<bool> {
        let mut state = self.state.lock().await;
        if state.cities.remove(code).is_none() {
            return Ok(false);
        }
        state.hotels.retain(|_, hotel| hotel.city_code != code);
        for user in state.users.values_mut() {
            if user.city_code.as_deref() == Some(code) {
                user.city_code = None;
            }
        }
        Ok(true)
    }

    async fn count_cities(&self) -> ResultEngine<u64> {
        Ok(self.state.lock().await.cities.len() as u64)
    }
}

#[async_trait]
impl HotelRepository for MemoryStore {
    async fn find_hotel_by_code(&self, code: &str) -> ResultEngine<Option<Hotel>> {
        Ok(self
            .state
            .lock()
            .await
            .hotels
            .values()
            .find(|hotel| hotel.code == code)
            .cloned())
    }

    async fn find_hotel_in_city(&self, id: i32, city_code: &str) -> ResultEngine<Option<Hotel>> {
        Ok(self
            .state
            .lock()
            .await
            .hotels
            .get(&id)
            .filter(|hotel| hotel.city_code == city_code)
            .cloned())
    }

    async fn hotels_in_city(&self, city_code: &str) -> ResultEngine<Vec<Hotel>> {
        let mut hotels: Vec<Hotel> = self
            .state
            .lock()
            .await
            .hotels
            .values()
            .filter(|hotel| hotel.city_code == city_code)
            .cloned()
            .collect();
        hotels.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(hotels)
    }

    async fn insert_hotel(&self, hotel: &NewHotel) -> ResultEngine<Hotel> {
        let mut state = self.state.lock().await;
        if !state.cities.contains_key(&hotel.city_code) {
            return Err(constraint("FOREIGN KEY constraint failed"));
        }
        if state.hotels.values().any(|h| h.code == hotel.code) {
            return Err(constraint("UNIQUE constraint failed: hotels.code"));
        }
        state.last_hotel_id += 1;
        let stored = Hotel {
            id: state.last_hotel_id,
            code: hotel.code.clone(),
            name: hotel.name.clone(),
            city_code: hotel.city_code.clone(),
        };
        state.hotels.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_hotel(&self, hotel: &Hotel) -> ResultEngine<()> {
        let mut state = self.state.lock().await;
        if state
            .hotels
            .values()
            .any(|h| h.id != hotel.id && h.code == hotel.code)
        {
            return Err(constraint("UNIQUE constraint failed: hotels.code"));
        }
        let Some(stored) = state.hotels.get_mut(&hotel.id) else {
            return Err(EngineError::Database(DbErr::RecordNotUpdated));
        };
        stored.code = hotel.code.clone();
        stored.name = hotel.name.clone();
        Ok(())
    }

    async fn delete_hotel_in_city(&self, id: i32, city_code: &str) -> ResultEngine<bool> {
        let mut state = self.state.lock().await;
        match state.hotels.get(&id) {
            Some(hotel) if hotel.city_code == city_code => {
                state.hotels.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_hotels(&self) -> ResultEngine<u64> {
        Ok(self.state.lock().await.hotels.len() as u64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user(&self, id: i32) -> ResultEngine<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> ResultEngine<Option<User>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> ResultEngine<User> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.username == user.username) {
            return Err(constraint("UNIQUE constraint failed: users.username"));
        }
        if let Some(code) = &user.city_code
            && !state.cities.contains_key(code)
        {
            return Err(constraint("FOREIGN KEY constraint failed"));
        }
        state.last_user_id += 1;
        let stored = User {
            id: state.last_user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            city_code: user.city_code.clone(),
            role: user.role.clone(),
            is_superuser: user.is_superuser,
            is_staff: user.is_staff,
        };
        state.users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn insert_session(&self, session: &Session) -> ResultEngine<()> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&session.user_id) {
            return Err(constraint("FOREIGN KEY constraint failed"));
        }
        state
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, token: &str) -> ResultEngine<Option<Session>> {
        Ok(self.state.lock().await.sessions.get(token).cloned())
    }

    async fn delete_session(&self, token: &str) -> ResultEngine<()> {
        self.state.lock().await.sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(code: &str, name: &str) -> City {
        City::new(code, name).unwrap()
    }

    #[tokio::test]
    async fn duplicate_city_is_a_constraint_error() {
        let store = MemoryStore::new();
        store.insert_city(&city("AMS", "Amsterdam")).await.unwrap();
        let err = store
            .insert_city(&city("AMS", "Other"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Database(_)));
    }

    #[tokio::test]
    async fn hotel_requires_existing_city() {
        let store = MemoryStore::new();
        let hotel = NewHotel::new("H1", "Hotel", "XXX").unwrap();
        assert!(store.insert_hotel(&hotel).await.is_err());
        assert_eq!(store.count_hotels().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn prefix_search_ignores_case_and_orders_by_code() {
        let store = MemoryStore::new();
        store.insert_city(&city("ZZA", "amstelveen")).await.unwrap();
        store.insert_city(&city("AMS", "Amsterdam")).await.unwrap();
        store.insert_city(&city("ROT", "Rotterdam")).await.unwrap();

        let found = store.cities_with_name_prefix("AMST").await.unwrap();
        let codes: Vec<_> = found.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["AMS", "ZZA"]);
    }
}
