//! Data-access interfaces, one per entity.
//!
//! The engine only talks to storage through these traits. [`SqlStore`]
//! implements them on top of sea-orm, [`MemoryStore`] keeps everything in
//! process for tests and tooling. Each method is a single storage operation;
//! validation and scoping live in the engine, not here.
//!
//! [`SqlStore`]: crate::SqlStore
//! [`MemoryStore`]: crate::MemoryStore

use async_trait::async_trait;

use crate::{City, Hotel, NewHotel, NewUser, ResultEngine, Session, User};

#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn find_city(&self, code: &str) -> ResultEngine<Option<City>>;

    async fn insert_city(&self, city: &City) -> ResultEngine<()>;

    /// Cities whose name starts with `prefix`, ignoring case, ordered by code.
    async fn cities_with_name_prefix(&self, prefix: &str) -> ResultEngine<Vec<City>>;

    /// Delete a city together with its hotels and detach its users.
    /// Returns `false` when no city had that code.
    async fn delete_city(&self, code: &str) -> ResultEngine<bool>;

    async fn count_cities(&self) -> ResultEngine<u64>;
}

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn find_hotel_by_code(&self, code: &str) -> ResultEngine<Option<Hotel>>;

    /// Find a hotel by id, but only if it belongs to `city_code`.
    async fn find_hotel_in_city(&self, id: i32, city_code: &str) -> ResultEngine<Option<Hotel>>;

    /// Hotels of a city ordered by code.
    async fn hotels_in_city(&self, city_code: &str) -> ResultEngine<Vec<Hotel>>;

    async fn insert_hotel(&self, hotel: &NewHotel) -> ResultEngine<Hotel>;

    /// Persist `name` and `code` of an existing hotel. The city is never
    /// rewritten.
    async fn update_hotel(&self, hotel: &Hotel) -> ResultEngine<()>;

    /// Delete a hotel by id, but only if it belongs to `city_code`.
    /// Returns `false` when nothing matched.
    async fn delete_hotel_in_city(&self, id: i32, city_code: &str) -> ResultEngine<bool>;

    async fn count_hotels(&self) -> ResultEngine<u64>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: i32) -> ResultEngine<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> ResultEngine<Option<User>>;

    async fn insert_user(&self, user: &NewUser) -> ResultEngine<User>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert_session(&self, session: &Session) -> ResultEngine<()>;

    async fn find_session(&self, token: &str) -> ResultEngine<Option<Session>>;

    async fn delete_session(&self, token: &str) -> ResultEngine<()>;
}

/// Everything the engine needs from storage.
pub trait Store: CityRepository + HotelRepository + UserRepository + SessionRepository {}

impl<T> Store for T where T: CityRepository + HotelRepository + UserRepository + SessionRepository
{}
