//! Domain core of the hotel directory.
//!
//! [`Engine`] owns every rule: validation, manager scoping, idempotent
//! imports, signup and sessions. Storage sits behind the traits in
//! [`repository`].

pub use cities::City;
pub use commands::{HotelCmd, SignupCmd};
pub use error::EngineError;
pub use hotels::{Hotel, NewHotel};
pub use ops::{Caller, Engine, EngineBuilder, ManagerContext, Role, Upsert};
pub use password::{hash_password, verify_password};
pub use sessions::Session;
pub use store::{MemoryStore, SqlStore};
pub use users::{MANAGER_ROLE, NewUser, User};

mod cities;
mod commands;
mod error;
mod hotels;
mod ops;
mod password;
pub mod repository;
mod sessions;
mod store;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
