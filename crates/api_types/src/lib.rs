use serde::{Deserialize, Serialize};

/// Body of every JSON error response.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub mod city {
    use super::*;

    /// Query string of `GET /autocomplete`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AutocompleteQuery {
        #[serde(default)]
        pub q: String,
    }

    /// One autocomplete suggestion. `id` carries the city code.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CityView {
        pub id: String,
        pub name: String,
    }
}

pub mod hotel {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HotelEntry {
        pub name: String,
        pub code: String,
    }

    /// Response of `GET /cities/{city_code}/hotels`.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HotelsByCity {
        pub hotels: Vec<HotelEntry>,
    }

    /// Payload of the manager create and edit endpoints.
    ///
    /// `city` is accepted for compatibility with existing forms and ignored:
    /// the hotel always belongs to the manager's city.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct HotelForm {
        pub code: String,
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub city: Option<String>,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HotelView {
        pub id: i32,
        pub code: String,
        pub name: String,
        pub city: String,
    }

    /// Response of `GET /manager/hotels`.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ManagerHotels {
        pub city: crate::city::CityView,
        pub hotels: Vec<HotelView>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignupForm {
        pub username: String,
        #[serde(default)]
        pub email: String,
        pub password1: String,
        pub password2: String,
        /// City code the new manager will manage.
        pub city: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginForm {
        pub username: String,
        pub password: String,
    }
}
