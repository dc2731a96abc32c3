//! Command structs for engine operations.
//!
//! These types group the raw, untrusted fields of write operations coming
//! from forms and payloads. The engine validates and normalizes them.

/// Self-service manager signup.
#[derive(Clone, Debug)]
pub struct SignupCmd {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
    /// Code of the city the new manager will manage.
    pub city_code: String,
}

impl SignupCmd {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        city_code: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: String::new(),
            password1: password.clone(),
            password2: password,
            city_code: city_code.into(),
        }
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    #[must_use]
    pub fn confirmation(mut self, password2: impl Into<String>) -> Self {
        self.password2 = password2.into();
        self
    }
}

/// The editable fields of a hotel, as submitted by a manager.
///
/// There is no city here: managers always write into their own
/// city.
#[derive(Clone, Debug)]
pub struct HotelCmd {
    pub code: String,
    pub name: String,
}

impl HotelCmd {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
