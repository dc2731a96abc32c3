use crate::{
    EngineError, NewUser, ResultEngine, SignupCmd, User, hash_password,
    users::MANAGER_ROLE,
    util::{normalize_email, validate_username},
    verify_password,
};

use super::Engine;

impl Engine {
    /// Register a manager for an existing city.
    pub async fn signup(&self, cmd: SignupCmd) -> ResultEngine<User> {
        let username = validate_username(&cmd.username)?;
        let email = normalize_email(&cmd.email)?;
        if cmd.password1.is_empty() {
            return Err(EngineError::Validation(
                "password must not be empty".to_string(),
            ));
        }
        if cmd.password1 != cmd.password2 {
            return Err(EngineError::Validation(
                "The two password fields didn't match.".to_string(),
            ));
        }
        let city_code = cmd.city_code.trim();
        if self.store.find_city(city_code).await?.is_none() {
            return Err(EngineError::Validation(format!(
                "City with code {city_code} does not exist."
            )));
        }
        if self.store.find_user_by_username(&username).await?.is_some() {
            return Err(EngineError::ExistingKey(username));
        }

        let user = NewUser {
            username,
            email,
            password_hash: hash_password(&cmd.password1)?,
            city_code: Some(city_code.to_string()),
            role: MANAGER_ROLE.to_string(),
            is_superuser: false,
            is_staff: false,
        };
        let user = self.store.insert_user(&user).await?;
        tracing::info!(username = %user.username, city = city_code, "manager signed up");
        Ok(user)
    }

    /// Create an administrator. Superusers have no city and therefore never
    /// pass the manager guard.
    pub async fn create_superuser(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<User> {
        let username = validate_username(username)?;
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(EngineError::Validation(
                "password must not be empty".to_string(),
            ));
        }
        if self.store.find_user_by_username(&username).await?.is_some() {
            return Err(EngineError::ExistingKey(username));
        }

        let user = NewUser {
            username,
            email,
            password_hash: hash_password(password)?,
            city_code: None,
            role: MANAGER_ROLE.to_string(),
            is_superuser: true,
            is_staff: true,
        };
        let user = self.store.insert_user(&user).await?;
        tracing::info!(username = %user.username, "superuser created");
        Ok(user)
    }

    /// Check credentials. Unknown users and wrong passwords are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<User> {
        let Some(user) = self.store.find_user_by_username(username.trim()).await? else {
            return Err(EngineError::InvalidCredentials);
        };
        if !verify_password(password, &user.password_hash) {
            return Err(EngineError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn user(&self, id: i32) -> ResultEngine<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {id}")))
    }
}
