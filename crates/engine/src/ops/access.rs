//! Caller classification and manager scoping.

use crate::User;

/// Effective role of a caller for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Anonymous,
    Manager,
    Superuser,
}

/// Who is making a request, resolved from the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Caller {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Caller {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    /// The superuser flag wins over the role string. Authenticated users that
    /// are neither superusers nor managers carry no privileges.
    pub fn role(&self) -> Role {
        match self.user() {
            Some(user) if user.is_superuser => Role::Superuser,
            Some(user) if user.is_manager() => Role::Manager,
            _ => Role::Anonymous,
        }
    }

    /// Scope for manager-restricted operations.
    ///
    /// Requires an authenticated user whose role is `manager` and who is
    /// assigned to a city. `None` means the caller must be sent away.
    pub fn manager_context(&self) -> Option<ManagerContext> {
        let user = self.user()?;
        if !user.is_manager() {
            return None;
        }
        let city_code = user.city_code.clone()?;
        Some(ManagerContext {
            user: user.clone(),
            city_code,
        })
    }
}

/// An authenticated manager together with the city every one of their
/// operations is filtered by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagerContext {
    pub user: User,
    pub city_code: String,
}
