use serde::{Deserialize, Serialize};

/// The signed-in account as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "crate::lenient::string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Authentication state of the client.
///
/// A token exists exactly when the session is authenticated; the enum makes
/// any other combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { token: String, user: User },
}

impl Session {
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Session::Authenticated {
            token: token.into(),
            user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    /// Token-free view for the presentation layer.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            authenticated: self.is_authenticated(),
            user: self.user().cloned(),
        }
    }
}

/// What the view layer gets to see of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub authenticated: bool,
    pub user: Option<User>,
}

/// Login form payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Register form payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterProfile {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterProfile {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Which of the two auth flows a form submission targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Register => "register",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn welcome(&self, name: &str) -> String {
        let outcome = match self {
            AuthMode::Login => "Logged in successfully.",
            AuthMode::Register => "Account created successfully.",
        };
        format!("Welcome {}! {}", name, outcome)
    }

    pub fn failure_fallback(&self) -> String {
        format!("{} failed. Please try again.", self.label())
    }
}
