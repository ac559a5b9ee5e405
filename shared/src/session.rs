use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Who is signed in, handed to whatever needs to know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, user: User) {
        tracing::info!(user_id = %user.id, "signed in");
        self.user = Some(user);
    }

    /// Returns the user that was signed in, if any.
    pub fn sign_out(&mut self) -> Option<User> {
        let user = self.user.take();
        if let Some(user) = &user {
            tracing::info!(user_id = %user.id, "signed out");
        }
        user
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("Guest", |u| u.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_and_out() {
        let mut session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.display_name(), "Guest");

        session.sign_in(User::new("Ada", "ada@example.com"));
        assert_eq!(session.display_name(), "Ada");

        let user = session.sign_out().unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert!(session.current_user().is_none());
        assert!(session.sign_out().is_none());
    }
}
