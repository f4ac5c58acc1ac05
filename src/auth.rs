//! Mock authentication collaborator. No backend exists; the two seeded
//! accounts are the only valid credentials, and the configured latency
//! stands in for the network round trip.

use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::error::AuthError;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

struct Account {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: &'static str,
}

const ACCOUNTS: &[Account] = &[
    Account {
        email: "admin@kliv.dev",
        password: "admin123",
        name: "Admin",
        role: "admin",
    },
    Account {
        email: "demo@kliv.dev",
        password: "demo123",
        name: "Demo User",
        role: "member",
    },
];

pub struct MockAuth {
    latency: Duration,
}

impl MockAuth {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Credentials must exactly match a seeded account. The latency sleep
    /// cannot be cancelled once started.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        let account = ACCOUNTS
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or(AuthError::InvalidCredentials)?;
        Ok(Session {
            user: User {
                name: account.name.to_string(),
                email: account.email.to_string(),
                role: account.role.to_string(),
            },
            token: Uuid::new_v4().to_string(),
        })
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        // Default latency mimics the original mock API timer
        Self::new(Duration::from_millis(300))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> MockAuth {
        MockAuth::new(Duration::ZERO)
    }

    #[test]
    fn seeded_accounts_authenticate() {
        let session = auth().authenticate("admin@kliv.dev", "admin123").unwrap();
        assert_eq!(session.user.role, "admin");
        assert!(!session.token.is_empty());

        let session = auth().authenticate("demo@kliv.dev", "demo123").unwrap();
        assert_eq!(session.user.role, "member");
    }

    #[test]
    fn near_matches_are_rejected() {
        let a = auth();
        assert!(a.authenticate("admin@kliv.dev", "admin124").is_err());
        assert!(a.authenticate("Admin@kliv.dev", "admin123").is_err());
        assert!(a.authenticate("", "").is_err());
    }

    #[test]
    fn tokens_are_opaque_and_fresh() {
        let a = auth();
        let s1 = a.authenticate("demo@kliv.dev", "demo123").unwrap();
        let s2 = a.authenticate("demo@kliv.dev", "demo123").unwrap();
        assert_ne!(s1.token, s2.token);
    }
}
