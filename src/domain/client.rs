use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// `true` renders as "ativo", `false` as "inativo".
    pub status: bool,
}

/// Payload for `POST /clients`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub status: bool,
}

impl NewClient {
    #[must_use]
    pub fn new(name: String, email: String, status: bool) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            status,
        }
    }
}

/// Payload for `PUT /clients/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateClient {
    pub name: String,
    pub email: String,
    pub status: bool,
}

impl UpdateClient {
    #[must_use]
    pub fn new(name: String, email: String, status: bool) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_normalizes_email() {
        let client = NewClient::new(" Alice ".into(), "  Alice@Example.COM ".into(), true);
        assert_eq!(client.name, "Alice");
        assert_eq!(client.email, "alice@example.com");
        assert!(client.status);
    }

    #[test]
    fn update_client_normalizes_email() {
        let updates = UpdateClient::new("Bob".into(), "BOB@example.com".into(), false);
        assert_eq!(updates.email, "bob@example.com");
        assert!(!updates.status);
    }
}
