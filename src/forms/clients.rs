use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};

fn default_status() -> String {
    "ativo".to_string()
}

/// Form data for creating a client.
#[derive(Debug, Deserialize, Validate)]
pub struct AddClientForm {
    #[validate(length(min = 2, message = "Nome é obrigatório"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    /// "ativo" or "inativo"; new clients default to ativo.
    #[serde(default = "default_status")]
    pub status: String,
}

/// Form data for updating an existing client.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveClientForm {
    pub id: i32,
    #[validate(length(min = 2, message = "Nome é obrigatório"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn status_flag(status: &str) -> bool {
    status == "ativo"
}

impl From<&AddClientForm> for NewClient {
    fn from(form: &AddClientForm) -> Self {
        NewClient::new(
            form.name.clone(),
            form.email.clone(),
            status_flag(&form.status),
        )
    }
}

impl From<&SaveClientForm> for UpdateClient {
    fn from(form: &SaveClientForm) -> Self {
        UpdateClient::new(
            form.name.clone(),
            form.email.clone(),
            status_flag(&form.status),
        )
    }
}
