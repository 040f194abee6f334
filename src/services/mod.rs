use thiserror::Error;
use validator::ValidationErrors;

use crate::repository::errors::RepositoryError;

pub mod allocations;
pub mod clients;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    /// One message per invalid form field.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(validation_messages(&errors))
    }
}

/// Flattens validator output into one displayable message per failed field.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|field_errors| field_errors.iter())
        .map(|error| {
            error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string())
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;
    use crate::forms::clients::AddClientForm;

    #[test]
    fn messages_cover_every_invalid_field() {
        let form = AddClientForm {
            name: "A".into(),
            email: "not-an-email".into(),
            status: "ativo".into(),
        };
        let errors = form.validate().unwrap_err();
        let messages = validation_messages(&errors);
        assert_eq!(messages, vec!["Email inválido", "Nome é obrigatório"]);
    }
}
