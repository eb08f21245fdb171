use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Error from database: {0}")]
    Database(String),
    #[error("Does not exist: {0}")]
    NotFound(String),
    #[error("This action is not allowed for you: {0}")]
    Forbidden(String),
    #[error("Your request is incorrect: {0}")]
    InvalidRequest(String),
    #[error("Invalid date option {value:?}: {reason}")]
    InvalidDateOption { value: String, reason: String },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("A env was not found: {0}")]
    EnvNotFound(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match *self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::InvalidRequest(_)
            | Error::InvalidDateOption { .. }
            | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Database(_) | Error::Request(_) | Error::EnvNotFound(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl From<leptos::prelude::ServerFnError> for Error {
    fn from(e: leptos::prelude::ServerFnError) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(feature = "ssr")]
impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Error::NotFound("row not found".to_string()),
            e => Error::Database(format!("sqlx error: {:?}", e)),
        }
    }
}

#[cfg(feature = "ssr")]
impl From<sqlx::migrate::MigrateError> for Error {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        Error::Database(format!("The migration failed: {}", e))
    }
}

#[cfg(feature = "ssr")]
impl From<std::env::VarError> for Error {
    fn from(value: std::env::VarError) -> Self {
        Error::EnvNotFound(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_http_status() {
        assert_eq!(
            Error::NotFound("poll".into()).status_code(),
            http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Forbidden("owner".into()).status_code(),
            http::StatusCode::FORBIDDEN
        );
        assert_eq!(
            Error::Validation("name".into()).status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Database("down".into()).status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn row_not_found_becomes_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }
}
