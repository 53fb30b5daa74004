use axum::{
    extract::rejection::BytesRejection,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::{signup::SignupError, web::types::DataParsingError};

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("method not allowed: {0}")]
    MethodNotAllowed(Method),
    #[error("missing configuration value: {0}")]
    ConfigMissing(&'static str),

    #[error("failed to read the request body: {0}")]
    BodyReading(#[from] BytesRejection),
    #[error("request body is not valid json: {0}")]
    BodyParsing(#[from] serde_json::Error),
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("signup error: {0}")]
    Signup(#[from] SignupError),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, MethodNotAllowed),
            Error::DataParsing(data_er) => {
                (StatusCode::BAD_REQUEST, InvalidInput(data_er.to_string()))
            }
            Error::ConfigMissing(_) => (StatusCode::INTERNAL_SERVER_ERROR, ConfigurationError),
            Error::BodyReading(_) | Error::BodyParsing(_) | Error::Signup(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ServiceError)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The error message a caller gets to see.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("{_0}")]
    InvalidInput(String),
    #[display("Method not allowed")]
    MethodNotAllowed,
    #[display("Service configuration error")]
    ConfigurationError,
    #[display("Internal server error")]
    ServiceError,
}

impl ClientError {
    /// Only generic service errors may carry internal details, and only outside production.
    pub fn may_expose_details(&self) -> bool {
        matches!(self, ClientError::ServiceError)
    }
}
