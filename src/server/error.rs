use crate::app;
use crate::server::Reply;
use crate::storage;
use hyper::header::{HeaderValue, ALLOW};
use hyper::{Body, Response, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("method not allowed, use {0}")]
    MethodNotAllowed(String),
    #[error("storage unavailable: {0}")]
    Storage(#[from] storage::Error),
    #[error("failed to render response: {0}")]
    Render(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<app::Error> for Error {
    fn from(err: app::Error) -> Self {
        match err {
            app::Error::Payload(e) => Error::BadRequest(e.to_string()),
            app::Error::Storage(e) => Error::Storage(e),
            app::Error::Render(e) => Error::Render(e.to_string()),
            app::Error::Server(e) => Error::Internal(e.to_string()),
        }
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Error::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Render(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> Response<Body> {
        let status = self.status();
        let allow = match &self {
            Error::MethodNotAllowed(allowed) => HeaderValue::from_str(allowed).ok(),
            _ => None,
        };
        let mut response = Reply::text(self.to_string()).into_response(status);
        if let Some(allow) = allow {
            response.headers_mut().insert(ALLOW, allow);
        }
        response
    }
}
