//! Error types for the catalog

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use tracing::{debug, error};

use crate::plugins::server::response::Envelope;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("{0}")]
  Validation(String),

  #[error("ota not found")]
  NotFound,

  #[error("{0}")]
  Conflict(String),

  #[error("storage error: {0}")]
  Storage(DbErr),
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Error::Validation(_) => StatusCode::BAD_REQUEST,
      Error::NotFound => StatusCode::NOT_FOUND,
      Error::Conflict(_) => StatusCode::CONFLICT,
      Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// Store failures never leave the repository untranslated: uniqueness
/// violations become conflicts and vanished rows become `NotFound`.
impl From<DbErr> for Error {
  fn from(err: DbErr) -> Self {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
      debug!("unique constraint violated: {detail}");
      return Error::Conflict(String::from(
        "an ota with this id or version code already exists",
      ));
    }

    match err {
      DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => Error::NotFound,
      err => Error::Storage(err),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      Error::Storage(err) => {
        error!("storage failure: {err}");
        String::from("Internal error")
      }
      err => err.to_string(),
    };

    (status, Json(Envelope::<()>::error(status, message))).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
