//! JSON envelope shared by every endpoint

use axum::http::StatusCode;
use serde::Serialize;

use crate::model::Page;

#[derive(Debug, Serialize)]
pub struct Pagination {
  pub has_next: bool,
  pub has_prev: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_cursor: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prev_cursor: Option<String>,
  pub total: u64,
  pub count: usize,
}

impl Pagination {
  pub fn of(page: &Page, cursor: &str) -> Self {
    Self {
      has_next: page.next_cursor.is_some(),
      has_prev: !cursor.is_empty(),
      next_cursor: page.next_cursor.clone(),
      prev_cursor: (!cursor.is_empty()).then(|| cursor.to_string()),
      total: page.total,
      count: page.entries.len(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct Meta {
  pub status: &'static str,
  pub code: u16,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pagination: Option<Pagination>,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub meta: Meta,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
}

impl<T> Envelope<T> {
  pub fn success(
    status: StatusCode,
    message: impl Into<String>,
    data: T,
  ) -> Self {
    Self {
      meta: Meta {
        status: "success",
        code: status.as_u16(),
        message: message.into(),
        pagination: None,
      },
      data: Some(data),
    }
  }

  pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
    Self {
      meta: Meta {
        status: "error",
        code: status.as_u16(),
        message: message.into(),
        pagination: None,
      },
      data: None,
    }
  }

  pub fn paginated(mut self, pagination: Pagination) -> Self {
    self.meta.pagination = Some(pagination);
    self
  }
}
