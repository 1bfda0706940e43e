pub use std::time::Duration;

pub use anyhow::Context;
pub use chrono::{NaiveDateTime as DateTime, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection,
  EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
