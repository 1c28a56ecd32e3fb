// HTTP handlers
// Translate requests into application operations and domain results into JSON

pub mod health;
pub mod matches;
pub mod seasons;
pub mod teams;

use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::domain::repositories::Store;

/// Shared handler state
pub type SharedStore = Arc<dyn Store>;

/// Query string accepted by list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub season_id: Option<i64>,
}

/// Distinguishes an omitted field (`None`) from an explicit `null` (`Some(None)`)
///
/// Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
