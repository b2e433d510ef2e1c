//! Name catalog - deduplicated item names behind the suggestion lookup

use serde::Serialize;
use sqlx::FromRow;

/// Maximum number of rows a suggestion lookup returns
pub const SUGGESTION_LIMIT: usize = 20;

/// One suggested name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, FromRow)]
pub struct NameSuggestion {
    pub name: String,
}
