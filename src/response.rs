use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub msg: String,
}

/// A validated window into a list: `limit` rows starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Page {
    /// Window for a 1-indexed page number, `None` when the offset would not
    /// fit a `BIGINT`.
    pub fn numbered(limit: u64, page: u64) -> Option<Self> {
        let offset = limit.checked_mul(page.saturating_sub(1))?;
        i64::try_from(offset).ok()?;
        Some(Self { limit, offset })
    }

    pub fn at_offset(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
