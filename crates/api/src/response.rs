//! Shared response bodies for API handlers.
//!
//! Records and lists are returned bare; write operations without a record
//! to return answer with [`SuccessResponse`].

use serde::Serialize;

/// `{ "success": true }` body for delete and bulk reorder.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
