//! Utility functions for the API

use crate::aliases::AliasRecord;
use crate::api::Error;
use crate::storage::Storage;

/// Fetch alias from storage
pub async fn fetch_alias(storage: &Storage, alias_id: i64) -> Result<AliasRecord, Error> {
    storage
        .find_single_alias_by_id(alias_id)
        .await
        .map_or_else(|| Err(Error::not_found("Alias not found")), Ok)
}
