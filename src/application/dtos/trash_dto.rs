use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::trashed_item::TrashRecord;
use crate::domain::repositories::trash_repository::CascadeWarning;

/// DTO representing an item in the trash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashedItemDto {
    pub trash_id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub original_id: String,
    pub data: Value,
    pub deleted_at: DateTime<Utc>,
    pub deleted_by: Option<String>,
}

impl From<TrashRecord> for TrashedItemDto {
    fn from(record: TrashRecord) -> Self {
        Self {
            trash_id: record.id.to_string(),
            item_type: record.item_type,
            original_id: record.original_id,
            data: record.item_data,
            deleted_at: record.deleted_at,
            deleted_by: record.deleted_by,
        }
    }
}

/// Request to restore an item from trash
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreFromTrashRequest {
    #[serde(alias = "trash_id")]
    pub trash_id: Option<String>,
}

/// Query string of `DELETE /api/trash`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePermanentlyQuery {
    #[serde(alias = "trash_id")]
    pub trash_id: Option<String>,
}

/// Result of deleting an entity: the primary row is always gone once this is returned
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionOutcomeDto {
    pub deleted_id: String,
    pub item_type: String,
    pub trash_id: String,
    pub primary_deleted: bool,
    pub cascade_warnings: Vec<CascadeWarning>,
}

/// Result of a restore or a permanent delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashActionDto {
    pub success: bool,
    pub warnings: Vec<CascadeWarning>,
}

impl TrashActionDto {
    pub fn ok(warnings: Vec<CascadeWarning>) -> Self {
        Self { success: true, warnings }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyTrashDto {
    pub success: bool,
    pub purged: usize,
    pub warnings: Vec<CascadeWarning>,
}
