use async_trait::async_trait;

use crate::application::dtos::trash_dto::{DeletionOutcomeDto, EmptyTrashDto, TrashActionDto, TrashedItemDto};
use crate::common::errors::Result;

/// Port for trash-related use cases
#[async_trait]
pub trait TrashUseCase: Send + Sync {
    /// List every trash record, most recently deleted first
    async fn get_trash_items(&self) -> Result<Vec<TrashedItemDto>>;

    /// Delete an entity of the given type, keeping a snapshot in the trash
    async fn move_to_trash(&self, item_type: &str, item_id: &str, actor_id: &str) -> Result<DeletionOutcomeDto>;

    /// Restore an item from trash into its origin table
    async fn restore_item(&self, trash_id: &str) -> Result<TrashActionDto>;

    /// Permanently delete an item from trash; unknown ids are a no-op
    async fn delete_permanently(&self, trash_id: &str) -> Result<TrashActionDto>;

    /// Purge every record in the trash
    async fn empty_trash(&self) -> Result<EmptyTrashDto>;
}
