use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time;
use tracing::{debug, error, info, instrument};

use crate::common::config::TrashConfig;
use crate::common::errors::Result;
use crate::domain::repositories::trash_repository::TrashRepository;
use crate::application::ports::trash_ports::TrashUseCase;

/// Purga periódica de registros de papelera más antiguos que el periodo de retención
pub struct TrashCleanupService {
    trash_service: Arc<dyn TrashUseCase>,
    trash_repository: Arc<dyn TrashRepository>,
    retention_days: u32,
    cleanup_interval_hours: u64,
}

impl TrashCleanupService {
    pub fn new(
        trash_service: Arc<dyn TrashUseCase>,
        trash_repository: Arc<dyn TrashRepository>,
        config: &TrashConfig,
    ) -> Self {
        Self {
            trash_service,
            trash_repository,
            retention_days: config.retention_days,
            cleanup_interval_hours: config.cleanup_interval_hours.max(1), // Mínimo 1 hora
        }
    }

    /// Una retención de 0 días desactiva la purga
    pub fn is_enabled(&self) -> bool {
        self.retention_days > 0
    }

    /// Inicia el trabajo de limpieza periódica
    #[instrument(skip(self))]
    pub async fn start_cleanup_job(&self) {
        if !self.is_enabled() {
            info!("Purga automática de la papelera desactivada");
            return;
        }

        let trash_repository = self.trash_repository.clone();
        let trash_service = self.trash_service.clone();
        let retention_days = self.retention_days;
        let interval_hours = self.cleanup_interval_hours;

        info!(
            "Iniciando limpieza de papelera cada {} horas (retención {} días)",
            interval_hours, retention_days
        );

        tokio::spawn(async move {
            let interval_duration = Duration::from_secs(interval_hours * 60 * 60);
            let mut interval = time::interval(interval_duration);

            loop {
                // El primer tick se completa de inmediato
                interval.tick().await;
                debug!("Ejecutando tarea programada de limpieza de papelera");

                if let Err(e) = Self::cleanup_expired_items(
                    trash_repository.clone(),
                    trash_service.clone(),
                    retention_days,
                ).await {
                    error!("Error en la limpieza programada de la papelera: {:?}", e);
                }
            }
        });
    }

    /// Purga los registros expirados; devuelve cuántos se eliminaron
    #[instrument(skip(trash_repository, trash_service))]
    pub async fn cleanup_expired_items(
        trash_repository: Arc<dyn TrashRepository>,
        trash_service: Arc<dyn TrashUseCase>,
        retention_days: u32,
    ) -> Result<usize> {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(retention_days));
        let expired_items = trash_repository.get_expired_items(cutoff).await?;

        if expired_items.is_empty() {
            debug!("No hay elementos expirados para limpiar");
            return Ok(0);
        }

        info!("Encontrados {} elementos expirados para eliminar", expired_items.len());

        let mut purged = 0;
        for item in expired_items {
            let trash_id = item.id.to_string();

            // Si falla una eliminación, continuar con las demás
            match trash_service.delete_permanently(&trash_id).await {
                Ok(_) => {
                    purged += 1;
                    debug!("Elemento expirado eliminado: {} ({} {})", trash_id, item.item_type, item.original_id);
                },
                Err(e) => error!("Error eliminando elemento expirado {}: {:?}", trash_id, e),
            }
        }

        info!("Limpieza de papelera completada: {} elementos", purged);
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{MemoryStore, MockAuthProvider};
    use crate::domain::entities::trashed_item::{TrashPayload, TrashedItem};

    #[tokio::test]
    async fn test_only_expired_records_are_purged() {
        let store = MemoryStore::new();
        let service: Arc<dyn TrashUseCase> = Arc::new(store.trash_service(MockAuthProvider::new()));

        let old_event = store.insert_event(1, "Old");
        store.insert_event(2, "Recent");
        let mut old = TrashedItem::new(TrashPayload::Event(old_event), None).to_record().unwrap();
        old.deleted_at = Utc::now() - chrono::Duration::days(45);
        store.insert_raw_record(old);
        service.move_to_trash("events", "2", "admin-1").await.unwrap();

        let purged = TrashCleanupService::cleanup_expired_items(store.clone(), service.clone(), 30)
            .await
            .unwrap();

        assert_eq!(purged, 1);
        let remaining = service.get_trash_items().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].original_id, "2");
    }

    #[test]
    fn test_zero_retention_disables_job() {
        let store = MemoryStore::new();
        let service: Arc<dyn TrashUseCase> = Arc::new(store.trash_service(MockAuthProvider::new()));
        let cleanup = TrashCleanupService::new(service, store, &TrashConfig::default());

        assert!(!cleanup.is_enabled());
    }
}
