use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::trashed_item::{TrashRecord, TrashedItem};
use crate::common::errors::Result;

/// Limpieza dependiente que acompaña a la eliminación de un usuario.
///
/// Cada paso se aplica sobre el id del usuario eliminado y es tolerante a fallos:
/// un paso fallido se revierte por separado y se informa como aviso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// Pone `deleted_by = NULL` en los registros de papelera creados por el usuario
    DetachTrashActor,
    TimeOffRequests,
    OvertimeRequests,
    OfficialBusinessRequests,
    OffsetRequests,
    LeaveCredits,
}

impl CascadeStep {
    pub const USER: [CascadeStep; 6] = [
        CascadeStep::DetachTrashActor,
        CascadeStep::TimeOffRequests,
        CascadeStep::OvertimeRequests,
        CascadeStep::OfficialBusinessRequests,
        CascadeStep::OffsetRequests,
        CascadeStep::LeaveCredits,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CascadeStep::DetachTrashActor => "trash.deleted_by",
            CascadeStep::TimeOffRequests => "time_off_requests",
            CascadeStep::OvertimeRequests => "overtime_requests",
            CascadeStep::OfficialBusinessRequests => "official_business_requests",
            CascadeStep::OffsetRequests => "offset_requests",
            CascadeStep::LeaveCredits => "leave_credits",
        }
    }
}

/// Fallo no fatal durante una operación de papelera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeWarning {
    pub step: String,
    pub message: String,
}

impl CascadeWarning {
    pub fn new<S: Into<String>, M: Into<String>>(step: S, message: M) -> Self {
        Self {
            step: step.into(),
            message: message.into(),
        }
    }
}

/// Resultado de purgar un registro de la papelera
#[derive(Debug, Clone, PartialEq)]
pub struct PurgeResult {
    pub record: TrashRecord,
    /// Si la fila de origen marcada se eliminó definitivamente
    pub origin_purged: bool,
    pub warnings: Vec<CascadeWarning>,
}

#[async_trait]
pub trait TrashRepository: Send + Sync {
    /// Inserta el registro, ejecuta la cascada y marca la fila de origen como eliminada,
    /// todo en una sola transacción. Devuelve los pasos de cascada que fallaron.
    async fn add_to_trash(&self, item: &TrashedItem, cascade: &[CascadeStep]) -> Result<Vec<CascadeWarning>>;

    /// Todos los registros, del más reciente al más antiguo
    async fn get_trash_items(&self) -> Result<Vec<TrashRecord>>;

    async fn get_trash_item(&self, id: &Uuid) -> Result<Option<TrashRecord>>;

    /// Devuelve la instantánea a su tabla de origen y elimina el registro.
    ///
    /// Un usuario restaurado pierde las referencias a departamentos o roles que siguen
    /// en la papelera; cada referencia soltada se devuelve como aviso.
    async fn restore_from_trash(&self, item: &TrashedItem) -> Result<Vec<CascadeWarning>>;

    /// Elimina el registro y purga la fila de origen marcada si ningún otro registro la
    /// referencia. Devuelve `None` si el registro no existía.
    async fn delete_permanently(&self, id: &Uuid) -> Result<Option<PurgeResult>>;

    /// Registros eliminados antes de `cutoff`
    async fn get_expired_items(&self, cutoff: DateTime<Utc>) -> Result<Vec<TrashRecord>>;
}
