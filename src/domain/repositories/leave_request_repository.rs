use async_trait::async_trait;

use crate::common::errors::Result;
use crate::domain::entities::leave_request::{LeaveRequest, NewLeaveRequest};

#[async_trait]
pub trait LeaveRequestRepository: Send + Sync + 'static {
    async fn create_request(&self, request: NewLeaveRequest) -> Result<LeaveRequest>;

    async fn get_request(&self, id: i64) -> Result<Option<LeaveRequest>>;

    async fn update_request(&self, request: &LeaveRequest) -> Result<LeaveRequest>;

    /// Lista solicitudes, opcionalmente solo las de un usuario
    async fn list_requests(&self, user_id: Option<&str>) -> Result<Vec<LeaveRequest>>;

    /// Aprueba una solicitud pendiente descontando `cost` del saldo del solicitante.
    /// Falla con `Conflict` si la solicitud ya no está pendiente o el saldo no alcanza.
    async fn approve_request(&self, id: i64, reviewer: &str, cost: f64) -> Result<LeaveRequest>;

    /// Rechaza una solicitud pendiente sin tocar el saldo
    async fn reject_request(&self, id: i64, reviewer: &str) -> Result<LeaveRequest>;
}
