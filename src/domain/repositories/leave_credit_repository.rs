use async_trait::async_trait;

use crate::common::errors::Result;
use crate::domain::entities::leave_credit::LeaveCredit;

#[async_trait]
pub trait LeaveCreditRepository: Send + Sync + 'static {
    async fn get_credit(&self, user_id: &str) -> Result<Option<LeaveCredit>>;

    /// Fija el saldo, creando la fila si no existe
    async fn set_balance(&self, user_id: &str, balance: f64) -> Result<LeaveCredit>;
}
