use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Saldo de días de permiso disponibles para un usuario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveCredit {
    pub user_id: String,
    pub balance: f64,
    pub updated_at: DateTime<Utc>,
}

impl LeaveCredit {
    pub fn can_cover(&self, cost: f64) -> bool {
        self.balance - cost >= 0.0
    }
}
