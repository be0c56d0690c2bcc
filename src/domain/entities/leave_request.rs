use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::errors::{DomainError, Result};

/// Estado de una solicitud de permiso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(DomainError::validation_error("Request", format!("Unknown request status: {}", other))),
        }
    }
}

/// Solicitud de permiso o tiempo libre (tabla `time_off_requests`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub user_id: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub half_day: bool,
    pub reason: Option<String>,
    pub status: RequestStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub user_id: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub half_day: bool,
    pub reason: Option<String>,
}

impl NewLeaveRequest {
    pub fn new(
        user_id: String,
        leave_type: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        half_day: bool,
        reason: Option<String>,
    ) -> Result<Self> {
        if user_id.trim().is_empty() {
            return Err(DomainError::validation_error("Request", "user_id is required"));
        }
        if leave_type.trim().is_empty() {
            return Err(DomainError::validation_error("Request", "leave_type is required"));
        }
        validate_period(start_date, end_date, half_day)?;

        Ok(Self {
            user_id,
            leave_type: leave_type.trim().to_string(),
            start_date,
            end_date,
            half_day,
            reason,
        })
    }
}

/// Un periodo válido termina en o después de su inicio; medio día solo cubre una fecha
pub fn validate_period(start_date: NaiveDate, end_date: NaiveDate, half_day: bool) -> Result<()> {
    if end_date < start_date {
        return Err(DomainError::validation_error("Request", "end_date must not be before start_date"));
    }
    if half_day && end_date != start_date {
        return Err(DomainError::validation_error("Request", "A half-day request must start and end on the same date"));
    }
    Ok(())
}

impl LeaveRequest {
    /// Créditos que consume la solicitud al aprobarse
    pub fn credit_cost(&self) -> f64 {
        if self.half_day {
            0.5
        } else {
            ((self.end_date - self.start_date).num_days() + 1) as f64
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
