use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::application::dtos::leave_request_dto::{CreateLeaveRequestDto, ListRequestsQuery, UpdateLeaveRequestDto};
use crate::common::errors::{DomainError, Result};
use crate::domain::entities::leave_credit::LeaveCredit;
use crate::domain::entities::leave_request::{validate_period, LeaveRequest, NewLeaveRequest};
use crate::domain::repositories::leave_credit_repository::LeaveCreditRepository;
use crate::domain::repositories::leave_request_repository::LeaveRequestRepository;
use crate::domain::repositories::user_repository::UserRepository;

/**
 * Solicitudes de permiso, su aprobación y el saldo de créditos de cada usuario.
 *
 * Aprobar una solicitud descuenta su coste del saldo del solicitante: medio día cuesta
 * 0.5 y el resto cuesta los días naturales del periodo, ambos extremos incluidos.
 * Un usuario sin fila de créditos tiene saldo 0.
 */
pub struct LeaveRequestService {
    request_repository: Arc<dyn LeaveRequestRepository>,
    credit_repository: Arc<dyn LeaveCreditRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl LeaveRequestService {
    pub fn new(
        request_repository: Arc<dyn LeaveRequestRepository>,
        credit_repository: Arc<dyn LeaveCreditRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            request_repository,
            credit_repository,
            user_repository,
        }
    }

    async fn ensure_user(&self, user_id: &str) -> Result<()> {
        match self.user_repository.get_user_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::validation_error("Request", format!("User {} does not exist", user_id))),
        }
    }

    #[instrument(skip(self, dto))]
    pub async fn create_request(&self, dto: CreateLeaveRequestDto) -> Result<LeaveRequest> {
        let new_request = NewLeaveRequest::new(
            dto.user_id,
            dto.leave_type,
            dto.start_date,
            dto.end_date,
            dto.half_day,
            dto.reason,
        )?;
        self.ensure_user(&new_request.user_id).await?;

        let request = self.request_repository.create_request(new_request).await?;
        debug!("Solicitud creada: {} para {}", request.id, request.user_id);
        Ok(request)
    }

    pub async fn get_request(&self, id: i64) -> Result<LeaveRequest> {
        self.request_repository.get_request(id).await?
            .ok_or_else(|| DomainError::not_found("Request", id.to_string()))
    }

    /// Solo las solicitudes pendientes se pueden editar
    #[instrument(skip(self, dto))]
    pub async fn update_request(&self, id: i64, dto: UpdateLeaveRequestDto) -> Result<LeaveRequest> {
        let mut request = self.get_request(id).await?;
        if !request.is_pending() {
            return Err(DomainError::conflict(
                "Request",
                format!("Request {} is already {}", id, request.status),
            ).with_id(id.to_string()));
        }

        if let Some(leave_type) = dto.leave_type {
            let leave_type = leave_type.trim().to_string();
            if leave_type.is_empty() {
                return Err(DomainError::validation_error("Request", "leave_type is required"));
            }
            request.leave_type = leave_type;
        }
        if let Some(start_date) = dto.start_date {
            request.start_date = start_date;
        }
        if let Some(end_date) = dto.end_date {
            request.end_date = end_date;
        }
        if let Some(half_day) = dto.half_day {
            request.half_day = half_day;
        }
        if dto.reason.is_some() {
            request.reason = dto.reason;
        }
        validate_period(request.start_date, request.end_date, request.half_day)?;

        self.request_repository.update_request(&request).await
    }

    pub async fn list_requests(&self, query: ListRequestsQuery) -> Result<Vec<LeaveRequest>> {
        self.request_repository.list_requests(query.user_id.as_deref()).await
    }

    #[instrument(skip(self))]
    pub async fn approve_request(&self, id: i64, reviewer: &str) -> Result<LeaveRequest> {
        let request = self.get_request(id).await?;
        if !request.is_pending() {
            return Err(DomainError::conflict(
                "Request",
                format!("Request {} is already {}", id, request.status),
            ).with_id(id.to_string()));
        }

        let cost = request.credit_cost();
        let approved = self.request_repository.approve_request(id, reviewer, cost).await?;

        info!("Solicitud {} aprobada por {}: {} día(s) descontados a {}", id, reviewer, cost, approved.user_id);
        Ok(approved)
    }

    #[instrument(skip(self))]
    pub async fn reject_request(&self, id: i64, reviewer: &str) -> Result<LeaveRequest> {
        let rejected = self.request_repository.reject_request(id, reviewer).await?;

        info!("Solicitud {} rechazada por {}", id, reviewer);
        Ok(rejected)
    }

    pub async fn get_credit(&self, user_id: &str) -> Result<LeaveCredit> {
        self.ensure_user(user_id).await?;

        let credit = self.credit_repository.get_credit(user_id).await?
            .unwrap_or_else(|| LeaveCredit {
                user_id: user_id.to_string(),
                balance: 0.0,
                updated_at: Utc::now(),
            });
        Ok(credit)
    }

    #[instrument(skip(self))]
    pub async fn set_balance(&self, user_id: &str, balance: f64) -> Result<LeaveCredit> {
        if !balance.is_finite() || balance < 0.0 {
            return Err(DomainError::validation_error(
                "LeaveCredit",
                format!("Balance must be a non-negative number, got {}", balance),
            ));
        }
        self.ensure_user(user_id).await?;

        self.credit_repository.set_balance(user_id, balance).await
    }
}
