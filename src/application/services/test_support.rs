//! Almacén en memoria con la misma semántica de borrado lógico que las tablas reales.
//! Lo usan los tests de servicios y de rutas.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::application::ports::auth_ports::AuthProviderPort;
use crate::application::services::trash_service::{EntityRepositories, TrashService};
use crate::common::errors::{DomainError, Result};
use crate::domain::entities::calendar_event::{CalendarEvent, NewCalendarEvent};
use crate::domain::entities::department::{Department, NewDepartment};
use crate::domain::entities::leave_credit::LeaveCredit;
use crate::domain::entities::leave_request::{LeaveRequest, NewLeaveRequest, RequestStatus};
use crate::domain::entities::role::{NewRole, Role};
use crate::domain::entities::trashed_item::{TrashPayload, TrashRecord, TrashedItem, TrashedItemType};
use crate::domain::entities::user::{NewUser, User};
use crate::domain::repositories::calendar_event_repository::CalendarEventRepository;
use crate::domain::repositories::department_repository::DepartmentRepository;
use crate::domain::repositories::leave_credit_repository::LeaveCreditRepository;
use crate::domain::repositories::leave_request_repository::LeaveRequestRepository;
use crate::domain::repositories::role_repository::RoleRepository;
use crate::domain::repositories::trash_repository::{CascadeStep, CascadeWarning, PurgeResult, TrashRepository};
use crate::domain::repositories::user_repository::UserRepository;

/// Fila de una tabla de origen con su marca de borrado
#[derive(Debug, Clone)]
pub struct Row<T> {
    pub value: T,
    pub removed_at: Option<DateTime<Utc>>,
}

impl<T> Row<T> {
    fn active(value: T) -> Self {
        Self { value, removed_at: None }
    }

    fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<HashMap<String, Row<User>>>,
    pub departments: Mutex<HashMap<i64, Row<Department>>>,
    pub roles: Mutex<HashMap<i64, Row<Role>>>,
    pub requests: Mutex<HashMap<i64, Row<LeaveRequest>>>,
    pub events: Mutex<HashMap<i64, Row<CalendarEvent>>>,
    pub credits: Mutex<HashMap<String, LeaveCredit>>,
    /// Registros en orden de inserción
    pub trash: Mutex<Vec<TrashRecord>>,
    pub failing_steps: Mutex<Vec<CascadeStep>>,
    pub fail_trash_insert: AtomicBool,
    pub fail_trash_list: AtomicBool,
    sequence: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> i64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn fail_step(&self, step: CascadeStep) {
        self.failing_steps.lock().unwrap().push(step);
    }

    pub fn entities(self: &Arc<Self>) -> EntityRepositories {
        EntityRepositories {
            users: self.clone(),
            departments: self.clone(),
            roles: self.clone(),
            requests: self.clone(),
            events: self.clone(),
        }
    }

    pub fn trash_service(self: &Arc<Self>, auth_provider: Arc<MockAuthProvider>) -> TrashService {
        TrashService::new(self.clone(), self.entities(), auth_provider)
    }

    pub fn insert_department(&self, id: i64, name: &str) -> Department {
        let department = Department {
            id,
            name: name.to_string(),
            description: None,
            created_at: Utc::now(),
        };
        self.departments.lock().unwrap().insert(id, Row::active(department.clone()));
        department
    }

    pub fn insert_role(&self, id: i64, name: &str) -> Role {
        let role = Role {
            id,
            name: name.to_string(),
            description: Some(format!("{} role", name)),
            permissions: vec!["users.read".to_string()],
            created_at: Utc::now(),
        };
        self.roles.lock().unwrap().insert(id, Row::active(role.clone()));
        role
    }

    pub fn insert_user(&self, id: &str, department_id: Option<i64>, role_id: Option<i64>) -> User {
        let user = User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            position: Some("Analyst".to_string()),
            department_id,
            role_id,
            hired_on: NaiveDate::from_ymd_opt(2024, 1, 15),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(user.id.clone(), Row::active(user.clone()));
        user
    }

    pub fn insert_request(&self, id: i64, user_id: &str, start: &str, end: &str, half_day: bool) -> LeaveRequest {
        let request = LeaveRequest {
            id,
            user_id: user_id.to_string(),
            leave_type: "vacation".to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            half_day,
            reason: Some("family trip".to_string()),
            status: RequestStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Utc::now(),
        };
        self.requests.lock().unwrap().insert(id, Row::active(request.clone()));
        request
    }

    pub fn insert_event(&self, id: i64, title: &str) -> CalendarEvent {
        let event = CalendarEvent {
            id,
            title: title.to_string(),
            description: None,
            starts_at: Utc::now(),
            ends_at: None,
            all_day: true,
            created_by: None,
            created_at: Utc::now(),
        };
        self.events.lock().unwrap().insert(id, Row::active(event.clone()));
        event
    }

    pub fn insert_credit(&self, user_id: &str, balance: f64) {
        self.credits.lock().unwrap().insert(user_id.to_string(), LeaveCredit {
            user_id: user_id.to_string(),
            balance,
            updated_at: Utc::now(),
        });
    }

    /// Inserta un registro arbitrario, p. ej. con una etiqueta manipulada
    pub fn insert_raw_record(&self, record: TrashRecord) {
        self.trash.lock().unwrap().push(record);
    }

    pub fn user_row(&self, id: &str) -> Option<Row<User>> {
        self.users.lock().unwrap().get(id).cloned()
    }

    pub fn department_row(&self, id: i64) -> Option<Row<Department>> {
        self.departments.lock().unwrap().get(&id).cloned()
    }

    pub fn trash_len(&self) -> usize {
        self.trash.lock().unwrap().len()
    }

    fn apply_step(&self, step: CascadeStep, user_id: &str) -> std::result::Result<(), String> {
        if self.failing_steps.lock().unwrap().contains(&step) {
            return Err(format!("simulated failure in {}", step.name()));
        }

        match step {
            CascadeStep::DetachTrashActor => {
                for record in self.trash.lock().unwrap().iter_mut() {
                    if record.deleted_by.as_deref() == Some(user_id) {
                        record.deleted_by = None;
                    }
                }
            },
            CascadeStep::TimeOffRequests => {
                self.requests.lock().unwrap().retain(|_, row| row.value.user_id != user_id);
            },
            CascadeStep::LeaveCredits => {
                self.credits.lock().unwrap().remove(user_id);
            },
            // Sin tablas en memoria para estas solicitudes
            CascadeStep::OvertimeRequests
            | CascadeStep::OfficialBusinessRequests
            | CascadeStep::OffsetRequests => {},
        }
        Ok(())
    }

    fn flag_origin(&self, payload: &TrashPayload, removed_at: Option<DateTime<Utc>>) -> bool {
        fn set<K: std::hash::Hash + Eq, T>(map: &mut HashMap<K, Row<T>>, key: &K, removed_at: Option<DateTime<Utc>>) -> bool {
            match map.get_mut(key) {
                Some(row) => {
                    row.removed_at = removed_at;
                    true
                },
                None => false,
            }
        }

        match payload {
            TrashPayload::User(user) => set(&mut *self.users.lock().unwrap(), &user.id, removed_at),
            TrashPayload::Department(d) => set(&mut *self.departments.lock().unwrap(), &d.id, removed_at),
            TrashPayload::Role(r) => set(&mut *self.roles.lock().unwrap(), &r.id, removed_at),
            TrashPayload::Request(r) => set(&mut *self.requests.lock().unwrap(), &r.id, removed_at),
            TrashPayload::Event(e) => set(&mut *self.events.lock().unwrap(), &e.id, removed_at),
        }
    }

    fn purge_origin(&self, item_type: &str, original_id: &str) -> bool {
        fn purge<K: std::hash::Hash + Eq, T>(map: &mut HashMap<K, Row<T>>, key: &K) -> bool {
            let flagged = map.get(key).map(|row| !row.is_active()).unwrap_or(false);
            if flagged {
                map.remove(key);
            }
            flagged
        }

        let numeric = original_id.parse::<i64>().unwrap_or(-1);
        match item_type.parse::<TrashedItemType>() {
            Ok(TrashedItemType::User) => purge(&mut *self.users.lock().unwrap(), &original_id.to_string()),
            Ok(TrashedItemType::Department) => purge(&mut *self.departments.lock().unwrap(), &numeric),
            Ok(TrashedItemType::Role) => purge(&mut *self.roles.lock().unwrap(), &numeric),
            Ok(TrashedItemType::Request) => purge(&mut *self.requests.lock().unwrap(), &numeric),
            Ok(TrashedItemType::Event) => purge(&mut *self.events.lock().unwrap(), &numeric),
            Err(_) => false,
        }
    }
}

fn active_value<K: std::hash::Hash + Eq, T: Clone>(map: &HashMap<K, Row<T>>, key: &K) -> Option<T> {
    map.get(key).filter(|row| row.is_active()).map(|row| row.value.clone())
}

fn replace_active<K: std::hash::Hash + Eq, T: Clone>(
    map: &mut HashMap<K, Row<T>>,
    key: &K,
    value: &T,
    entity: &'static str,
    id: String,
) -> Result<T> {
    match map.get_mut(key) {
        Some(row) if row.is_active() => {
            row.value = value.clone();
            Ok(value.clone())
        },
        _ => Err(DomainError::not_found(entity, id)),
    }
}

/// Restaura la fila: reinserta si falta, reescribe si está marcada, falla si está activa
fn upsert_flagged<K: std::hash::Hash + Eq, T: Clone>(
    map: &mut HashMap<K, Row<T>>,
    key: K,
    value: &T,
    entity: &'static str,
) -> Result<()> {
    match map.get_mut(&key) {
        Some(row) if row.is_active() => Err(DomainError::already_exists(entity, "active row with the same id")),
        Some(row) => {
            row.value = value.clone();
            row.removed_at = None;
            Ok(())
        },
        None => {
            map.insert(key, Row::active(value.clone()));
            Ok(())
        },
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.id) {
            return Err(DomainError::already_exists("User", user.id));
        }
        let created = User {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            position: user.position,
            department_id: user.department_id,
            role_id: user.role_id,
            hired_on: user.hired_on,
            created_at: Utc::now(),
        };
        users.insert(created.id.clone(), Row::active(created.clone()));
        Ok(created)
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(active_value(&*self.users.lock().unwrap(), &id.to_string()))
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        replace_active(&mut *self.users.lock().unwrap(), &user.id, user, "User", user.id.clone())
    }

    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let users = self.users.lock().unwrap();
        let mut active: Vec<User> = users.values().filter(|r| r.is_active()).map(|r| r.value.clone()).collect();
        active.sort_by(|a, b| a.last_name.cmp(&b.last_name).then(a.id.cmp(&b.id)));
        Ok(active.into_iter().skip(offset as usize).take(limit as usize).collect())
    }

    async fn count_users_in_department(&self, department_id: i64) -> Result<i64> {
        let users = self.users.lock().unwrap();
        Ok(users.values()
            .filter(|r| r.is_active() && r.value.department_id == Some(department_id))
            .count() as i64)
    }

    async fn count_users_with_role(&self, role_id: i64) -> Result<i64> {
        let users = self.users.lock().unwrap();
        Ok(users.values()
            .filter(|r| r.is_active() && r.value.role_id == Some(role_id))
            .count() as i64)
    }
}

#[async_trait]
impl DepartmentRepository for MemoryStore {
    async fn create_department(&self, department: NewDepartment) -> Result<Department> {
        let created = Department {
            id: self.next_id(),
            name: department.name,
            description: department.description,
            created_at: Utc::now(),
        };
        self.departments.lock().unwrap().insert(created.id, Row::active(created.clone()));
        Ok(created)
    }

    async fn get_department(&self, id: i64) -> Result<Option<Department>> {
        Ok(active_value(&*self.departments.lock().unwrap(), &id))
    }

    async fn update_department(&self, department: &Department) -> Result<Department> {
        replace_active(&mut *self.departments.lock().unwrap(), &department.id, department, "Department", department.id.to_string())
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        let mut list: Vec<Department> = self.departments.lock().unwrap()
            .values().filter(|r| r.is_active()).map(|r| r.value.clone()).collect();
        list.sort_by_key(|d| d.id);
        Ok(list)
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn create_role(&self, role: NewRole) -> Result<Role> {
        let created = Role {
            id: self.next_id(),
            name: role.name,
            description: role.description,
            permissions: role.permissions,
            created_at: Utc::now(),
        };
        self.roles.lock().unwrap().insert(created.id, Row::active(created.clone()));
        Ok(created)
    }

    async fn get_role(&self, id: i64) -> Result<Option<Role>> {
        Ok(active_value(&*self.roles.lock().unwrap(), &id))
    }

    async fn update_role(&self, role: &Role) -> Result<Role> {
        replace_active(&mut *self.roles.lock().unwrap(), &role.id, role, "Role", role.id.to_string())
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        let mut list: Vec<Role> = self.roles.lock().unwrap()
            .values().filter(|r| r.is_active()).map(|r| r.value.clone()).collect();
        list.sort_by_key(|r| r.id);
        Ok(list)
    }
}

#[async_trait]
impl LeaveRequestRepository for MemoryStore {
    async fn create_request(&self, request: NewLeaveRequest) -> Result<LeaveRequest> {
        let created = LeaveRequest {
            id: self.next_id(),
            user_id: request.user_id,
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            half_day: request.half_day,
            reason: request.reason,
            status: RequestStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            created_at: Utc::now(),
        };
        self.requests.lock().unwrap().insert(created.id, Row::active(created.clone()));
        Ok(created)
    }

    async fn get_request(&self, id: i64) -> Result<Option<LeaveRequest>> {
        Ok(active_value(&*self.requests.lock().unwrap(), &id))
    }

    async fn update_request(&self, request: &LeaveRequest) -> Result<LeaveRequest> {
        replace_active(&mut *self.requests.lock().unwrap(), &request.id, request, "Request", request.id.to_string())
    }

    async fn list_requests(&self, user_id: Option<&str>) -> Result<Vec<LeaveRequest>> {
        let mut list: Vec<LeaveRequest> = self.requests.lock().unwrap()
            .values()
            .filter(|r| r.is_active())
            .filter(|r| user_id.map(|u| r.value.user_id == u).unwrap_or(true))
            .map(|r| r.value.clone())
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(list)
    }

    async fn approve_request(&self, id: i64, reviewer: &str, cost: f64) -> Result<LeaveRequest> {
        let mut requests = self.requests.lock().unwrap();
        let row = requests.get_mut(&id)
            .filter(|r| r.is_active())
            .ok_or_else(|| DomainError::not_found("Request", id.to_string()))?;
        if !row.value.is_pending() {
            return Err(DomainError::conflict("Request", format!("Request {} is already {}", id, row.value.status)));
        }

        let mut credits = self.credits.lock().unwrap();
        let balance = credits.get(&row.value.user_id).map(|c| c.balance).unwrap_or(0.0);
        if balance - cost < 0.0 {
            return Err(DomainError::conflict(
                "LeaveCredit",
                format!("Insufficient leave credits: balance {} is less than {}", balance, cost),
            ));
        }
        credits.insert(row.value.user_id.clone(), LeaveCredit {
            user_id: row.value.user_id.clone(),
            balance: balance - cost,
            updated_at: Utc::now(),
        });

        row.value.status = RequestStatus::Approved;
        row.value.reviewed_by = Some(reviewer.to_string());
        row.value.reviewed_at = Some(Utc::now());
        Ok(row.value.clone())
    }

    async fn reject_request(&self, id: i64, reviewer: &str) -> Result<LeaveRequest> {
        let mut requests = self.requests.lock().unwrap();
        let row = requests.get_mut(&id)
            .filter(|r| r.is_active())
            .ok_or_else(|| DomainError::not_found("Request", id.to_string()))?;
        if !row.value.is_pending() {
            return Err(DomainError::conflict("Request", format!("Request {} is already {}", id, row.value.status)));
        }

        row.value.status = RequestStatus::Rejected;
        row.value.reviewed_by = Some(reviewer.to_string());
        row.value.reviewed_at = Some(Utc::now());
        Ok(row.value.clone())
    }
}

#[async_trait]
impl CalendarEventRepository for MemoryStore {
    async fn create_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent> {
        let created = CalendarEvent {
            id: self.next_id(),
            title: event.title,
            description: event.description,
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            all_day: event.all_day,
            created_by: event.created_by,
            created_at: Utc::now(),
        };
        self.events.lock().unwrap().insert(created.id, Row::active(created.clone()));
        Ok(created)
    }

    async fn get_event(&self, id: i64) -> Result<Option<CalendarEvent>> {
        Ok(active_value(&*self.events.lock().unwrap(), &id))
    }

    async fn update_event(&self, event: &CalendarEvent) -> Result<CalendarEvent> {
        replace_active(&mut *self.events.lock().unwrap(), &event.id, event, "Event", event.id.to_string())
    }

    async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        let mut list: Vec<CalendarEvent> = self.events.lock().unwrap()
            .values().filter(|r| r.is_active()).map(|r| r.value.clone()).collect();
        list.sort_by_key(|e| e.starts_at);
        Ok(list)
    }
}

#[async_trait]
impl LeaveCreditRepository for MemoryStore {
    async fn get_credit(&self, user_id: &str) -> Result<Option<LeaveCredit>> {
        Ok(self.credits.lock().unwrap().get(user_id).cloned())
    }

    async fn set_balance(&self, user_id: &str, balance: f64) -> Result<LeaveCredit> {
        let credit = LeaveCredit {
            user_id: user_id.to_string(),
            balance,
            updated_at: Utc::now(),
        };
        self.credits.lock().unwrap().insert(user_id.to_string(), credit.clone());
        Ok(credit)
    }
}

#[async_trait]
impl TrashRepository for MemoryStore {
    async fn add_to_trash(&self, item: &TrashedItem, cascade: &[CascadeStep]) -> Result<Vec<CascadeWarning>> {
        if self.fail_trash_insert.load(Ordering::SeqCst) {
            return Err(DomainError::internal_error("Trash", "simulated insert failure"));
        }
        let record = item.to_record()?;

        let original_id = item.original_id();
        let mut warnings = Vec::new();
        for step in cascade {
            if let Err(message) = self.apply_step(*step, &original_id) {
                warnings.push(CascadeWarning::new(step.name(), message));
            }
        }

        if !self.flag_origin(&item.payload, Some(item.deleted_at)) {
            return Err(DomainError::not_found(item.item_type().as_str(), original_id));
        }
        self.trash.lock().unwrap().push(record);
        Ok(warnings)
    }

    async fn get_trash_items(&self) -> Result<Vec<TrashRecord>> {
        if self.fail_trash_list.load(Ordering::SeqCst) {
            return Err(DomainError::internal_error("Trash", "simulated listing failure"));
        }
        let mut records: Vec<TrashRecord> = self.trash.lock().unwrap().iter().rev().cloned().collect();
        records.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(records)
    }

    async fn get_trash_item(&self, id: &Uuid) -> Result<Option<TrashRecord>> {
        Ok(self.trash.lock().unwrap().iter().find(|r| r.id == *id).cloned())
    }

    async fn restore_from_trash(&self, item: &TrashedItem) -> Result<Vec<CascadeWarning>> {
        let mut warnings = Vec::new();
        match &item.payload {
            TrashPayload::User(user) => {
                let mut users = self.users.lock().unwrap();
                let row = match users.get_mut(&user.id) {
                    Some(row) if !row.is_active() => row,
                    _ => return Err(DomainError::internal_error("User", format!("User {} is not marked as removed", user.id))),
                };

                let trashed_department = row.value.department_id
                    .filter(|id| self.departments.lock().unwrap().get(id).is_some_and(|d| !d.is_active()));
                if let Some(id) = trashed_department {
                    row.value.department_id = None;
                    warnings.push(CascadeWarning::new("users.department_id", format!("Department {} is in the trash; reference cleared", id)));
                }
                let trashed_role = row.value.role_id
                    .filter(|id| self.roles.lock().unwrap().get(id).is_some_and(|r| !r.is_active()));
                if let Some(id) = trashed_role {
                    row.value.role_id = None;
                    warnings.push(CascadeWarning::new("users.role_id", format!("Role {} is in the trash; reference cleared", id)));
                }
                row.removed_at = None;
            },
            TrashPayload::Department(d) => upsert_flagged(&mut *self.departments.lock().unwrap(), d.id, d, "Department")?,
            TrashPayload::Role(r) => upsert_flagged(&mut *self.roles.lock().unwrap(), r.id, r, "Role")?,
            TrashPayload::Request(r) => upsert_flagged(&mut *self.requests.lock().unwrap(), r.id, r, "Request")?,
            TrashPayload::Event(e) => upsert_flagged(&mut *self.events.lock().unwrap(), e.id, e, "Event")?,
        }

        self.trash.lock().unwrap().retain(|r| r.id != item.id);
        Ok(warnings)
    }

    async fn delete_permanently(&self, id: &Uuid) -> Result<Option<PurgeResult>> {
        let record = {
            let mut trash = self.trash.lock().unwrap();
            match trash.iter().position(|r| r.id == *id) {
                Some(index) => trash.remove(index),
                None => return Ok(None),
            }
        };

        let still_referenced = self.trash.lock().unwrap().iter()
            .any(|r| r.item_type == record.item_type && r.original_id == record.original_id);
        let origin_purged = !still_referenced && self.purge_origin(&record.item_type, &record.original_id);

        Ok(Some(PurgeResult {
            record,
            origin_purged,
            warnings: Vec::new(),
        }))
    }

    async fn get_expired_items(&self, cutoff: DateTime<Utc>) -> Result<Vec<TrashRecord>> {
        Ok(self.trash.lock().unwrap().iter().filter(|r| r.deleted_at < cutoff).cloned().collect())
    }
}

/// Proveedor de autenticación que anota cada llamada
#[derive(Default)]
pub struct MockAuthProvider {
    pub calls: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl MockAuthProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let provider = Self::default();
        provider.fail.store(true, Ordering::SeqCst);
        Arc::new(provider)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, action: &str, user_id: &str) -> std::result::Result<(), DomainError> {
        self.calls.lock().unwrap().push(format!("{}:{}", action, user_id));
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal_error("AuthProvider", "auth provider unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProviderPort for MockAuthProvider {
    async fn suspend_account(&self, user_id: &str) -> std::result::Result<(), DomainError> {
        self.record("suspend", user_id)
    }

    async fn reinstate_account(&self, user_id: &str) -> std::result::Result<(), DomainError> {
        self.record("reinstate", user_id)
    }

    async fn delete_account(&self, user_id: &str) -> std::result::Result<(), DomainError> {
        self.record("delete", user_id)
    }
}
