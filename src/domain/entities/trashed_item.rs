use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::calendar_event::CalendarEvent;
use crate::domain::entities::department::Department;
use crate::domain::entities::leave_request::LeaveRequest;
use crate::domain::entities::role::Role;
use crate::domain::entities::user::User;

/// Tipo de entidad de origen de un elemento en la papelera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrashedItemType {
    User,
    Department,
    Role,
    Request,
    Event,
}

impl TrashedItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrashedItemType::User => "User",
            TrashedItemType::Department => "Department",
            TrashedItemType::Role => "Role",
            TrashedItemType::Request => "Request",
            TrashedItemType::Event => "Event",
        }
    }
}

impl fmt::Display for TrashedItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrashedItemType {
    type Err = DomainError;

    /// Acepta la etiqueta almacenada ("Department") y el segmento de ruta ("departments")
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "User" | "user" | "users" => Ok(TrashedItemType::User),
            "Department" | "department" | "departments" => Ok(TrashedItemType::Department),
            "Role" | "role" | "roles" => Ok(TrashedItemType::Role),
            "Request" | "request" | "requests" => Ok(TrashedItemType::Request),
            "Event" | "event" | "events" => Ok(TrashedItemType::Event),
            other => Err(DomainError::validation_error(
                "Trash",
                format!("Unrecognized trash item type: {}", other),
            )),
        }
    }
}

/// Copia completa de la fila eliminada, una variante por tipo de origen
#[derive(Debug, Clone, PartialEq)]
pub enum TrashPayload {
    User(User),
    Department(Department),
    Role(Role),
    Request(LeaveRequest),
    Event(CalendarEvent),
}

impl TrashPayload {
    pub fn item_type(&self) -> TrashedItemType {
        match self {
            TrashPayload::User(_) => TrashedItemType::User,
            TrashPayload::Department(_) => TrashedItemType::Department,
            TrashPayload::Role(_) => TrashedItemType::Role,
            TrashPayload::Request(_) => TrashedItemType::Request,
            TrashPayload::Event(_) => TrashedItemType::Event,
        }
    }

    pub fn original_id(&self) -> String {
        match self {
            TrashPayload::User(user) => user.id.clone(),
            TrashPayload::Department(department) => department.id.to_string(),
            TrashPayload::Role(role) => role.id.to_string(),
            TrashPayload::Request(request) => request.id.to_string(),
            TrashPayload::Event(event) => event.id.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<Value> {
        let value = match self {
            TrashPayload::User(user) => serde_json::to_value(user)?,
            TrashPayload::Department(department) => serde_json::to_value(department)?,
            TrashPayload::Role(role) => serde_json::to_value(role)?,
            TrashPayload::Request(request) => serde_json::to_value(request)?,
            TrashPayload::Event(event) => serde_json::to_value(event)?,
        };
        Ok(value)
    }

    /// Reconstruye la variante a partir de la etiqueta y el documento almacenados
    pub fn from_parts(item_type: &str, data: Value) -> Result<Self> {
        let item_type: TrashedItemType = item_type.parse()?;
        let decode_error = |e: serde_json::Error| {
            DomainError::validation_error(
                "Trash",
                format!("Snapshot does not match {} shape: {}", item_type, e),
            )
        };

        let payload = match item_type {
            TrashedItemType::User => TrashPayload::User(serde_json::from_value(data).map_err(decode_error)?),
            TrashedItemType::Department => TrashPayload::Department(serde_json::from_value(data).map_err(decode_error)?),
            TrashedItemType::Role => TrashPayload::Role(serde_json::from_value(data).map_err(decode_error)?),
            TrashedItemType::Request => TrashPayload::Request(serde_json::from_value(data).map_err(decode_error)?),
            TrashedItemType::Event => TrashPayload::Event(serde_json::from_value(data).map_err(decode_error)?),
        };
        Ok(payload)
    }
}

/// Fila de la tabla `trash` tal como se almacena: etiqueta y documento sin interpretar
#[derive(Debug, Clone, PartialEq)]
pub struct TrashRecord {
    pub id: Uuid,
    pub original_id: String,
    pub item_type: String,
    pub item_data: Value,
    pub deleted_at: DateTime<Utc>,
    pub deleted_by: Option<String>,
}

/// Elemento de la papelera con su instantánea tipada
#[derive(Debug, Clone, PartialEq)]
pub struct TrashedItem {
    pub id: Uuid,
    pub payload: TrashPayload,
    pub deleted_at: DateTime<Utc>,
    pub deleted_by: Option<String>,
}

impl TrashedItem {
    pub fn new(payload: TrashPayload, deleted_by: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
            deleted_at: Utc::now(),
            deleted_by,
        }
    }

    pub fn item_type(&self) -> TrashedItemType {
        self.payload.item_type()
    }

    pub fn original_id(&self) -> String {
        self.payload.original_id()
    }

    pub fn to_record(&self) -> Result<TrashRecord> {
        Ok(TrashRecord {
            id: self.id,
            original_id: self.original_id(),
            item_type: self.item_type().as_str().to_string(),
            item_data: self.payload.to_json()?,
            deleted_at: self.deleted_at,
            deleted_by: self.deleted_by.clone(),
        })
    }
}

impl TryFrom<TrashRecord> for TrashedItem {
    type Error = DomainError;

    fn try_from(record: TrashRecord) -> Result<Self> {
        let payload = TrashPayload::from_parts(&record.item_type, record.item_data)?;

        if payload.original_id() != record.original_id {
            return Err(DomainError::validation_error(
                "Trash",
                format!(
                    "Snapshot id {} does not match original id {}",
                    payload.original_id(),
                    record.original_id
                ),
            ).with_id(record.id.to_string()));
        }

        Ok(Self {
            id: record.id,
            payload,
            deleted_at: record.deleted_at,
            deleted_by: record.deleted_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::errors::ErrorKind;
    use serde_json::json;

    fn legacy_department() -> Department {
        Department {
            id: 42,
            name: "Legacy".to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_keeps_tag_and_original_id() {
        let item = TrashedItem::new(TrashPayload::Department(legacy_department()), Some("admin-1".into()));
        let record = item.to_record().unwrap();

        assert_eq!(record.item_type, "Department");
        assert_eq!(record.original_id, "42");
        assert_eq!(record.item_data["name"], "Legacy");

        let decoded = TrashedItem::try_from(record).unwrap();
        assert_eq!(decoded, item);
    }

    #[test]
    fn test_unrecognized_type_names_the_tag() {
        let err = TrashPayload::from_parts("Payroll", json!({"id": 1})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert!(err.message.contains("Payroll"));
    }

    #[test]
    fn test_snapshot_shape_mismatch_is_invalid_input() {
        let err = TrashPayload::from_parts("Role", json!({"id": "not-a-number"})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }

    #[test]
    fn test_mismatched_original_id_rejected() {
        let mut record = TrashedItem::new(TrashPayload::Department(legacy_department()), None)
            .to_record()
            .unwrap();
        record.original_id = "43".to_string();

        assert!(TrashedItem::try_from(record).is_err());
    }

    #[test]
    fn test_item_type_accepts_route_segments() {
        assert_eq!("departments".parse::<TrashedItemType>().unwrap(), TrashedItemType::Department);
        assert_eq!("Event".parse::<TrashedItemType>().unwrap(), TrashedItemType::Event);
        assert!("folders".parse::<TrashedItemType>().is_err());
    }
}
