use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::application::ports::trash_ports::TrashUseCase;
use crate::application::services::test_support::{MemoryStore, MockAuthProvider};
use crate::application::services::trash_service::TrashService;
use crate::common::errors::ErrorKind;
use crate::domain::entities::trashed_item::{TrashPayload, TrashRecord, TrashedItem};
use crate::domain::repositories::calendar_event_repository::CalendarEventRepository;
use crate::domain::repositories::department_repository::DepartmentRepository;
use crate::domain::repositories::leave_request_repository::LeaveRequestRepository;
use crate::domain::repositories::role_repository::RoleRepository;
use crate::domain::repositories::trash_repository::{CascadeStep, TrashRepository};
use crate::domain::repositories::user_repository::UserRepository;

const ADMIN: &str = "admin-1";

fn setup() -> (Arc<MemoryStore>, Arc<MockAuthProvider>, TrashService) {
    let store = MemoryStore::new();
    let auth = MockAuthProvider::new();
    let service = store.trash_service(auth.clone());
    (store, auth, service)
}

#[tokio::test]
async fn test_legacy_department_round_trip() {
    // Arrange
    let (store, _auth, service) = setup();
    store.insert_department(42, "Legacy");

    // Act
    let outcome = service.delete_department("42", ADMIN).await.unwrap();

    // Assert
    assert!(outcome.primary_deleted);
    assert_eq!(outcome.deleted_id, "42");
    assert!(store.get_department(42).await.unwrap().is_none(), "Department should be hidden once trashed");

    let items = service.get_trash_items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_type, "Department");
    assert_eq!(items[0].data["id"], 42);
    assert_eq!(items[0].data["name"], "Legacy");
    assert_eq!(items[0].deleted_by.as_deref(), Some(ADMIN));

    let restored = service.restore_item(&items[0].trash_id).await.unwrap();
    assert!(restored.success);

    let department = store.get_department(42).await.unwrap().expect("Department 42 should be back");
    assert_eq!(department.name, "Legacy");
    assert!(service.get_trash_items().await.unwrap().is_empty(), "Trash should be empty after restore");
}

#[tokio::test]
async fn test_round_trip_restores_snapshot_for_each_table() {
    let (store, _auth, service) = setup();
    store.insert_user("u-1", None, None);
    let role = store.insert_role(7, "Auditor");
    let request = store.insert_request(11, "u-1", "2026-05-04", "2026-05-08", false);
    let event = store.insert_event(21, "Town hall");

    let role_outcome = service.delete_role("7", ADMIN).await.unwrap();
    let request_outcome = service.delete_request("11", ADMIN).await.unwrap();
    let event_outcome = service.delete_event("21", ADMIN).await.unwrap();
    assert_eq!(store.trash_len(), 3);

    service.restore_item(&role_outcome.trash_id).await.unwrap();
    service.restore_item(&request_outcome.trash_id).await.unwrap();
    service.restore_item(&event_outcome.trash_id).await.unwrap();

    assert_eq!(store.get_role(7).await.unwrap(), Some(role));
    assert_eq!(store.get_request(11).await.unwrap(), Some(request));
    assert_eq!(store.get_event(21).await.unwrap(), Some(event));
    assert_eq!(store.trash_len(), 0);
}

#[tokio::test]
async fn test_user_round_trip_clears_removed_flag() {
    let (store, auth, service) = setup();
    let user = store.insert_user("u-9", Some(1), None);

    let outcome = service.delete_user("u-9", ADMIN).await.unwrap();
    let row = store.user_row("u-9").expect("User row is kept while trashed");
    assert!(row.removed_at.is_some(), "User should be flagged as removed");
    assert!(store.get_user_by_id("u-9").await.unwrap().is_none());

    let items = service.get_trash_items().await.unwrap();
    assert_eq!(items[0].deleted_by, None, "User deletions never record the actor");

    service.restore_item(&outcome.trash_id).await.unwrap();

    let row = store.user_row("u-9").unwrap();
    assert!(row.removed_at.is_none(), "Restore should clear the removed flag");
    assert_eq!(row.value, user);
    assert_eq!(auth.calls(), vec!["suspend:u-9".to_string(), "reinstate:u-9".to_string()]);
}

#[tokio::test]
async fn test_user_cascade_removes_dependents_and_detaches_trash_actor() {
    let (store, _auth, service) = setup();
    store.insert_user("u-1", None, None);
    store.insert_user("u-2", None, None);
    store.insert_request(5, "u-1", "2026-01-05", "2026-01-05", true);
    store.insert_request(6, "u-2", "2026-01-05", "2026-01-06", false);
    store.insert_credit("u-1", 12.0);
    store.insert_event(30, "Offsite");

    // u-1 borró antes un evento
    let event_outcome = service.delete_event("30", "u-1").await.unwrap();

    let outcome = service.delete_user("u-1", ADMIN).await.unwrap();

    assert!(outcome.cascade_warnings.is_empty());
    assert!(store.get_request(5).await.unwrap().is_none());
    assert!(store.get_request(6).await.unwrap().is_some(), "Other users' requests must survive");
    assert!(store.credits.lock().unwrap().get("u-1").is_none());

    let items = service.get_trash_items().await.unwrap();
    assert_eq!(items.len(), 2, "Earlier trash records are kept");
    let event_item = items.iter().find(|i| i.trash_id == event_outcome.trash_id).unwrap();
    assert_eq!(event_item.deleted_by, None);
}

#[tokio::test]
async fn test_failed_cascade_step_is_reported_and_deletion_proceeds() {
    let (store, _auth, service) = setup();
    store.insert_user("u-1", None, None);
    store.insert_credit("u-1", 3.0);
    store.fail_step(CascadeStep::OvertimeRequests);

    let outcome = service.delete_user("u-1", ADMIN).await.unwrap();

    assert!(outcome.primary_deleted);
    assert_eq!(outcome.cascade_warnings.len(), 1);
    assert_eq!(outcome.cascade_warnings[0].step, "overtime_requests");
    assert!(store.credits.lock().unwrap().get("u-1").is_none(), "Later steps still run");
    assert!(store.get_user_by_id("u-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_auth_provider_failure_is_a_warning() {
    let store = MemoryStore::new();
    let auth = MockAuthProvider::failing();
    let service = store.trash_service(auth.clone());
    store.insert_user("u-1", None, None);

    let outcome = service.delete_user("u-1", ADMIN).await.unwrap();

    assert!(outcome.primary_deleted);
    assert!(outcome.cascade_warnings.iter().any(|w| w.step == "auth_provider.suspend"));
    assert!(store.get_user_by_id("u-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found_without_side_effects() {
    let (store, auth, service) = setup();

    let err = service.delete_user("ghost", ADMIN).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = service.delete_department("99", ADMIN).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    assert_eq!(store.trash_len(), 0);
    assert!(auth.calls().is_empty());
}

#[tokio::test]
async fn test_failed_trash_insert_aborts_deletion() {
    let (store, _auth, service) = setup();
    store.insert_event(3, "Retro");
    store.fail_trash_insert.store(true, Ordering::SeqCst);

    let err = service.delete_event("3", ADMIN).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::InternalError);
    assert!(store.get_event(3).await.unwrap().is_some(), "Row must not be deleted");
}

#[tokio::test]
async fn test_department_in_use_conflict_leaves_state_unchanged() {
    // Arrange
    let (store, _auth, service) = setup();
    store.insert_department(4, "Finance");
    store.insert_user("u-1", Some(4), None);

    // Act
    let err = service.delete_department("4", ADMIN).await.unwrap_err();

    // Assert
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(store.department_row(4).unwrap().removed_at.is_none());
    assert_eq!(store.trash_len(), 0);
}

#[tokio::test]
async fn test_role_in_use_conflict_reports_user_count() {
    let (store, _auth, service) = setup();
    store.insert_role(3, "Manager");
    store.insert_user("u-1", None, Some(3));
    store.insert_user("u-2", None, Some(3));
    store.insert_user("u-3", None, Some(3));
    store.insert_user("u-4", None, Some(8));

    let err = service.delete_role("3", ADMIN).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("3 user(s)"), "Unexpected message: {}", err.message);
    assert!(store.get_role(3).await.unwrap().is_some());
    assert_eq!(store.trash_len(), 0);
}

#[tokio::test]
async fn test_trashed_users_do_not_block_role_deletion() {
    let (store, _auth, service) = setup();
    store.insert_role(3, "Manager");
    store.insert_user("u-1", None, Some(3));
    service.delete_user("u-1", ADMIN).await.unwrap();

    let outcome = service.delete_role("3", ADMIN).await;

    assert!(outcome.is_ok());
}

#[tokio::test]
async fn test_restored_user_drops_references_to_trashed_rows() {
    let (store, _auth, service) = setup();
    store.insert_department(4, "Ops");
    store.insert_role(3, "Manager");
    store.insert_department(5, "Sales");
    store.insert_user("u-1", Some(4), Some(3));
    store.insert_user("u-2", Some(5), None);

    let user_outcome = service.delete_user("u-1", ADMIN).await.unwrap();
    service.delete_department("4", ADMIN).await.unwrap();
    service.delete_role("3", ADMIN).await.unwrap();

    let restored = service.restore_item(&user_outcome.trash_id).await.unwrap();

    let steps: Vec<&str> = restored.warnings.iter().map(|w| w.step.as_str()).collect();
    assert_eq!(steps, vec!["users.department_id", "users.role_id"]);
    let user = store.get_user_by_id("u-1").await.unwrap().expect("User is active again");
    assert_eq!(user.department_id, None);
    assert_eq!(user.role_id, None);

    // Una referencia a una fila activa se conserva
    let other = service.delete_user("u-2", ADMIN).await.unwrap();
    let restored = service.restore_item(&other.trash_id).await.unwrap();
    assert!(restored.warnings.is_empty());
    assert_eq!(store.get_user_by_id("u-2").await.unwrap().unwrap().department_id, Some(5));
}

#[tokio::test]
async fn test_unrecognized_type_on_restore_keeps_record() {
    let (store, _auth, service) = setup();
    let trash_id = Uuid::new_v4();
    store.insert_raw_record(TrashRecord {
        id: trash_id,
        original_id: "1".to_string(),
        item_type: "Payroll".to_string(),
        item_data: json!({"id": 1}),
        deleted_at: Utc::now(),
        deleted_by: None,
    });

    let err = service.restore_item(&trash_id.to_string()).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidInput);
    assert!(err.message.contains("Payroll"));
    assert_eq!(store.trash_len(), 1, "Record must survive a failed restore");

    // Sigue visible en el listado con sus datos en bruto
    let items = service.get_trash_items().await.unwrap();
    assert_eq!(items[0].item_type, "Payroll");
}

#[tokio::test]
async fn test_restore_onto_active_row_fails_and_keeps_record() {
    let (store, _auth, service) = setup();
    store.insert_department(5, "Ops");
    let outcome = service.delete_department("5", ADMIN).await.unwrap();

    // Otra fila activa ocupa el mismo id
    store.insert_department(5, "Ops (new)");

    let err = service.restore_item(&outcome.trash_id).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::InternalError);
    assert!(err.message.contains("Error restoring Department 5"));
    assert_eq!(store.trash_len(), 1);
    assert_eq!(store.get_department(5).await.unwrap().unwrap().name, "Ops (new)");
}

#[tokio::test]
async fn test_restore_unknown_or_malformed_id() {
    let (_store, _auth, service) = setup();

    let err = service.restore_item(&Uuid::new_v4().to_string()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = service.restore_item("not-a-uuid").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_trash_list_is_newest_first() {
    let (store, _auth, service) = setup();
    store.insert_event(1, "A");
    store.insert_event(2, "B");
    store.insert_event(3, "C");

    service.delete_event("1", ADMIN).await.unwrap();
    service.delete_event("2", ADMIN).await.unwrap();
    service.delete_event("3", ADMIN).await.unwrap();

    let titles: Vec<String> = service.get_trash_items().await.unwrap()
        .into_iter()
        .map(|item| item.data["title"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(titles, vec!["C", "B", "A"]);
}

#[tokio::test]
async fn test_permanent_delete_twice_is_noop() {
    let (store, _auth, service) = setup();
    store.insert_department(1, "Keep");
    store.insert_department(2, "Drop");
    let keep = service.delete_department("1", ADMIN).await.unwrap();
    let drop = service.delete_department("2", ADMIN).await.unwrap();

    let first = service.delete_permanently(&drop.trash_id).await.unwrap();
    let second = service.delete_permanently(&drop.trash_id).await.unwrap();

    assert!(first.success);
    assert!(second.success);
    assert!(store.department_row(2).is_none(), "Flagged row is purged");
    let items = service.get_trash_items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].trash_id, keep.trash_id, "Unrelated records are untouched");
    assert!(store.department_row(1).is_some());
}

#[tokio::test]
async fn test_purge_keeps_origin_while_another_record_references_it() {
    let (store, _auth, service) = setup();
    store.insert_event(8, "Dup");
    let first = service.delete_event("8", ADMIN).await.unwrap();
    // Segundo registro sobre la misma fila, p. ej. tras restaurar y volver a borrar
    service.restore_item(&first.trash_id).await.unwrap();
    let second = service.delete_event("8", ADMIN).await.unwrap();
    store.insert_raw_record(TrashRecord {
        id: Uuid::new_v4(),
        ..store.get_trash_item(&Uuid::parse_str(&second.trash_id).unwrap()).await.unwrap().unwrap()
    });

    service.delete_permanently(&second.trash_id).await.unwrap();

    assert!(store.events.lock().unwrap().contains_key(&8), "Origin row is still referenced");
}

#[tokio::test]
async fn test_purging_user_deletes_auth_account() {
    let (store, auth, service) = setup();
    store.insert_user("u-5", None, None);
    let outcome = service.delete_user("u-5", ADMIN).await.unwrap();

    service.delete_permanently(&outcome.trash_id).await.unwrap();

    assert!(store.user_row("u-5").is_none());
    assert_eq!(auth.calls(), vec!["suspend:u-5".to_string(), "delete:u-5".to_string()]);
}

#[tokio::test]
async fn test_empty_trash_purges_everything() {
    let (store, _auth, service) = setup();
    store.insert_event(1, "A");
    store.insert_role(2, "B");
    service.delete_event("1", ADMIN).await.unwrap();
    service.delete_role("2", ADMIN).await.unwrap();

    let result = service.empty_trash().await.unwrap();

    assert_eq!(result.purged, 2);
    assert_eq!(store.trash_len(), 0);
    assert!(store.roles.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_move_to_trash_dispatches_on_route_segment() {
    let (store, _auth, service) = setup();
    store.insert_event(4, "Party");

    let outcome = service.move_to_trash("events", "4", ADMIN).await.unwrap();
    assert_eq!(outcome.item_type, "Event");

    let err = service.move_to_trash("folders", "4", ADMIN).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidInput);

    let err = service.move_to_trash("departments", "abc", ADMIN).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_expired_items_use_cutoff() {
    let (store, _auth, _service) = setup();
    store.insert_event(1, "Old");
    let event = store.get_event(1).await.unwrap().unwrap();
    let mut record = TrashedItem::new(TrashPayload::Event(event), None).to_record().unwrap();
    record.deleted_at = Utc::now() - Duration::days(40);
    store.insert_raw_record(record);

    let expired = store.get_expired_items(Utc::now() - Duration::days(30)).await.unwrap();
    let recent = store.get_expired_items(Utc::now() - Duration::days(60)).await.unwrap();

    assert_eq!(expired.len(), 1);
    assert!(recent.is_empty());
}
