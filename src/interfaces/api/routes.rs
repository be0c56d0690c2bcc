use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::common::di::AppState;
use crate::interfaces::api::handlers::calendar_event_handler::CalendarEventHandler;
use crate::interfaces::api::handlers::department_handler::DepartmentHandler;
use crate::interfaces::api::handlers::leave_request_handler::LeaveRequestHandler;
use crate::interfaces::api::handlers::role_handler::RoleHandler;
use crate::interfaces::api::handlers::trash_handler;
use crate::interfaces::api::handlers::user_handler::UserHandler;
use crate::interfaces::middleware::auth::{auth_middleware, require_admin};

/// Creates API routes for the application
///
/// Every route needs a valid bearer token; routes that change data also need the
/// admin role.
pub fn create_api_routes(state: AppState) -> Router<AppState> {
    let read_routes = Router::new()
        .route("/trash", get(trash_handler::get_trash_items))
        .route("/users", get(UserHandler::list_users))
        .route("/users/{id}", get(UserHandler::get_user))
        .route("/departments", get(DepartmentHandler::list_departments))
        .route("/departments/{id}", get(DepartmentHandler::get_department))
        .route("/roles", get(RoleHandler::list_roles))
        .route("/roles/{id}", get(RoleHandler::get_role))
        .route("/requests", get(LeaveRequestHandler::list_requests))
        .route("/requests/{id}", get(LeaveRequestHandler::get_request))
        .route("/events", get(CalendarEventHandler::list_events))
        .route("/events/{id}", get(CalendarEventHandler::get_event))
        .route("/credits/{user_id}", get(LeaveRequestHandler::get_credit));

    let trash_routes = Router::new()
        .route("/trash", delete(trash_handler::delete_permanently_by_query))
        .route("/trash/restore", post(trash_handler::restore_from_trash))
        .route("/trash/all", delete(trash_handler::empty_trash))
        .route("/trash/{trash_id}", delete(trash_handler::delete_permanently));

    let write_routes = Router::new()
        .route("/users", post(UserHandler::create_user))
        .route("/users/{id}", put(UserHandler::update_user).delete(UserHandler::delete_user))
        .route("/departments", post(DepartmentHandler::create_department))
        .route("/departments/{id}", put(DepartmentHandler::update_department).delete(DepartmentHandler::delete_department))
        .route("/roles", post(RoleHandler::create_role))
        .route("/roles/{id}", put(RoleHandler::update_role).delete(RoleHandler::delete_role))
        .route("/requests", post(LeaveRequestHandler::create_request))
        .route("/requests/{id}", put(LeaveRequestHandler::update_request).delete(LeaveRequestHandler::delete_request))
        .route("/requests/{id}/approve", post(LeaveRequestHandler::approve_request))
        .route("/requests/{id}/reject", post(LeaveRequestHandler::reject_request))
        .route("/events", post(CalendarEventHandler::create_event))
        .route("/events/{id}", put(CalendarEventHandler::update_event).delete(CalendarEventHandler::delete_event))
        .route("/credits/{user_id}", put(LeaveRequestHandler::set_balance))
        .merge(trash_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    read_routes
        .merge(write_routes)
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
