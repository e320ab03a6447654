// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use pointage_api::{ApiError, AuthenticatedActor, handlers};
use pointage_api::request_response::{
    AuditTrailResponse, CreateEntryRequest, CreateListRequest, CreateModificationRequestRequest,
    CreateUserRequest, DeactivateListItemRequest, EntryInfo, EntryListResponse, EntryResponse,
    ListInfo, ListNamesResponse, ListResponse, MergeListItemsRequest, MergeListItemsResponse,
    OptionsResponse, RequestListResponse, RequestResponse, ReviewModificationRequestRequest,
    ReviewResponse, SetEntryStatusRequest, SetUserStatusRequest, UpdateEntryRequest,
    UpdateUserRequest, UserInfo, UserListResponse, UserResponse,
};
use pointage_audit::Cause;
use pointage_domain::{RequestStatus, UserRole};
use pointage_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Pointage Server - HTTP server for the pointage management backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for records and audit events.
    persistence: Arc<Mutex<Persistence>>,
}

/// Envelope for mutating requests.
///
/// Every write carries the acting user and the cause that triggered it,
/// alongside the operation payload flattened into the same JSON object.
#[derive(Debug, Deserialize)]
struct AuthenticatedRequest<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The operation payload.
    #[serde(flatten)]
    body: T,
}

impl<T> AuthenticatedRequest<T> {
    /// Builds the authenticated actor and cause from the envelope fields.
    fn credentials(&self) -> Result<(AuthenticatedActor, Cause), HttpError> {
        let role: UserRole = parse_role(&self.actor_role)?;
        let actor: AuthenticatedActor = AuthenticatedActor::new(self.actor_id.clone(), role);
        let cause: Cause = Cause::new(self.cause_id.clone(), self.cause_description.clone());
        Ok((actor, cause))
    }
}

/// Body payload identifying an entry by ID.
#[derive(Debug, Deserialize)]
struct EntryIdRequest {
    /// The entry identifier.
    entry_id: i64,
}

/// Body payload naming a conditional list.
#[derive(Debug, Deserialize)]
struct ActivateListRequest {
    /// The list name.
    name: String,
}

/// Query parameters carrying the acting user on read endpoints.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    /// The actor ID performing this read.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

impl ActorQuery {
    /// Builds the authenticated actor from the query parameters.
    fn actor(&self) -> Result<AuthenticatedActor, HttpError> {
        let role: UserRole = parse_role(&self.actor_role)?;
        Ok(AuthenticatedActor::new(self.actor_id.clone(), role))
    }
}

/// Query parameters for reads scoped to one user's records.
#[derive(Debug, Deserialize)]
struct UserScopedQuery {
    /// The user whose records are requested.
    user_id: String,
    /// The actor ID performing this read.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// Query parameters for the organization-wide request listing.
#[derive(Debug, Deserialize)]
struct RequestOverviewQuery {
    /// Optional status filter.
    status: Option<String>,
    /// The actor ID performing this read.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            // Lifecycle and reference violations surface as conflicts with
            // the current state of the record.
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a `UserRole`.
fn parse_role(role_str: &str) -> Result<UserRole, HttpError> {
    UserRole::from_str(role_str).map_err(|_| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!(
            "Invalid role: '{role_str}'. Must be 'collaborator', 'responsible' or 'admin'"
        ),
    })
}

/// Handler for POST `/entries` endpoint.
///
/// Creates a new draft entry.
async fn handle_create_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<CreateEntryRequest>>,
) -> Result<Json<EntryResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        user_id = %req.body.user_id,
        date_pointage = %req.body.date_pointage,
        "Handling create_entry request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryResponse =
        handlers::create_entry(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/entries/update` endpoint.
///
/// Replaces the payload of a draft entry.
async fn handle_update_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<UpdateEntryRequest>>,
) -> Result<Json<EntryResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.body.entry_id,
        "Handling update_entry request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryResponse =
        handlers::update_entry(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/entries/submit` endpoint.
///
/// Moves a draft entry into the review queue.
async fn handle_submit_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<EntryIdRequest>>,
) -> Result<Json<EntryResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.body.entry_id,
        "Handling submit_entry request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryResponse =
        handlers::submit_entry(&mut persistence, req.body.entry_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/entries/status` endpoint.
///
/// Validates, rejects, or reopens a submitted entry.
async fn handle_set_entry_status(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<SetEntryStatusRequest>>,
) -> Result<Json<EntryResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.body.entry_id,
        status = %req.body.status,
        "Handling set_entry_status request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryResponse =
        handlers::set_entry_status(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/entries/delete` endpoint.
async fn handle_delete_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<EntryIdRequest>>,
) -> Result<Json<EntryResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.body.entry_id,
        "Handling delete_entry request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryResponse =
        handlers::delete_entry(&mut persistence, req.body.entry_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/entries/archive` endpoint.
async fn handle_archive_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<EntryIdRequest>>,
) -> Result<Json<EntryResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.body.entry_id,
        "Handling archive_entry request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryResponse =
        handlers::archive_entry(&mut persistence, req.body.entry_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/entries/restore` endpoint.
async fn handle_restore_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<EntryIdRequest>>,
) -> Result<Json<EntryResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.body.entry_id,
        "Handling restore_entry request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryResponse =
        handlers::restore_entry(&mut persistence, req.body.entry_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/entries/{entry_id}` endpoint.
async fn handle_get_entry(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<EntryInfo>, HttpError> {
    info!(entry_id = entry_id, "Handling get_entry request");

    let actor: AuthenticatedActor = query.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    let entry: EntryInfo = handlers::get_entry(&mut persistence, entry_id, &actor)?;
    drop(persistence);

    Ok(Json(entry))
}

/// Handler for GET `/entries` endpoint.
///
/// Lists the visible entries of one user.
async fn handle_list_entries(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserScopedQuery>,
) -> Result<Json<EntryListResponse>, HttpError> {
    info!(user_id = %query.user_id, "Handling list_entries request");

    let role: UserRole = parse_role(&query.actor_role)?;
    let actor: AuthenticatedActor = AuthenticatedActor::new(query.actor_id.clone(), role);
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryListResponse =
        handlers::list_entries(&mut persistence, &query.user_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/entries/week/{week_label}` endpoint.
///
/// Lists one user's entries for a single ISO week.
async fn handle_list_week_entries(
    AxumState(app_state): AxumState<AppState>,
    Path(week_label): Path<String>,
    Query(query): Query<UserScopedQuery>,
) -> Result<Json<EntryListResponse>, HttpError> {
    info!(
        user_id = %query.user_id,
        week_label = %week_label,
        "Handling list_week_entries request"
    );

    let role: UserRole = parse_role(&query.actor_role)?;
    let actor: AuthenticatedActor = AuthenticatedActor::new(query.actor_id.clone(), role);
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryListResponse =
        handlers::list_entries_for_week(&mut persistence, &query.user_id, &week_label, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/entries/team` endpoint.
///
/// Lists the entries of every report of the acting responsible.
async fn handle_list_team_entries(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<EntryListResponse>, HttpError> {
    info!(actor_id = %query.actor_id, "Handling list_team_entries request");

    let actor: AuthenticatedActor = query.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: EntryListResponse = handlers::list_team_entries(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/requests` endpoint.
///
/// Opens a modification request against a locked entry.
async fn handle_create_request(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<CreateModificationRequestRequest>>,
) -> Result<Json<RequestResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.body.entry_id,
        "Handling create_modification_request request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: RequestResponse =
        handlers::create_modification_request(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/requests/review` endpoint.
///
/// Approves or rejects a pending modification request.
async fn handle_review_request(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<ReviewModificationRequestRequest>>,
) -> Result<Json<ReviewResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        request_id = req.body.request_id,
        decision = %req.body.decision,
        "Handling review_modification_request request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ReviewResponse =
        handlers::review_modification_request(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/requests` endpoint.
///
/// Lists the modification requests of one user.
async fn handle_list_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UserScopedQuery>,
) -> Result<Json<RequestListResponse>, HttpError> {
    info!(user_id = %query.user_id, "Handling list_requests request");

    let role: UserRole = parse_role(&query.actor_role)?;
    let actor: AuthenticatedActor = AuthenticatedActor::new(query.actor_id.clone(), role);
    let mut persistence = app_state.persistence.lock().await;
    let response: RequestListResponse =
        handlers::list_requests_for_user(&mut persistence, &query.user_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/requests/all` endpoint.
///
/// Lists every modification request, optionally narrowed to one status.
async fn handle_list_all_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RequestOverviewQuery>,
) -> Result<Json<RequestListResponse>, HttpError> {
    info!(actor_id = %query.actor_id, "Handling list_all_requests request");

    let role: UserRole = parse_role(&query.actor_role)?;
    let actor: AuthenticatedActor = AuthenticatedActor::new(query.actor_id.clone(), role);
    let filter_status: Option<RequestStatus> = query
        .status
        .as_deref()
        .map(|status_str| {
            RequestStatus::from_str(status_str).map_err(|_| HttpError {
                status: StatusCode::BAD_REQUEST,
                message: format!(
                    "Invalid status: '{status_str}'. Must be 'pending', 'approved' or 'rejected'"
                ),
            })
        })
        .transpose()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: RequestListResponse =
        handlers::list_requests(&mut persistence, filter_status, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/requests/pending` endpoint.
///
/// Lists the pending requests awaiting the acting reviewer.
async fn handle_list_pending_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<RequestListResponse>, HttpError> {
    info!(actor_id = %query.actor_id, "Handling list_pending_requests request");

    let actor: AuthenticatedActor = query.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: RequestListResponse =
        handlers::list_pending_requests(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/lists` endpoint.
///
/// Creates a named conditional list.
async fn handle_create_list(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<CreateListRequest>>,
) -> Result<Json<ListResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.body.name,
        "Handling create_list request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListResponse = handlers::create_list(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/lists/merge` endpoint.
///
/// Merges incoming items into an existing list.
async fn handle_merge_list_items(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<MergeListItemsRequest>>,
) -> Result<Json<MergeListItemsResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.body.name,
        "Handling merge_list_items request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: MergeListItemsResponse =
        handlers::merge_list_items(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/lists/activate` endpoint.
///
/// Points the process-wide active list at the named list.
async fn handle_set_active_list(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<ActivateListRequest>>,
) -> Result<Json<ListResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.body.name,
        "Handling set_active_list request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListResponse =
        handlers::set_active_list(&mut persistence, &req.body.name, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/lists/deactivate_item` endpoint.
///
/// Retires one item of a list without losing its history.
async fn handle_deactivate_list_item(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<DeactivateListItemRequest>>,
) -> Result<Json<ListResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        name = %req.body.name,
        index = req.body.index,
        "Handling deactivate_list_item request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: ListResponse =
        handlers::deactivate_list_item(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/lists/{name}` endpoint.
async fn handle_get_list(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ListInfo>, HttpError> {
    info!(name = %name, "Handling get_list request");

    let mut persistence = app_state.persistence.lock().await;
    let list: ListInfo = handlers::get_list(&mut persistence, &name)?;
    drop(persistence);

    Ok(Json(list))
}

/// Handler for GET `/lists` endpoint.
///
/// Lists the known list names and the active pointer.
async fn handle_list_names(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListNamesResponse>, HttpError> {
    info!("Handling list_names request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListNamesResponse = handlers::list_names(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/options` endpoint.
///
/// Resolves the selectable entry field options from the active list.
async fn handle_resolve_options(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<OptionsResponse>, HttpError> {
    info!("Handling resolve_entry_options request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OptionsResponse = handlers::resolve_entry_options(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/users` endpoint.
///
/// Registers a new user.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<CreateUserRequest>>,
) -> Result<Json<UserResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        user_id = %req.body.id,
        role = %req.body.role,
        "Handling create_user request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: UserResponse = handlers::create_user(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/users/update` endpoint.
///
/// Updates a user's own profile fields.
async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<UpdateUserRequest>>,
) -> Result<Json<UserResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        user_id = %req.body.id,
        "Handling update_user request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: UserResponse = handlers::update_user(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/users/status` endpoint.
///
/// Activates or deactivates a user account.
async fn handle_set_user_status(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthenticatedRequest<SetUserStatusRequest>>,
) -> Result<Json<UserResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        user_id = %req.body.id,
        status = %req.body.status,
        "Handling set_user_status request"
    );

    let (actor, cause) = req.credentials()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: UserResponse =
        handlers::set_user_status(&mut persistence, req.body, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/users/{user_id}` endpoint.
async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(user_id = %user_id, "Handling get_user request");

    let actor: AuthenticatedActor = query.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = handlers::get_user(&mut persistence, &user_id, &actor)?;
    drop(persistence);

    Ok(Json(user))
}

/// Handler for GET `/users` endpoint.
///
/// Lists every registered user.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<UserListResponse>, HttpError> {
    info!(actor_id = %query.actor_id, "Handling list_users request");

    let actor: AuthenticatedActor = query.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: UserListResponse = handlers::list_users(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/users/team` endpoint.
///
/// Lists the active reports of the acting responsible.
async fn handle_list_team(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<UserListResponse>, HttpError> {
    info!(actor_id = %query.actor_id, "Handling list_team request");

    let actor: AuthenticatedActor = query.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: UserListResponse = handlers::list_team(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/{resource_type}/{resource_id}` endpoint.
///
/// Returns the ordered audit trail of one resource.
async fn handle_get_audit_trail(
    AxumState(app_state): AxumState<AppState>,
    Path((resource_type, resource_id)): Path<(String, String)>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<AuditTrailResponse>, HttpError> {
    info!(
        resource_type = %resource_type,
        resource_id = %resource_id,
        "Handling get_audit_trail request"
    );

    let actor: AuthenticatedActor = query.actor()?;
    let mut persistence = app_state.persistence.lock().await;
    let response: AuditTrailResponse =
        handlers::get_audit_trail(&mut persistence, &resource_type, &resource_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/entries", post(handle_create_entry).get(handle_list_entries))
        .route("/entries/update", post(handle_update_entry))
        .route("/entries/submit", post(handle_submit_entry))
        .route("/entries/status", post(handle_set_entry_status))
        .route("/entries/delete", post(handle_delete_entry))
        .route("/entries/archive", post(handle_archive_entry))
        .route("/entries/restore", post(handle_restore_entry))
        .route("/entries/team", get(handle_list_team_entries))
        .route("/entries/week/{week_label}", get(handle_list_week_entries))
        .route("/entries/{entry_id}", get(handle_get_entry))
        .route("/requests", post(handle_create_request).get(handle_list_requests))
        .route("/requests/review", post(handle_review_request))
        .route("/requests/all", get(handle_list_all_requests))
        .route("/requests/pending", get(handle_list_pending_requests))
        .route("/lists", post(handle_create_list).get(handle_list_names))
        .route("/lists/merge", post(handle_merge_list_items))
        .route("/lists/activate", post(handle_set_active_list))
        .route("/lists/deactivate_item", post(handle_deactivate_list_item))
        .route("/lists/{name}", get(handle_get_list))
        .route("/options", get(handle_resolve_options))
        .route("/users", post(handle_create_user).get(handle_list_users))
        .route("/users/update", post(handle_update_user))
        .route("/users/status", post(handle_set_user_status))
        .route("/users/team", get(handle_list_team))
        .route("/users/{user_id}", get(handle_get_user))
        .route(
            "/audit/{resource_type}/{resource_id}",
            get(handle_get_audit_trail),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Pointage Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
