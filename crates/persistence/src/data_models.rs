// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between database rows and domain types.
//!
//! Timestamps are stored as ISO 8601 text, dates as `YYYY-MM-DD` text,
//! and booleans as integers. Audit actor/cause/action payloads are stored
//! as JSON columns mirrored by the `*Data` structs below.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use pointage_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use pointage_domain::{
    ConditionalList, ConditionalListItem, EntryFields, EntryPatch, EntryStatus, ModificationRequest,
    PointageEntry, RequestStatus, User, UserRole, UserStatus,
};
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{
    audit_events, conditional_list_items, conditional_lists, modification_requests,
    pointage_entries, users,
};
use crate::error::PersistenceError;

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| PersistenceError::DataCorruption(format!("timestamp '{raw}': {e}")))
}

pub(crate) fn parse_optional_timestamp(
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, PersistenceError> {
    raw.map(parse_timestamp).transpose()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| PersistenceError::DataCorruption(format!("date '{raw}': {e}")))
}

/// Serializable mirror of [`Actor`] for the `actor_json` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

/// Serializable mirror of [`Cause`] for the `cause_json` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

/// Serializable mirror of [`Action`] for the `action_json` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

#[derive(Debug, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub resource_type: String,
    pub resource_id: String,
    pub created_at: String,
}

impl AuditEventRow {
    pub fn into_domain(self) -> Result<AuditEvent, PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        Ok(AuditEvent::new(
            Actor::new(actor.id, actor.actor_type),
            Cause::new(cause.id, cause.description),
            Action::new(action.name, action.details),
            StateSnapshot::new(self.before_snapshot_json),
            StateSnapshot::new(self.after_snapshot_json),
            self.resource_type,
            self.resource_id,
        ))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent {
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub resource_type: String,
    pub resource_id: String,
}

impl NewAuditEvent {
    pub fn from_domain(event: &AuditEvent) -> Result<Self, PersistenceError> {
        Ok(Self {
            actor_json: serde_json::to_string(&ActorData::from(&event.actor))?,
            cause_json: serde_json::to_string(&CauseData::from(&event.cause))?,
            action_json: serde_json::to_string(&ActionData::from(&event.action))?,
            before_snapshot_json: event.before.data.clone(),
            after_snapshot_json: event.after.data.clone(),
            resource_type: event.resource_type.clone(),
            resource_id: event.resource_id.clone(),
        })
    }
}

#[derive(Debug, Queryable)]
pub struct EntryRow {
    pub id: i64,
    pub user_id: String,
    pub date_pointage: String,
    pub week_label: String,
    pub clef_imputation: String,
    pub libelle: String,
    pub fonction: String,
    pub date_besoin: String,
    pub heures_theoriques: String,
    pub heures_passees: String,
    pub commentaires: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub submitted_at: Option<String>,
    pub validated_at: Option<String>,
    pub validated_by: Option<String>,
    pub is_deleted: i32,
    pub is_archived: i32,
}

impl EntryRow {
    pub fn into_domain(self) -> Result<PointageEntry, PersistenceError> {
        let status: EntryStatus = self
            .status
            .parse()
            .map_err(|e| PersistenceError::DataCorruption(format!("entry {}: {e}", self.id)))?;
        Ok(PointageEntry {
            id: Some(self.id),
            user_id: self.user_id,
            date_pointage: parse_date(&self.date_pointage)?,
            week_label: self.week_label,
            fields: EntryFields {
                clef_imputation: self.clef_imputation,
                libelle: self.libelle,
                fonction: self.fonction,
                date_besoin: self.date_besoin,
                heures_theoriques: self.heures_theoriques,
                heures_passees: self.heures_passees,
                commentaires: self.commentaires,
            },
            status,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            submitted_at: parse_optional_timestamp(self.submitted_at.as_deref())?,
            validated_at: parse_optional_timestamp(self.validated_at.as_deref())?,
            validated_by: self.validated_by,
            is_deleted: self.is_deleted != 0,
            is_archived: self.is_archived != 0,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = pointage_entries)]
pub struct NewEntry {
    pub user_id: String,
    pub date_pointage: String,
    pub week_label: String,
    pub clef_imputation: String,
    pub libelle: String,
    pub fonction: String,
    pub date_besoin: String,
    pub heures_theoriques: String,
    pub heures_passees: String,
    pub commentaires: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub submitted_at: Option<String>,
    pub validated_at: Option<String>,
    pub validated_by: Option<String>,
    pub is_deleted: i32,
    pub is_archived: i32,
}

impl NewEntry {
    pub fn from_domain(entry: &PointageEntry) -> Self {
        Self {
            user_id: entry.user_id.clone(),
            date_pointage: format_date(entry.date_pointage),
            week_label: entry.week_label.clone(),
            clef_imputation: entry.fields.clef_imputation.clone(),
            libelle: entry.fields.libelle.clone(),
            fonction: entry.fields.fonction.clone(),
            date_besoin: entry.fields.date_besoin.clone(),
            heures_theoriques: entry.fields.heures_theoriques.clone(),
            heures_passees: entry.fields.heures_passees.clone(),
            commentaires: entry.fields.commentaires.clone(),
            status: entry.status.as_str().to_string(),
            created_at: format_timestamp(entry.created_at),
            updated_at: format_timestamp(entry.updated_at),
            submitted_at: entry.submitted_at.map(format_timestamp),
            validated_at: entry.validated_at.map(format_timestamp),
            validated_by: entry.validated_by.clone(),
            is_deleted: i32::from(entry.is_deleted),
            is_archived: i32::from(entry.is_archived),
        }
    }
}

#[derive(Debug, Queryable)]
pub struct RequestRow {
    pub id: i64,
    pub entry_id: i64,
    pub user_id: String,
    pub requested_data: String,
    pub current_data: String,
    pub comment: Option<String>,
    pub status: String,
    pub created_at: String,
    pub reviewed_at: Option<String>,
    pub reviewed_by: Option<String>,
    pub review_comment: Option<String>,
}

impl RequestRow {
    pub fn into_domain(self) -> Result<ModificationRequest, PersistenceError> {
        let status: RequestStatus = self
            .status
            .parse()
            .map_err(|e| PersistenceError::DataCorruption(format!("request {}: {e}", self.id)))?;
        let requested_data: EntryPatch = serde_json::from_str(&self.requested_data)?;
        let current_data: EntryFields = serde_json::from_str(&self.current_data)?;
        let mut request: ModificationRequest = ModificationRequest::new(
            self.entry_id,
            self.user_id,
            requested_data,
            current_data,
            self.comment,
            parse_timestamp(&self.created_at)?,
        )
        .with_id(self.id);
        request.status = status;
        request.reviewed_at = parse_optional_timestamp(self.reviewed_at.as_deref())?;
        request.reviewed_by = self.reviewed_by;
        request.review_comment = self.review_comment;
        Ok(request)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = modification_requests)]
pub struct NewRequest {
    pub entry_id: i64,
    pub user_id: String,
    pub requested_data: String,
    pub current_data: String,
    pub comment: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl NewRequest {
    pub fn from_domain(request: &ModificationRequest) -> Result<Self, PersistenceError> {
        Ok(Self {
            entry_id: request.entry_id,
            user_id: request.user_id.clone(),
            requested_data: serde_json::to_string(&request.requested_data)?,
            current_data: serde_json::to_string(&request.current_data)?,
            comment: request.comment.clone(),
            status: request.status.as_str().to_string(),
            created_at: format_timestamp(request.created_at),
        })
    }
}

#[derive(Debug, Queryable)]
pub struct ListRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ListRow {
    pub fn into_domain(
        self,
        items: Vec<ConditionalListItem>,
    ) -> Result<ConditionalList, PersistenceError> {
        Ok(ConditionalList {
            id: Some(self.id),
            name: self.name,
            description: self.description,
            items,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = conditional_lists)]
pub struct NewList {
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewList {
    pub fn from_domain(list: &ConditionalList) -> Self {
        Self {
            name: list.name.clone(),
            description: list.description.clone(),
            created_at: format_timestamp(list.created_at),
            updated_at: format_timestamp(list.updated_at),
        }
    }
}

#[derive(Debug, Queryable)]
pub struct ListItemRow {
    pub id: i64,
    pub list_id: i64,
    pub position: i32,
    pub clef_imputation: String,
    pub libelle: String,
    pub fonction: String,
    pub is_active: i32,
}

impl ListItemRow {
    pub fn into_domain(self) -> ConditionalListItem {
        ConditionalListItem {
            clef_imputation: self.clef_imputation,
            libelle: self.libelle,
            fonction: self.fonction,
            is_active: self.is_active != 0,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = conditional_list_items)]
pub struct NewListItem {
    pub list_id: i64,
    pub position: i32,
    pub clef_imputation: String,
    pub libelle: String,
    pub fonction: String,
    pub is_active: i32,
}

impl NewListItem {
    pub fn from_domain(list_id: i64, position: i32, item: &ConditionalListItem) -> Self {
        Self {
            list_id,
            position,
            clef_imputation: item.clef_imputation.clone(),
            libelle: item.libelle.clone(),
            fonction: item.fonction.clone(),
            is_active: i32::from(item.is_active),
        }
    }
}

#[derive(Debug, Queryable)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub responsible_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl UserRow {
    pub fn into_domain(self) -> Result<User, PersistenceError> {
        let role: UserRole = self
            .role
            .parse()
            .map_err(|e| PersistenceError::DataCorruption(format!("user {}: {e}", self.id)))?;
        let status: UserStatus = self
            .status
            .parse()
            .map_err(|e| PersistenceError::DataCorruption(format!("user {}: {e}", self.id)))?;
        let mut user: User = User::new(
            self.id,
            self.name,
            self.email,
            role,
            self.responsible_id,
            parse_timestamp(&self.created_at)?,
        );
        user.status = status;
        user.updated_at = parse_timestamp(&self.updated_at)?;
        Ok(user)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub responsible_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewUser {
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            status: user.status.as_str().to_string(),
            responsible_id: user.responsible_id.clone(),
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}
