use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::shared::store::Entity;

/// Teacher account lifecycle. Integer-coded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum TeacherStatus {
    Awaiting = 0,
    Pending = 1,
    Active = 2,
    Blocked = 3,
    Rejected = 4,
}

impl TryFrom<i32> for TeacherStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TeacherStatus::Awaiting),
            1 => Ok(TeacherStatus::Pending),
            2 => Ok(TeacherStatus::Active),
            3 => Ok(TeacherStatus::Blocked),
            4 => Ok(TeacherStatus::Rejected),
            other => Err(format!("unknown teacher status {}", other)),
        }
    }
}

impl From<TeacherStatus> for i32 {
    fn from(value: TeacherStatus) -> Self {
        value as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum DocumentType {
    Identity = 1,
    Certificate = 2,
}

impl TryFrom<i32> for DocumentType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DocumentType::Identity),
            2 => Ok(DocumentType::Certificate),
            other => Err(format!("unknown document type {}", other)),
        }
    }
}

impl From<DocumentType> for i32 {
    fn from(value: DocumentType) -> Self {
        value as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum VerificationStatus {
    Pending = 1,
    Approved = 2,
    Rejected = 3,
}

impl TryFrom<i32> for VerificationStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VerificationStatus::Pending),
            2 => Ok(VerificationStatus::Approved),
            3 => Ok(VerificationStatus::Rejected),
            other => Err(format!("unknown verification status {}", other)),
        }
    }
}

impl From<VerificationStatus> for i32 {
    fn from(value: VerificationStatus) -> Self {
        value as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum IdentityType {
    NationalId = 1,
    Passport = 2,
    Iqama = 3,
}

impl TryFrom<i32> for IdentityType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(IdentityType::NationalId),
            2 => Ok(IdentityType::Passport),
            3 => Ok(IdentityType::Iqama),
            other => Err(format!("unknown identity type {}", other)),
        }
    }
}

impl From<IdentityType> for i32 {
    fn from(value: IdentityType) -> Self {
        value as i32
    }
}

/// Row of the pending-registrations listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTeacher {
    pub teacher_id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub status: TeacherStatus,
    pub location: i32,
    pub created_at: NaiveDateTime,
    pub total_documents: u32,
    pub pending_documents: u32,
    pub approved_documents: u32,
    pub rejected_documents: u32,
}

impl Entity for PendingTeacher {
    fn key(&self) -> i64 {
        self.teacher_id
    }

    fn with_key(&self, key: i64) -> Self {
        Self {
            teacher_id: key,
            ..self.clone()
        }
    }
}

/// One uploaded verification document. Identity documents carry the
/// number/type/country fields; certificates carry title/issuer/date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDocument {
    pub id: i64,
    pub document_type: DocumentType,
    pub file_path: String,
    pub verification_status: VerificationStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<NaiveDateTime>,
    pub document_number: Option<String>,
    pub identity_type: Option<IdentityType>,
    pub issuing_country_code: Option<String>,
    pub certificate_title: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Full teacher record as served by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDetail {
    pub teacher_id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub status: TeacherStatus,
    pub location: i32,
    pub created_at: NaiveDateTime,
    pub documents: Vec<TeacherDocument>,
    pub total_documents: u32,
    pub pending_documents: u32,
    pub approved_documents: u32,
    pub rejected_documents: u32,
}

impl TeacherDetail {
    /// A teacher may be activated only once every submitted document has
    /// been approved. Computed here, never trusted from the wire.
    pub fn can_be_activated(&self) -> bool {
        !self.documents.is_empty()
            && self
                .documents
                .iter()
                .all(|d| d.verification_status == VerificationStatus::Approved)
    }

    /// Recomputes the per-status document tallies from the documents list.
    pub fn recount_documents(&mut self) {
        self.total_documents = self.documents.len() as u32;
        self.pending_documents = self.count_status(VerificationStatus::Pending);
        self.approved_documents = self.count_status(VerificationStatus::Approved);
        self.rejected_documents = self.count_status(VerificationStatus::Rejected);
    }

    fn count_status(&self, status: VerificationStatus) -> u32 {
        self.documents
            .iter()
            .filter(|d| d.verification_status == status)
            .count() as u32
    }
}
