//! Housing service wire model.
//!
//! Field names are camelCase on the wire. A person is always referenced by
//! username in request bodies (`autorUsername`, `prijavioUsername`,
//! `studentUsername`); the older `*Id` spellings are not part of the contract.

use crate::null_as_default;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dormitory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dom {
    pub id: Uuid,
    pub naziv: String,
    pub adresa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub ime: String,
    pub prezime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soba_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub broj: String,
    pub slobodna: bool,
    pub dom_id: Uuid,
    #[serde(default)]
    pub kapacitet: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub studenti: Vec<Student>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recenzije: Vec<RoomReview>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kvarovi: Vec<Fault>,
}

impl Room {
    /// Beds left, as far as the embedded student list tells.
    pub fn vacancies(&self) -> u32 {
        self.kapacitet.saturating_sub(self.studenti.len() as u32)
    }

    pub fn average_rating(&self) -> Option<f64> {
        if self.recenzije.is_empty() {
            return None;
        }
        let sum: u32 = self.recenzije.iter().map(|r| r.ocena as u32).sum();
        Some(sum as f64 / self.recenzije.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomReview {
    pub id: Uuid,
    pub ocena: u8,
    #[serde(default)]
    pub komentar: Option<String>,
    pub soba_id: Uuid,
    pub autor_username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultStatus {
    Prijavljen,
    UToku,
    Resen,
}

impl FaultStatus {
    pub const ALL: [FaultStatus; 3] = [FaultStatus::Prijavljen, FaultStatus::UToku, FaultStatus::Resen];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaultStatus::Prijavljen => "prijavljen",
            FaultStatus::UToku => "u_toku",
            FaultStatus::Resen => "resen",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FaultStatus::Prijavljen => "Reported",
            FaultStatus::UToku => "In progress",
            FaultStatus::Resen => "Resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fault {
    pub id: Uuid,
    pub opis: String,
    pub status: FaultStatus,
    pub soba_id: Uuid,
    pub prijavio_username: String,
}

/// Balance card used to pay for meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCard {
    pub id: Uuid,
    pub stanje: f64,
    pub student_username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: String,
}

// =========================================================
// Request bodies
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub ime: String,
    pub prezime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRoomRequest {
    pub student_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCardRequest {
    pub student_username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCardBalanceRequest {
    pub student_username: String,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStudentRequest {
    pub dom_id: Uuid,
    pub broj: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoomReview {
    pub soba_id: Uuid,
    pub autor_username: String,
    pub ocena: u8,
    pub komentar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFault {
    pub soba_id: Uuid,
    pub prijavio_username: String,
    pub opis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeFaultStatusRequest {
    pub kvar_id: Uuid,
    pub status: FaultStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn room_tolerates_null_collections() {
        let room: Room = serde_json::from_value(json!({
            "id": Uuid::nil(), "broj": "12", "slobodna": true,
            "domId": Uuid::nil(), "kapacitet": 2,
            "studenti": null
        }))
        .unwrap();
        assert!(room.studenti.is_empty());
        assert!(room.recenzije.is_empty());
        assert_eq!(room.vacancies(), 2);
        assert_eq!(room.average_rating(), None);
    }

    #[test]
    fn review_body_uses_canonical_author_field() {
        let body = serde_json::to_value(NewRoomReview {
            soba_id: Uuid::nil(),
            autor_username: "mika".into(),
            ocena: 4,
            komentar: None,
        })
        .unwrap();
        assert_eq!(body["autorUsername"], "mika");
        assert!(body.get("autorId").is_none());
        assert!(body["komentar"].is_null());
    }

    #[test]
    fn fault_status_uses_snake_case() {
        assert_eq!(serde_json::to_value(FaultStatus::UToku).unwrap(), json!("u_toku"));
        assert_eq!(FaultStatus::parse("resen"), Some(FaultStatus::Resen));
        assert_eq!(FaultStatus::parse("done"), None);
    }

    #[test]
    fn card_uses_username_not_id() {
        let card: StudentCard = serde_json::from_value(json!({
            "id": Uuid::nil(), "stanje": 1200.5, "studentUsername": "ana"
        }))
        .unwrap();
        assert_eq!(card.student_username, "ana");
    }
}
