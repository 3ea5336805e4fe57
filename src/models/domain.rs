use serde::{Deserialize, Serialize};

use super::serde_utils::string_or_number;

/// A scheduled event with capacity, status and one or more time slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub activity_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub activity_status: Option<String>,
    #[serde(default)]
    pub activity_category: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub capacity_limit: Option<u32>,
    #[serde(default)]
    pub current_participants: Option<u32>,
    #[serde(default)]
    pub is_approved: Option<bool>,
    #[serde(default)]
    pub schedules: Vec<ActivitySchedule>,
}

/// One time-boxed slot of an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySchedule {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub activity_description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Registration of an account on an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub identify_code: Option<String>,
    /// `PARTICIPANT` or `CONTRIBUTOR`.
    #[serde(default)]
    pub participation_role: Option<String>,
    /// `UNVERIFIED`, `VERIFIED`, ...
    #[serde(default)]
    pub participation_status: Option<String>,
    #[serde(default)]
    pub registered_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Identity attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// `data` of a successful `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
}
