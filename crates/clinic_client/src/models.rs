//! # Models
//!
//! Data models for the clinic-management API.
//!
//! These models represent the records the API returns (departments, doctors,
//! schedule entries, appointments) and the payloads the client sends to
//! create them. They are deliberately tolerant on the read side: only the
//! fields the orchestrator actually inspects are required, everything else
//! is optional so that server-side additions do not break deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Identifier assigned by the clinic API to a stored record.
pub type ResourceId = i64;

/// The authenticated user record returned by the login endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserInfo {
    /// Display name of the user
    pub user_name: String,
    /// Role of the user (admin, patient, doctor)
    pub role: String,
}

/// A department record as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Department {
    /// The unique ID of the department
    pub department_id: ResourceId,
    /// The display name of the department
    pub department_name: String,
    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,
}

/// A doctor record as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Doctor {
    /// The unique ID of the doctor
    pub doctor_id: ResourceId,
    /// The email address the doctor logs in with
    pub login_email: String,
    /// Display name of the doctor
    #[serde(default)]
    pub name: Option<String>,
    /// Medical specialization
    #[serde(default)]
    pub specialization: Option<String>,
    /// The department the doctor belongs to
    #[serde(default)]
    pub department_id: Option<ResourceId>,
    /// Account status (e.g. `active`)
    #[serde(default)]
    pub status: Option<String>,
}

/// A weekly schedule entry for a doctor.
///
/// Only the day is required; the orchestrator matches schedule entries by
/// day of week and does not inspect the other fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleEntry {
    /// The unique ID of the schedule entry
    #[serde(default)]
    pub schedule_id: Option<ResourceId>,
    /// The doctor the entry belongs to
    #[serde(default)]
    pub doctor_id: Option<ResourceId>,
    /// Day of week, e.g. `Monday`
    pub day: String,
    /// Start of the consultation window, `HH:MM`
    #[serde(default)]
    pub start_time: Option<String>,
    /// End of the consultation window, `HH:MM`
    #[serde(default)]
    pub end_time: Option<String>,
    /// Maximum number of patients for the window
    #[serde(default)]
    pub max_patients: Option<u32>,
}

/// An appointment record as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Appointment {
    /// The unique ID of the appointment
    pub appointment_id: ResourceId,
    /// The doctor the appointment is with
    #[serde(default)]
    pub doctor_id: Option<ResourceId>,
    /// Appointment date, `YYYY-MM-DD`
    #[serde(default)]
    pub appointment_date: Option<String>,
    /// Appointment time, `HH:MM:SS`
    #[serde(default)]
    pub appointment_time: Option<String>,
    /// Appointment status (e.g. `pending`, `confirmed`)
    #[serde(default)]
    pub status: Option<String>,
}

/// Credentials payload for the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email address to authenticate with
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Payload for creating a department.
#[derive(Debug, Clone, Serialize)]
pub struct NewDepartment {
    /// The display name of the department
    pub department_name: String,
    /// Free-form description
    pub description: String,
}

/// Payload for creating a doctor account.
#[derive(Debug, Clone, Serialize)]
pub struct NewDoctor {
    /// Display name used for the account
    pub user_name: String,
    /// Display name of the doctor
    pub name: String,
    /// The email address the doctor will log in with
    pub email: String,
    /// Initial password for the account
    pub password: String,
    /// Medical specialization
    pub specialization: String,
    /// The department the doctor belongs to
    pub department_id: ResourceId,
    /// Contact phone number
    pub phone: String,
    /// Account status (e.g. `active`)
    pub status: String,
    /// Inline weekly availability hint, keyed by short day name,
    /// e.g. `{"mon": ["09:00", "17:00"]}`
    pub schedule: BTreeMap<String, Vec<String>>,
}

/// Payload for creating a weekly schedule entry.
#[derive(Debug, Clone, Serialize)]
pub struct NewScheduleEntry {
    /// The doctor the entry belongs to
    pub doctor_id: ResourceId,
    /// Day of week, e.g. `Monday`
    pub day: String,
    /// Start of the consultation window, `HH:MM`
    pub start_time: String,
    /// End of the consultation window, `HH:MM`
    pub end_time: String,
    /// Maximum number of patients for the window
    pub max_patients: u32,
}

/// Payload for booking an appointment.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    /// The doctor to book with
    pub doctor_id: ResourceId,
    /// Appointment date, `YYYY-MM-DD`
    pub appointment_date: String,
    /// Appointment time, `HH:MM:SS`
    pub appointment_time: String,
}
