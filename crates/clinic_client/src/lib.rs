//! Crate for interacting with the clinic-management HTTP API.
//!
//! This crate provides a typed client for the clinic API's query-string
//! routed endpoints (`/api.php?route=/...`). It owns authentication
//! (session cookie plus CSRF token), the response envelope, and the
//! resolution of create responses into a [`CreateOutcome`] so that callers
//! never probe raw JSON for identifiers or duplicate-error text themselves.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{
    Appointment, Department, Doctor, LoginRequest, NewAppointment, NewDepartment, NewDoctor,
    NewScheduleEntry, ResourceId, ScheduleEntry, UserInfo,
};

pub mod session;
pub use session::Session;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Server error text that indicates the resource already exists rather than
/// a genuine failure.
static DUPLICATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)already exists|duplicate").expect("valid literal pattern"));

/// The JSON envelope every clinic API response is wrapped in.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

impl Envelope {
    fn message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "no error message".to_string())
    }
}

/// Result of a create request, resolved once at the client boundary.
///
/// The clinic API reports duplicates as `ok == false` with matching error
/// text; callers running idempotently need to distinguish that from a real
/// failure. The client makes the distinction here so call sites match on a
/// variant instead of scanning response text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The resource was created; carries the identifier the server assigned.
    Created(ResourceId),
    /// An equivalent resource already exists. Carries the server's error
    /// text; the caller is expected to look the existing record up.
    Duplicate(String),
}

/// A client for the clinic-management HTTP API.
///
/// The client itself is stateless; authentication state lives in the
/// [`Session`] value returned by [`ClinicClient::login`] and passed to every
/// authenticated call.
#[derive(Debug, Clone)]
pub struct ClinicClient {
    http: reqwest::Client,
    base: Url,
}

impl ClinicClient {
    /// Creates a client for the API reachable at `base_url`,
    /// e.g. `http://localhost:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if the URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Builds the full URL for a logical route.
    ///
    /// The API routes through a query parameter (`/api.php?route=/doctors`),
    /// so additional parameters are appended with `&` rather than forming a
    /// conventional path.
    fn endpoint(&self, route: &str, params: &[(&str, String)]) -> String {
        let base = self.base.as_str().trim_end_matches('/');
        let mut url = format!("{base}/api.php?route={route}");
        for (key, value) in params {
            url.push_str(&format!("&{key}={value}"));
        }
        url
    }

    /// Authenticates against the clinic API and returns a fresh session.
    ///
    /// Expects a success envelope carrying `data.csrf_token` and
    /// `data.user`, plus a session cookie. The returned [`Session`] replaces
    /// whatever session the caller held before; the client never retries a
    /// failed login.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LoginFailed`] if the server responds with a
    /// non-success status or `ok == false`, [`Error::MissingCsrfToken`] if
    /// the success response carries no CSRF token.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        info!("Logging in");
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.endpoint("/auth/login", &[]))
            .json(&request)
            .send()
            .await?;

        let cookies = session::collect_cookie_pairs(response.headers());
        let status = response.status();
        let body = response.text().await?;

        let envelope: Envelope = serde_json::from_str(&body)?;
        if !status.is_success() || !envelope.ok {
            error!(
                status = status.as_u16(),
                message = %envelope.message(),
                "Login failed"
            );
            return Err(Error::LoginFailed {
                email: email.to_string(),
                message: envelope.message(),
            });
        }

        let data = envelope.data.unwrap_or(Value::Null);
        let csrf_token = data
            .get("csrf_token")
            .and_then(Value::as_str)
            .ok_or(Error::MissingCsrfToken)?
            .to_string();
        let user: UserInfo = serde_json::from_value(data.get("user").cloned().unwrap_or(Value::Null))?;

        info!(
            user = %user.user_name,
            role = %user.role,
            "Login successful"
        );
        Ok(Session::new(csrf_token, cookies, user))
    }

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for a non-duplicate rejection and
    /// [`Error::MissingId`] if a success response carries no identifier.
    #[instrument(skip(self, session, department), fields(name = %department.department_name))]
    pub async fn create_department(
        &self,
        session: &Session,
        department: &NewDepartment,
    ) -> Result<CreateOutcome, Error> {
        info!("Creating department");
        self.post_create(session, "/departments", department, "department", "department_id")
            .await
    }

    /// Lists all departments.
    #[instrument(skip(self, session))]
    pub async fn list_departments(&self, session: &Session) -> Result<Vec<Department>, Error> {
        self.get_items(session, "/departments", &[]).await
    }

    /// Creates a doctor account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for a non-duplicate rejection and
    /// [`Error::MissingId`] if a success response carries no identifier.
    #[instrument(skip(self, session, doctor), fields(email = %doctor.email))]
    pub async fn create_doctor(
        &self,
        session: &Session,
        doctor: &NewDoctor,
    ) -> Result<CreateOutcome, Error> {
        info!("Creating doctor");
        self.post_create(session, "/doctors", doctor, "doctor", "doctor_id")
            .await
    }

    /// Lists all doctors.
    #[instrument(skip(self, session))]
    pub async fn list_doctors(&self, session: &Session) -> Result<Vec<Doctor>, Error> {
        self.get_items(session, "/doctors", &[]).await
    }

    /// Creates a weekly schedule entry for a doctor.
    #[instrument(skip(self, session, entry), fields(doctor_id = entry.doctor_id, day = %entry.day))]
    pub async fn create_schedule_entry(
        &self,
        session: &Session,
        entry: &NewScheduleEntry,
    ) -> Result<CreateOutcome, Error> {
        info!("Creating schedule entry");
        self.post_create(session, "/doctor-schedule", entry, "schedule", "schedule_id")
            .await
    }

    /// Lists the weekly schedule entries of a doctor.
    ///
    /// A response without `data.items` is treated as an empty schedule, not
    /// an error.
    #[instrument(skip(self, session))]
    pub async fn list_doctor_schedule(
        &self,
        session: &Session,
        doctor_id: ResourceId,
    ) -> Result<Vec<ScheduleEntry>, Error> {
        self.get_items(
            session,
            "/doctor-schedule",
            &[("doctor_id", doctor_id.to_string())],
        )
        .await
    }

    /// Books an appointment.
    ///
    /// A duplicate-slot rejection resolves to
    /// [`CreateOutcome::Duplicate`]; callers decide whether that is
    /// tolerable.
    #[instrument(
        skip(self, session, appointment),
        fields(
            doctor_id = appointment.doctor_id,
            date = %appointment.appointment_date,
            time = %appointment.appointment_time,
        )
    )]
    pub async fn book_appointment(
        &self,
        session: &Session,
        appointment: &NewAppointment,
    ) -> Result<CreateOutcome, Error> {
        info!("Booking appointment");
        self.post_create(
            session,
            "/appointments",
            appointment,
            "appointment",
            "appointment_id",
        )
        .await
    }

    /// Lists the appointments visible to the session's user.
    ///
    /// For a doctor session this is the doctor's own appointment list.
    #[instrument(skip(self, session))]
    pub async fn list_appointments(&self, session: &Session) -> Result<Vec<Appointment>, Error> {
        self.get_items(session, "/appointments", &[]).await
    }

    /// Sends an authenticated create request and resolves the response into
    /// a [`CreateOutcome`].
    async fn post_create<B: Serialize>(
        &self,
        session: &Session,
        route: &str,
        payload: &B,
        resource: &'static str,
        id_field: &str,
    ) -> Result<CreateOutcome, Error> {
        let response = session
            .authenticate(self.http.post(self.endpoint(route, &[])))
            .json(payload)
            .send()
            .await?;
        let envelope: Envelope = response.json().await?;

        if !envelope.ok {
            let message = envelope.message();
            if DUPLICATE_PATTERN.is_match(&message) {
                debug!(route, %message, "Create reported a duplicate");
                return Ok(CreateOutcome::Duplicate(message));
            }
            error!(route, %message, "Create request failed");
            return Err(Error::Api {
                route: route.to_string(),
                message,
            });
        }

        let data = envelope.data.unwrap_or(Value::Null);
        extract_id(&data, resource, id_field)
            .map(CreateOutcome::Created)
            .ok_or(Error::MissingId { resource })
    }

    /// Sends an authenticated list request and deserializes `data.items`.
    async fn get_items<T: DeserializeOwned>(
        &self,
        session: &Session,
        route: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let response = session
            .authenticate(self.http.get(self.endpoint(route, params)))
            .send()
            .await?;
        let envelope: Envelope = response.json().await?;

        if !envelope.ok {
            let message = envelope.message();
            error!(route, %message, "List request failed");
            return Err(Error::Api {
                route: route.to_string(),
                message,
            });
        }

        let items = envelope
            .data
            .and_then(|mut data| data.get_mut("items").map(Value::take))
            .unwrap_or_else(|| Value::Array(Vec::new()));
        Ok(serde_json::from_value(items)?)
    }
}

/// Extracts a created resource's identifier from the response data.
///
/// The API nests the created record under its resource name for some
/// controllers (`data.department.department_id`) and returns flat id fields
/// for others (`data.id`, `data.appointment_id`). The shapes are tried in
/// that order.
fn extract_id(data: &Value, resource: &str, id_field: &str) -> Option<ResourceId> {
    data.get(resource)
        .and_then(|nested| nested.get(id_field))
        .or_else(|| data.get("id"))
        .or_else(|| data.get(id_field))
        .and_then(Value::as_i64)
}
