//! The three-phase end-to-end check flow.
//!
//! Phases run strictly in order, each feeding identifiers to the next:
//!
//! 1. Admin phase: log in as admin, ensure the department, doctor, and
//!    weekly schedule fixtures exist.
//! 2. Patient phase: log in as the pre-seeded patient and book an
//!    appointment with the doctor for tomorrow.
//! 3. Doctor verification phase: log in as the doctor and assert the
//!    booked appointment appears in the doctor's list.
//!
//! Each login replaces the session wholesale; exactly one identity is
//! active at a time. Execution is sequential, every call blocks until its
//! response arrives.

use chrono::Local;
use clinic_client::{
    ClinicClient, CreateOutcome, NewAppointment, NewDepartment, NewDoctor, NewScheduleEntry,
    ResourceId, Session,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::ensure::ensure_fixture;
use crate::errors::Error;

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;

/// A login credential pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address to authenticate with
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl Credentials {
    fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// Fixture values the flow creates or reuses.
///
/// Defaults reproduce the standard smoke-test scenario: a "Cardiology Test"
/// department with one doctor available Mondays 09:00-17:00 and a 10:00
/// appointment slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Department display name, also the department uniqueness key
    #[serde(default = "FixtureConfig::default_department_name")]
    pub department_name: String,
    /// Department description
    #[serde(default = "FixtureConfig::default_department_description")]
    pub department_description: String,
    /// Display name for the doctor account
    #[serde(default = "FixtureConfig::default_doctor_name")]
    pub doctor_name: String,
    /// Medical specialization for the doctor account
    #[serde(default = "FixtureConfig::default_specialization")]
    pub specialization: String,
    /// Contact phone for the doctor account
    #[serde(default = "FixtureConfig::default_doctor_phone")]
    pub doctor_phone: String,
    /// Day of week for the weekly schedule entry
    #[serde(default = "FixtureConfig::default_schedule_day")]
    pub schedule_day: String,
    /// Schedule window start, `HH:MM`
    #[serde(default = "FixtureConfig::default_schedule_start")]
    pub schedule_start: String,
    /// Schedule window end, `HH:MM`
    #[serde(default = "FixtureConfig::default_schedule_end")]
    pub schedule_end: String,
    /// Maximum patients for the schedule window
    #[serde(default = "FixtureConfig::default_schedule_capacity")]
    pub schedule_capacity: u32,
    /// Time slot booked in the patient phase, `HH:MM:SS`
    #[serde(default = "FixtureConfig::default_appointment_time")]
    pub appointment_time: String,
}

impl FixtureConfig {
    fn default_department_name() -> String {
        "Cardiology Test".to_string()
    }

    fn default_department_description() -> String {
        "Heart stuff".to_string()
    }

    fn default_doctor_name() -> String {
        "Dr. Test".to_string()
    }

    fn default_specialization() -> String {
        "Cardiologist".to_string()
    }

    fn default_doctor_phone() -> String {
        "1234567890".to_string()
    }

    fn default_schedule_day() -> String {
        "Monday".to_string()
    }

    fn default_schedule_start() -> String {
        "09:00".to_string()
    }

    fn default_schedule_end() -> String {
        "17:00".to_string()
    }

    fn default_schedule_capacity() -> u32 {
        10
    }

    fn default_appointment_time() -> String {
        "10:00:00".to_string()
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            department_name: Self::default_department_name(),
            department_description: Self::default_department_description(),
            doctor_name: Self::default_doctor_name(),
            specialization: Self::default_specialization(),
            doctor_phone: Self::default_doctor_phone(),
            schedule_day: Self::default_schedule_day(),
            schedule_start: Self::default_schedule_start(),
            schedule_end: Self::default_schedule_end(),
            schedule_capacity: Self::default_schedule_capacity(),
            appointment_time: Self::default_appointment_time(),
        }
    }
}

/// Configuration for a full flow run.
///
/// The doctor credentials serve double duty: the admin phase creates the
/// doctor account with this email and password, and the verification phase
/// logs in with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Admin account used for fixture setup
    #[serde(default = "FlowConfig::default_admin")]
    pub admin: Credentials,
    /// Pre-seeded patient account used for booking
    #[serde(default = "FlowConfig::default_patient")]
    pub patient: Credentials,
    /// Doctor account created by the admin phase and used for verification
    #[serde(default = "FlowConfig::default_doctor")]
    pub doctor: Credentials,
    /// Fixture values
    #[serde(default)]
    pub fixtures: FixtureConfig,
}

impl FlowConfig {
    fn default_admin() -> Credentials {
        Credentials::new("admin@clinic.test", "Admin@123")
    }

    fn default_patient() -> Credentials {
        Credentials::new("patient@clinic.test", "Patient@123")
    }

    fn default_doctor() -> Credentials {
        Credentials::new("dr.test@clinic.test", "Password@123")
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            admin: Self::default_admin(),
            patient: Self::default_patient(),
            doctor: Self::default_doctor(),
            fixtures: FixtureConfig::default(),
        }
    }
}

/// Outcome of the doctor-visibility assertion in phase 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The booked appointment appears in the doctor's list.
    Confirmed,
    /// An appointment was booked but the doctor's list does not show it.
    NotVisible,
    /// No new appointment was booked (duplicate slot or rejected booking),
    /// so there was nothing to verify.
    Skipped,
}

/// Identifiers and outcomes produced by a completed flow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReport {
    /// Identifier of the ensured department
    pub department_id: ResourceId,
    /// Identifier of the ensured doctor
    pub doctor_id: ResourceId,
    /// Identifier of the appointment booked in the patient phase, if any
    pub appointment_id: Option<ResourceId>,
    /// Outcome of the doctor-visibility assertion
    pub verification: Verification,
}

/// Runs the full three-phase check flow against the clinic API.
///
/// The flow is idempotent: fixtures left behind by a previous run are
/// reused via the duplicate-lookup path, and a duplicate appointment slot
/// is tolerated. Fatal errors (login failure, non-duplicate creation
/// failure, lookup failure after a duplicate report) terminate the run.
///
/// # Errors
///
/// Returns [`Error::Client`] for failed API calls,
/// [`Error::FixtureNotFound`] when the duplicate fallback finds no match,
/// and [`Error::ScheduleUnavailable`] when the doctor's schedule cannot be
/// established.
pub async fn run_flow(client: &ClinicClient, config: &FlowConfig) -> Result<FlowReport, Error> {
    let (department_id, doctor_id) = admin_phase(client, config).await?;
    let appointment_id = patient_phase(client, config, doctor_id).await?;
    let verification = verification_phase(client, config, appointment_id).await?;

    info!(
        department_id,
        doctor_id,
        appointment_id,
        verification = ?verification,
        "Check flow completed"
    );
    Ok(FlowReport {
        department_id,
        doctor_id,
        appointment_id,
        verification,
    })
}

/// Logs in as admin and ensures the department, doctor, and schedule
/// fixtures exist. Returns the department and doctor identifiers.
#[instrument(skip(client, config))]
async fn admin_phase(
    client: &ClinicClient,
    config: &FlowConfig,
) -> Result<(ResourceId, ResourceId), Error> {
    info!("Starting admin phase");
    let admin = client
        .login(&config.admin.email, &config.admin.password)
        .await?;

    let fixtures = &config.fixtures;
    let department = NewDepartment {
        department_name: fixtures.department_name.clone(),
        description: fixtures.department_description.clone(),
    };
    let department_id = ensure_fixture(
        "department",
        || client.create_department(&admin, &department),
        || client.list_departments(&admin),
        |d: &clinic_client::Department| d.department_name == fixtures.department_name,
        |d| d.department_id,
    )
    .await?;

    let doctor = NewDoctor {
        user_name: fixtures.doctor_name.clone(),
        name: fixtures.doctor_name.clone(),
        email: config.doctor.email.clone(),
        password: config.doctor.password.clone(),
        specialization: fixtures.specialization.clone(),
        department_id,
        phone: fixtures.doctor_phone.clone(),
        status: "active".to_string(),
        schedule: [(
            "mon".to_string(),
            vec![fixtures.schedule_start.clone(), fixtures.schedule_end.clone()],
        )]
        .into_iter()
        .collect(),
    };
    let doctor_id = ensure_fixture(
        "doctor",
        || client.create_doctor(&admin, &doctor),
        || client.list_doctors(&admin),
        |d: &clinic_client::Doctor| d.login_email == config.doctor.email,
        |d| d.doctor_id,
    )
    .await?;

    ensure_schedule(client, &admin, config, doctor_id).await?;

    Ok((department_id, doctor_id))
}

/// Ensures the doctor has a schedule entry for the configured day.
///
/// The doctor's schedule is listed first and reused when the day is
/// already present. A rejected create is only a warning; the day must
/// still be present on re-listing, otherwise the flow cannot book against
/// it and the run fails.
async fn ensure_schedule(
    client: &ClinicClient,
    session: &Session,
    config: &FlowConfig,
    doctor_id: ResourceId,
) -> Result<(), Error> {
    let fixtures = &config.fixtures;
    info!(doctor_id, day = %fixtures.schedule_day, "Ensuring doctor schedule exists");

    let schedule = client.list_doctor_schedule(session, doctor_id).await?;
    if schedule.iter().any(|s| s.day == fixtures.schedule_day) {
        info!(day = %fixtures.schedule_day, "Schedule already exists");
        return Ok(());
    }

    let entry = NewScheduleEntry {
        doctor_id,
        day: fixtures.schedule_day.clone(),
        start_time: fixtures.schedule_start.clone(),
        end_time: fixtures.schedule_end.clone(),
        max_patients: fixtures.schedule_capacity,
    };
    match client.create_schedule_entry(session, &entry).await {
        Ok(CreateOutcome::Created(id)) => {
            info!(schedule_id = id, day = %entry.day, "Created schedule entry");
            return Ok(());
        }
        Ok(CreateOutcome::Duplicate(message)) => {
            info!(%message, "Schedule entry already exists");
        }
        Err(clinic_client::Error::Api { message, .. }) => {
            warn!(%message, "Failed to create schedule entry");
        }
        Err(error) => return Err(error.into()),
    }

    // The create call did not confirm the entry; trust the list instead.
    let schedule = client.list_doctor_schedule(session, doctor_id).await?;
    if schedule.iter().any(|s| s.day == fixtures.schedule_day) {
        Ok(())
    } else {
        Err(Error::ScheduleUnavailable {
            doctor_id,
            day: fixtures.schedule_day.clone(),
        })
    }
}

/// Logs in as the patient and books tomorrow's appointment with the
/// doctor. A duplicate slot or a rejected booking is tolerated and yields
/// `None`; transport failures remain fatal.
#[instrument(skip(client, config))]
async fn patient_phase(
    client: &ClinicClient,
    config: &FlowConfig,
    doctor_id: ResourceId,
) -> Result<Option<ResourceId>, Error> {
    info!("Starting patient phase");
    let patient = client
        .login(&config.patient.email, &config.patient.password)
        .await?;

    let appointment = NewAppointment {
        doctor_id,
        appointment_date: tomorrow(),
        appointment_time: config.fixtures.appointment_time.clone(),
    };
    match client.book_appointment(&patient, &appointment).await {
        Ok(CreateOutcome::Created(id)) => {
            info!(appointment_id = id, "Booked appointment");
            Ok(Some(id))
        }
        Ok(CreateOutcome::Duplicate(message)) => {
            info!(%message, "Appointment slot already booked, continuing");
            Ok(None)
        }
        Err(clinic_client::Error::Api { message, .. }) => {
            warn!(%message, "Failed to book appointment, continuing");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

/// Logs in as the doctor and asserts the booked appointment is visible in
/// the doctor's appointment list.
#[instrument(skip(client, config))]
async fn verification_phase(
    client: &ClinicClient,
    config: &FlowConfig,
    appointment_id: Option<ResourceId>,
) -> Result<Verification, Error> {
    info!("Starting doctor verification phase");
    let doctor = client
        .login(&config.doctor.email, &config.doctor.password)
        .await?;

    let appointments = client.list_appointments(&doctor).await?;
    match appointment_id {
        None => {
            info!("No new appointment was booked, skipping visibility check");
            Ok(Verification::Skipped)
        }
        Some(id) if appointments.iter().any(|a| a.appointment_id == id) => {
            info!(appointment_id = id, "Doctor sees the new appointment");
            Ok(Verification::Confirmed)
        }
        Some(id) => {
            error!(appointment_id = id, "Doctor cannot see the booked appointment");
            Ok(Verification::NotVisible)
        }
    }
}

/// Tomorrow's date in the local timezone, formatted `YYYY-MM-DD`.
fn tomorrow() -> String {
    let today = Local::now().date_naive();
    let target = today.succ_opt().unwrap_or(today);
    target.format("%Y-%m-%d").to_string()
}
