use super::*;
use serde_json::json;

#[test]
fn test_department_deserializes_with_unknown_fields() {
    let department: Department = serde_json::from_value(json!({
        "department_id": 5,
        "department_name": "Cardiology Test",
        "description": "Heart stuff",
        "created_at": "2026-08-29 10:00:00"
    }))
    .unwrap();

    assert_eq!(department.department_id, 5);
    assert_eq!(department.department_name, "Cardiology Test");
    assert_eq!(department.description.as_deref(), Some("Heart stuff"));
}

#[test]
fn test_doctor_deserializes_with_minimal_fields() {
    let doctor: Doctor = serde_json::from_value(json!({
        "doctor_id": 7,
        "login_email": "dr.test@clinic.test"
    }))
    .unwrap();

    assert_eq!(doctor.doctor_id, 7);
    assert_eq!(doctor.login_email, "dr.test@clinic.test");
    assert!(doctor.name.is_none());
    assert!(doctor.department_id.is_none());
}

#[test]
fn test_schedule_entry_only_requires_day() {
    let entry: ScheduleEntry = serde_json::from_value(json!({ "day": "Monday" })).unwrap();

    assert_eq!(entry.day, "Monday");
    assert!(entry.schedule_id.is_none());
    assert!(entry.max_patients.is_none());
}

#[test]
fn test_appointment_deserializes() {
    let appointment: Appointment = serde_json::from_value(json!({
        "appointment_id": 99,
        "doctor_id": 7,
        "appointment_date": "2026-08-30",
        "appointment_time": "10:00:00",
        "status": "pending"
    }))
    .unwrap();

    assert_eq!(appointment.appointment_id, 99);
    assert_eq!(appointment.doctor_id, Some(7));
    assert_eq!(appointment.appointment_time.as_deref(), Some("10:00:00"));
}

#[test]
fn test_new_doctor_serializes_inline_schedule() {
    let doctor = NewDoctor {
        user_name: "Dr. Test".to_string(),
        name: "Dr. Test".to_string(),
        email: "dr.test@clinic.test".to_string(),
        password: "Password@123".to_string(),
        specialization: "Cardiologist".to_string(),
        department_id: 5,
        phone: "1234567890".to_string(),
        status: "active".to_string(),
        schedule: [(
            "mon".to_string(),
            vec!["09:00".to_string(), "17:00".to_string()],
        )]
        .into_iter()
        .collect(),
    };

    let value = serde_json::to_value(&doctor).unwrap();

    assert_eq!(value["department_id"], 5);
    assert_eq!(value["schedule"]["mon"], json!(["09:00", "17:00"]));
}

#[test]
fn test_new_appointment_serializes() {
    let appointment = NewAppointment {
        doctor_id: 7,
        appointment_date: "2026-08-30".to_string(),
        appointment_time: "10:00:00".to_string(),
    };

    let value = serde_json::to_value(&appointment).unwrap();

    assert_eq!(
        value,
        json!({
            "doctor_id": 7,
            "appointment_date": "2026-08-30",
            "appointment_time": "10:00:00"
        })
    );
}
