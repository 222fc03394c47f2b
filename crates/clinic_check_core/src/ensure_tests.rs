use super::*;
use std::cell::Cell;
use std::future::ready;

use clinic_client::Department;

fn department(id: i64, name: &str) -> Department {
    Department {
        department_id: id,
        department_name: name.to_string(),
        description: None,
    }
}

#[tokio::test]
async fn test_created_fixture_skips_lookup() {
    let listed = Cell::new(false);

    let result = ensure_fixture(
        "department",
        || ready(Ok::<_, clinic_client::Error>(CreateOutcome::Created(5))),
        || {
            listed.set(true);
            ready(Ok::<_, clinic_client::Error>(Vec::<Department>::new()))
        },
        |d: &Department| d.department_name == "Cardiology Test",
        |d| d.department_id,
    )
    .await;

    assert_eq!(result.unwrap(), 5);
    assert!(!listed.get(), "lookup must not run when creation succeeds");
}

#[tokio::test]
async fn test_duplicate_falls_back_to_lookup() {
    let result = ensure_fixture(
        "department",
        || {
            ready(Ok::<_, clinic_client::Error>(CreateOutcome::Duplicate(
                "already exists".to_string(),
            )))
        },
        || {
            ready(Ok::<_, clinic_client::Error>(vec![
                department(4, "Neurology"),
                department(5, "Cardiology Test"),
            ]))
        },
        |d: &Department| d.department_name == "Cardiology Test",
        |d| d.department_id,
    )
    .await;

    assert_eq!(result.unwrap(), 5);
}

#[tokio::test]
async fn test_duplicate_without_match_is_fixture_not_found() {
    let result = ensure_fixture(
        "department",
        || {
            ready(Ok::<_, clinic_client::Error>(CreateOutcome::Duplicate(
                "already exists".to_string(),
            )))
        },
        || {
            ready(Ok::<_, clinic_client::Error>(vec![department(
                4,
                "Neurology",
            )]))
        },
        |d: &Department| d.department_name == "Cardiology Test",
        |d| d.department_id,
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::FixtureNotFound { kind: "department" })
    ));
}

#[tokio::test]
async fn test_creation_failure_propagates() {
    let result = ensure_fixture(
        "department",
        || {
            ready(Err::<CreateOutcome, _>(clinic_client::Error::Api {
                route: "/departments".to_string(),
                message: "Validation failed".to_string(),
            }))
        },
        || ready(Ok::<_, clinic_client::Error>(Vec::<Department>::new())),
        |d: &Department| d.department_name == "Cardiology Test",
        |d| d.department_id,
    )
    .await;

    assert!(matches!(result, Err(Error::Client(_))));
}

#[tokio::test]
async fn test_lookup_failure_propagates() {
    let result = ensure_fixture(
        "department",
        || {
            ready(Ok::<_, clinic_client::Error>(CreateOutcome::Duplicate(
                "already exists".to_string(),
            )))
        },
        || {
            ready(Err::<Vec<Department>, _>(clinic_client::Error::Api {
                route: "/departments".to_string(),
                message: "Not authorized".to_string(),
            }))
        },
        |d: &Department| d.department_name == "Cardiology Test",
        |d| d.department_id,
    )
    .await;

    assert!(matches!(result, Err(Error::Client(_))));
}
