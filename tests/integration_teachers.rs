mod common;

use common::{TestApp, VALID_EMAIL, VALID_PASSWORD, test_app};
use maktab_models::ids::TeacherId;
use maktab_models::teachers::{CreateTeacherRequest, UpdateTeacherRequest};

async fn signed_in_app() -> TestApp {
    let app = test_app().await;
    app.ctx
        .session
        .login(VALID_EMAIL, VALID_PASSWORD)
        .await
        .unwrap();
    app
}

#[tokio::test]
async fn test_fetch_teachers_holds_the_roster() {
    let app = test_app().await;

    app.ctx.teachers.fetch_teachers().await.unwrap();

    let snapshot = app.ctx.teachers.snapshot();
    assert_eq!(snapshot.teachers.len(), 2);
    assert!(!snapshot.loading);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_create_and_update_round_trip() {
    let app = signed_in_app().await;

    let request = CreateTeacherRequest {
        name: "Ustadha Amina".to_string(),
        email: "amina@example.com".to_string(),
        phone: "+15550102".to_string(),
        specialization: Some("Hifz".to_string()),
    };
    let created = app.ctx.teachers.create_teacher(&request).await.unwrap();
    assert_eq!(created.name, "Ustadha Amina");

    let update = UpdateTeacherRequest {
        phone: Some("+15550199".to_string()),
        ..Default::default()
    };
    let updated = app
        .ctx
        .teachers
        .update_teacher(&created.id, &update)
        .await
        .unwrap();
    assert_eq!(updated.phone, "+15550199");
    // Untouched fields survive the partial update.
    assert_eq!(updated.name, "Ustadha Amina");
}

#[tokio::test]
async fn test_create_with_invalid_email_never_reaches_the_backend() {
    let app = signed_in_app().await;
    let before = app.backend.lock().unwrap().teachers.len();

    let request = CreateTeacherRequest {
        name: "Ustadh Bilal".to_string(),
        email: "not-an-email".to_string(),
        phone: "+15550103".to_string(),
        specialization: None,
    };
    let err = app.ctx.teachers.create_teacher(&request).await.unwrap_err();
    assert!(err.to_string().contains("email"));

    assert_eq!(app.backend.lock().unwrap().teachers.len(), before);
    // Recorded for display as well as rethrown.
    assert!(app.ctx.teachers.snapshot().error.is_some());
}

#[tokio::test]
async fn test_delete_removes_the_teacher_server_side() {
    let app = signed_in_app().await;

    app.ctx
        .teachers
        .delete_teacher(&TeacherId::from("t1"))
        .await
        .unwrap();

    app.ctx.teachers.fetch_teachers().await.unwrap();
    let snapshot = app.ctx.teachers.snapshot();
    assert_eq!(snapshot.teachers.len(), 1);
    assert!(
        !snapshot
            .teachers
            .iter()
            .any(|teacher| teacher.id.as_str() == "t1")
    );
}

#[tokio::test]
async fn test_missing_teacher_point_lookup_swallows_the_error() {
    let app = test_app().await;

    let found = app.ctx.teachers.get_teacher(&TeacherId::from("nope")).await;
    assert!(found.is_none());
    assert_eq!(
        app.ctx.teachers.snapshot().error.as_deref(),
        Some("Teacher not found")
    );
}

#[tokio::test]
async fn test_mutation_failure_is_recorded_and_rethrown() {
    let app = signed_in_app().await;
    app.backend.lock().unwrap().fail_mutations_with = Some("DB unavailable".to_string());

    let err = app
        .ctx
        .teachers
        .delete_teacher(&TeacherId::from("t1"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "DB unavailable");
    assert_eq!(
        app.ctx.teachers.snapshot().error.as_deref(),
        Some("DB unavailable")
    );
}
