//! Onboarding wizard commands over fake gateways

mod support;

use serde_json::json;
use talentfolio_core::flows::{EducationDraft, ExperienceDraft, OnboardingStep};
use talentfolio_domain::constants::{DEFAULT_WHATSAPP_LINK, IIT_WHATSAPP_LINK};
use talentfolio_domain::{PortalError, Upload, YearMonth};
use talentfolio_lib as app;

use support::signed_in;

fn ym(year: u16, month: u8) -> Option<YearMonth> {
    YearMonth::new(year, month)
}

fn education(college: &str) -> EducationDraft {
    EducationDraft {
        college: college.into(),
        degree: "B.Tech".into(),
        cgpa: "8.4".into(),
        graduation_date: ym(2024, 5),
        ..EducationDraft::default()
    }
}

#[tokio::test]
async fn resume_step_requires_a_pdf() {
    let h = signed_in().await;

    let missing = app::upload_onboarding_resume(&h.ctx, None).await.unwrap_err();
    assert!(matches!(missing, PortalError::Validation(_)));

    let wrong = app::upload_onboarding_resume(&h.ctx, Some(Upload::new("cv.png", "image/png", vec![1])))
        .await
        .unwrap_err();
    assert!(matches!(wrong, PortalError::Validation(_)));
    assert_eq!(app::onboarding_step(&h.ctx).await, OnboardingStep::Resume);

    h.users.respond("upload_resume", json!({"url": "https://cdn.example/cv.pdf"}));
    let step = app::upload_onboarding_resume(
        &h.ctx,
        Some(Upload::new("cv.pdf", "application/pdf", vec![1])),
    )
    .await
    .unwrap();
    assert_eq!(step, OnboardingStep::Background);
    assert_eq!(h.ctx.store.user().unwrap().resume.as_deref(), Some("https://cdn.example/cv.pdf"));
}

#[tokio::test]
async fn full_wizard_saves_background_and_finishes() {
    let h = signed_in().await;
    assert_eq!(app::skip_onboarding_resume(&h.ctx).await.unwrap(), OnboardingStep::Background);

    app::set_education_draft(&h.ctx, 0, education("IIT Bombay")).await.unwrap();
    let blank = app::add_experience_draft(&h.ctx).await;
    let job = app::add_experience_draft(&h.ctx).await;
    app::set_experience_draft(
        &h.ctx,
        job,
        ExperienceDraft {
            name: "Acme".into(),
            role: "Engineer".into(),
            country: "India".into(),
            start_date: ym(2024, 7),
            current: true,
            ..ExperienceDraft::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(blank, 0);

    h.users.respond("create_education", json!({"_id": "e1", "college": "IIT Bombay", "degree": "B.Tech"}));
    h.users.respond(
        "create_work",
        json!({"_id": "w1", "category": "WORK", "name": "Acme", "description": "",
               "start_date": "2024-07", "end_date": "2025-01"}),
    );

    let link = app::submit_background(&h.ctx).await.unwrap();
    assert_eq!(link, IIT_WHATSAPP_LINK);
    assert_eq!(h.users.calls_to("create_work").len(), 1, "blank row is dropped");
    assert_eq!(h.users.calls_to("create_work")[0].body["work"]["country"], "IN");
    assert_eq!(app::onboarding_step(&h.ctx).await, OnboardingStep::Community);

    app::finish_onboarding(&h.ctx).await.unwrap();
    assert!(h.ctx.store.user().unwrap().is_onboarded);
    assert_eq!(h.navigator.last().as_deref(), Some("/profile"));
}

#[tokio::test]
async fn invalid_rows_are_reported_by_position() {
    let h = signed_in().await;
    app::skip_onboarding_resume(&h.ctx).await.unwrap();
    app::set_education_draft(&h.ctx, 0, education("MIT")).await.unwrap();
    let second = app::add_education_draft(&h.ctx).await;
    app::set_education_draft(&h.ctx, second, EducationDraft { college: "Caltech".into(), ..EducationDraft::default() })
        .await
        .unwrap();

    let err = app::submit_background(&h.ctx).await.unwrap_err();

    assert_eq!(err.user_message(), "Please fill in Degree for education 2.");
    assert!(h.users.calls_to("create_education").is_empty());
}

#[tokio::test]
async fn last_education_row_cannot_be_removed() {
    let h = signed_in().await;

    assert!(!app::remove_education_draft(&h.ctx, 0).await);
    app::add_education_draft(&h.ctx).await;
    assert!(app::remove_education_draft(&h.ctx, 1).await);
    assert_eq!(app::education_drafts(&h.ctx).await.len(), 1);

    let err = app::set_experience_draft(&h.ctx, 3, ExperienceDraft::default()).await.unwrap_err();
    assert!(matches!(err, PortalError::Validation(_)));
}

#[tokio::test]
async fn partial_failure_keeps_created_entries() {
    let h = signed_in().await;
    app::skip_onboarding_resume(&h.ctx).await.unwrap();
    app::set_education_draft(&h.ctx, 0, education("Stanford")).await.unwrap();
    let second = app::add_education_draft(&h.ctx).await;
    app::set_education_draft(&h.ctx, second, education("Oxford")).await.unwrap();

    h.users.respond("create_education", json!({"_id": "e1", "college": "Stanford", "degree": "B.Tech"}));
    h.users.fail("create_education", "Duplicate education");

    let err = app::submit_background(&h.ctx).await.unwrap_err();

    assert_eq!(err.user_message(), "Duplicate education");
    assert_eq!(h.ctx.store.user().unwrap().education.len(), 1);
    assert_eq!(app::onboarding_step(&h.ctx).await, OnboardingStep::Background);
}

#[tokio::test]
async fn other_colleges_get_the_general_community() {
    let h = signed_in().await;
    app::skip_onboarding_resume(&h.ctx).await.unwrap();
    app::set_education_draft(&h.ctx, 0, education("University of Delhi")).await.unwrap();
    h.users.respond("create_education", json!({"_id": "e1", "college": "University of Delhi"}));

    let link = app::submit_background(&h.ctx).await.unwrap();

    assert_eq!(link, DEFAULT_WHATSAPP_LINK);
}

#[tokio::test]
async fn finishing_early_is_invalid_state() {
    let h = signed_in().await;

    let err = app::finish_onboarding(&h.ctx).await.unwrap_err();

    assert!(matches!(err, PortalError::InvalidState(_)));
}
