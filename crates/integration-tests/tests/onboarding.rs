//! Onboarding survey over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use fashion_assistant_core::Style;
use fashion_assistant_integration_tests::{TestApp, new_client};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_first_visit_lands_on_step_one() {
    let app = TestApp::spawn().await;

    let resp = app.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/onboarding");
    let body = resp.text().await.unwrap();
    assert!(body.contains("Step 1 of 3"));
    assert!(body.contains("Unisex"));
}

#[tokio::test]
async fn test_answering_every_question() {
    let app = TestApp::spawn().await;

    let resp = app.post_form("/onboarding/gender", &[("value", "Women")]).await;
    assert!(resp.text().await.unwrap().contains("Step 2 of 3"));

    let resp = app.post_form("/onboarding/price", &[("value", "Mid-range")]).await;
    assert!(resp.text().await.unwrap().contains("Step 3 of 3"));

    // Answers so far are already stored, completion is not
    let prefs = app.preferences().await;
    assert_eq!(prefs["userGender"], "Women");
    assert_eq!(prefs["userPrice"], "Mid-range");
    assert_eq!(prefs["onboardingComplete"], false);

    app.post_form("/onboarding/styles/toggle", &[("value", "Casual")])
        .await;
    let resp = app
        .post_form("/onboarding/styles/toggle", &[("value", "Vintage")])
        .await;
    let body = resp.text().await.unwrap();
    assert!(body.contains("aria-pressed=\"true\""));

    let resp = app.post_form("/onboarding/styles/submit", &[]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/search");

    let prefs = app.preferences().await;
    assert_eq!(
        prefs,
        json!({
            "onboardingComplete": true,
            "userGender": "Women",
            "userPrice": "Mid-range",
            "userStyles": ["Casual", "Vintage"]
        })
    );
}

#[tokio::test]
async fn test_skipping_everything_completes_with_empty_answers() {
    let app = TestApp::spawn().await;
    app.skip_onboarding().await;

    let resp = app.get("/").await;
    assert_eq!(resp.url().path(), "/search");

    let prefs = app.preferences().await;
    assert_eq!(
        prefs,
        json!({
            "onboardingComplete": true,
            "userGender": "",
            "userPrice": "",
            "userStyles": []
        })
    );
}

#[tokio::test]
async fn test_unsubmitted_styles_are_discarded_on_skip() {
    let app = TestApp::spawn().await;
    app.post_form("/onboarding/skip", &[]).await;
    app.post_form("/onboarding/skip", &[]).await;

    for style in Style::ALL {
        app.post_form("/onboarding/styles/toggle", &[("value", style.label())])
            .await;
    }
    app.post_form("/onboarding/skip", &[]).await;

    let prefs = app.preferences().await;
    assert_eq!(prefs["onboardingComplete"], true);
    assert_eq!(prefs["userStyles"], json!([]));
}

#[tokio::test]
async fn test_submit_without_styles_is_rejected() {
    let app = TestApp::spawn().await;
    app.post_form("/onboarding/skip", &[]).await;
    app.post_form("/onboarding/skip", &[]).await;

    let resp = app.post_form("/onboarding/styles/submit", &[]).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app.get("/onboarding").await;
    assert!(resp.text().await.unwrap().contains("Step 3 of 3"));
    assert_eq!(app.preferences().await["onboardingComplete"], false);
}

#[tokio::test]
async fn test_actions_after_completion_are_rejected() {
    let app = TestApp::spawn().await;
    app.skip_onboarding().await;

    let resp = app.post_form("/onboarding/skip", &[]).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app.post_form("/onboarding/gender", &[("value", "Men")]).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(app.preferences().await["userGender"], "");
}

#[tokio::test]
async fn test_unknown_choice_is_bad_request() {
    let app = TestApp::spawn().await;

    let resp = app.post_form("/onboarding/gender", &[("value", "Kids")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(app.get("/onboarding").await.text().await.unwrap().contains("Step 1 of 3"));
}

#[tokio::test]
async fn test_sessions_do_not_share_preferences() {
    let app = TestApp::spawn().await;
    app.post_form("/onboarding/gender", &[("value", "Men")]).await;

    let other = new_client();
    let prefs: serde_json::Value = other
        .get(app.url("/api/preferences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(prefs["userGender"], "");
    assert_eq!(app.preferences().await["userGender"], "Men");
}

#[tokio::test]
async fn test_clearing_completion_reopens_the_survey() {
    let app = TestApp::spawn().await;
    app.skip_onboarding().await;

    app.patch_preferences(json!({ "onboardingComplete": false }))
        .await;

    let resp = app.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/onboarding");
    assert!(resp.text().await.unwrap().contains("Step 1 of 3"));

    app.post_form("/onboarding/gender", &[("value", "Women")])
        .await;
    let resp = app.post_form("/onboarding/skip", &[]).await;
    assert!(resp.text().await.unwrap().contains("Step 3 of 3"));
    let resp = app.post_form("/onboarding/skip", &[]).await;
    assert_eq!(resp.url().path(), "/search");

    let prefs = app.preferences().await;
    assert_eq!(prefs["onboardingComplete"], true);
    assert_eq!(prefs["userGender"], "Women");
}
