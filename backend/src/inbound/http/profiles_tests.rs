//! Tests for the profile HTTP handlers.

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};

use super::*;
use crate::domain::ports::{MockProfileCommand, ProfileFieldsOutcome};
use crate::inbound::http::state::HttpState;

fn test_app(
    mock: MockProfileCommand,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(mock));
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(update_profile)
            .service(update_email),
    )
}

const BOUNDARY: &str = "test-boundary";

fn text_part(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

fn file_part(name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> String {
    let mut part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
    );
    part.push_str(std::str::from_utf8(bytes).expect("test payload is ascii"));
    part.push_str("\r\n");
    part
}

fn close_parts(parts: &[String]) -> String {
    let mut body = parts.concat();
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

#[actix_web::test]
async fn update_profile_passes_fields_to_the_service() {
    let mut mock = MockProfileCommand::new();
    mock.expect_update_fields()
        .withf(|request| {
            request.kind == ProfileKind::Staff
                && request.external_id.as_str() == "S1"
                && request.name.as_deref() == Some("Alicia")
                && request.phone.is_none()
                && request.photo.is_none()
        })
        .times(1)
        .return_once(|_| Ok(ProfileFieldsOutcome { photo_url: None }));

    let app = actix_test::init_service(test_app(mock)).await;
    let body = close_parts(&[text_part("external_id", "S1"), text_part("name", "Alicia")]);
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/profiles/staff")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
        .to_request();

    let response: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(response["message"], "Staff updated successfully");
    assert_eq!(response["profile_url"], Value::Null);
}

#[actix_web::test]
async fn update_profile_forwards_the_photo_payload() {
    let mut mock = MockProfileCommand::new();
    mock.expect_update_fields()
        .withf(|request| {
            request.kind == ProfileKind::Member
                && request
                    .photo
                    .as_ref()
                    .is_some_and(|photo| photo.extension() == "png" && !photo.is_empty())
        })
        .times(1)
        .return_once(|_| {
            Ok(ProfileFieldsOutcome {
                photo_url: Some("/storage/profiles/fresh.png".into()),
            })
        });

    let app = actix_test::init_service(test_app(mock)).await;
    let body = close_parts(&[
        text_part("external_id", "M7"),
        file_part("profile", "selfie.png", "image/png", b"png-bytes"),
    ]);
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/profiles/member")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
        .to_request();

    let response: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(response["message"], "Member updated successfully");
    assert_eq!(response["profile_url"], "/storage/profiles/fresh.png");
}

#[actix_web::test]
async fn unknown_kind_segment_is_rejected_before_the_service_runs() {
    let mut mock = MockProfileCommand::new();
    mock.expect_update_email().times(0);

    let app = actix_test::init_service(test_app(mock)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/profiles/admin/email")
        .set_json(json!({ "id": "S1", "email": "a@example.com" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"]["field"], "kind");
}

#[actix_web::test]
async fn invalid_email_is_rejected_before_the_service_runs() {
    let mut mock = MockProfileCommand::new();
    mock.expect_update_email().times(0);

    let app = actix_test::init_service(test_app(mock)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/profiles/staff/email")
        .set_json(json!({ "id": "S1", "email": "not-an-email" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"]["field"], "email");
}

#[actix_web::test]
async fn successful_email_update_returns_the_confirmation_message() {
    let mut mock = MockProfileCommand::new();
    mock.expect_update_email()
        .withf(|kind, id, email| {
            *kind == ProfileKind::Member
                && id.as_str() == "M7"
                && email.as_str() == "new@example.com"
        })
        .times(1)
        .return_once(|_, _, _| Ok(()));

    let app = actix_test::init_service(test_app(mock)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/profiles/member/email")
        .set_json(json!({ "id": "M7", "email": "new@example.com" }))
        .to_request();

    let response: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(response["message"], "Email updated successfully.");
}

#[actix_web::test]
async fn domain_validation_failures_map_to_400_with_details() {
    let mut mock = MockProfileCommand::new();
    mock.expect_update_email().times(1).return_once(|_, _, _| {
        Err(Error::invalid_request("email is already registered")
            .with_details(json!({ "field": "email", "constraint": "unique" })))
    });

    let app = actix_test::init_service(test_app(mock)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/profiles/staff/email")
        .set_json(json!({ "id": "S1", "email": "taken@example.com" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "email is already registered");
    assert_eq!(body["error"]["constraint"], "unique");
}

#[actix_web::test]
async fn unknown_profile_maps_to_404() {
    let mut mock = MockProfileCommand::new();
    mock.expect_update_fields()
        .times(1)
        .return_once(|_| Err(Error::not_found("staff profile not found")));

    let app = actix_test::init_service(test_app(mock)).await;
    let body = close_parts(&[text_part("external_id", "missing")]);
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/profiles/staff")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
