//! HTTP-level integration tests for the generic content collections
//! (`/services`, `/about`, `/team`, `/portfolio`).

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, expired_token, foreign_token, get, patch_json_auth,
    post_json, post_json_auth, put_json_auth, register_and_login,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

/// Register, log in, create a service with the token, and see it listed.
#[tokio::test]
async fn admin_creates_service_end_to_end() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let response = post_json_auth(
        app.router(),
        "/api/services",
        &token,
        json!({ "title": "X", "description": "Y" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["_id"].as_str().expect("created record has an _id");
    assert!(!id.is_empty());

    let response = get(app.router(), "/api/services").await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["_id"], id);
    assert_eq!(list[0]["title"], "X");
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_record_is_returned_by_get_one() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let payload = json!({
        "name": "Marta Ruiz",
        "role": "Lead photographer",
        "bio": "Weddings and portraits",
    });
    let response = post_json_auth(app.router(), "/api/team", &token, payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["_id"].as_str().unwrap();

    let response = get(app.router(), &format!("/api/team/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["_id"], id);
    assert_eq!(fetched["name"], "Marta Ruiz");
    assert_eq!(fetched["role"], "Lead photographer");
    assert_eq!(fetched["bio"], "Weddings and portraits");
    assert!(fetched["createdAt"].is_string());
    assert!(fetched["updatedAt"].is_string());
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let app = build_test_app();

    for uri in ["/api/services", "/api/about", "/api/team", "/api/portfolio"] {
        let response = get(app.router(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_json(response).await, json!([]), "{uri}");
    }
}

#[tokio::test]
async fn list_keeps_insertion_order() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    for title in ["Weddings", "Portraits", "Events"] {
        let response = post_json_auth(
            app.router(),
            "/api/services",
            &token,
            json!({ "title": title, "description": "..." }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let list = body_json(get(app.router(), "/api/services").await).await;
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Weddings", "Portraits", "Events"]);
}

#[tokio::test]
async fn unknown_id_is_404_with_message() {
    let app = build_test_app();

    let response = get(app.router(), "/api/portfolio/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["message"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn missing_required_field_is_400() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    // Portfolio items need an image.
    let response = post_json_auth(
        app.router(),
        "/api/portfolio",
        &token,
        json!({ "title": "Spring", "description": "Outdoor shoot" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("imageUrl"));
}

#[tokio::test]
async fn blank_required_field_is_validation_error() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let response = post_json_auth(
        app.router(),
        "/api/services",
        &token,
        json!({ "title": "   ", "description": "Y" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "title: must not be empty");
}

#[tokio::test]
async fn client_supplied_id_is_ignored() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let response = post_json_auth(
        app.router(),
        "/api/about",
        &token,
        json!({ "_id": "chosen", "title": "Our story", "description": "Since 2010" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_ne!(created["_id"], "chosen");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_updates_only_sent_fields() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let created = body_json(
        post_json_auth(
            app.router(),
            "/api/services",
            &token,
            json!({ "title": "Weddings", "description": "Full day", "icon": "rings" }),
        )
        .await,
    )
    .await;
    let id = created["_id"].as_str().unwrap();

    let response = patch_json_auth(
        app.router(),
        &format!("/api/services/{id}"),
        &token,
        json!({ "description": "Half or full day" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["_id"], id);
    assert_eq!(updated["title"], "Weddings");
    assert_eq!(updated["icon"], "rings");
    assert_eq!(updated["description"], "Half or full day");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let fetched = body_json(get(app.router(), &format!("/api/services/{id}")).await).await;
    assert_eq!(fetched["description"], "Half or full day");
    assert_eq!(fetched["title"], "Weddings");
}

#[tokio::test]
async fn put_behaves_like_patch() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let created = body_json(
        post_json_auth(
            app.router(),
            "/api/team",
            &token,
            json!({ "name": "Leo", "role": "Assistant" }),
        )
        .await,
    )
    .await;
    let id = created["_id"].as_str().unwrap();

    let response = put_json_auth(
        app.router(),
        &format!("/api/team/{id}"),
        &token,
        json!({ "role": "Second shooter" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Leo");
    assert_eq!(updated["role"], "Second shooter");
}

#[tokio::test]
async fn update_of_unknown_id_is_404() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let response = patch_json_auth(
        app.router(),
        "/api/services/nope",
        &token,
        json!({ "title": "Ghost" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_blank_title_is_rejected() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let created = body_json(
        post_json_auth(
            app.router(),
            "/api/services",
            &token,
            json!({ "title": "Weddings", "description": "Full day" }),
        )
        .await,
    )
    .await;
    let id = created["_id"].as_str().unwrap();

    let response = patch_json_auth(
        app.router(),
        &format!("/api/services/{id}"),
        &token,
        json!({ "title": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let created = body_json(
        post_json_auth(
            app.router(),
            "/api/portfolio",
            &token,
            json!({
                "title": "Spring",
                "description": "Outdoor shoot",
                "imageUrl": "/uploads/image-1.png",
            }),
        )
        .await,
    )
    .await;
    let id = created["_id"].as_str().unwrap();

    let response = delete_auth(app.router(), &format!("/api/portfolio/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["deleted"], true);
    assert!(json["message"].is_string());

    let response = get(app.router(), &format!("/api/portfolio/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_unknown_id_is_ok_but_flagged() {
    let app = build_test_app();
    let token = register_and_login(&app).await;

    let response = delete_auth(app.router(), "/api/services/nope", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["deleted"], false);
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn writes_without_token_are_401() {
    let app = build_test_app();
    let payload = json!({ "title": "X", "description": "Y" });

    let response = post_json(app.router(), "/api/services", payload).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Authentication failed.");

    let response = post_json(app.router(), "/api/team", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_401() {
    let app = build_test_app();

    let response = post_json_auth(
        app.router(),
        "/api/services",
        &expired_token(),
        json!({ "title": "X", "description": "Y" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_401() {
    let app = build_test_app();

    let response = delete_auth(app.router(), "/api/services/anything", &foreign_token()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_401() {
    let app = build_test_app();

    let response = patch_json_auth(
        app.router(),
        "/api/about/anything",
        "not.a.jwt",
        json!({ "title": "X" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reads_are_public() {
    let app = build_test_app();

    let response = get(app.router(), "/api/about").await;
    assert_eq!(response.status(), StatusCode::OK);
}
