mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{bearer_token, body_json, create_user, send, test_app};

#[tokio::test]
async fn create_without_body_or_fields_gets_specific_messages() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let cases: &[(Value, &str)] = &[
        (json!({}), "Body is empty!"),
        (json!({ "password": "pass1", "account_type": "type1" }), "Name is empty!"),
        (json!({ "name": "leo", "account_type": "type1" }), "Password is empty!"),
        (json!({ "name": "leo", "password": "pass1" }), "Account type is empty!"),
    ];

    for (body, message) in cases {
        let response =
            send(&app, Method::POST, "/user", Some(&token), Some(body.clone())).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "case: {message}");
        let body = body_json(response).await?;
        assert_eq!(body["message"], *message);
    }
    Ok(())
}

#[tokio::test]
async fn create_then_fetch_round_trips_the_record() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let created = create_user(&app, "leo", "saving", "12345").await?;
    assert!(created["id"].is_string());
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());

    let id = created["id"].as_str().unwrap();
    let response =
        send(&app, Method::GET, &format!("/user/{id}"), Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await?;
    assert_eq!(fetched, created);
    assert_eq!(fetched["name"], "leo");
    assert_eq!(fetched["account_type"], "saving");
    Ok(())
}

#[tokio::test]
async fn list_returns_every_record_in_insertion_order() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    // Duplicate names are accepted.
    create_user(&app, "leo", "saving", "12345").await?;
    create_user(&app, "leo", "checking", "12345").await?;

    let response = send(&app, Method::GET, "/user", Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let users = body_json(response).await?;
    let users = users.as_array().expect("array body");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["account_type"], "saving");
    assert_eq!(users[1]["account_type"], "checking");
    Ok(())
}

#[tokio::test]
async fn fetch_with_malformed_id_is_403_naming_the_id() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let id = "5cbc14e49aea481b6cedxxxx";
    let response =
        send(&app, Method::GET, &format!("/user/{id}"), Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await?;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains(id), "message should name the id: {message}");
    Ok(())
}

#[tokio::test]
async fn fetch_missing_but_wellformed_id_is_200_null() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let id = uuid_like_unused();
    let response =
        send(&app, Method::GET, &format!("/user/{id}"), Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?, Value::Null);
    Ok(())
}

#[tokio::test]
async fn update_merges_body_over_the_stored_record() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let created = create_user(&app, "leo", "saving", "12345").await?;
    let id = created["id"].as_str().unwrap().to_string();

    let response = send(
        &app,
        Method::PATCH,
        &format!("/user/{id}"),
        Some(&token),
        Some(json!({ "name": "Lionell", "nickname": "lion" })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["message"], "Updated user");

    let data = &body["data"];
    assert_eq!(data["id"], created["id"]);
    assert_eq!(data["name"], "Lionell");
    assert_eq!(data["account_type"], "saving");
    // Client-supplied fields the store ignored still appear in the response.
    assert_eq!(data["nickname"], "lion");
    Ok(())
}

#[tokio::test]
async fn update_with_malformed_id_is_403() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let response = send(
        &app,
        Method::PATCH,
        "/user/5cbc14e49aea481b6cedxxxx",
        Some(&token),
        Some(json!({ "name": "Lionell" })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn update_missing_wellformed_id_is_404() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let response = send(
        &app,
        Method::PATCH,
        &format!("/user/{}", uuid_like_unused()),
        Some(&token),
        Some(json!({ "name": "Lionell" })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "ID not found");
    Ok(())
}

#[tokio::test]
async fn delete_returns_the_record_then_404_on_repeat() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let created = create_user(&app, "leo", "saving", "12345").await?;
    let id = created["id"].as_str().unwrap().to_string();

    let response =
        send(&app, Method::DELETE, &format!("/user/{id}"), Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Removed user");
    assert_eq!(body["data"]["id"], created["id"]);

    // Deleting the same id again finds nothing.
    let response =
        send(&app, Method::DELETE, &format!("/user/{id}"), Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "ID not found");
    Ok(())
}

#[tokio::test]
async fn delete_nonexistent_id_is_404() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let response = send(
        &app,
        Method::DELETE,
        &format!("/user/{}", uuid_like_unused()),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_with_malformed_id_is_a_store_failure_400() -> Result<()> {
    let app = test_app();
    let token = bearer_token();

    let response = send(
        &app,
        Method::DELETE,
        "/user/5cbc14e49aea481b6cedxxxx",
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

fn uuid_like_unused() -> &'static str {
    // Well-formed uuid that no store will ever assign in these tests.
    "00000000-0000-4000-8000-000000000000"
}
