//! Folder API tests.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;

use common::fixtures;
use common::{create_study_set, TestContext};

async fn create_folder(
    server: &TestServer,
    token: &str,
    name: &str,
    parent_id: Option<&str>,
) -> serde_json::Value {
    let response = server
        .post("/api/folders")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(token),
        )
        .json(&fixtures::folder_request(name, parent_id))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

/// New folders are placed after their siblings.
#[tokio::test]
async fn test_create_and_list_folders() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_user(None);

    let first = create_folder(&server, &token, "Languages", None).await;
    let second = create_folder(&server, &token, "Geography", None).await;
    assert_eq!(first["position"], 0);
    assert_eq!(second["position"], 1);
    assert!(first["parentId"].is_null());

    let response = server
        .get("/api/folders")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Languages", "Geography"]);
}

/// Blank names are rejected.
#[tokio::test]
async fn test_create_folder_requires_name() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_user(None);

    let response = server
        .post("/api/folders")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::folder_request(" ", None))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// A folder lists its direct children and the sets filed in it.
#[tokio::test]
async fn test_get_folder_with_contents() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_user(None);
    let parent = create_folder(&server, &token, "Languages", None).await;
    let parent_id = parent["id"].as_str().unwrap();
    create_folder(&server, &token, "French", Some(parent_id)).await;
    create_study_set(
        &server,
        &token,
        &serde_json::json!({ "title": "Verbs", "folderId": parent_id }),
    )
    .await;
    create_study_set(&server, &token, &fixtures::study_set_request("Loose", 1)).await;

    let response = server
        .get(&format!("/api/folders/{}", parent_id))
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Languages");
    assert_eq!(body["children"][0]["name"], "French");
    let sets = body["studySets"].as_array().unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0]["title"], "Verbs");
    assert_eq!(sets[0]["flashcardCount"], 0);
}

/// Folders can be renamed and moved, but not under their own descendants.
#[tokio::test]
async fn test_update_folder_parent() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_user(None);
    let outer = create_folder(&server, &token, "Outer", None).await;
    let outer_id = outer["id"].as_str().unwrap();
    let inner = create_folder(&server, &token, "Inner", Some(outer_id)).await;
    let inner_id = inner["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/folders/{}", outer_id))
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&serde_json::json!({ "parentId": inner_id }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .put(&format!("/api/folders/{}", inner_id))
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&serde_json::json!({ "name": "Top", "parentId": null }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Top");
    assert!(body["parentId"].is_null());
}

/// Deleting a folder keeps its study sets at the top level.
#[tokio::test]
async fn test_delete_folder_keeps_study_sets() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, token) = ctx.create_test_user(None);
    let folder = create_folder(&server, &token, "Languages", None).await;
    let folder_id = folder["id"].as_str().unwrap();
    let set = create_study_set(
        &server,
        &token,
        &serde_json::json!({ "title": "Verbs", "folderId": folder_id }),
    )
    .await;
    assert_eq!(set["folderId"], folder_id);

    server
        .delete(&format!("/api/folders/{}", folder_id))
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await
        .assert_status_ok();

    let response = server
        .get(&format!("/api/study-sets/{}", set["id"].as_str().unwrap()))
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["folderId"].is_null());

    server
        .get(&format!("/api/folders/{}", folder_id))
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await
        .assert_status_not_found();
}

/// Another user's folder cannot be used as a parent.
#[tokio::test]
async fn test_foreign_parent_not_found() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let (_, owner) = ctx.create_test_user(Some("owner"));
    let (_, other) = ctx.create_test_user(Some("other"));
    let folder = create_folder(&server, &owner, "Private", None).await;

    let response = server
        .post("/api/folders")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&other),
        )
        .json(&fixtures::folder_request(
            "Nested",
            folder["id"].as_str(),
        ))
        .await;

    response.assert_status_not_found();
}
