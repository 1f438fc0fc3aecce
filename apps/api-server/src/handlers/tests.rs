use std::collections::HashSet;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use bson::oid::ObjectId;
use serde_json::json;

use quill_core::domain::{Author, BlogPost, NewBlogPost};
use quill_core::ports::PostRepository;
use quill_shared::dto::PostResponse;

use super::configure_routes;
use crate::state::AppState;

fn sample_post(n: usize) -> NewBlogPost {
    NewBlogPost {
        author: Author::new(format!("First{n}"), format!("Last{n}")),
        title: format!("Title {n}"),
        content: format!("Content of post {n}"),
    }
}

async fn seed(state: &AppState, n: usize) -> BlogPost {
    state.posts.insert(sample_post(n)).await.unwrap()
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn list_returns_all_seeded_posts() {
    let state = AppState::in_memory();
    let mut seeded = HashSet::new();
    for n in 0..10 {
        seeded.insert(seed(&state, n).await.id.to_hex());
    }
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/posts").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<PostResponse> = test::read_body_json(res).await;
    let listed: HashSet<_> = body.into_iter().map(|post| post.id).collect();
    assert_eq!(listed, seeded);
}

#[actix_web::test]
async fn list_serializes_the_expected_fields() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/posts").to_request();
    let res = test::call_service(&app, req).await;

    let body: Vec<PostResponse> = test::read_body_json(res).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].id, created.id.to_hex());
    // The author subdocument is flattened to a display string
    assert_eq!(body[0].author, "First1 Last1");
    assert_eq!(body[0].title, "Title 1");
    assert_eq!(body[0].content, "Content of post 1");
}

#[actix_web::test]
async fn list_on_an_empty_store_returns_an_empty_array() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/posts").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<PostResponse> = test::read_body_json(res).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn get_returns_a_single_post() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", created.id.to_hex()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: PostResponse = test::read_body_json(res).await;
    assert_eq!(body.id, created.id.to_hex());
    assert_eq!(body.author, "First1 Last1");
    assert_eq!(body.title, created.title);
    assert_eq!(body.content, created.content);
}

#[actix_web::test]
async fn get_of_an_unknown_id_is_a_404() {
    let state = AppState::in_memory();
    seed(&state, 1).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", ObjectId::new().to_hex()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Not Found");
}

#[actix_web::test]
async fn get_with_a_malformed_id_is_a_400() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/posts/not-an-object-id")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .contains("Invalid post id")
    );
}

#[actix_web::test]
async fn create_persists_and_returns_the_new_post() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "title": "On Computable Numbers",
            "content": "An application of the diagonal argument.",
            "author": { "firstName": "Ada", "lastName": "Lovelace" }
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: PostResponse = test::read_body_json(res).await;
    assert!(!body.id.is_empty());
    assert_eq!(body.author, "Ada Lovelace");
    assert_eq!(body.title, "On Computable Numbers");

    // The post is retrievable under the id the server assigned
    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", body.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn create_reports_every_missing_field() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("`title`"));
    assert!(detail.contains("`content`"));
    assert!(detail.contains("`author`"));

    // Nothing was persisted
    let req = test::TestRequest::get().uri("/posts").to_request();
    let res = test::call_service(&app, req).await;
    let posts: Vec<PostResponse> = test::read_body_json(res).await;
    assert!(posts.is_empty());
}

#[actix_web::test]
async fn create_with_a_blank_field_is_rejected() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "title": "   ",
            "content": "body",
            "author": { "firstName": "Ada", "lastName": "Lovelace" }
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert!(body["detail"].as_str().unwrap().contains("`title`"));
}

#[actix_web::test]
async fn update_overwrites_the_fields_sent_over() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);
    let id = created.id.to_hex();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", id))
        .set_json(json!({
            "id": id,
            "title": "updated title",
            "content": "updated content",
            "author": { "firstName": "foo", "lastName": "bar" }
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: PostResponse = test::read_body_json(res).await;
    assert_eq!(body.id, id);
    assert_eq!(body.title, "updated title");
    assert_eq!(body.content, "updated content");
    assert_eq!(body.author, "foo bar");

    // The overwrite reached the store
    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", id))
        .to_request();
    let res = test::call_service(&app, req).await;
    let stored: PostResponse = test::read_body_json(res).await;
    assert_eq!(stored.title, "updated title");
    assert_eq!(stored.author, "foo bar");
}

#[actix_web::test]
async fn update_with_a_partial_payload_leaves_other_fields() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);
    let id = created.id.to_hex();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", id))
        .set_json(json!({ "id": id, "title": "Edited" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: PostResponse = test::read_body_json(res).await;
    assert_eq!(body.title, "Edited");
    assert_eq!(body.content, created.content);
    assert_eq!(body.author, "First1 Last1");
}

#[actix_web::test]
async fn update_with_mismatched_ids_is_a_400() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", created.id.to_hex()))
        .set_json(json!({
            "id": ObjectId::new().to_hex(),
            "title": "hijacked"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert!(body["detail"].as_str().unwrap().contains("must match"));
}

#[actix_web::test]
async fn update_without_a_body_id_is_a_400() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", created.id.to_hex()))
        .set_json(json!({ "title": "no id in body" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn update_with_a_malformed_id_is_a_400() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    // Path and body agree, but neither is a valid id
    let req = test::TestRequest::put()
        .uri("/posts/not-an-object-id")
        .set_json(json!({ "id": "not-an-object-id", "title": "x" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .contains("Invalid post id")
    );
}

#[actix_web::test]
async fn update_of_an_unknown_id_is_a_404() {
    let state = AppState::in_memory();
    seed(&state, 1).await;
    let app = test_app!(state);
    let absent = ObjectId::new().to_hex();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", absent))
        .set_json(json!({ "id": absent, "title": "ghost" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_with_only_the_id_is_a_no_op() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);
    let id = created.id.to_hex();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", id))
        .set_json(json!({ "id": id }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: PostResponse = test::read_body_json(res).await;
    assert_eq!(body.title, created.title);
    assert_eq!(body.content, created.content);
    assert_eq!(body.author, "First1 Last1");
}

#[actix_web::test]
async fn update_with_a_blank_field_is_rejected() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);
    let id = created.id.to_hex();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", id))
        .set_json(json!({ "id": id, "title": "" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // The stored post kept its original title
    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", id))
        .to_request();
    let res = test::call_service(&app, req).await;
    let stored: PostResponse = test::read_body_json(res).await;
    assert_eq!(stored.title, created.title);
}

#[actix_web::test]
async fn delete_removes_the_post() {
    let state = AppState::in_memory();
    let created = seed(&state, 1).await;
    let app = test_app!(state);
    let id = created.id.to_hex();

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", id))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let body = test::read_body(res).await;
    assert!(body.is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_of_unknown_and_malformed_ids_still_replies_204() {
    let state = AppState::in_memory();
    seed(&state, 1).await;
    let app = test_app!(state);

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", ObjectId::new().to_hex()))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri("/posts/not-an-object-id")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // The seeded post is untouched
    let req = test::TestRequest::get().uri("/posts").to_request();
    let res = test::call_service(&app, req).await;
    let posts: Vec<PostResponse> = test::read_body_json(res).await;
    assert_eq!(posts.len(), 1);
}

#[actix_web::test]
async fn health_reports_ok_and_the_storage_backend() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "in-memory");
}
