#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use common::{bearer, TestContext, PASSWORD};

#[actix_web::test]
async fn test_register_login_and_me() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/login/register")
        .set_json(json!({ "username": "justatest", "email": "test@test.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Registered");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let req = test::TestRequest::post()
        .uri("/login/login")
        .set_json(json!({ "email": "test@test.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Logged In");
    let token = body["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/login/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"]["username"], "justatest");
    assert_eq!(body["data"]["admin"], false);
    assert!(body["data"].get("password").is_none());
    assert_eq!(body["data"]["self"], "http://testserver/users/1");

    let req = test::TestRequest::get()
        .uri("/login/signout")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Logged Out");
}

#[actix_web::test]
async fn test_register_duplicate_and_bad_payloads() {
    let ctx = TestContext::new();
    ctx.seed_user("taken", false, true).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/login/register")
        .set_json(json!({ "username": "taken", "email": "other@test.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "User already exists");

    let req = test::TestRequest::post()
        .uri("/login/register")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Empty payload");

    let req = test::TestRequest::post()
        .uri("/login/register")
        .set_json(json!({ "email": "nouser@test.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid payload");
}

#[actix_web::test]
async fn test_login_rejections() {
    let ctx = TestContext::new();
    ctx.seed_user("active", false, true).await;
    ctx.seed_user("dormant", false, false).await;
    let app = init_app!(ctx);

    for (email, password) in [
        ("active@test.com", "wrongpassword"),
        ("nobody@test.com", PASSWORD),
        ("dormant@test.com", PASSWORD),
    ] {
        let req = test::TestRequest::post()
            .uri("/login/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "login as {}", email);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Username or password incorrect");
    }
}

#[actix_web::test]
async fn test_non_json_body_rejected() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/login/login")
        .set_form([("email", "test@test.com"), ("password", PASSWORD)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_ACCEPTABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "This endpoint only accepts json");
}

#[actix_web::test]
async fn test_auth_gate_outcomes() {
    let ctx = TestContext::new();
    let (user, _) = ctx.seed_user("gated", false, true).await;
    let (_, dormant_token) = ctx.seed_user("dormant", false, false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/login/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Forbidden");

    for header in ["Token abc", "Bearer not.a.token"] {
        let req = test::TestRequest::get()
            .uri("/login/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {}", header);
    }

    let expired = ctx
        .state
        .jwt_service
        .issue(user.id, Utc::now() - Duration::seconds(10), Duration::seconds(5))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/login/me")
        .insert_header(bearer(&expired))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please log in again.");

    let req = test::TestRequest::get()
        .uri("/login/me")
        .insert_header(bearer(&dormant_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/users/ping").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_routes_are_not_found() {
    let ctx = TestContext::new();
    let (_, token) = ctx.seed_user("wanderer", false, true).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/no/such/route").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "fail");

    let req = test::TestRequest::get()
        .uri("/no/such/route")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    // protected routes still sit behind the gate
    let req = test::TestRequest::get().uri("/questions").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_user_access_control() {
    let ctx = TestContext::new();
    let (admin, admin_token) = ctx.seed_user("admin", true, true).await;
    let (alice, alice_token) = ctx.seed_user("alice", false, true).await;
    let (bob, _) = ctx.seed_user("bob", false, true).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", alice.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", bob.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "You do not have permission to view this user");

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", bob.id))
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/users/notanid")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User does not exist");

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "You must be an admin to view all users");

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", alice.id))
        .insert_header(bearer(&alice_token))
        .set_json(json!({ "admin": true }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", alice.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["admin"], false);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", bob.id))
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "active": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["active"], false);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", alice.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    // the deleted account's token no longer resolves to anyone
    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", admin.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_creates_user() {
    let ctx = TestContext::new();
    let (_, admin_token) = ctx.seed_user("admin", true, true).await;
    let (_, alice_token) = ctx.seed_user("alice", false, true).await;
    let app = init_app!(ctx);

    let payload = json!({ "username": "carol", "email": "carol@test.com", "password": PASSWORD });

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(bearer(&alice_token))
        .set_json(payload.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(bearer(&admin_token))
        .set_json(payload.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "carol@test.com added.");

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(bearer(&admin_token))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email already exists");
}

#[actix_web::test]
async fn test_user_list_pagination() {
    let ctx = TestContext::with_page_size(2);
    let (_, admin_token) = ctx.seed_user("admin", true, true).await;
    ctx.seed_user("alice", false, true).await;
    ctx.seed_user("bob", false, true).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&admin_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["num_users"], 3);
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 2);
    assert_eq!(body["next_page"], "/users?page=2");
    assert!(body["prev_page"].is_null());

    let req = test::TestRequest::get()
        .uri("/users?page=2")
        .insert_header(bearer(&admin_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["users"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["users"][0]["username"], "bob");
    assert!(body["next_page"].is_null());
    assert_eq!(body["prev_page"], "/users?page=1");

    let req = test::TestRequest::get()
        .uri("/users?page=9")
        .insert_header(bearer(&admin_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["num_users"], 3);
    assert!(body["data"]["users"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_question_lifecycle() {
    let ctx = TestContext::new();
    let (alice, alice_token) = ctx.seed_user("alice", false, true).await;
    let (_, bob_token) = ctx.seed_user("bob", false, true).await;
    let app = init_app!(ctx);

    let question = json!({
        "body": "Write a function that sums a list",
        "test_code": "assert sum_list([1, 2]) == 3",
        "test_solution": "def sum_list(xs): return sum(xs)",
        "difficulty": "Easy"
    });

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/questions")
            .insert_header(bearer(&alice_token))
            .set_json(question.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Question added");
    }

    let req = test::TestRequest::get()
        .uri("/questions/user")
        .insert_header(bearer(&alice_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["num_questions"], 2);
    let question_id = body["data"]["questions"][0]["id"].as_i64().unwrap();
    let uri = format!("/questions/{}/user/{}", question_id, alice.id);

    let req = test::TestRequest::get()
        .uri("/questions")
        .insert_header(bearer(&bob_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["num_questions"], 2);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&bob_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&alice_token))
        .set_json(json!({ "difficulty": "Hard" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["difficulty"], "Hard");

    let req = test::TestRequest::get()
        .uri(&format!("/questions/abc/user/{}", alice.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Question does not exist");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&alice_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&alice_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_score_lifecycle() {
    let ctx = TestContext::new();
    let (alice, alice_token) = ctx.seed_user("alice", false, true).await;
    let (bob, bob_token) = ctx.seed_user("bob", false, true).await;
    let (_, admin_token) = ctx.seed_user("admin", true, true).await;
    let app = init_app!(ctx);

    let score = json!({
        "user_id": alice.id,
        "question_id": 1,
        "correct": true,
        "points": 10,
        "runtime": 42
    });

    let req = test::TestRequest::post()
        .uri("/scores")
        .insert_header(bearer(&bob_token))
        .set_json(score.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    for token in [&alice_token, &admin_token] {
        let req = test::TestRequest::post()
            .uri("/scores")
            .insert_header(bearer(token))
            .set_json(score.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Score added");
    }

    let req = test::TestRequest::get()
        .uri("/scores/user")
        .insert_header(bearer(&alice_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["num_scores"], 2);
    let score_id = body["data"]["scores"][0]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/scores/user")
        .insert_header(bearer(&bob_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["num_scores"], 0);

    let req = test::TestRequest::put()
        .uri(&format!("/scores/{}/user/{}", score_id, alice.id))
        .insert_header(bearer(&alice_token))
        .set_json(json!({ "correct": false, "points": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["correct"], false);
    assert_eq!(body["data"]["runtime"], 42);

    // wrong owner in the path reads as a missing score
    let req = test::TestRequest::get()
        .uri(&format!("/scores/{}/user/{}", score_id, bob.id))
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Score does not exist");

    let req = test::TestRequest::delete()
        .uri(&format!("/scores/{}/user/{}", score_id, alice.id))
        .insert_header(bearer(&bob_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/scores/{}/user/{}", score_id, alice.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], score_id);
    assert_eq!(body["data"]["points"], 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/scores/{}/user/{}", score_id, alice.id))
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
}
