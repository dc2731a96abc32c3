use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, NewHotel, SignupCmd};
use migration::MigratorTrait;
use server::{SESSION_COOKIE, ServerState, router};

async fn app() -> (Router, Arc<Engine>) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();

    engine.new_city("AMS", "Amsterdam").await.unwrap();
    engine.new_city("ROT", "Rotterdam").await.unwrap();
    engine
        .new_hotel(NewHotel::new("AMS02", "Canal House", "AMS").unwrap())
        .await
        .unwrap();
    engine
        .new_hotel(NewHotel::new("AMS01", "Dam Square Inn", "AMS").unwrap())
        .await
        .unwrap();
    engine
        .new_hotel(NewHotel::new("ROT01", "Harbour Hotel", "ROT").unwrap())
        .await
        .unwrap();
    engine
        .signup(SignupCmd::new("anna", "s3cret-pass", "AMS"))
        .await
        .unwrap();

    let engine = Arc::new(engine);
    let state = ServerState {
        engine: engine.clone(),
    };
    (router(state), engine)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, cookie: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = send(
        app,
        form("/login", &format!("username={username}&password={password}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    let pair = set_cookie.split(';').next().unwrap().to_string();
    assert!(pair.starts_with(SESSION_COOKIE));
    pair
}

#[tokio::test]
async fn landing_is_public() {
    let (app, _) = app().await;
    let response = send(&app, get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "Hotel directory");

    let cookie = login(&app, "anna", "s3cret-pass").await;
    let response = send(&app, get("/", Some(&cookie))).await;
    assert_eq!(
        text_body(response).await,
        "Hotel directory - signed in as anna (manager)"
    );
}

#[tokio::test]
async fn autocomplete_returns_matching_cities() {
    let (app, _) = app().await;

    let response = send(&app, get("/autocomplete?q=Amst", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([{"id": "AMS", "name": "Amsterdam"}])
    );

    let response = send(&app, get("/autocomplete?q=", None)).await;
    assert_eq!(json_body(response).await, json!([]));

    let response = send(&app, get("/autocomplete", None)).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn hotels_by_city() {
    let (app, _) = app().await;

    let response = send(&app, get("/cities/AMS/hotels", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"hotels": [
            {"name": "Dam Square Inn", "code": "AMS01"},
            {"name": "Canal House", "code": "AMS02"},
        ]})
    );

    let response = send(&app, get("/cities/XXX/hotels", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({"error": "City not found"}));
}

#[tokio::test]
async fn manager_pages_redirect_anonymous_callers() {
    let (app, _) = app().await;
    let response = send(&app, get("/manager/hotels", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let cookie = format!("{SESSION_COOKIE}=not-a-session");
    let response = send(&app, get("/manager/hotels", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn superuser_is_redirected_from_manager_pages() {
    let (app, engine) = app().await;
    engine
        .create_superuser("admin", "", "root-pass")
        .await
        .unwrap();

    let response = send(&app, form("/login", "username=admin&password=root-pass")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/");

    let cookie = login(&app, "admin", "root-pass").await;
    let response = send(&app, get("/manager/hotels", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn bad_login_is_401() {
    let (app, _) = app().await;
    let response = send(&app, form("/login", "username=anna&password=nope")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn signup_then_login() {
    let (app, _) = app().await;

    let response = send(
        &app,
        form(
            "/signup",
            "username=rob&email=rob%40Example.com&password1=pw&password2=pw&city=ROT",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = send(
        &app,
        form(
            "/signup",
            "username=rob&password1=pw&password2=pw&city=ROT",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        form(
            "/signup",
            "username=eve&password1=pw&password2=other&city=ROT",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let cookie = login(&app, "rob", "pw").await;
    let response = send(&app, get("/manager/hotels", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["city"], json!({"id": "ROT", "name": "Rotterdam"}));
    assert_eq!(body["hotels"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn manager_crud_is_scoped_to_city() {
    let (app, engine) = app().await;
    let cookie = login(&app, "anna", "s3cret-pass").await;

    let response = send(
        &app,
        with_json(
            "POST",
            "/manager/hotels",
            &cookie,
            json!({"code": "AMS03", "name": "Tulip Lodge", "city": "ROT"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["city"], "AMS");
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        with_json(
            "PUT",
            &format!("/manager/hotels/{id}"),
            &cookie,
            json!({"code": "AMS03", "name": "Tulip House"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Tulip House");

    let response = send(
        &app,
        with_json(
            "POST",
            "/manager/hotels",
            &cookie,
            json!({"code": "ROT01", "name": "Clash"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let foreign = engine.hotels_by_city("ROT").await.unwrap()[0].id;
    let response = send(
        &app,
        Request::delete(format!("/manager/hotels/{foreign}"))
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(engine.hotels_by_city("ROT").await.unwrap().len(), 1);

    let response = send(
        &app,
        with_json(
            "PUT",
            &format!("/manager/hotels/{foreign}"),
            &cookie,
            json!({"code": "ROT01", "name": "Hijacked"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        Request::delete(format!("/manager/hotels/{id}"))
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn manager_views_only_own_city_hotels() {
    let (app, engine) = app().await;
    let cookie = login(&app, "anna", "s3cret-pass").await;

    let own = engine.hotels_by_city("AMS").await.unwrap()[0].id;
    let response = send(&app, get(&format!("/manager/hotels/{own}"), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"id": own, "code": "AMS01", "name": "Dam Square Inn", "city": "AMS"})
    );

    let foreign = engine.hotels_by_city("ROT").await.unwrap()[0].id;
    let response = send(
        &app,
        get(&format!("/manager/hotels/{foreign}"), Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get(&format!("/manager/hotels/{own}"), None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let (app, _) = app().await;
    let cookie = login(&app, "anna", "s3cret-pass").await;

    let response = send(
        &app,
        Request::post("/logout")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = send(&app, get("/manager/hotels", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
