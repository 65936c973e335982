use consult_client::admin::{AdminCrud, Courses};
use consult_client::auth::{self, DASHBOARD_PATH};
use consult_client::forms::FormData;
use consult_client::{
    ApiOrigin, ConsultClient, ConsultClientError, HttpClientConfig, HttpTransport, NativeClient,
    Toast, UnauthorizedBehavior, paths,
};
use mockito::Matcher;
use serde_json::json;

fn client(server: &mockito::ServerGuard) -> NativeClient {
    ConsultClient::native(ApiOrigin::new(server.url()), HttpClientConfig::default())
        .expect("client must build")
}

fn list_generation(client: &NativeClient, path: &str) -> u64 {
    client.cache().generation(&client.query_key(path))
}

#[tokio::test]
async fn course_update_invalidates_list_and_refetches() {
    let mut server = mockito::Server::new_async().await;

    let list = server
        .mock("GET", "/api/courses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":42,"name":"MBA","category":"Business","isActive":true}]"#)
        .expect(2)
        .create_async()
        .await;

    let update = server
        .mock("PUT", "/api/courses/42")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({"name": "MBA", "category": "Management"})))
        .with_status(200)
        .with_body(r#"{"id":42}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    let courses = AdminCrud::<Courses>::load(&client).await.expect("list loads");
    // второй вызов берётся из кэша
    AdminCrud::<Courses>::load(&client).await.expect("list loads");

    let mut screen = AdminCrud::<Courses>::new();
    screen.open_edit(courses[0].clone());
    let form = screen.form().with("category", "Management");

    let toast = screen.submit(&client, &form).await;
    assert_eq!(toast, Toast::success("Course updated successfully"));
    assert!(!screen.is_modal_open());
    assert_eq!(list_generation(&client, paths::COURSES), 1);

    AdminCrud::<Courses>::load(&client).await.expect("list reloads");

    update.assert_async().await;
    list.assert_async().await;
}

#[tokio::test]
async fn rejected_create_leaves_cache_alone() {
    let mut server = mockito::Server::new_async().await;

    let create = server
        .mock("POST", "/api/courses")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"category is unknown"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    let mut screen = AdminCrud::<Courses>::new();
    screen.open_create();

    let form = FormData::new().with("name", "MBA").with("category", "???");
    let toast = screen.submit(&client, &form).await;

    assert!(toast.is_error());
    assert_eq!(toast.description, "422: category is unknown");
    assert!(screen.is_modal_open());
    assert_eq!(list_generation(&client, paths::COURSES), 0);

    create.assert_async().await;
}

#[tokio::test]
async fn unauthorized_read_can_resolve_to_none() {
    let mut server = mockito::Server::new_async().await;

    let _unauthorized = server
        .mock("GET", "/api/universities")
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;

    let client = client(&server);

    let value = client
        .query(paths::UNIVERSITIES, UnauthorizedBehavior::ReturnNull)
        .await
        .expect("401 is not an error in this mode");
    assert!(value.is_none());

    let other = ConsultClient::native(ApiOrigin::new(server.url()), HttpClientConfig::default())
        .expect("client must build");
    let err = other
        .query(paths::UNIVERSITIES, UnauthorizedBehavior::Throw)
        .await
        .expect_err("401 must fail");
    assert_eq!(err, ConsultClientError::Http {
        status: 401,
        message: "Unauthorized".to_string(),
    });
}

#[tokio::test]
async fn content_type_is_sent_only_with_body() {
    let mut server = mockito::Server::new_async().await;

    let read = server
        .mock("GET", "/api/team")
        .match_header("content-type", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let delete = server
        .mock("DELETE", "/api/classes/7")
        .match_header("content-type", Matcher::Missing)
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    assert!(client.team().await.expect("team loads").is_empty());

    let id = consult_client::EntityId::new("7").expect("valid id");
    client.delete(paths::CLASSES, &id).await.expect("delete succeeds");

    read.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn login_session_cookie_is_sent_back() {
    let mut server = mockito::Server::new_async().await;

    let login = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({"username": "admin", "password": "secret"})))
        .with_status(200)
        .with_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
        .with_body(r#"{"message":"Welcome back"}"#)
        .expect(1)
        .create_async()
        .await;

    let settings = server
        .mock("GET", "/api/settings")
        .match_header("cookie", "sid=abc123")
        .with_status(200)
        .with_body(r#"{"companyName":"Acme"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    let form = FormData::new().with("username", "admin").with("password", "secret");
    let outcome = auth::login(&client, &form).await;

    assert_eq!(outcome.redirect(), Some(DASHBOARD_PATH));
    assert_eq!(outcome.toast().description, "Welcome back");

    let loaded = client.settings().await.expect("settings load");
    assert_eq!(loaded.map(|s| s.company_name).as_deref(), Some("Acme"));

    let saved = client
        .transport()
        .session_cookies(&server.url())
        .expect("origin parses");
    assert_eq!(saved.as_deref(), Some("sid=abc123"));

    login.assert_async().await;
    settings.assert_async().await;
}

#[tokio::test]
async fn restored_session_authenticates_fresh_transport() {
    let mut server = mockito::Server::new_async().await;

    let reviews = server
        .mock("GET", "/api/reviews")
        .match_header("cookie", "sid=restored")
        .with_status(200)
        .with_body(r#"[{"_id":"r1","studentName":"Anita","isActive":true}]"#)
        .expect(1)
        .create_async()
        .await;

    let transport = HttpTransport::new(HttpClientConfig::default()).expect("client builds");
    transport
        .restore_session(&server.url(), "sid=restored")
        .expect("origin parses");
    let client = ConsultClient::new(
        transport,
        ApiOrigin::new(server.url()),
        consult_client::QueryCache::new(),
    );

    let loaded = client.reviews().await.expect("reviews load");
    assert_eq!(loaded[0].student_name, "Anita");

    reviews.assert_async().await;
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // порт 9 (discard) обычно закрыт
    let client = ConsultClient::native(
        ApiOrigin::new("http://127.0.0.1:9"),
        HttpClientConfig::default(),
    )
    .expect("client must build");

    let err = client.blogs().await.expect_err("nothing listens there");
    assert!(matches!(err, ConsultClientError::Network(_)));
}
