use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Db, ErrorBody, Ride, RideList};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const ON_CAMPUS_RIDE: &str = r#"{"num_passengers":4,"start_latitude":37.273485,
    "start_longitude":-76.719628,"end_latitude":37.273,"end_longitude":-76.719628,
    "phone":"15555555555"}"#;

// --- list ---

#[tokio::test]
async fn list_rides_empty() {
    let resp = app().oneshot(empty_request("GET", "/api/rides")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list: RideList = body_json(resp).await;
    assert!(list.rides.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_ride_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/api/rides", ON_CAMPUS_RIDE))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let ride: Ride = body_json(resp).await;
    assert_eq!(ride.id, 1);
    assert_eq!(ride.num_passengers, 4);
    assert!(ride.on_campus);
    assert_eq!(ride.phone.as_deref(), Some("15555555555"));
}

#[tokio::test]
async fn create_ride_too_many_passengers_returns_message() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/rides",
            r#"{"num_passengers":9,"start_latitude":1.0,"start_longitude":1.0,
                "end_latitude":1.0,"end_longitude":1.0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorBody = body_json(resp).await;
    assert_eq!(err.message, "num_passengers must be between 1 and 8");
}

#[tokio::test]
async fn create_ride_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/rides", r#"{"num_passengers":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_ride_not_found_carries_message() {
    let resp = app().oneshot(empty_request("GET", "/api/rides/7")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: ErrorBody = body_json(resp).await;
    assert_eq!(err.message, "not found");
}

#[tokio::test]
async fn get_ride_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/rides/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete / notify ---

#[tokio::test]
async fn delete_ride_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/api/rides/7")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notify_unknown_ride_returns_400() {
    let resp = app()
        .oneshot(empty_request("POST", "/api/notifications/7"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn notify_records_the_ride() {
    use tower::Service;

    let db = Db::default();
    let mut app = app_with(db.clone()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/rides", ON_CAMPUS_RIDE))
        .await
        .unwrap();
    let ride: Ride = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("POST", &format!("/api/notifications/{}", ride.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(db.read().await.notified(), [ride.id]);
}

// --- full lifecycle ---

#[tokio::test]
async fn ride_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/rides", ON_CAMPUS_RIDE))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Ride = body_json(resp).await;
    let id = created.id;

    // list wraps rides in an envelope
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/rides"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let list: RideList = body_json(resp).await;
    assert_eq!(list.rides.len(), 1);
    assert_eq!(list.rides[0].id, id);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/rides/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Ride = body_json(resp).await;
    assert_eq!(fetched.id, id);

    // notify
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("POST", &format!("/api/notifications/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/rides/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/rides/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/rides"))
        .await
        .unwrap();
    let list: RideList = body_json(resp).await;
    assert!(list.rides.is_empty());
}
