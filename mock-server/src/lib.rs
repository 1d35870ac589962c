use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Rough bounding box around campus; pickups inside it count as on-campus.
const CAMPUS_LAT: (f64, f64) = (37.262, 37.281);
const CAMPUS_LONG: (f64, f64) = (-76.727, -76.705);

const MAX_PASSENGERS: u32 = 8;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ride {
    pub id: u64,
    pub num_passengers: u32,
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_address: Option<String>,
    pub on_campus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRide {
    pub num_passengers: u32,
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct RideList {
    pub rides: Vec<Ride>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Default)]
pub struct Queue {
    next_id: u64,
    rides: BTreeMap<u64, Ride>,
    notified: Vec<u64>,
}

impl Queue {
    /// Ride ids that have had a notification sent, oldest first.
    pub fn notified(&self) -> &[u64] {
        &self.notified
    }
}

pub type Db = Arc<RwLock<Queue>>;

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

pub fn is_on_campus(lat: f64, long: f64) -> bool {
    (CAMPUS_LAT.0..=CAMPUS_LAT.1).contains(&lat) && (CAMPUS_LONG.0..=CAMPUS_LONG.1).contains(&long)
}

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over a caller-held queue, so tests can inspect server state.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/api/rides", get(list_rides).post(create_ride))
        .route("/api/rides/{id}", get(get_ride).delete(delete_ride))
        .route("/api/notifications/{id}", post(notify))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_rides(State(db): State<Db>) -> Json<RideList> {
    let queue = db.read().await;
    Json(RideList {
        rides: queue.rides.values().cloned().collect(),
    })
}

async fn create_ride(
    State(db): State<Db>,
    Json(input): Json<CreateRide>,
) -> ApiResult<(StatusCode, Json<Ride>)> {
    if input.num_passengers == 0 || input.num_passengers > MAX_PASSENGERS {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "num_passengers must be between 1 and 8",
        ));
    }
    let mut queue = db.write().await;
    queue.next_id += 1;
    let ride = Ride {
        id: queue.next_id,
        num_passengers: input.num_passengers,
        start_latitude: input.start_latitude,
        start_longitude: input.start_longitude,
        end_latitude: input.end_latitude,
        end_longitude: input.end_longitude,
        pickup_address: None,
        dropoff_address: None,
        on_campus: is_on_campus(input.start_latitude, input.start_longitude),
        phone: input.phone,
    };
    queue.rides.insert(ride.id, ride.clone());
    tracing::debug!(ride_id = ride.id, "ride queued");
    Ok((StatusCode::CREATED, Json(ride)))
}

async fn get_ride(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<Json<Ride>> {
    let queue = db.read().await;
    queue
        .rides
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "not found"))
}

async fn delete_ride(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    let mut queue = db.write().await;
    queue
        .rides
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "not found"))
}

async fn notify(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    let mut queue = db.write().await;
    if !queue.rides.contains_key(&id) {
        return Err(reject(StatusCode::BAD_REQUEST, "no such ride"));
    }
    queue.notified.push(id);
    tracing::debug!(ride_id = id, "rider notified");
    Ok(StatusCode::CREATED)
}
