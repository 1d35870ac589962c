//! Domain DTOs for the ride-queue API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! The server has shipped address fields under two names over time
//! (`pickup_address` / `start_address`), so both are accepted on input.

use serde::{Deserialize, Serialize};

/// Server-assigned ride identifier.
pub type RideId = u64;

/// A single queued ride request as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ride {
    pub id: RideId,
    pub num_passengers: u32,
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    #[serde(default, alias = "start_address", skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
    #[serde(default, alias = "end_address", skip_serializing_if = "Option::is_none")]
    pub dropoff_address: Option<String>,
    #[serde(default)]
    pub on_campus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_time: Option<String>,
}

/// Request payload for queueing a new ride.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRide {
    pub num_passengers: u32,
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload of `GET rides`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RideList {
    pub rides: Vec<Ride>,
}

/// Error body the API attaches to non-2xx responses. Every field is optional
/// because the server does not always send one.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
