//! Stateless HTTP request builder and response parser for the ride-queue API.
//!
//! # Design
//! `RideClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Success hands back only the payload;
//! failure is normalized into `ApiError::Rejected` with the server's
//! `message` or the generic fallback.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, UNKNOWN_ERROR};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorBody, NewRide, Ride, RideId, RideList};

/// Synchronous, stateless client for the ride-queue API.
#[derive(Debug, Clone)]
pub struct RideClient {
    base_url: String,
}

impl RideClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_ride(&self, input: &NewRide) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/rides", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_get_rides(&self) -> HttpRequest {
        self.bodiless(HttpMethod::Get, "rides".to_string())
    }

    pub fn build_get_ride(&self, id: RideId) -> HttpRequest {
        self.bodiless(HttpMethod::Get, format!("rides/{id}"))
    }

    pub fn build_delete_ride(&self, id: RideId) -> HttpRequest {
        self.bodiless(HttpMethod::Delete, format!("rides/{id}"))
    }

    pub fn build_notify(&self, id: RideId) -> HttpRequest {
        self.bodiless(HttpMethod::Post, format!("notifications/{id}"))
    }

    pub fn parse_create_ride(&self, response: HttpResponse) -> Result<Ride, ApiError> {
        parse_payload(response)
    }

    pub fn parse_get_rides(&self, response: HttpResponse) -> Result<RideList, ApiError> {
        parse_payload(response)
    }

    pub fn parse_get_ride(&self, response: HttpResponse) -> Result<Ride, ApiError> {
        parse_payload(response)
    }

    pub fn parse_delete_ride(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_notify(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn bodiless(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}/{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }
}

fn parse_payload<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx responses to `ApiError::Rejected`, pulling the message out of
/// the error body when there is one.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Rejected {
        status: response.status,
        message: error_message(&response.body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
