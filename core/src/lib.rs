//! Synchronous client core for the campus ride-queue API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and holds the queue view the
//! dashboard renders: the last snapshot, the campus filter, and optimistic
//! removals.
//!
//! # Design
//! - `RideClient` is stateless and holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `QueueView` is plain data; the async driver owns locking and timers.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod maps;
pub mod queue;
pub mod types;

pub use client::RideClient;
pub use error::{ApiError, UNKNOWN_ERROR};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use maps::Platform;
pub use queue::{Filter, QueueView};
pub use types::{NewRide, Ride, RideId, RideList};
