//! Async driver for the ride-queue core.
//!
//! # Overview
//! Executes the core's plain-data requests with reqwest, keeps the queue view
//! fresh with a cancellable poller, and dispatches operator actions
//! (filter, delete, finish, notify, directions).
//!
//! # Design
//! - `Transport` is the injected I/O seam; tests swap in scripted responses.
//! - `QueueController` holds the only copy of the view and publishes a
//!   revision counter so a front-end can re-render on change.
//! - Deletes are optimistic and fire-and-forget; failures are logged and the
//!   next poll reconciles.

pub mod command;
pub mod config;
pub mod controller;
pub mod poller;
pub mod service;
pub mod transport;
pub mod ui;

pub use command::Command;
pub use config::{Config, ConfigError};
pub use controller::QueueController;
pub use poller::PollerHandle;
pub use service::RidesService;
pub use transport::{ReqwestTransport, Transport};
pub use ui::{TerminalUi, Ui};

use ride_queue_core::NewRide;

/// Ride queued at start-up when `RIDE_QUEUE_SEED_DEMO` is set, so a fresh
/// local server has something to show.
pub fn demo_ride() -> NewRide {
    NewRide {
        num_passengers: 4,
        start_latitude: 37.273485,
        start_longitude: -76.719628,
        end_latitude: 37.273,
        end_longitude: -76.719628,
        phone: Some("15555555555".to_string()),
    }
}
