//! In-memory queue view: last snapshot, active filter, and the filtered list
//! the dashboard renders.
//!
//! # Design
//! Every poll replaces the snapshot wholesale; the filtered view is always
//! recomputed from it. Removal is optimistic and touches only the filtered
//! view, so the next poll restores a ride whose delete never landed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{Ride, RideId};

pub const PICKUP_PLACEHOLDER: &str = "Start Address Not Found";
pub const DROPOFF_PLACEHOLDER: &str = "End Address Not Found";

/// Which rides the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    Both,
    OnCampus,
    OffCampus,
}

impl Filter {
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::Both => "both",
            Filter::OnCampus => "on_campus",
            Filter::OffCampus => "off_campus",
        }
    }

    pub fn matches(self, ride: &Ride) -> bool {
        match self {
            Filter::Both => true,
            Filter::OnCampus => ride.on_campus,
            Filter::OffCampus => !ride.on_campus,
        }
    }

    /// Filtered copy of `rides`, preserving order.
    pub fn apply(self, rides: &[Ride]) -> Vec<Ride> {
        rides.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter {0:?} (expected both, on_campus or off_campus)")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Filter::Both),
            "on_campus" => Ok(Filter::OnCampus),
            "off_campus" => Ok(Filter::OffCampus),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Replace blank pickup/dropoff addresses with display placeholders.
pub fn fill_placeholders(mut ride: Ride) -> Ride {
    ride.pickup_address = Some(or_placeholder(ride.pickup_address, PICKUP_PLACEHOLDER));
    ride.dropoff_address = Some(or_placeholder(ride.dropoff_address, DROPOFF_PLACEHOLDER));
    ride
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueueView {
    filter: Filter,
    original_rides: Vec<Ride>,
    rides: Vec<Ride>,
}

impl QueueView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Rides currently displayed.
    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    /// Last full snapshot from the server.
    pub fn original_rides(&self) -> &[Ride] {
        &self.original_rides
    }

    pub fn find(&self, id: RideId) -> Option<&Ride> {
        self.rides.iter().find(|r| r.id == id)
    }

    /// Store a fresh snapshot and re-apply the current filter. Returns
    /// whether the displayed list changed.
    pub fn apply_snapshot(&mut self, rides: Vec<Ride>) -> bool {
        self.original_rides = rides.into_iter().map(fill_placeholders).collect();
        let rides = self.filter.apply(&self.original_rides);
        let changed = rides != self.rides;
        self.rides = rides;
        changed
    }

    pub fn filter_rides(&mut self, filter: Filter) {
        self.filter = filter;
        self.rides = filter.apply(&self.original_rides);
    }

    /// Drop a ride from the displayed list without waiting on the server.
    pub fn remove_ride(&mut self, id: RideId) -> Option<Ride> {
        let index = self.rides.iter().position(|r| r.id == id)?;
        Some(self.rides.remove(index))
    }
}
