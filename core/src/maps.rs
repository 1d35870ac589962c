//! Google Maps directions links for a ride.

use std::str::FromStr;

use thiserror::Error;

use crate::types::Ride;

/// Device family the link is opened on. iOS gets the Google Maps app scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Ios,
    #[default]
    Desktop,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown platform {0:?} (expected ios or desktop)")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "desktop" => Ok(Platform::Desktop),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// Directions to `(dest_lat, dest_long)`, starting from `start` when both of
/// its coordinates are non-zero.
pub fn maps_url(dest_lat: f64, dest_long: f64, start: Option<(f64, f64)>, platform: Platform) -> String {
    let mut url = format!("maps.google.com?&daddr={dest_lat},{dest_long}");
    if let Some((slat, slong)) = start {
        if slat != 0.0 && slong != 0.0 {
            url.push_str(&format!("&saddr={slat},{slong}"));
        }
    }
    url.push_str("&zoom=15");
    match platform {
        Platform::Ios => format!("comgooglemapsurl://{url}"),
        Platform::Desktop => format!("http://{url}"),
    }
}

/// Directions from the ride's pickup to its dropoff.
pub fn ride_url(ride: &Ride, platform: Platform) -> String {
    maps_url(
        ride.end_latitude,
        ride.end_longitude,
        Some((ride.start_latitude, ride.start_longitude)),
        platform,
    )
}
