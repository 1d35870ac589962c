//! Queue controller: owns the displayed queue, refreshes it from the API and
//! dispatches operator actions.
//!
//! # Design
//! Deletes and finishes are optimistic. The ride leaves the local view
//! immediately and the DELETE runs in a detached task whose failure is only
//! logged; the next successful refresh brings back anything the server kept.
//! The view lock is never held across an await.

use std::sync::{Arc, Mutex, MutexGuard};

use ride_queue_core::maps::{self, Platform};
use ride_queue_core::{ApiError, Filter, QueueView, Ride, RideId};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::service::RidesService;
use crate::transport::Transport;
use crate::ui::{Ui, DELETE_PROMPT, FINISH_PROMPT, NOTIFY_PROMPT};

pub struct QueueController<T, U> {
    service: RidesService<T>,
    ui: U,
    view: Mutex<QueueView>,
    revision: watch::Sender<u64>,
}

impl<T: Transport, U: Ui> QueueController<T, U> {
    pub fn new(service: RidesService<T>, ui: U) -> Arc<Self> {
        let (revision, _) = watch::channel(0);
        Arc::new(Self {
            service,
            ui,
            view: Mutex::new(QueueView::new()),
            revision,
        })
    }

    pub fn service(&self) -> &RidesService<T> {
        &self.service
    }

    /// Receiver that changes every time the displayed list does.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn rides(&self) -> Vec<Ride> {
        self.view().rides().to_vec()
    }

    pub fn filter(&self) -> Filter {
        self.view().filter()
    }

    /// Pull a fresh snapshot. On failure the current view is kept.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        match self.service.get_rides().await {
            Ok(list) => {
                tracing::debug!(rides = list.rides.len(), "queue refreshed");
                if self.view().apply_snapshot(list.rides) {
                    self.bump();
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, message = e.message(), "queue refresh failed");
                Err(e)
            }
        }
    }

    pub fn set_filter(&self, filter: Filter) {
        self.view().filter_rides(filter);
        self.bump();
    }

    pub fn is_displayed(&self, id: RideId) -> bool {
        self.view().find(id).is_some()
    }

    /// Remove a displayed ride from the queue. Returns the detached DELETE
    /// task when the ride was removed; `None` when the operator declined or
    /// the ride is not in the view (hidden by the filter or already gone).
    pub async fn delete_ride(&self, id: RideId) -> Option<JoinHandle<()>> {
        self.remove(id, DELETE_PROMPT).await
    }

    /// Mark a ride as done. The server has no separate state for finished
    /// rides, so this is a delete behind a different prompt.
    pub async fn finish_ride(&self, id: RideId) -> Option<JoinHandle<()>> {
        self.remove(id, FINISH_PROMPT).await
    }

    /// Tell the rider their car is here. Leaves the view untouched.
    pub async fn notify(&self, id: RideId) -> Option<JoinHandle<()>> {
        if !self.ui.confirm(NOTIFY_PROMPT).await {
            return None;
        }
        let service = self.service.clone();
        Some(tokio::spawn(async move {
            match service.notify(id).await {
                Ok(()) => tracing::info!(ride_id = id, "rider notified"),
                Err(e) => tracing::warn!(ride_id = id, error = %e, message = e.message(), "notify failed"),
            }
        }))
    }

    /// Open directions for a displayed ride. Returns the link, or `None` if
    /// the ride is not in the view.
    pub fn gps(&self, id: RideId, platform: Platform) -> Option<String> {
        let url = maps::ride_url(self.view().find(id)?, platform);
        self.ui.open_url(&url);
        Some(url)
    }

    async fn remove(&self, id: RideId, prompt: &str) -> Option<JoinHandle<()>> {
        if !self.is_displayed(id) || !self.ui.confirm(prompt).await {
            return None;
        }
        // a poll may have dropped the ride while the prompt was open
        self.view().remove_ride(id)?;
        self.bump();
        let service = self.service.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = service.delete_ride(id).await {
                tracing::warn!(ride_id = id, error = %e, message = e.message(), "delete failed after local removal");
            }
        }))
    }

    fn view(&self) -> MutexGuard<'_, QueueView> {
        self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}
