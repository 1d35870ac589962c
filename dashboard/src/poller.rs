//! Periodic queue refresh.
//!
//! Refreshes once immediately, then once per interval. Each refresh is
//! awaited before the next tick is taken, so polls never overlap and a late
//! response can never overwrite a newer one. Dropping the handle (or calling
//! [`PollerHandle::shutdown`]) stops the loop, abandoning a refresh that is
//! still waiting on the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::controller::QueueController;
use crate::transport::Transport;
use crate::ui::Ui;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

pub struct PollerHandle {
    shutdown: watch::Sender<()>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop polling. An in-flight refresh is dropped rather than awaited.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "poller task failed");
        }
    }
}

pub fn spawn<T: Transport, U: Ui>(controller: Arc<QueueController<T, U>>, interval: Duration) -> PollerHandle {
    let (shutdown, mut stop) = watch::channel(());
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = stop.changed() => break,
                _ = ticker.tick() => {}
            }
            // failures are logged by the controller; keep polling
            tokio::select! {
                _ = stop.changed() => break,
                _ = controller.refresh() => {}
            }
        }
        tracing::debug!("poller stopped");
    });
    PollerHandle { shutdown, task }
}

#[cfg(test)]
mod tests {
    use ride_queue_core::{ApiError, HttpRequest, HttpResponse};

    use super::*;
    use crate::service::tests::ScriptedTransport;
    use crate::service::RidesService;

    struct NoUi;

    impl Ui for NoUi {
        async fn confirm(&self, _prompt: &str) -> bool {
            false
        }

        fn open_url(&self, _url: &str) {}
    }

    const ONE_RIDE: &str = r#"{"rides":[{"id":4,"num_passengers":1,"start_latitude":1.0,
        "start_longitude":1.0,"end_latitude":2.0,"end_longitude":2.0,"on_campus":true}]}"#;

    #[tokio::test(start_paused = true)]
    async fn polls_on_start_and_every_interval_until_shutdown() {
        let transport = ScriptedTransport::default();
        for _ in 0..3 {
            transport.push(200, ONE_RIDE);
        }
        let ctl = QueueController::new(RidesService::new("http://queue.test/api", transport.clone()), NoUi);

        let handle = spawn(ctl.clone(), DEFAULT_INTERVAL);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(transport.seen.lock().unwrap().len(), 1);
        assert_eq!(ctl.rides().len(), 1);

        tokio::time::sleep(DEFAULT_INTERVAL * 2).await;
        assert_eq!(transport.seen.lock().unwrap().len(), 3);

        handle.shutdown().await;
        tokio::time::sleep(DEFAULT_INTERVAL * 3).await;
        assert_eq!(transport.seen.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_polling() {
        let transport = ScriptedTransport::default();
        transport.push(200, ONE_RIDE);
        let ctl = QueueController::new(RidesService::new("http://queue.test/api", transport.clone()), NoUi);

        let handle = spawn(ctl, DEFAULT_INTERVAL);
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(handle);
        tokio::time::sleep(DEFAULT_INTERVAL * 4).await;
        assert_eq!(transport.seen.lock().unwrap().len(), 1);
    }

    #[derive(Clone, Default)]
    struct StalledTransport {
        calls: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Transport for StalledTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn shutdown_does_not_wait_for_a_stalled_refresh() {
        let transport = StalledTransport::default();
        let ctl = QueueController::new(RidesService::new("http://queue.test/api", transport.clone()), NoUi);

        let handle = spawn(ctl, DEFAULT_INTERVAL);
        while transport.calls.load(std::sync::atomic::Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        tokio::time::timeout(Duration::from_secs(2), handle.shutdown())
            .await
            .expect("shutdown blocked on the pending request");
    }

    #[tokio::test(start_paused = true)]
    async fn failing_polls_keep_going() {
        let transport = ScriptedTransport::default();
        transport.push_failure();
        transport.push(500, "{}");
        transport.push(200, ONE_RIDE);
        let ctl = QueueController::new(RidesService::new("http://queue.test/api", transport.clone()), NoUi);

        let handle = spawn(ctl.clone(), DEFAULT_INTERVAL);
        tokio::time::sleep(DEFAULT_INTERVAL * 2 + Duration::from_millis(10)).await;
        assert_eq!(transport.seen.lock().unwrap().len(), 3);
        assert_eq!(ctl.rides().len(), 1);
        handle.shutdown().await;
    }
}
