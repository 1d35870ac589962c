//! Async face of the ride-queue API: build the request, run it through the
//! transport, parse the response.

use ride_queue_core::{ApiError, HttpRequest, HttpResponse, NewRide, Ride, RideClient, RideId, RideList};

use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct RidesService<T> {
    client: RideClient,
    transport: T,
}

impl<T: Transport> RidesService<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: RideClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &RideClient {
        &self.client
    }

    pub async fn create_ride(&self, ride: &NewRide) -> Result<Ride, ApiError> {
        let response = self.send(self.client.build_create_ride(ride)?).await?;
        self.client.parse_create_ride(response)
    }

    pub async fn get_rides(&self) -> Result<RideList, ApiError> {
        let response = self.send(self.client.build_get_rides()).await?;
        self.client.parse_get_rides(response)
    }

    pub async fn get_ride(&self, id: RideId) -> Result<Ride, ApiError> {
        let response = self.send(self.client.build_get_ride(id)).await?;
        self.client.parse_get_ride(response)
    }

    pub async fn delete_ride(&self, id: RideId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_ride(id)).await?;
        self.client.parse_delete_ride(response)
    }

    pub async fn notify(&self, id: RideId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_notify(id)).await?;
        self.client.parse_notify(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::trace!(method = request.method.as_str(), url = %request.url, "request");
        self.transport.execute(request).await.inspect_err(|e| {
            tracing::warn!(error = %e, "request never completed");
        })
    }
}
