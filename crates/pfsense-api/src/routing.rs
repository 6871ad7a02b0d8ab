// Routing endpoints
//
// Gateways, the system default gateway, and the routing apply step.
// Like interfaces, routing changes are staged until `apply` is called
// (or a request is sent with `apply: true`).

use tracing::debug;

use crate::client::{ApiRequest, Transport};
use crate::envelope::{Keyed, decode_envelope};
use crate::error::Error;
use crate::models::{DefaultGatewayRequest, Gateway, GatewayRequest};

pub const GATEWAY_ENDPOINT: &str = "api/v1/routing/gateway";
pub const DEFAULT_GATEWAY_ENDPOINT: &str = "api/v1/routing/gateway/default";
pub const ROUTING_APPLY_ENDPOINT: &str = "api/v1/routing/apply";

/// Gateway and routing operations.
pub struct RoutingService<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> RoutingService<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List all gateways.
    ///
    /// `GET api/v1/routing/gateway` -- the appliance has no numeric gateway
    /// id, so each entry gets its position (0..N-1) in the response.
    pub async fn list_gateways(&self) -> Result<Vec<Gateway>, Error> {
        debug!("listing gateways");
        let body = self.transport.send(ApiRequest::get(GATEWAY_ENDPOINT)).await?;
        let envelope = decode_envelope::<Keyed<Gateway>>(&body)?;

        Ok(envelope
            .data
            .into_entries()
            .into_iter()
            .zip(0..)
            .map(|((_, mut gateway), id)| {
                gateway.id = id;
                gateway
            })
            .collect())
    }

    /// Look up a gateway by its name, the only stable key the appliance offers.
    pub async fn find_gateway(&self, name: &str) -> Result<Option<Gateway>, Error> {
        let gateways = self.list_gateways().await?;
        Ok(gateways.into_iter().find(|gw| gw.name == name))
    }

    /// Create a gateway.
    ///
    /// `POST api/v1/routing/gateway`. The response body is not decoded.
    pub async fn create_gateway(&self, request: &GatewayRequest) -> Result<(), Error> {
        debug!(name = ?request.name, "creating gateway");
        let req = ApiRequest::post(GATEWAY_ENDPOINT).json(request)?;
        self.transport.send(req).await?;
        Ok(())
    }

    /// Update a gateway. The target is identified by `request.id` in the body.
    ///
    /// `PUT api/v1/routing/gateway`
    pub async fn update_gateway(&self, request: &GatewayRequest) -> Result<(), Error> {
        debug!(id = request.id, "updating gateway");
        let req = ApiRequest::put(GATEWAY_ENDPOINT).json(request)?;
        self.transport.send(req).await?;
        Ok(())
    }

    /// Delete a gateway.
    ///
    /// `DELETE api/v1/routing/gateway?id={id}`
    pub async fn delete_gateway(&self, id: u32) -> Result<(), Error> {
        debug!(id, "deleting gateway");
        let req = ApiRequest::delete(GATEWAY_ENDPOINT).query("id", id.to_string());
        self.transport.send(req).await?;
        Ok(())
    }

    /// Set the system default gateways.
    ///
    /// `PUT api/v1/routing/gateway/default`
    pub async fn set_default_gateway(&self, request: &DefaultGatewayRequest) -> Result<(), Error> {
        debug!(
            v4 = %request.defaultgw4,
            v6 = %request.defaultgw6,
            "setting default gateway"
        );
        let req = ApiRequest::put(DEFAULT_GATEWAY_ENDPOINT).json(request)?;
        self.transport.send(req).await?;
        Ok(())
    }

    /// Activate all staged routing changes.
    ///
    /// `POST api/v1/routing/apply` with no body.
    pub async fn apply(&self) -> Result<(), Error> {
        debug!("applying routing changes");
        self.transport
            .send(ApiRequest::post(ROUTING_APPLY_ENDPOINT))
            .await?;
        Ok(())
    }
}
