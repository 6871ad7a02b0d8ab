// Interface endpoints
//
// Interface settings live under api/v1/interface. Changes are staged on the
// appliance and only take effect after `apply`.

use tracing::debug;

use crate::client::{ApiRequest, Transport};
use crate::envelope::{Keyed, decode_envelope};
use crate::error::Error;
use crate::models::{Interface, InterfaceRequest, Vlan};

pub const INTERFACE_ENDPOINT: &str = "api/v1/interface";
pub const INTERFACE_VLAN_ENDPOINT: &str = "api/v1/interface/vlan";
pub const INTERFACE_APPLY_ENDPOINT: &str = "api/v1/interface/apply";

/// Interface and VLAN operations.
pub struct InterfaceService<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> InterfaceService<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// List all assigned interfaces.
    ///
    /// `GET api/v1/interface` -- the payload is keyed by interface name,
    /// which is copied into [`Interface::name`].
    pub async fn list_interfaces(&self) -> Result<Vec<Interface>, Error> {
        debug!("listing interfaces");
        let body = self.transport.send(ApiRequest::get(INTERFACE_ENDPOINT)).await?;
        let envelope = decode_envelope::<Keyed<Interface>>(&body)?;

        Ok(envelope
            .data
            .into_entries()
            .into_iter()
            .map(|(key, mut iface)| {
                if let Some(name) = key {
                    iface.name = name;
                }
                iface
            })
            .collect())
    }

    /// Look up a single interface by name (`wan`, `lan`, `opt1`, ...).
    pub async fn get_interface(&self, name: &str) -> Result<Option<Interface>, Error> {
        let interfaces = self.list_interfaces().await?;
        Ok(interfaces.into_iter().find(|iface| iface.name == name))
    }

    /// Assign a new interface.
    ///
    /// `POST api/v1/interface`
    pub async fn create_interface(&self, request: &InterfaceRequest) -> Result<(), Error> {
        debug!(interface = %request.interface, "creating interface");
        let req = ApiRequest::post(INTERFACE_ENDPOINT).json(request)?;
        self.transport.send(req).await?;
        Ok(())
    }

    /// Update an interface, targeted by `request.id`.
    ///
    /// `PUT api/v1/interface?id={id}`
    pub async fn update_interface(&self, request: &InterfaceRequest) -> Result<(), Error> {
        debug!(id = %request.id, "updating interface");
        let req = ApiRequest::put(INTERFACE_ENDPOINT)
            .query("id", request.id.clone())
            .json(request)?;
        self.transport.send(req).await?;
        Ok(())
    }

    /// Remove an interface assignment.
    ///
    /// `DELETE api/v1/interface?id={id}`
    pub async fn delete_interface(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting interface");
        let req = ApiRequest::delete(INTERFACE_ENDPOINT).query("id", id);
        self.transport.send(req).await?;
        Ok(())
    }

    /// List configured VLANs.
    ///
    /// `GET api/v1/interface/vlan`
    pub async fn list_vlans(&self) -> Result<Vec<Vlan>, Error> {
        debug!("listing VLANs");
        let body = self
            .transport
            .send(ApiRequest::get(INTERFACE_VLAN_ENDPOINT))
            .await?;
        Ok(decode_envelope::<Vec<Vlan>>(&body)?.data)
    }

    /// Activate all staged interface changes.
    ///
    /// `POST api/v1/interface/apply` with no body.
    pub async fn apply(&self) -> Result<(), Error> {
        debug!("applying interface changes");
        self.transport
            .send(ApiRequest::post(INTERFACE_APPLY_ENDPOINT))
            .await?;
        Ok(())
    }
}
