//! Gateway command handlers.

use pfsense_api::{Client, Gateway, GatewayRequest};
use tabled::Tabled;

use crate::cli::{GatewaySpec, GatewaysArgs, GatewaysCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct GatewayRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Gateway")]
    gateway: String,
    #[tabled(rename = "Monitor")]
    monitor: String,
    #[tabled(rename = "Default")]
    default: String,
}

impl From<&Gateway> for GatewayRow {
    fn from(g: &Gateway) -> Self {
        let interface = if g.friendlyiface.is_empty() {
            g.interface.clone()
        } else {
            format!("{} ({})", g.friendlyiface, g.interface)
        };
        Self {
            id: g.id,
            name: g.name.clone(),
            interface,
            family: g.ipprotocol.clone(),
            gateway: g.gateway.clone(),
            monitor: g.monitor.clone(),
            default: if g.isdefaultgw { "yes" } else { "" }.into(),
        }
    }
}

fn to_request(spec: GatewaySpec, id: u32) -> GatewayRequest {
    GatewayRequest {
        id,
        apply: spec.apply,
        name: spec.name,
        gateway: spec.gateway,
        interface: spec.interface,
        ipprotocol: spec.ipprotocol,
        descr: spec.descr,
        monitor: spec.monitor,
        disabled: spec.disabled,
        ..GatewayRequest::default()
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    args: GatewaysArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = client.routing();

    match args.command {
        GatewaysCommand::List => {
            let gateways = service.list_gateways().await?;
            let out = output::render_list(
                &global.output,
                &gateways,
                |g| GatewayRow::from(g),
                |g| g.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GatewaysCommand::Get { name } => {
            let gateway = service
                .find_gateway(&name)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "gateway".into(),
                    identifier: name,
                    list_command: "gateways list".into(),
                })?;
            let out = output::render_single(&global.output, &gateway, |g| g.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GatewaysCommand::Create(spec) => {
            if spec.name.is_none() || spec.gateway.is_none() {
                return Err(CliError::Validation {
                    field: "gateway".into(),
                    reason: "--name and --gateway are required to create a gateway".into(),
                });
            }
            let request = to_request(spec, 0);
            service.create_gateway(&request).await?;
            util::note(global, "Gateway created");
            util::staged(global, request.apply, "gateways apply");
            Ok(())
        }

        GatewaysCommand::Update { id, spec } => {
            let request = to_request(spec, id);
            service.update_gateway(&request).await?;
            util::note(global, "Gateway updated");
            util::staged(global, request.apply, "gateways apply");
            Ok(())
        }

        GatewaysCommand::Delete { id } => {
            if !util::confirm(&format!("Delete gateway #{id}?"), global.yes)? {
                return Ok(());
            }
            service.delete_gateway(id).await?;
            util::note(global, "Gateway deleted");
            util::staged(global, false, "gateways apply");
            Ok(())
        }

        GatewaysCommand::Apply => {
            service.apply().await?;
            util::note(global, "Routing changes applied");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_maps_onto_request() {
        let spec = GatewaySpec {
            name: Some("WAN_GW".into()),
            gateway: Some("203.0.113.1".into()),
            interface: Some("wan".into()),
            ipprotocol: Some("inet".into()),
            descr: None,
            monitor: None,
            disabled: false,
            apply: true,
        };
        let request = to_request(spec, 3);
        assert_eq!(request.id, 3);
        assert!(request.apply);
        assert_eq!(request.name.as_deref(), Some("WAN_GW"));
        assert_eq!(request.interface.as_deref(), Some("wan"));
        assert!(request.latencyhigh.is_none());
    }

    #[test]
    fn row_shows_friendly_interface() {
        let gw = Gateway {
            id: 1,
            name: "WAN_DHCP".into(),
            interface: "igb0".into(),
            friendlyiface: "wan".into(),
            isdefaultgw: true,
            ..Gateway::default()
        };
        let row = GatewayRow::from(&gw);
        assert_eq!(row.interface, "wan (igb0)");
        assert_eq!(row.default, "yes");
    }
}
