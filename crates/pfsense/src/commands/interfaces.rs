//! Interface command handlers.

use pfsense_api::{Client, Interface, InterfaceRequest};
use tabled::Tabled;

use crate::cli::{GlobalOpts, InterfacesArgs, InterfacesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Description")]
    descr: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "IPv4")]
    ipv4: String,
    #[tabled(rename = "IPv6")]
    ipv6: String,
    #[tabled(rename = "Gateway")]
    gateway: String,
}

impl From<&Interface> for InterfaceRow {
    fn from(i: &Interface) -> Self {
        let ipv4 = if i.subnet.is_empty() {
            i.ipaddr.clone()
        } else {
            format!("{}/{}", i.ipaddr, i.subnet)
        };
        Self {
            name: i.name.clone(),
            device: i.interface.clone(),
            descr: i.descr.clone(),
            enabled: if i.is_enabled() { "yes" } else { "no" }.into(),
            ipv4,
            ipv6: i.ipaddrv6.clone(),
            gateway: i.gateway.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    args: InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let service = client.interfaces();

    match args.command {
        InterfacesCommand::List => {
            let interfaces = service.list_interfaces().await?;
            let out = output::render_list(
                &global.output,
                &interfaces,
                |i| InterfaceRow::from(i),
                |i| i.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InterfacesCommand::Get { name } => {
            let iface = service
                .get_interface(&name)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "interface".into(),
                    identifier: name,
                    list_command: "interfaces list".into(),
                })?;
            let out = output::render_single(&global.output, &iface, |i| i.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InterfacesCommand::Create { from_file, apply } => {
            let mut request: InterfaceRequest = util::read_json_file(&from_file)?;
            request.apply = request.apply || apply;
            service.create_interface(&request).await?;
            util::note(global, "Interface created");
            util::staged(global, request.apply, "interfaces apply");
            Ok(())
        }

        InterfacesCommand::Update {
            id,
            from_file,
            apply,
        } => {
            let mut request: InterfaceRequest = util::read_json_file(&from_file)?;
            request.id = id;
            request.apply = request.apply || apply;
            service.update_interface(&request).await?;
            util::note(global, "Interface updated");
            util::staged(global, request.apply, "interfaces apply");
            Ok(())
        }

        InterfacesCommand::Delete { id } => {
            if !util::confirm(&format!("Remove interface '{id}'?"), global.yes)? {
                return Ok(());
            }
            service.delete_interface(&id).await?;
            util::note(global, "Interface removed");
            util::staged(global, false, "interfaces apply");
            Ok(())
        }

        InterfacesCommand::Apply => {
            service.apply().await?;
            util::note(global, "Interface changes applied");
            Ok(())
        }
    }
}
