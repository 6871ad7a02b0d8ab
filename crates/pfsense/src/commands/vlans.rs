//! VLAN command handlers.

use pfsense_api::{Client, Vlan};
use tabled::Tabled;

use crate::cli::{GlobalOpts, VlansArgs, VlansCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "Interface")]
    vlanif: String,
    #[tabled(rename = "Parent")]
    parent: String,
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "PCP")]
    pcp: String,
    #[tabled(rename = "Description")]
    descr: String,
}

impl From<&Vlan> for VlanRow {
    fn from(v: &Vlan) -> Self {
        Self {
            vlanif: v.vlanif.clone(),
            parent: v.interface.clone(),
            tag: v.tag.clone(),
            pcp: v.pcp.clone(),
            descr: v.descr.clone(),
        }
    }
}

pub async fn handle(client: &Client, args: VlansArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        VlansCommand::List => {
            let vlans = client.interfaces().list_vlans().await?;
            let out = output::render_list(
                &global.output,
                &vlans,
                |v| VlanRow::from(v),
                |v| v.vlanif.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
