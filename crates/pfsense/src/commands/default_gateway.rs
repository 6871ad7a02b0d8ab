//! Default gateway command handlers.

use pfsense_api::{Client, DefaultGatewayRequest};

use crate::cli::{DefaultGatewayArgs, DefaultGatewayCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(
    client: &Client,
    args: DefaultGatewayArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DefaultGatewayCommand::Set { v4, v6, apply } => {
            if v4.is_none() && v6.is_none() {
                return Err(CliError::Validation {
                    field: "default-gateway".into(),
                    reason: "pass --v4 and/or --v6".into(),
                });
            }
            let request = DefaultGatewayRequest {
                defaultgw4: v4.unwrap_or_default(),
                defaultgw6: v6.unwrap_or_default(),
                apply,
            };
            client.routing().set_default_gateway(&request).await?;
            util::note(global, "Default gateway set");
            util::staged(global, apply, "gateways apply");
            Ok(())
        }
    }
}
