mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Map `-v`/`-q` to a filter directive for our own crates.
///
/// HTTP stack crates stay at `warn` until `-vvv`, where everything goes to
/// `trace`. `RUST_LOG` replaces the whole directive.
fn filter_directive(global: &GlobalOpts) -> String {
    let level = match (global.quiet, global.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => return "trace".into(),
    };
    format!("warn,pfsense={level},pfsense_api={level},pfsense_config={level}")
}

fn init_tracing(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(global)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;

    match command {
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        Command::Completions(args) => {
            use clap::CommandFactory;

            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "pfsense",
                &mut std::io::stdout(),
            );
            Ok(())
        }

        cmd => {
            let client = config::build_client(&global)?;
            tracing::debug!(base_url = %client.base_url(), command = ?cmd, "dispatching");
            commands::dispatch(cmd, &client, &global).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["pfsense"];
        argv.extend_from_slice(args);
        argv.extend(["vlans", "list"]);
        Cli::parse_from(argv).global
    }

    #[test]
    fn verbosity_scopes_to_own_crates() {
        assert_eq!(
            filter_directive(&global(&[])),
            "warn,pfsense=warn,pfsense_api=warn,pfsense_config=warn"
        );
        assert_eq!(
            filter_directive(&global(&["-vv"])),
            "warn,pfsense=debug,pfsense_api=debug,pfsense_config=debug"
        );
        assert_eq!(filter_directive(&global(&["-vvv"])), "trace");
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert!(filter_directive(&global(&["-q", "-v"])).contains("pfsense_api=error"));
    }
}
