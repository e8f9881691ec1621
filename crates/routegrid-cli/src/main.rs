use clap::{Parser, Subcommand};
use colored::Colorize;
use routegrid::{GatewaySpec, LogEventSink, Orchestrator, RouterSpec};
use routegrid_http::HttpConnector;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "routegrid")]
#[command(about = "Provision and tear down SDN routers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a router, optionally gateway-attached at creation
    Provision {
        /// Router name (must not exist yet)
        name: String,
        /// External network to attach as gateway
        #[arg(short, long)]
        gateway: Option<String>,
        /// Disable source NAT on the gateway
        #[arg(long)]
        no_snat: bool,
    },
    /// Attach an external network as a router's gateway
    AddGateway {
        /// Router name
        router: String,
        /// External network name
        network: String,
        /// Disable source NAT on the gateway
        #[arg(long)]
        no_snat: bool,
    },
    /// Bind a subnet's network to a router via an interface port
    ConnectSubnet {
        /// Router name
        router: String,
        /// Subnet name
        subnet: String,
    },
    /// Remove the interface port between a router and a subnet
    DisconnectSubnet {
        /// Router name
        router: String,
        /// Subnet name
        subnet: String,
    },
    /// Delete a router (interfaces must already be disconnected)
    Terminate {
        /// Router name
        router: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if matches!(cli.command, Commands::Version) {
        println!("routegrid {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let connector = HttpConnector::from_env()?;
    let orchestrator = Orchestrator::new(Arc::new(connector), Arc::new(LogEventSink));

    let outcome = match cli.command {
        Commands::Provision {
            name,
            gateway,
            no_snat,
        } => {
            let spec = RouterSpec {
                name,
                gateway: gateway.map(|network| GatewaySpec::new(network).snat(!no_snat)),
            };
            orchestrator
                .provision(&spec)
                .await
                .map(|router| format!("provisioned router '{}' ({})", router.name, router.id))
        }
        Commands::AddGateway {
            router,
            network,
            no_snat,
        } => orchestrator
            .add_gateway(&router, &network, !no_snat)
            .await
            .map(|router| format!("attached gateway '{network}' to '{}'", router.name)),
        Commands::ConnectSubnet { router, subnet } => orchestrator
            .connect_subnet(&router, &subnet)
            .await
            .map(|router| format!("connected '{}' to subnet '{subnet}'", router.name)),
        Commands::DisconnectSubnet { router, subnet } => orchestrator
            .disconnect_subnet(&router, &subnet)
            .await
            .map(|router| format!("disconnected '{}' from subnet '{subnet}'", router.name)),
        Commands::Terminate { router } => orchestrator
            .terminate(&router)
            .await
            .map(|router| format!("terminated router '{}'", router.name)),
        Commands::Version => unreachable!(),
    };

    match outcome {
        Ok(message) => {
            println!("{}", message.green());
            Ok(())
        }
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            std::process::exit(1);
        }
    }
}
