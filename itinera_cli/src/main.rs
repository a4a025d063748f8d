use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{distance::DistanceArgs, generate::GenerateSubcommands, route::RouteArgs};

mod distance;
mod generate;
mod parsers;
mod route;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Order the selected cities into a nearest-neighbor route
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Great-circle distance between two coordinates
    Distance {
        #[command(flatten)]
        args: DistanceArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Route { args } => route::run(args).await?,
        Commands::Distance { args } => distance::run(args)?,
        Commands::Generate { commands } => generate::run(commands)?,
    }

    Ok(())
}
