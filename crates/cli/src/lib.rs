pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "shopmate",
    about = "Shopmate operator CLI",
    long_about = "Operate the demo shopping assistant: seed the store, run scripted \
                  conversations, query recommendations, and inspect configuration.",
    after_help = "Examples:\n  shopmate seed\n  shopmate demo --shopper priya\n  \
                  shopmate recommend --shopper rohan --product \"allen solly\"\n  \
                  shopmate doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply migrations and load the demo shoppers and catalog")]
    Seed,
    #[command(about = "Run a scripted conversation against the seeded store")]
    Demo {
        #[arg(long, default_value = "priya", help = "Shopper name fragment")]
        shopper: String,
        #[arg(long, default_value = "web", help = "Channel: web or whatsapp")]
        channel: String,
    },
    #[command(about = "Print ranked recommendations for a shopper and source product")]
    Recommend {
        #[arg(long, help = "Shopper name fragment")]
        shopper: String,
        #[arg(long, help = "Source product name fragment")]
        product: String,
    },
    #[command(about = "Show the effective configuration values")]
    Config,
    #[command(about = "Validate config, database connectivity, and seed integrity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Seed => commands::seed::run().await,
        Command::Demo { shopper, channel } => commands::demo::run(&shopper, &channel).await,
        Command::Recommend { shopper, product } => {
            commands::recommend::run(&shopper, &product).await
        }
        Command::Config => commands::CommandResult { exit_code: 0, output: commands::config::run() },
        Command::Doctor { json } => commands::doctor::run(json).await,
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
