mod config;
mod request;
mod utils;

use crate::config::Config;
use crate::request::Request;
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use okta_request::settings::AppConfig;
use simple_logger::SimpleLogger;

#[derive(Parser)]
#[command(version, about = "Send requests to the Okta API")]
struct Opts {
    /// Log outgoing requests
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    sub_command: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    Config(Config),
    Request(Request),
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt: Opts = Opts::parse();
    let mut settings = AppConfig::read_config()?;

    let level = if opt.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    match opt.sub_command {
        SubCommand::Config(val) => val.run(&mut settings)?,
        SubCommand::Request(val) => {
            settings.apply_env()?;
            val.run(&settings).await?
        }
    }

    Ok(())
}
