use anyhow::Result;
use clap::Parser;
use okta_request::settings::AppConfig;

#[derive(Parser)]
pub struct Config {
    #[command(subcommand)]
    sub_command: ConfigSubCommand,
}

#[derive(Parser)]
enum ConfigSubCommand {
    Set(ConfigSet),
    Show,
}

#[derive(Parser)]
struct ConfigSet {
    #[arg(long)]
    org_url: Option<String>,
    #[arg(long)]
    api_token: Option<String>,
    /// Default request timeout in seconds, 0 waits indefinitely
    #[arg(long)]
    timeout: Option<f64>,
}

impl Config {
    pub fn run(&self, settings: &mut AppConfig) -> Result<()> {
        match &self.sub_command {
            ConfigSubCommand::Set(val) => val.run(settings),
            ConfigSubCommand::Show => {
                println!("org_url = {}", settings.org_url().unwrap_or_default());
                println!(
                    "api_token = {}",
                    if settings.api_token().is_some() {
                        "********"
                    } else {
                        ""
                    }
                );
                if let Some(timeout) = settings.timeout() {
                    println!("timeout = {}", timeout);
                }

                Ok(())
            }
        }
    }
}

impl ConfigSet {
    fn run(&self, settings: &mut AppConfig) -> Result<()> {
        if let Some(org_url) = &self.org_url {
            settings.set_org_url(org_url.as_str())?;
        }
        if let Some(api_token) = &self.api_token {
            settings.set_api_token(api_token.clone());
        }
        if let Some(timeout) = self.timeout {
            settings.set_timeout(timeout)?;
        }
        settings.write_config()?;

        log::info!("settings saved");

        Ok(())
    }
}
