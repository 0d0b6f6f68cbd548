use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

const ORG_URL_ENV: &str = "OKTA_ORG_URL";
const API_TOKEN_ENV: &str = "OKTA_API_TOKEN";

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct AppConfig {
    org_url: Option<String>,
    api_token: Option<String>,
    timeout: Option<f64>,
}

impl AppConfig {
    pub fn read_config() -> Result<Self> {
        let config_file = AppConfig::config_file()?;
        if !config_file.exists() {
            return Ok(AppConfig::default());
        }

        let config_contents = fs::read_to_string(config_file)?;
        AppConfig::parse(config_contents.as_str())
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;

        Ok(config)
    }

    pub fn write_config(&self) -> Result<()> {
        let config_dir = AppConfig::config_dir()?;
        fs::create_dir_all(config_dir)?;

        let config_file = AppConfig::config_file()?;

        let toml = toml::to_string(&self)?;
        fs::write(config_file, toml)?;

        Ok(())
    }

    /// Overrides the file values with `OKTA_ORG_URL` and `OKTA_API_TOKEN` when set.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(org_url) = std::env::var(ORG_URL_ENV) {
            self.set_org_url(org_url.as_str())?;
        }
        if let Ok(api_token) = std::env::var(API_TOKEN_ENV) {
            self.set_api_token(api_token);
        }

        Ok(())
    }

    pub fn set_org_url(&mut self, org_url: &str) -> Result<()> {
        let mut org_url = Url::parse(org_url)?;

        // remove query
        org_url.set_query(None);

        // remove trailing slash
        org_url
            .path_segments_mut()
            .map_err(|_| "cannot be base")
            .map_err(|e| anyhow!(e))?
            .pop_if_empty();

        self.org_url = Some(String::from(org_url));

        Ok(())
    }

    pub fn set_api_token(&mut self, api_token: String) {
        self.api_token = Some(api_token);
    }

    pub fn set_timeout(&mut self, timeout: f64) -> Result<()> {
        if !timeout.is_finite() || timeout < 0.0 {
            return Err(anyhow!("timeout must be a non-negative number of seconds"));
        }
        self.timeout = Some(timeout);

        Ok(())
    }

    pub fn org_url(&self) -> Result<String> {
        self.org_url.clone().ok_or_else(|| {
            anyhow!("please configure an org url or set {}", ORG_URL_ENV)
        })
    }

    pub fn api_token(&self) -> Option<String> {
        self.api_token.clone()
    }

    pub fn timeout(&self) -> Option<f64> {
        self.timeout
    }

    fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("could not determine config directory"))?
            .join("okta-request");

        Ok(config_dir)
    }

    fn config_file() -> Result<PathBuf> {
        let config_file = AppConfig::config_dir()?.join("settings.toml");

        Ok(config_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let config = AppConfig::parse(
            r#"
org_url = "https://dev-123.okta.com"
api_token = "TheToken"
timeout = 30.0
"#,
        )
        .unwrap();

        assert_eq!(config.org_url().unwrap(), "https://dev-123.okta.com");
        assert_eq!(config.api_token(), Some(String::from("TheToken")));
        assert_eq!(config.timeout(), Some(30.0));
    }

    #[test]
    fn test_parse_empty() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.org_url().is_err());
    }

    #[test]
    fn test_set_org_url() {
        let mut config = AppConfig::default();
        config
            .set_org_url("https://dev-123.okta.com/?fromURI=%2Fapp")
            .unwrap();
        assert_eq!(config.org_url().unwrap(), "https://dev-123.okta.com/");

        config
            .set_org_url("https://proxy.example.com/okta/")
            .unwrap();
        assert_eq!(config.org_url().unwrap(), "https://proxy.example.com/okta");
    }

    #[test]
    fn test_set_invalid_org_url() {
        let mut config = AppConfig::default();
        assert!(config.set_org_url("dev-123").is_err());
        assert!(config.org_url().is_err());
    }

    #[test]
    fn test_set_timeout() {
        let mut config = AppConfig::default();
        assert!(config.set_timeout(-2.0).is_err());
        config.set_timeout(10.0).unwrap();
        assert_eq!(config.timeout(), Some(10.0));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = AppConfig::default();
        config.set_org_url("https://dev-123.okta.com").unwrap();
        config.set_api_token(String::from("TheToken"));

        let toml = toml::to_string(&config).unwrap();
        assert_eq!(AppConfig::parse(toml.as_str()).unwrap(), config);
    }
}
