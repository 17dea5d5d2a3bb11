use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());
}

#[test]
fn it_returns_defaults() {
    assert_eq!(Config::default(ConfigKey::OllamaURL), "http://localhost:11434");
    assert_eq!(Config::default(ConfigKey::LocalModel), "llama3:8b");
    assert_eq!(Config::default(ConfigKey::CerebrasURL), "https://api.cerebras.ai");
    assert_eq!(Config::default(ConfigKey::RemoteModel), "llama3.1-8b");
    assert_eq!(Config::default(ConfigKey::CerebrasAPIKey), "");
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["faceoff", "-c", "./config.example.toml"])?;
    Config::load(vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::LocalModel), "llama3:8b");
    assert_eq!(Config::get(ConfigKey::BackendHealthCheckTimeout), "1000");
    return Ok(());
}
