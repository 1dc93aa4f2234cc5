//! Configuration for the enrollment CLI

use anyhow::{Context, Result};
use serde::Deserialize;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::{fs, str::FromStr};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Solana RPC URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Path to the wallet keypair file (JSON byte array)
    #[serde(default = "default_keypair_path")]
    pub keypair_path: String,

    /// Enrollment program ID
    #[serde(default = "default_program_id")]
    pub program_id: String,

    /// Collection that submission assets are minted into
    #[serde(default = "default_collection")]
    pub collection: String,

    /// MPL Core program ID
    #[serde(default = "default_mpl_core_program_id")]
    pub mpl_core_program_id: String,
}

impl Config {
    /// Load configuration from a TOML file or environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Load from .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env file loaded: {}", e);
        }

        let config = if let Some(path) = config_path {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {path}"))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {path}"))?
        } else {
            Self::from_env()
        };

        config.validate()?;
        Ok(config)
    }

    fn from_env() -> Self {
        Config {
            rpc_url: std::env::var("RPC_URL").unwrap_or_else(|_| default_rpc_url()),
            keypair_path: std::env::var("KEYPAIR_PATH").unwrap_or_else(|_| default_keypair_path()),
            program_id: std::env::var("PROGRAM_ID").unwrap_or_else(|_| default_program_id()),
            collection: std::env::var("COLLECTION").unwrap_or_else(|_| default_collection()),
            mpl_core_program_id: std::env::var("MPL_CORE_PROGRAM_ID")
                .unwrap_or_else(|_| default_mpl_core_program_id()),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.rpc_url.starts_with("http") {
            anyhow::bail!("RPC URL must start with http or https");
        }
        self.program_id()?;
        self.collection()?;
        self.mpl_core_program_id()?;
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.program_id).context("Invalid program ID")
    }

    pub fn collection(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.collection).context("Invalid collection address")
    }

    pub fn mpl_core_program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.mpl_core_program_id).context("Invalid MPL Core program ID")
    }

    /// Load the wallet keypair from the configured path.
    pub fn load_keypair(&self) -> Result<Keypair> {
        enroll_sdk::wallet::read_keypair_file(&self.keypair_path)
            .with_context(|| format!("Failed to load keypair from {}", self.keypair_path))
    }
}

fn default_rpc_url() -> String {
    "https://api.devnet.solana.com".to_owned()
}

fn default_keypair_path() -> String {
    "dev-wallet.json".to_owned()
}

fn default_program_id() -> String {
    enroll_sdk::program::PROGRAM_ID.to_owned()
}

fn default_collection() -> String {
    enroll_sdk::program::DEFAULT_COLLECTION.to_owned()
}

fn default_mpl_core_program_id() -> String {
    enroll_sdk::program::MPL_CORE_PROGRAM_ID.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_parse_as_pubkeys() {
        let config = Config::from_env();
        assert!(config.program_id().is_ok());
        assert!(config.collection().is_ok());
        assert!(config.mpl_core_program_id().is_ok());
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rpc_url = \"http://localhost:8899\"").unwrap();

        let config = Config::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8899");
        assert_eq!(config.program_id, default_program_id());
    }

    #[test]
    fn rejects_non_http_rpc_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rpc_url = \"ws://localhost:8900\"").unwrap();

        assert!(Config::load(Some(file.path().to_str().unwrap())).is_err());
    }

    #[test]
    fn rejects_invalid_program_id() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "program_id = \"not-a-pubkey\"").unwrap();

        assert!(Config::load(Some(file.path().to_str().unwrap())).is_err());
    }
}
