use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::units::MAX_DECIMALS;
use crate::validate::Address;

/// Addresses and unit scale for the crowdfunding dApp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrowdfundConfig {
    /// Contract every campaign action targets.
    pub contract: Address,
    /// Decimals of the native coin contributions are denominated in.
    pub value_decimals: u8,
    /// Block-explorer base URL for linking submitted transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

/// Addresses and unit scale for the vesting dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingConfig {
    /// Vesting contract holding the schedules.
    pub vesting_contract: Address,
    /// ERC-20 token the schedules pay out.
    pub token_contract: Address,
    /// Decimals of that token.
    pub token_decimals: u8,
    /// Account that funds new schedules; its token allowance for the vesting
    /// contract gates schedule creation.
    pub operator: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

/// Per-deployment configuration, injected where controllers are built.
/// Nothing else in the workspace knows a contract address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DappConfig {
    pub crowdfund: CrowdfundConfig,
    pub vesting: VestingConfig,
}

impl CrowdfundConfig {
    pub fn validate(&self) -> Result<()> {
        validate_decimals("crowdfund.value_decimals", self.value_decimals)?;
        validate_explorer("crowdfund.explorer_url", self.explorer_url.as_deref())
    }
}

impl VestingConfig {
    pub fn validate(&self) -> Result<()> {
        validate_decimals("vesting.token_decimals", self.token_decimals)?;
        validate_explorer("vesting.explorer_url", self.explorer_url.as_deref())
    }
}

impl DappConfig {
    /// Load and validate a config file. A missing file is an error: there is
    /// no meaningful default for contract addresses.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&content).with_context(|| "Failed to parse dApp config")?;
        config.validate()?;
        info!("Loaded dApp config from {}", path.display());
        Ok(config)
    }

    /// Save config to a specific file path.
    pub fn save_to_path(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.crowdfund.validate()?;
        self.vesting.validate()
    }
}

fn validate_decimals(field: &str, decimals: u8) -> Result<()> {
    if decimals > MAX_DECIMALS {
        anyhow::bail!("{field} is {decimals}; the maximum supported is {MAX_DECIMALS}");
    }
    Ok(())
}

fn validate_explorer(field: &str, url: Option<&str>) -> Result<()> {
    if let Some(url) = url {
        if !validate_url(url) {
            anyhow::bail!("{field} is not a valid HTTP(S) URL: {url}");
        }
    }
    Ok(())
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> DappConfig {
        // Stock first-deploy addresses from a local Hardhat node.
        DappConfig {
            crowdfund: CrowdfundConfig {
                contract: Address::parse("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap(),
                value_decimals: 18,
                explorer_url: Some("https://sepolia.etherscan.io".into()),
            },
            vesting: VestingConfig {
                vesting_contract: Address::parse("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512")
                    .unwrap(),
                token_contract: Address::parse("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0")
                    .unwrap(),
                token_decimals: 18,
                operator: Address::parse("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap(),
                explorer_url: None,
            },
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dapp.json");

        let config = sample_config();
        config.save_to_path(&path).unwrap();
        let loaded = DappConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.json");
        assert!(DappConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_address() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dapp.json");

        let mut raw = serde_json::to_value(sample_config()).unwrap();
        raw["crowdfund"]["contract"] = serde_json::Value::String("0x123".into());
        std::fs::write(&path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();

        assert!(DappConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn test_load_rejects_bad_explorer_url() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dapp.json");

        let mut config = sample_config();
        config.crowdfund.explorer_url = Some("ftp://explorer.example.com".into());
        config.save_to_path(&path).unwrap();

        assert!(DappConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_decimals() {
        let mut config = sample_config();
        config.vesting.token_decimals = MAX_DECIMALS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explorer_url_is_optional() {
        let mut config = sample_config();
        config.crowdfund.explorer_url = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("https://etherscan.io"));
        assert!(validate_url("http://localhost:8545"));
    }

    #[test]
    fn test_validate_url_rejects_garbage() {
        assert!(!validate_url(""));
        assert!(!validate_url("not a url"));
        assert!(!validate_url("file:///etc/passwd"));
    }
}
