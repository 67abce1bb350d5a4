//! # Bridge Configuration
//!
//! The fixed identifier set supplied at startup and treated as immutable for
//! the process lifetime. Validation is eager: a missing or malformed
//! identifier is a fatal configuration error raised before any chain call.

use super::errors::BridgeError;
use super::value_objects::{EthAddress, ObjectId};
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable: IBT ERC-20 contract address.
pub const ENV_ETHEREUM_CONTRACT: &str = "IBT_ETHEREUM_CONTRACT";
/// Environment variable: Sui bridge package id.
pub const ENV_SUI_PACKAGE_ID: &str = "IBT_SUI_PACKAGE_ID";
/// Environment variable: Sui AdminCap object id.
pub const ENV_SUI_ADMIN_CAP_ID: &str = "IBT_SUI_ADMIN_CAP_ID";
/// Environment variable: Sui TreasuryCap object id.
pub const ENV_SUI_TREASURY_CAP_ID: &str = "IBT_SUI_TREASURY_CAP_ID";
/// Environment variable: target Sui network name.
pub const ENV_SUI_NETWORK: &str = "IBT_SUI_NETWORK";

/// Deployment identifiers the orchestrator needs on both chains.
///
/// The capability ids are references to privileged credentials held by the
/// deploying operator; the orchestrator only ever passes them along, it
/// never holds the credential itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// IBT ERC-20 contract on the Ethereum side.
    pub ethereum_contract: EthAddress,
    /// Published bridge package on the Sui side.
    pub sui_package_id: ObjectId,
    /// AdminCap object authorizing bridge mint/burn on Sui.
    pub sui_admin_cap_id: ObjectId,
    /// TreasuryCap object backing the coin supply on Sui.
    pub sui_treasury_cap_id: ObjectId,
    /// Target Sui network name (e.g. "sui:devnet").
    pub sui_network: String,
}

impl BridgeConfig {
    /// Build from already-parsed identifiers.
    pub fn new(
        ethereum_contract: EthAddress,
        sui_package_id: ObjectId,
        sui_admin_cap_id: ObjectId,
        sui_treasury_cap_id: ObjectId,
        sui_network: impl Into<String>,
    ) -> Self {
        Self {
            ethereum_contract,
            sui_package_id,
            sui_admin_cap_id,
            sui_treasury_cap_id,
            sui_network: sui_network.into(),
        }
    }

    /// Load and validate from `IBT_*` environment variables.
    pub fn from_env() -> Result<Self, BridgeError> {
        let config = Self {
            ethereum_contract: EthAddress::from_hex(&required_env(ENV_ETHEREUM_CONTRACT)?)?,
            sui_package_id: ObjectId::from_hex(&required_env(ENV_SUI_PACKAGE_ID)?)?,
            sui_admin_cap_id: ObjectId::from_hex(&required_env(ENV_SUI_ADMIN_CAP_ID)?)?,
            sui_treasury_cap_id: ObjectId::from_hex(&required_env(ENV_SUI_TREASURY_CAP_ID)?)?,
            sui_network: required_env(ENV_SUI_NETWORK)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject identifier values that can never belong to a live deployment.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.sui_network.trim().is_empty() {
            return Err(BridgeError::Configuration(
                "sui network name is empty".to_string(),
            ));
        }
        for (name, id) in [
            ("sui package id", &self.sui_package_id),
            ("sui AdminCap id", &self.sui_admin_cap_id),
            ("sui TreasuryCap id", &self.sui_treasury_cap_id),
        ] {
            if id.0.iter().all(|b| *b == 0) {
                return Err(BridgeError::Configuration(format!("{name} is all zeros")));
            }
        }
        if self.ethereum_contract.0.iter().all(|b| *b == 0) {
            return Err(BridgeError::Configuration(
                "ethereum contract address is all zeros".to_string(),
            ));
        }
        Ok(())
    }
}

fn required_env(key: &str) -> Result<String, BridgeError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BridgeError::Configuration(format!("{key} is not set"))),
    }
}
