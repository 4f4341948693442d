use nl_types::{Fixed8, UInt256};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::transaction::TransactionType;

/// Network-wide protocol parameters consulted by fee and JSON rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolSettings {
    /// Hash of the governing (voting) token asset.
    pub governing_token: UInt256,
    /// Hash of the utility (fee) token asset.
    pub utility_token: UInt256,
    /// System fee charged per transaction type.
    pub system_fees: SystemFees,
}

/// Mainnet governing token, `0xc56f33fc...daff7c9b` in display order.
pub const GOVERNING_TOKEN: UInt256 = UInt256::from_bytes([
    0x9b, 0x7c, 0xff, 0xda, 0xa6, 0x74, 0xbe, 0xae, 0x0f, 0x93, 0x0e, 0xbe, 0x60, 0x85, 0xaf, 0x90,
    0x93, 0xe5, 0xfe, 0x56, 0xb3, 0x4a, 0x5c, 0x22, 0x0c, 0xcd, 0xcf, 0x6e, 0xfc, 0x33, 0x6f, 0xc5,
]);

/// Mainnet utility token, `0x602c7971...69282de7` in display order.
pub const UTILITY_TOKEN: UInt256 = UInt256::from_bytes([
    0xe7, 0x2d, 0x28, 0x69, 0x79, 0xee, 0x6c, 0xb1, 0xb7, 0xe6, 0x5d, 0xfd, 0xdf, 0xb2, 0xe3, 0x84,
    0x10, 0x0b, 0x8d, 0x14, 0x8e, 0x77, 0x58, 0xde, 0x42, 0xe4, 0x16, 0x8b, 0x71, 0x79, 0x2c, 0x60,
]);

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self {
            governing_token: GOVERNING_TOKEN,
            utility_token: UTILITY_TOKEN,
            system_fees: SystemFees::default(),
        }
    }
}

impl ProtocolSettings {
    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    /// The configured system fee for a transaction type.
    pub fn system_fee(&self, tx_type: TransactionType) -> Fixed8 {
        match tx_type {
            TransactionType::Miner => self.system_fees.miner,
            TransactionType::Issue => self.system_fees.issue,
            TransactionType::Claim => self.system_fees.claim,
            TransactionType::Contract => self.system_fees.contract,
            TransactionType::Invocation => self.system_fees.invocation,
        }
    }
}

/// System fee table, keyed by transaction type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemFees {
    pub miner: Fixed8,
    pub issue: Fixed8,
    pub claim: Fixed8,
    pub contract: Fixed8,
    pub invocation: Fixed8,
}

impl Default for SystemFees {
    fn default() -> Self {
        Self {
            miner: Fixed8::ZERO,
            issue: Fixed8::from_raw(500 * Fixed8::ONE),
            claim: Fixed8::ZERO,
            contract: Fixed8::ZERO,
            invocation: Fixed8::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let s = ProtocolSettings::default();
        assert_eq!(s.system_fee(TransactionType::Issue), Fixed8::from_whole(500).unwrap());
        assert_eq!(s.system_fee(TransactionType::Contract), Fixed8::ZERO);
        assert_ne!(s.governing_token, s.utility_token);
    }

    #[test]
    fn default_tokens_display_as_mainnet_hashes() {
        assert_eq!(
            GOVERNING_TOKEN.to_hex_string(),
            "0xc56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b"
        );
        assert_eq!(
            UTILITY_TOKEN.to_hex_string(),
            "0x602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7"
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = ProtocolSettings::from_toml_str(
            r#"
            [system_fees]
            issue = "10"
            "#,
        )
        .unwrap();
        assert_eq!(s.system_fees.issue, Fixed8::from_whole(10).unwrap());
        assert_eq!(s.utility_token, ProtocolSettings::default().utility_token);
    }

    #[test]
    fn toml_token_override() {
        let hash = UInt256::from_bytes([1; 32]);
        let s = ProtocolSettings::from_toml_str(&format!(
            "governing_token = \"{}\"",
            hash.to_hex_string()
        ))
        .unwrap();
        assert_eq!(s.governing_token, hash);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(ProtocolSettings::from_toml_str("governing_token = 5").is_err());
    }
}
