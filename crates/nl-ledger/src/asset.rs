use nl_codec::{json, size, BinaryReader, BinaryWriter, CodecError, CodecResult, Serializable};
use nl_types::{Fixed8, PublicKey, UInt160, UInt256};
use serde::Serialize;

use crate::json::{JsonContext, SerializableJson};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AssetType {
    CreditFlag,
    DutyFlag,
    GoverningToken,
    UtilityToken,
    Currency,
    Share,
    Invoice,
    Token,
}

impl AssetType {
    pub fn to_byte(self) -> u8 {
        match self {
            AssetType::CreditFlag => 0x40,
            AssetType::DutyFlag => 0x80,
            AssetType::GoverningToken => 0x00,
            AssetType::UtilityToken => 0x01,
            AssetType::Currency => 0x08,
            AssetType::Share => 0x90,
            AssetType::Invoice => 0x98,
            AssetType::Token => 0x60,
        }
    }

    pub fn from_byte(value: u8) -> CodecResult<Self> {
        Ok(match value {
            0x40 => AssetType::CreditFlag,
            0x80 => AssetType::DutyFlag,
            0x00 => AssetType::GoverningToken,
            0x01 => AssetType::UtilityToken,
            0x08 => AssetType::Currency,
            0x90 => AssetType::Share,
            0x98 => AssetType::Invoice,
            0x60 => AssetType::Token,
            value => {
                return Err(CodecError::UnknownDiscriminant {
                    kind: "asset type",
                    value,
                })
            }
        })
    }
}

/// Fields of an [`Asset`], before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetParts {
    pub hash: UInt256,
    pub asset_type: AssetType,
    pub name: String,
    pub amount: Fixed8,
    pub available: Fixed8,
    pub precision: u8,
    pub owner: PublicKey,
    pub admin: UInt160,
    pub issuer: UInt160,
    pub expiration: u32,
    pub is_frozen: bool,
}

/// Registered asset state.
///
/// A negative `amount` marks an asset with unlimited supply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    parts: AssetParts,
    size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetJson {
    pub version: u8,
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub name: String,
    pub amount: String,
    pub available: String,
    pub precision: u8,
    pub owner: String,
    pub admin: String,
    pub issuer: String,
    pub expiration: u32,
    pub frozen: bool,
}

impl Asset {
    pub const VERSION: u8 = 0;
    pub const MAX_NAME: usize = 1024;

    /// Build an asset, rejecting a name longer than [`Self::MAX_NAME`] bytes.
    pub fn new(parts: AssetParts) -> CodecResult<Self> {
        if parts.name.len() > Self::MAX_NAME {
            return Err(CodecError::LengthTooLarge {
                length: parts.name.len() as u64,
                max: Self::MAX_NAME as u64,
            });
        }
        let size = size::UINT8
            + size::UINT256
            + size::UINT8
            + size::var_string(&parts.name)
            + size::FIXED8 * 2
            + size::UINT8
            + size::PUBLIC_KEY
            + size::UINT160 * 2
            + size::UINT32
            + size::BOOL;
        Ok(Self { parts, size })
    }

    pub fn parts(&self) -> &AssetParts {
        &self.parts
    }

    pub fn into_parts(self) -> AssetParts {
        self.parts
    }

    pub fn hash(&self) -> UInt256 {
        self.parts.hash
    }

    pub fn asset_type(&self) -> AssetType {
        self.parts.asset_type
    }

    pub fn name(&self) -> &str {
        &self.parts.name
    }

    pub fn amount(&self) -> Fixed8 {
        self.parts.amount
    }

    pub fn available(&self) -> Fixed8 {
        self.parts.available
    }

    pub fn precision(&self) -> u8 {
        self.parts.precision
    }

    pub fn owner(&self) -> &PublicKey {
        &self.parts.owner
    }

    pub fn admin(&self) -> UInt160 {
        self.parts.admin
    }

    pub fn issuer(&self) -> UInt160 {
        self.parts.issuer
    }

    pub fn expiration(&self) -> u32 {
        self.parts.expiration
    }

    pub fn is_frozen(&self) -> bool {
        self.parts.is_frozen
    }

    pub fn has_unlimited_supply(&self) -> bool {
        self.parts.amount.is_negative()
    }
}

impl Serializable for Asset {
    fn write_wire(&self, writer: &mut BinaryWriter) {
        let parts = &self.parts;
        writer.write_u8(Self::VERSION);
        writer.write_uint256(&parts.hash);
        writer.write_u8(parts.asset_type.to_byte());
        writer.write_var_string(&parts.name);
        writer.write_fixed8(parts.amount);
        writer.write_fixed8(parts.available);
        writer.write_u8(parts.precision);
        writer.write_public_key(&parts.owner);
        writer.write_uint160(&parts.admin);
        writer.write_uint160(&parts.issuer);
        writer.write_u32_le(parts.expiration);
        writer.write_bool(parts.is_frozen);
    }

    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
        let version = reader.read_u8()?;
        if version != Self::VERSION {
            return Err(CodecError::InvalidVersion {
                kind: "asset",
                version,
            });
        }
        Self::new(AssetParts {
            hash: reader.read_uint256()?,
            asset_type: AssetType::from_byte(reader.read_u8()?)?,
            name: reader.read_var_string(Self::MAX_NAME)?,
            amount: reader.read_fixed8()?,
            available: reader.read_fixed8()?,
            precision: reader.read_u8()?,
            owner: reader.read_public_key()?,
            admin: reader.read_uint160()?,
            issuer: reader.read_uint160()?,
            expiration: reader.read_u32_le()?,
            is_frozen: reader.read_bool()?,
        })
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl SerializableJson for Asset {
    type Json = AssetJson;

    fn serialize_json(&self, _context: &JsonContext<'_>) -> AssetJson {
        let parts = &self.parts;
        AssetJson {
            version: Self::VERSION,
            id: json::write_uint256(&parts.hash),
            asset_type: parts.asset_type,
            name: parts.name.clone(),
            amount: json::write_fixed8(parts.amount),
            available: json::write_fixed8(parts.available),
            precision: parts.precision,
            owner: json::write_public_key(&parts.owner),
            admin: json::write_uint160(&parts.admin),
            issuer: json::write_uint160(&parts.issuer),
            expiration: parts.expiration,
            frozen: parts.is_frozen,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::settings::ProtocolSettings;

    pub(crate) fn sample_asset(hash: UInt256, amount: i64, available: i64) -> Asset {
        Asset::new(sample_parts(hash, amount, available)).unwrap()
    }

    pub(crate) fn sample_parts(hash: UInt256, amount: i64, available: i64) -> AssetParts {
        AssetParts {
            hash,
            asset_type: AssetType::Token,
            name: "Test Token".into(),
            amount: Fixed8::from_whole(amount).unwrap(),
            available: Fixed8::from_whole(available).unwrap(),
            precision: 8,
            owner: PublicKey::from_parts(0x02, [5; 32]).unwrap(),
            admin: UInt160::from_bytes([6; 20]),
            issuer: UInt160::from_bytes([7; 20]),
            expiration: 2_000_000,
            is_frozen: false,
        }
    }

    #[test]
    fn wire_roundtrip() {
        let asset = sample_asset(UInt256::from_bytes([1; 32]), -1, 0);
        let bytes = asset.serialize_wire();
        assert_eq!(bytes.len(), asset.size());
        let decoded = Asset::deserialize_wire(&bytes).unwrap();
        assert_eq!(decoded, asset);
        assert!(decoded.has_unlimited_supply());
    }

    #[test]
    fn bad_version_and_type_rejected() {
        let mut bytes = sample_asset(UInt256::zero(), 1, 0).serialize_wire();
        bytes[0] = 1;
        assert!(matches!(
            Asset::deserialize_wire(&bytes),
            Err(CodecError::InvalidVersion { version: 1, .. })
        ));
        bytes[0] = 0;
        bytes[33] = 0x77;
        assert!(matches!(
            Asset::deserialize_wire(&bytes),
            Err(CodecError::UnknownDiscriminant { value: 0x77, .. })
        ));
    }

    #[test]
    fn over_long_name_rejected_at_construction() {
        let mut parts = sample_parts(UInt256::zero(), 1, 0);
        parts.name = "n".repeat(Asset::MAX_NAME + 1);
        assert!(matches!(
            Asset::new(parts.clone()),
            Err(CodecError::LengthTooLarge { length: 1025, max: 1024 })
        ));

        parts.name.pop();
        let asset = Asset::new(parts).unwrap();
        assert_eq!(asset.serialize_wire().len(), asset.size());
    }

    #[test]
    fn json_shape() {
        let settings = ProtocolSettings::default();
        let asset = sample_asset(UInt256::zero(), 100, 90);
        let value = serde_json::to_value(asset.serialize_json(&JsonContext::new(&settings))).unwrap();
        assert_eq!(value["type"], "Token");
        assert_eq!(value["amount"], "100");
        assert_eq!(value["available"], "90");
        assert_eq!(value["frozen"], false);
    }
}
