use crate::error::CodecResult;
use crate::reader::BinaryReader;
use crate::writer::BinaryWriter;

/// Wire contract shared by every ledger entity.
///
/// Implementors provide the field-level `write_wire`/`read_wire` pair and a
/// `size` that must equal the number of bytes `write_wire` appends. Entities
/// compute `size` once at construction, so calling it repeatedly is free.
pub trait Serializable: Sized {
    /// Append the wire form to `writer`.
    fn write_wire(&self, writer: &mut BinaryWriter);

    /// Consume exactly this entity's fields from `reader`.
    fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self>;

    /// Byte length of the wire form.
    fn size(&self) -> usize;

    /// Serialize to a fresh buffer.
    fn serialize_wire(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(self.size());
        self.write_wire(&mut writer);
        writer.finish()
    }

    /// Decode a complete buffer. Trailing bytes are rejected.
    fn deserialize_wire(bytes: &[u8]) -> CodecResult<Self> {
        let mut reader = BinaryReader::new(bytes);
        let value = Self::read_wire(&mut reader).map_err(|err| {
            tracing::debug!(
                entity = std::any::type_name::<Self>(),
                position = reader.position(),
                error = %err,
                "rejected malformed input"
            );
            err
        })?;
        reader.ensure_exhausted()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[derive(Debug, PartialEq)]
    struct Pair(u16, u8);

    impl Serializable for Pair {
        fn write_wire(&self, writer: &mut BinaryWriter) {
            writer.write_u16_le(self.0);
            writer.write_u8(self.1);
        }

        fn read_wire(reader: &mut BinaryReader<'_>) -> CodecResult<Self> {
            Ok(Pair(reader.read_u16_le()?, reader.read_u8()?))
        }

        fn size(&self) -> usize {
            3
        }
    }

    #[test]
    fn serialize_then_deserialize() {
        let pair = Pair(513, 7);
        let bytes = pair.serialize_wire();
        assert_eq!(bytes.len(), pair.size());
        assert_eq!(Pair::deserialize_wire(&bytes).unwrap(), pair);
    }

    #[test]
    fn deserialize_rejects_trailing() {
        let err = Pair::deserialize_wire(&[1, 0, 2, 3]).unwrap_err();
        assert_eq!(err, CodecError::TrailingBytes(1));
    }

    #[test]
    fn deserialize_rejects_truncated() {
        assert!(matches!(
            Pair::deserialize_wire(&[1, 0]),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }
}
