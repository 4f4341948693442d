use serde::Serialize;

use crate::settings::ProtocolSettings;

/// Context threaded through JSON rendering.
#[derive(Clone, Copy, Debug)]
pub struct JsonContext<'a> {
    pub settings: &'a ProtocolSettings,
}

impl<'a> JsonContext<'a> {
    pub fn new(settings: &'a ProtocolSettings) -> Self {
        Self { settings }
    }
}

/// Human-readable, transport-safe rendering of a ledger entity.
pub trait SerializableJson {
    type Json: Serialize;

    fn serialize_json(&self, context: &JsonContext<'_>) -> Self::Json;
}
