use crate::registry::TypeRegistry;
use anyhow::Context;
use juniscan_primitives::{CallIndex, ModuleIndex, TypeHandle};
use serde::{Deserialize, Serialize};


/// Read-only view of a runtime's pallets and of the registry their
/// call arguments point into.
pub trait MetadataSource {
    fn modules(&self) -> &[Module];

    fn resolve_type_name(&self, ty: TypeHandle) -> anyhow::Result<String>;
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default)]
    pub index: Option<ModuleIndex>,
    /// `None` when the pallet declares no dispatchable calls at all.
    #[serde(default)]
    pub calls: Option<Vec<Call>>,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    pub name: String,
    #[serde(default)]
    pub docs: Vec<String>,
    pub index: CallIndex,
    #[serde(default)]
    pub args: Vec<Arg>,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arg {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeHandle,
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeMetadata {
    pub modules: Vec<Module>,
    #[serde(default)]
    pub types: TypeRegistry,
}


impl RuntimeMetadata {
    pub fn from_json_slice(bytes: &[u8]) -> anyhow::Result<Self> {
        serde_json::from_slice(bytes).context("failed to parse metadata json")
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize metadata json")
    }

    pub fn num_calls(&self) -> usize {
        self.modules.iter()
            .map(|m| m.calls.as_ref().map_or(0, |calls| calls.len()))
            .sum()
    }
}


impl MetadataSource for RuntimeMetadata {
    fn modules(&self) -> &[Module] {
        &self.modules
    }

    fn resolve_type_name(&self, ty: TypeHandle) -> anyhow::Result<String> {
        self.types.type_name(ty)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_default_when_absent() {
        let json = json!({
            "modules": [
                {"name": "Timestamp"},
                {
                    "name": "Balances",
                    "index": 6,
                    "calls": [{"name": "transfer", "index": 3, "args": [{"type": 0}]}]
                }
            ]
        });

        let metadata = RuntimeMetadata::from_json_slice(json.to_string().as_bytes()).unwrap();

        assert_eq!(metadata.modules[0].index, None);
        assert_eq!(metadata.modules[0].calls, None);
        assert!(metadata.modules[0].docs.is_empty());

        let calls = metadata.modules[1].calls.as_ref().unwrap();
        assert_eq!(calls[0].args[0], Arg { name: None, ty: 0 });
        assert_eq!(metadata.num_calls(), 1);
    }

    #[test]
    fn json_snapshot_is_stable() {
        let json = json!({
            "modules": [{"name": "System", "docs": ["The system pallet."], "index": 0, "calls": []}],
            "types": {"0": {"def": {"primitive": "u32"}}}
        });
        let metadata = RuntimeMetadata::from_json_slice(json.to_string().as_bytes()).unwrap();
        let again = RuntimeMetadata::from_json_slice(metadata.to_json().unwrap().as_bytes()).unwrap();
        assert_eq!(metadata, again);
        assert_eq!(again.resolve_type_name(0).unwrap(), "u32");
    }
}
