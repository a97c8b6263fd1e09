use crate::error::{CallsNotVariant, UnsupportedMetadataVersion};
use crate::model::{Arg, Call, Module, RuntimeMetadata};
use crate::registry::{Field, Primitive, TypeDef, TypeInfo, TypeParam, TypeRegistry, Variant};
use anyhow::{anyhow, ensure, Context};
use codec::Decode;
use frame_metadata::{RuntimeMetadataPrefixed, META_RESERVED};
use juniscan_primitives::TypeHandle;
use scale_info::form::PortableForm;
use scale_info::{PortableRegistry, TypeDefPrimitive};


impl RuntimeMetadata {
    /// Decodes the SCALE encoded `RuntimeMetadataPrefixed` blob returned by `state_getMetadata`.
    pub fn decode(mut bytes: &[u8]) -> anyhow::Result<Self> {
        let prefixed = RuntimeMetadataPrefixed::decode(&mut bytes)
            .context("failed to decode runtime metadata")?;

        ensure!(
            prefixed.0 == META_RESERVED,
            "runtime metadata has invalid magic number {:#x}",
            prefixed.0
        );

        match prefixed.1 {
            frame_metadata::RuntimeMetadata::V14(metadata) => {
                let types = TypeRegistry::from(&metadata.types);
                let modules = metadata.pallets.iter().map(|pallet| {
                    convert_pallet(
                        &types,
                        &pallet.name,
                        Vec::new(),
                        pallet.index,
                        pallet.calls.as_ref().map(|calls| calls.ty.id)
                    )
                }).collect::<anyhow::Result<_>>()?;
                Ok(Self { modules, types })
            },
            frame_metadata::RuntimeMetadata::V15(metadata) => {
                let types = TypeRegistry::from(&metadata.types);
                let modules = metadata.pallets.iter().map(|pallet| {
                    convert_pallet(
                        &types,
                        &pallet.name,
                        pallet.docs.clone(),
                        pallet.index,
                        pallet.calls.as_ref().map(|calls| calls.ty.id)
                    )
                }).collect::<anyhow::Result<_>>()?;
                Ok(Self { modules, types })
            },
            other => Err(UnsupportedMetadataVersion(other.version()).into())
        }
    }

    /// Accepts the `0x` prefixed hex string of the encoded metadata.
    pub fn from_hex(hex: &str) -> anyhow::Result<Self> {
        let bytes = decode_hex(hex)?;
        Self::decode(&bytes)
    }
}


pub(crate) fn decode_hex(hex: &str) -> anyhow::Result<Vec<u8>> {
    let hex = hex.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    ensure!(hex.len() % 2 == 0, "hex string has odd length {}", hex.len());
    let mut bytes = vec![0; hex.len() / 2];
    faster_hex::hex_decode(hex.as_bytes(), &mut bytes)
        .map_err(|err| anyhow!("invalid hex string: {:?}", err))?;
    Ok(bytes)
}


fn convert_pallet(
    types: &TypeRegistry,
    name: &str,
    docs: Vec<String>,
    index: u8,
    calls_ty: Option<TypeHandle>
) -> anyhow::Result<Module>
{
    let calls = match calls_ty {
        Some(ty) => {
            let variants = types.variants(ty)?.ok_or_else(|| CallsNotVariant {
                pallet: name.to_string(),
                ty
            })?;
            Some(variants.iter().map(|v| Call {
                name: v.name.clone(),
                docs: v.docs.clone(),
                index: v.index,
                args: v.fields.iter().map(|f| Arg {
                    name: f.name.clone(),
                    ty: f.ty
                }).collect()
            }).collect())
        },
        None => None
    };

    Ok(Module {
        name: name.to_string(),
        docs,
        index: Some(index as u32),
        calls
    })
}


impl From<&PortableRegistry> for TypeRegistry {
    fn from(registry: &PortableRegistry) -> Self {
        let mut types = TypeRegistry::new();
        for t in registry.types.iter() {
            types.insert(t.id, convert_type(&t.ty));
        }
        types
    }
}


fn convert_type(ty: &scale_info::Type<PortableForm>) -> TypeInfo {
    use scale_info::TypeDef as Def;

    let def = match &ty.type_def {
        Def::Composite(c) => TypeDef::Composite(convert_fields(&c.fields)),
        Def::Variant(v) => TypeDef::Variant(
            v.variants.iter().map(|v| Variant {
                name: v.name.clone(),
                fields: convert_fields(&v.fields),
                index: v.index,
                docs: v.docs.clone()
            }).collect()
        ),
        Def::Sequence(s) => TypeDef::Sequence(s.type_param.id),
        Def::Array(a) => TypeDef::Array {
            len: a.len,
            ty: a.type_param.id
        },
        Def::Tuple(t) => TypeDef::Tuple(t.fields.iter().map(|f| f.id).collect()),
        Def::Primitive(p) => TypeDef::Primitive(convert_primitive(p)),
        Def::Compact(c) => TypeDef::Compact(c.type_param.id),
        Def::BitSequence(b) => TypeDef::BitSequence {
            store: b.bit_store_type.id,
            order: b.bit_order_type.id
        }
    };

    TypeInfo {
        path: ty.path.segments.clone(),
        params: ty.type_params.iter().map(|p| TypeParam {
            name: p.name.clone(),
            ty: p.ty.as_ref().map(|t| t.id)
        }).collect(),
        def
    }
}


fn convert_fields(fields: &[scale_info::Field<PortableForm>]) -> Vec<Field> {
    fields.iter().map(|f| Field {
        name: f.name.clone(),
        ty: f.ty.id
    }).collect()
}


fn convert_primitive(p: &TypeDefPrimitive) -> Primitive {
    match p {
        TypeDefPrimitive::Bool => Primitive::Bool,
        TypeDefPrimitive::Char => Primitive::Char,
        TypeDefPrimitive::Str => Primitive::Str,
        TypeDefPrimitive::U8 => Primitive::U8,
        TypeDefPrimitive::U16 => Primitive::U16,
        TypeDefPrimitive::U32 => Primitive::U32,
        TypeDefPrimitive::U64 => Primitive::U64,
        TypeDefPrimitive::U128 => Primitive::U128,
        TypeDefPrimitive::U256 => Primitive::U256,
        TypeDefPrimitive::I8 => Primitive::I8,
        TypeDefPrimitive::I16 => Primitive::I16,
        TypeDefPrimitive::I32 => Primitive::I32,
        TypeDefPrimitive::I64 => Primitive::I64,
        TypeDefPrimitive::I128 => Primitive::I128,
        TypeDefPrimitive::I256 => Primitive::I256,
    }
}
