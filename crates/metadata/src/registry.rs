use crate::error::{TypeNestingTooDeep, UnknownType};
use juniscan_primitives::TypeHandle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};


/// Self-referential registries (which a valid runtime never has) are cut at this depth.
const MAX_NESTING: usize = 32;


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRegistry {
    types: BTreeMap<TypeHandle, TypeInfo>
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<TypeParam>,
    pub def: TypeDef,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeHandle>,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeDef {
    Composite(Vec<Field>),
    Variant(Vec<Variant>),
    Sequence(TypeHandle),
    Array {
        len: u32,
        #[serde(rename = "type")]
        ty: TypeHandle
    },
    Tuple(Vec<TypeHandle>),
    Primitive(Primitive),
    Compact(TypeHandle),
    BitSequence {
        store: TypeHandle,
        order: TypeHandle
    },
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeHandle,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    pub index: u8,
    #[serde(default)]
    pub docs: Vec<String>,
}


#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Bool,
    Char,
    Str,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    I8,
    I16,
    I32,
    I64,
    I128,
    I256,
}


impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::Str => "str",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::U128 => "u128",
            Primitive::U256 => "u256",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::I128 => "i128",
            Primitive::I256 => "i256",
        }
    }
}


impl Display for Primitive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}


impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ty: TypeHandle, info: TypeInfo) {
        self.types.insert(ty, info);
    }

    pub fn get(&self, ty: TypeHandle) -> anyhow::Result<&TypeInfo> {
        self.types.get(&ty).ok_or_else(|| UnknownType { ty }.into())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Human readable name of a type, e.g. `MultiAddress<AccountId32, ()>` or `Vec<u8>`.
    pub fn type_name(&self, ty: TypeHandle) -> anyhow::Result<String> {
        let mut out = String::new();
        self.write_type_name(ty, 0, &mut out)?;
        Ok(out)
    }

    fn write_type_name(&self, ty: TypeHandle, depth: usize, out: &mut String) -> anyhow::Result<()> {
        if depth > MAX_NESTING {
            anyhow::bail!(TypeNestingTooDeep { ty })
        }

        let info = self.get(ty)?;

        if let Some(name) = info.path.last() {
            out.push_str(name);
            if !info.params.is_empty() {
                out.push('<');
                for (i, param) in info.params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    match param.ty {
                        Some(param_ty) => self.write_type_name(param_ty, depth + 1, out)?,
                        None => out.push_str(&param.name)
                    }
                }
                out.push('>');
            }
            return Ok(())
        }

        match &info.def {
            TypeDef::Composite(fields) if fields.len() == 1 => {
                self.write_type_name(fields[0].ty, depth + 1, out)?
            },
            TypeDef::Composite(fields) => {
                self.write_tuple(fields.iter().map(|f| f.ty), depth, out)?
            },
            TypeDef::Variant(variants) => {
                for (i, variant) in variants.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    out.push_str(&variant.name);
                }
            },
            TypeDef::Sequence(item) => {
                out.push_str("Vec<");
                self.write_type_name(*item, depth + 1, out)?;
                out.push('>');
            },
            TypeDef::Array { len, ty: item } => {
                out.push('[');
                self.write_type_name(*item, depth + 1, out)?;
                out.push_str("; ");
                out.push_str(&len.to_string());
                out.push(']');
            },
            TypeDef::Tuple(items) => {
                self.write_tuple(items.iter().copied(), depth, out)?
            },
            TypeDef::Primitive(p) => {
                out.push_str(p.as_str())
            },
            TypeDef::Compact(item) => {
                out.push_str("Compact<");
                self.write_type_name(*item, depth + 1, out)?;
                out.push('>');
            },
            TypeDef::BitSequence { store, order } => {
                out.push_str("BitVec<");
                self.write_type_name(*store, depth + 1, out)?;
                out.push_str(", ");
                self.write_type_name(*order, depth + 1, out)?;
                out.push('>');
            }
        }

        Ok(())
    }

    fn write_tuple(
        &self,
        items: impl Iterator<Item = TypeHandle>,
        depth: usize,
        out: &mut String
    ) -> anyhow::Result<()>
    {
        out.push('(');
        for (i, item) in items.enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type_name(item, depth + 1, out)?;
        }
        out.push(')');
        Ok(())
    }

    /// Variants of a pallet's call enum.
    pub fn variants(&self, ty: TypeHandle) -> anyhow::Result<Option<&[Variant]>> {
        Ok(match &self.get(ty)?.def {
            TypeDef::Variant(variants) => Some(variants),
            _ => None
        })
    }
}
