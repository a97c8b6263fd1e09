use juniscan_primitives::TypeHandle;
use std::fmt::{Display, Formatter};


#[derive(Debug)]
pub struct SourceUnavailable {
    pub url: String
}


impl Display for SourceUnavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to fetch runtime metadata from {}", self.url)
    }
}


impl std::error::Error for SourceUnavailable {}


/// Error object of a JSON-RPC 2.0 response.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String
}


impl Display for RpcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "node returned rpc error {}: {}", self.code, self.message)
    }
}


impl std::error::Error for RpcError {}


#[derive(Debug)]
pub struct UnsupportedMetadataVersion(pub u32);


impl Display for UnsupportedMetadataVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "runtime metadata V{} is not supported, expected V14 or V15", self.0)
    }
}


impl std::error::Error for UnsupportedMetadataVersion {}


#[derive(Debug)]
pub struct UnknownType {
    pub ty: TypeHandle
}


impl Display for UnknownType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "type {} is not present in the type registry", self.ty)
    }
}


impl std::error::Error for UnknownType {}


#[derive(Debug)]
pub struct TypeNestingTooDeep {
    pub ty: TypeHandle
}


impl Display for TypeNestingTooDeep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "type {} is nested too deep to be named", self.ty)
    }
}


impl std::error::Error for TypeNestingTooDeep {}


#[derive(Debug)]
pub struct CallsNotVariant {
    pub pallet: String,
    pub ty: TypeHandle
}


impl Display for CallsNotVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f, "calls of pallet {} refer to type {}, which is not an enum",
            self.pallet,
            self.ty
        )
    }
}


impl std::error::Error for CallsNotVariant {}
