mod error;
mod model;
mod registry;
mod rpc;
mod scale;


pub use error::*;
pub use model::*;
pub use registry::*;
pub use rpc::*;
