//! Process-boundary glue for MESH: environment configuration and the
//! transport frame types/trait (§6). The tick resolution pipeline itself
//! lives in `mesh-resolver`; this crate only wires it to a repository and
//! (eventually) a concrete transport.

pub mod config;
pub mod transport;

pub use config::ServerConfig;
pub use transport::{InboundFrame, OutboundFrame, Transport};
