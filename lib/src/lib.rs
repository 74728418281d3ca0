pub mod attrs;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod header;
pub mod nat;
pub mod packet;
pub mod query;
pub mod transport;
pub mod util;

mod behavior;
mod classic;
mod probe;

pub use config::Config;
pub use error::QueryError;
pub use nat::{
    DiscoveryVariant, FilteringBehavior, MappingBehavior, NatType, QueryResult, QueryType,
};
pub use query::{
    query, query_async, query_with_config, query_with_socket, query_with_socket_config,
    query_with_transport,
};
pub use transport::{Transport, UdpTransport};
