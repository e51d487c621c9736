pub mod client;
pub mod discovery;

pub use discovery::{select_entity, EntityDiscovery};
