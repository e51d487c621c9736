pub mod hydration;
pub mod persist;
pub mod store;
pub mod types;
pub mod update;

pub use hydration::{DefaultEndpointSource, EndpointOrigin, HydrationStatus};
pub use persist::{FileStorage, MemoryStorage, PersistedSnapshot, StateStorage};
pub use store::{ChatInputRef, PlaygroundStore, SharedStore};
pub use types::{EntityDescriptor, EntityType, PlaygroundState};
pub use update::Update;
