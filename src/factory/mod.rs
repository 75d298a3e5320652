//! Instance factories: the seam between a pool and its host

pub mod arena;
pub mod traits;

pub use arena::{ArenaFactory, HolderId, InstanceId, InstanceRecord, TemplateId};
pub use traits::{InstanceFactory, InstanceFactoryExt};
