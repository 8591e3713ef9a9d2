pub mod config;
pub mod entity;
pub mod error;
pub mod math;
pub mod offset;
pub mod process;

pub use config::{HealthPolicy, LifeStatePolicy, Settings, SharedSettings, Toggle};
pub use entity::{Bone, Entity, EntitySummary, EntityWalker, LocalPlayer};
pub use error::{Error, Result};
pub use math::{Matrix4x4, Rect, Vector2, Vector3, Viewport, world_to_screen};
pub use offset::{OffsetTable, load_offsets, save_offsets};
pub use process::{
    AttachTarget, AttachedProcess, MemoryReader, ModuleBase, ProcessHandle, ProcessLocator,
    ReadMemory, SystemLocator, attach,
};
