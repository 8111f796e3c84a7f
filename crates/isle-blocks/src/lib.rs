//! Block metadata, behavior flags, and registry crate.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, BlockType};
pub use types::{Block, BlockBehavior, BlockId, FaceRole, RenderKind};
