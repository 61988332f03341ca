pub mod ron;
pub use crate::ron as ron_loader;
pub mod structure;
pub mod world;

pub use structure::{Facing, Structure, StructureRegistry};
