mod hierarchy;
mod pipeline;
mod trigger;

pub use hierarchy::HierarchyBuilder;
pub use pipeline::{compile_script, compile_statements};
pub use trigger::compile_trigger;
