mod engine;
mod matcher;
mod resolve;
mod store;

pub use engine::{CommandSummary, Dialog, DialogOptions, DialogState, DialogSummary};
pub use store::VariableStore;
