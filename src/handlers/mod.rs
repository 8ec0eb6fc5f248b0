// handlers/mod.rs
// Re-exports all handlers for the route table

mod health;
mod pools;

pub use health::*;
pub use pools::*;
