pub mod builder;
pub mod filter;
pub mod orchestrator;
pub mod primitive;
