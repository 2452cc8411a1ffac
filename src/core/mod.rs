pub mod accumulator;
pub mod orchestrator;
pub mod types;
