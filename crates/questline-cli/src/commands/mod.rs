pub mod config;
pub mod plan;
pub mod quest;
pub mod queue;
pub mod simulate;
