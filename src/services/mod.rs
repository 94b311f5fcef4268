pub mod converter;
pub mod extract;
pub mod orchestrator;
pub mod report;
