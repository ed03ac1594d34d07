pub mod orchestrator;
#[cfg(test)]
pub mod tests;
pub mod types;

pub use orchestrator::CaptureOrchestrator;
pub use types::CaptureRequest;
