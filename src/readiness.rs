pub mod detector;
#[cfg(test)]
pub mod tests;

pub use detector::{ReadinessDetector, ReadyOutcome};
