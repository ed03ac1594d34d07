//! Browser lifecycle subsystem.
//!
//! Owns the single shared Chromium process behind a mutex, launches it
//! lazily, probes it for liveness before every use and relaunches it when it
//! dies. Consumers never hold the browser itself, they borrow fresh pages.
//!
//! Re-exports:
//! - [`BrowserManager`]: main entry point to obtain pages.
//! - [`LaunchSpec`]: launch options derived from the configuration.

pub mod browser_manager;
pub mod types;

pub use browser_manager::BrowserManager;
pub use types::LaunchSpec;
