pub mod browser_management;
pub mod capture;
pub mod configuration;
pub mod controller;
pub mod error_handling;
pub mod login;
pub mod readiness;
pub mod session_store;
pub mod web_interface;

pub use capture::CaptureRequest;
pub use configuration::Config;
pub use controller::Controller;
