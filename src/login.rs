pub mod login_flow;
#[cfg(test)]
pub mod tests;
pub mod types;

pub use login_flow::LoginFlow;
pub use types::{needs_login, LoginOutcome};
