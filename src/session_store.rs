pub mod cookie_store;
#[cfg(test)]
pub mod tests;

pub use cookie_store::CookieStore;
