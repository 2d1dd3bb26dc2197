// Library surface for headless/integration tests and reuse.
// The ui module stays bin-only since it renders types owned by main.rs.
pub mod catalog;
pub mod config;
pub mod runtime;
pub mod session;
