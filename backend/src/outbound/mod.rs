//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: mutex-guarded stores for local runs and tests
//! - **github**: reqwest client for the repository listing API
//! - **identity**: signed bearer token verification
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod github;
pub mod identity;
pub mod memory;
pub mod persistence;
