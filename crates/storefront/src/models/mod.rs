//! Domain models for the storefront server.
//!
//! Catalog types live in `nursery-core`; this module only holds what the
//! server keeps to itself.

pub mod admin_user;
pub mod session;

pub use admin_user::AdminUser;
pub use session::CurrentAdmin;
pub use session::keys as session_keys;
