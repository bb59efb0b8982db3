//! Admin user domain types.

use chrono::{DateTime, Utc};

use nursery_core::{AdminUserId, CurrentAdmin, Email};

/// An admin user (domain type).
///
/// The password hash never leaves the store layer, so it is not part of
/// this type.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(admin: &AdminUser) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
        }
    }
}
