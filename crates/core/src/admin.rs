//! The identity of a logged-in admin as shared between server and client.

use serde::{Deserialize, Serialize};

use crate::types::{AdminUserId, Email};

/// Session-stored admin identity.
///
/// Returned by the login and current-user endpoints and kept in the server
/// session. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
}
