//! Session data supplied by an upstream authentication layer.

use serde::{Deserialize, Serialize};

/// The authenticated session for a request, if any.
///
/// This server does not authenticate anyone itself. An auth middleware in
/// front of the router inserts a `Session` as a request extension; page data
/// echoes it back so the presentation layer can render account controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
}
