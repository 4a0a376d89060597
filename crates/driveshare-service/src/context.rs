//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer once the bearer token is verified and passed into
/// every owner-scoped service method. The services trust `user_id`; they only
/// check that the target subtree belongs to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// When the request was received. Share expiries are computed from it.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(user_id: Uuid) -> Self {
        Self::at(user_id, Utc::now())
    }

    /// Creates a request context with an explicit request time.
    pub fn at(user_id: Uuid, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            request_time,
        }
    }
}
