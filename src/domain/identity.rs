//! Authenticated identity carried through a request.

use serde::Serialize;

use super::entities::{ProfileId, Role};

/// The caller behind a request, resolved once by the session middleware and
/// handed to handlers as a request extension.
///
/// `organization` is a snapshot taken when the session was validated. Code
/// that filters on affiliation re-reads it through the affiliation resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub profile_id: ProfileId,
    pub role: Role,
    pub organization: Option<String>,
}

impl Identity {
    pub fn new(profile_id: ProfileId, role: Role, organization: Option<String>) -> Self {
        Self {
            profile_id,
            role,
            organization,
        }
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }
}
