//! User profile as seen by DriveShare.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used when the identity system knows nothing about a user's name.
const ANONYMOUS_LABEL: &str = "My Drive";

/// Name information supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user this profile belongs to.
    pub user_id: Uuid,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Full display name, if the provider stores one separately.
    pub full_name: Option<String>,
}

impl UserProfile {
    /// A profile with no name information.
    pub fn anonymous(user_id: Uuid) -> Self {
        Self {
            user_id,
            first_name: None,
            last_name: None,
            full_name: None,
        }
    }

    /// Human-readable label: the full name, else "first last", else a fixed fallback.
    pub fn display_label(&self) -> String {
        if let Some(full) = self.full_name.as_deref().map(str::trim) {
            if !full.is_empty() {
                return full.to_string();
            }
        }

        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            ANONYMOUS_LABEL.to_string()
        } else {
            joined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label_prefers_full_name() {
        let profile = UserProfile {
            user_id: Uuid::new_v4(),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            full_name: Some("Augusta Ada King".into()),
        };
        assert_eq!(profile.display_label(), "Augusta Ada King");
    }

    #[test]
    fn test_display_label_falls_back_to_first_last() {
        let profile = UserProfile {
            user_id: Uuid::new_v4(),
            first_name: Some("Ada".into()),
            last_name: Some(" Lovelace ".into()),
            full_name: Some("   ".into()),
        };
        assert_eq!(profile.display_label(), "Ada Lovelace");

        let anonymous = UserProfile::anonymous(Uuid::new_v4());
        assert_eq!(anonymous.display_label(), "My Drive");
    }
}
