//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use driveshare_core::error::AppError;

/// Create subfolder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Parent folder.
    pub parent_id: Uuid,
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: String,
}

/// Share a folder or file for a number of hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    /// Share lifetime in hours; fractions allowed.
    pub hours: f64,
}

/// Breadcrumb query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreadcrumbQuery {
    /// Target folder; the caller's root when absent.
    pub folder_id: Option<Uuid>,
}

/// Runs `validator` rules and maps failures to a validation error.
pub fn validated<T: Validate>(req: T) -> Result<T, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use driveshare_core::error::ErrorKind;

    #[test]
    fn test_empty_folder_name_is_rejected() {
        let req = CreateFolderRequest {
            parent_id: Uuid::new_v4(),
            name: String::new(),
        };
        assert!(validated(req).unwrap_err().is(ErrorKind::Validation));
    }

    #[test]
    fn test_share_request_accepts_fractional_hours() {
        let req: ShareRequest = serde_json::from_str(r#"{"hours": 0.25}"#).unwrap();
        assert_eq!(req.hours, 0.25);
    }
}
