//! Folder and file name rules.

use uuid::Uuid;

use driveshare_core::error::AppError;
use driveshare_core::result::AppResult;

/// Longest accepted folder or file name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Fallback root name when a profile label sanitizes to nothing.
const FALLBACK_ROOT_NAME: &str = "user";

/// Trim and validate a folder or file name.
///
/// Names become object-key segments, so `/` is rejected outright.
pub fn validate_name(kind: &str, raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!("{kind} name cannot be empty")));
    }
    if name.contains('/') {
        return Err(AppError::validation(format!(
            "{kind} name cannot contain '/'"
        )));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "{kind} name exceeds {MAX_NAME_LENGTH} characters"
        )));
    }
    if name == "." || name == ".." {
        return Err(AppError::validation(format!("{kind} name '{name}' is reserved")));
    }
    Ok(name.to_string())
}

/// Derive a root folder name from a profile label.
///
/// Whitespace runs become `_`; anything outside ASCII alphanumerics and
/// `-_.` is dropped.
pub fn root_folder_name(label: &str) -> String {
    let mut name = String::with_capacity(label.len());
    let mut pending_space = false;

    for ch in label.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !(ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.')) {
            continue;
        }
        if pending_space && !name.is_empty() {
            name.push('_');
        }
        pending_space = false;
        name.push(ch);
    }

    let name: String = name.chars().take(MAX_NAME_LENGTH).collect();
    if name.is_empty() || name.chars().all(|c| c == '.') {
        FALLBACK_ROOT_NAME.to_string()
    } else {
        name
    }
}

/// Root name made unique by appending the owner's id.
///
/// The base is shortened first so the result still fits `MAX_NAME_LENGTH`.
pub fn suffixed_root_name(name: &str, user_id: Uuid) -> String {
    let suffix = format!("_{user_id}");
    let keep = MAX_NAME_LENGTH - suffix.len();
    let base: String = name.chars().take(keep).collect();
    format!("{base}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use driveshare_core::error::ErrorKind;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Folder", "  Docs ").unwrap(), "Docs");
        assert!(validate_name("Folder", "   ").unwrap_err().is(ErrorKind::Validation));
        assert!(validate_name("Folder", "a/b").unwrap_err().is(ErrorKind::Validation));
        assert!(validate_name("File", "..").unwrap_err().is(ErrorKind::Validation));
        assert!(validate_name("File", &"x".repeat(256)).is_err());
        assert!(validate_name("File", &"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_root_folder_name() {
        assert_eq!(root_folder_name("Ada  Lovelace"), "Ada_Lovelace");
        assert_eq!(root_folder_name("José O'Brien"), "Jos_OBrien");
        assert_eq!(root_folder_name("  "), "user");
        assert_eq!(root_folder_name("!!!"), "user");
        assert_eq!(root_folder_name(".."), "user");
    }

    #[test]
    fn test_suffixed_root_name_fits_name_limit() {
        let user_id = Uuid::new_v4();
        let long = root_folder_name(&"x".repeat(400));
        assert_eq!(long.chars().count(), MAX_NAME_LENGTH);

        let suffixed = suffixed_root_name(&long, user_id);
        assert_eq!(suffixed.chars().count(), MAX_NAME_LENGTH);
        assert!(suffixed.ends_with(&format!("_{user_id}")));

        assert_eq!(
            suffixed_root_name("Ada_Lovelace", user_id),
            format!("Ada_Lovelace_{user_id}")
        );
    }
}
