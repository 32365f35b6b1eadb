use crate::constants::{
    MAX_CATEGORY_TITLE_LEN, MAX_EMOJI_LEN, MAX_TRACKER_NAME_LEN, PINNED_CATEGORY_TITLE,
};
use crate::error::AppError;

/// Validate tracker name. Returns the trimmed name.
pub fn validate_tracker_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput {
            field: "name",
            reason: "cannot be empty".into(),
        });
    }
    if name.chars().count() > MAX_TRACKER_NAME_LEN {
        return Err(AppError::InvalidInput {
            field: "name",
            reason: format!("cannot exceed {MAX_TRACKER_NAME_LEN} characters"),
        });
    }
    Ok(name)
}

/// Validate category title. Returns the trimmed title.
///
/// The pinned section title is reserved in any letter case.
pub fn validate_category_title(title: &str) -> Result<&str, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput {
            field: "title",
            reason: "cannot be empty".into(),
        });
    }
    if title.chars().count() > MAX_CATEGORY_TITLE_LEN {
        return Err(AppError::InvalidInput {
            field: "title",
            reason: format!("cannot exceed {MAX_CATEGORY_TITLE_LEN} characters"),
        });
    }
    if title.eq_ignore_ascii_case(PINNED_CATEGORY_TITLE) {
        return Err(AppError::InvalidInput {
            field: "title",
            reason: format!("'{PINNED_CATEGORY_TITLE}' is reserved"),
        });
    }
    Ok(title)
}

/// Validate tracker emoji.
pub fn validate_emoji(emoji: &str) -> Result<&str, AppError> {
    let emoji = emoji.trim();
    if emoji.is_empty() {
        return Err(AppError::InvalidInput {
            field: "emoji",
            reason: "cannot be empty".into(),
        });
    }
    if emoji.chars().count() > MAX_EMOJI_LEN {
        return Err(AppError::InvalidInput {
            field: "emoji",
            reason: format!("cannot exceed {MAX_EMOJI_LEN} characters"),
        });
    }
    Ok(emoji)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tracker_name_valid() {
        assert_eq!(validate_tracker_name("  Drink water ").unwrap(), "Drink water");
        assert!(validate_tracker_name(&"a".repeat(MAX_TRACKER_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_validate_tracker_name_invalid() {
        assert!(validate_tracker_name("   ").is_err());
        assert!(validate_tracker_name(&"a".repeat(MAX_TRACKER_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_tracker_name_counts_chars() {
        let name = "ё".repeat(MAX_TRACKER_NAME_LEN);
        assert!(validate_tracker_name(&name).is_ok());
    }

    #[test]
    fn test_validate_category_title() {
        assert_eq!(validate_category_title(" Health ").unwrap(), "Health");
        assert!(validate_category_title("").is_err());
        assert!(validate_category_title(&"x".repeat(MAX_CATEGORY_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_category_title_reserved() {
        assert!(validate_category_title("Pinned").is_err());
        assert!(validate_category_title("pinned").is_err());
        assert!(validate_category_title("Pinned stuff").is_ok());
    }

    #[test]
    fn test_validate_emoji() {
        assert_eq!(validate_emoji("🏃").unwrap(), "🏃");
        assert!(validate_emoji(" ").is_err());
    }
}
