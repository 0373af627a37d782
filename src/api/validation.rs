use super::ApiError;
use crate::domain::MovieId;

pub fn validate_movie_id(id: i32) -> Result<MovieId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid movie ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(MovieId::new(id))
}

/// Requires a present, non-blank string field and returns it trimmed.
pub fn validate_required_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ApiError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

pub fn validate_title(title: Option<&str>) -> Result<&str, ApiError> {
    validate_required_text("Title", title)
}

pub fn validate_notes(notes: Option<&str>) -> Result<&str, ApiError> {
    validate_required_text("Notes", notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie_id() {
        assert_eq!(validate_movie_id(1).unwrap(), MovieId::new(1));
        assert!(validate_movie_id(12345).is_ok());
        assert!(validate_movie_id(0).is_err());
        assert!(validate_movie_id(-1).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title(Some("  Inception ")).unwrap(), "Inception");
        assert!(validate_title(Some("")).is_err());
        assert!(validate_title(Some("   ")).is_err());
        assert!(validate_title(None).is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert_eq!(validate_notes(Some("Great movie")).unwrap(), "Great movie");
        assert!(validate_notes(Some("\t")).is_err());
        assert!(validate_notes(None).is_err());
    }
}
