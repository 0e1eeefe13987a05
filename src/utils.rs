// src/utils.rs
use std::path::Path;

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Split a comma-joined column (skills, required_skills) into trimmed items
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Backend columns count as filled unless empty or the literal "None"
pub fn is_filled(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "None"
}

/// Case-insensitive substring test; an empty needle matches everything
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Local part of an email address, used as a display-name fallback
pub fn email_local_part(email: &str) -> &str {
    email.split_once('@').map(|(local, _)| local).unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.PDF"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("jobs.csv"), Some("csv".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_split_comma_list() {
        assert_eq!(
            split_comma_list(" Rust, ,SQL ,Docker,"),
            vec!["Rust", "SQL", "Docker"]
        );
        assert!(split_comma_list("").is_empty());
    }

    #[test]
    fn test_is_filled() {
        assert!(is_filled("Rust"));
        assert!(!is_filled("None"));
        assert!(!is_filled("   "));
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Senior Rust Engineer", "rust"));
        assert!(contains_ci("anything", ""));
        assert!(!contains_ci("Frontend", "backend"));
    }

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("jane.doe@example.com"), "jane.doe");
        assert_eq!(email_local_part("nobody"), "nobody");
    }
}
