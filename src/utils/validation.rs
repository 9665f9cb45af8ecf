// Validation utilities
use crate::error::{Error, Result};
use tracing::warn;
use url::Url;

/// Largest page a user may request in one go
pub const MAX_PAGE_SIZE: usize = 100;

/// Validate a URL is valid, uses http/https scheme and has a host
pub fn validate_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        _ => {
            warn!(
                "Blocked non-HTTP(S) URL scheme: {} in URL: {}",
                url.scheme(),
                url_str
            );
            return Err(Error::Validation(format!(
                "URL must use http or https scheme: {url_str}"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(Error::Validation(format!("URL has no host: {url_str}")));
    }

    Ok(url)
}

/// Validate a results-per-page value
pub fn validate_page_size(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(Error::Validation("Page size must be non-zero".to_string()));
    }

    if size > MAX_PAGE_SIZE {
        return Err(Error::Validation(format!(
            "Page size {size} exceeds maximum {MAX_PAGE_SIZE}"
        )));
    }

    Ok(size)
}

/// Validate a results-per-page value against the offered page sizes
pub fn validate_page_size_option(size: usize, options: &[usize]) -> Result<usize> {
    validate_page_size(size)?;

    if !options.contains(&size) {
        let offered: Vec<String> = options.iter().map(ToString::to_string).collect();
        return Err(Error::Validation(format!(
            "Page size {size} is not offered (choose one of {})",
            offered.join(", ")
        )));
    }

    Ok(size)
}

/// Validate a meal identifier before it is put into a lookup URL.
/// TheMealDB ids are numeric strings.
pub fn validate_meal_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation(format!("Invalid meal id: {id:?}")));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://www.themealdb.com/api/json/v1/1").is_ok());
        assert!(validate_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_url("file:///etc/passwd").is_err());
        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert_eq!(validate_page_size(10).unwrap(), 10);
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(MAX_PAGE_SIZE + 1).is_err());
    }

    #[test]
    fn test_validate_page_size_option() {
        let options = [5, 10, 25];
        assert_eq!(validate_page_size_option(25, &options).unwrap(), 25);
        assert!(matches!(
            validate_page_size_option(7, &options),
            Err(Error::Validation(msg)) if msg.contains("5, 10, 25")
        ));
        assert!(validate_page_size_option(0, &[0]).is_err());
    }

    #[test]
    fn test_validate_meal_id() {
        assert_eq!(validate_meal_id(" 52772 ").unwrap(), "52772");
        assert!(validate_meal_id("").is_err());
        assert!(validate_meal_id("1&s=x").is_err());
    }
}
