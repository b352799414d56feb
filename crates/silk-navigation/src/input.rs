//! Input resolution for the address bar
//!
//! Text that does not start with a recognised scheme gets `http://` in front.
//! Nothing else is checked here; a bad host is the engine's load failure.

pub const RECOGNIZED_SCHEMES: [&str; 2] = ["http://", "https://"];

pub const DEFAULT_SCHEME: &str = "http://";

pub fn has_recognized_scheme(input: &str) -> bool {
    RECOGNIZED_SCHEMES
        .iter()
        .any(|scheme| input.starts_with(scheme))
}

/// Resolve address bar text into the URL to load.
///
/// Empty input resolves to nothing, matching an Enter press on a cleared bar.
pub fn resolve_input(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }

    if has_recognized_scheme(input) {
        Some(input.to_string())
    } else {
        Some(format!("{DEFAULT_SCHEME}{input}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_http() {
        assert_eq!(
            resolve_input("example.com").as_deref(),
            Some("http://example.com")
        );
        assert_eq!(
            resolve_input("localhost:8080/path?q=1").as_deref(),
            Some("http://localhost:8080/path?q=1")
        );
    }

    #[test]
    fn test_scheme_kept() {
        assert_eq!(resolve_input("https://x.com").as_deref(), Some("https://x.com"));
        assert_eq!(resolve_input("http://x.com").as_deref(), Some("http://x.com"));
    }

    #[test]
    fn test_other_schemes_are_prefixed() {
        // Only http and https count as a scheme prefix.
        assert_eq!(
            resolve_input("ftp://files.example").as_deref(),
            Some("http://ftp://files.example")
        );
        assert_eq!(
            resolve_input("HTTPS://x.com").as_deref(),
            Some("http://HTTPS://x.com")
        );
    }

    #[test]
    fn test_empty_input_ignored() {
        assert!(resolve_input("").is_none());
    }
}
