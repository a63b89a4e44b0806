//! Locale settings and path helpers
//!
//! Every page route carries a leading locale segment (`/en/todos`). This
//! module owns the list of supported locales and the path arithmetic the
//! middleware uses to detect, strip, and prepend locale prefixes.

/// Locales the application ships translations for
pub const LANGUAGES: [&str; 5] = ["en", "es", "fr", "de", "ru"];

/// Locale used when a request path carries none
pub const FALLBACK_LOCALE: &str = "en";

/// Check whether a locale code is supported
pub fn is_supported(locale: &str) -> bool {
    LANGUAGES.contains(&locale)
}

/// Split a request path into its locale prefix and the remaining path
///
/// Returns `Some((locale, rest))` only when the first path segment is a
/// supported locale, matching `/en` exactly or `/en/...`. The rest keeps
/// its leading slash (`/en/todos` -> `("en", "/todos")`), and is empty for
/// a bare locale path (`/en` -> `("en", "")`).
pub fn split_locale(path: &str) -> Option<(&str, &str)> {
    let without_slash = path.strip_prefix('/')?;
    for locale in LANGUAGES {
        if let Some(rest) = without_slash.strip_prefix(locale) {
            if rest.is_empty() {
                return Some((locale, ""));
            }
            if rest.starts_with('/') {
                return Some((locale, rest));
            }
        }
    }
    None
}

/// Prefix a path with the fallback locale, preserving any query string
///
/// The bare root (`/` or `/?q`) becomes `/en` rather than `/en/`; the
/// router registers locale roots without a trailing slash.
pub fn with_fallback_locale(path_and_query: &str) -> String {
    let rest = path_and_query.strip_prefix('/').unwrap_or(path_and_query);
    if rest.is_empty() || rest.starts_with('?') {
        format!("/{}{}", FALLBACK_LOCALE, rest)
    } else {
        format!("/{}/{}", FALLBACK_LOCALE, rest)
    }
}
