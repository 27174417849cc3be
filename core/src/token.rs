//! Token classification.
//!
//! The parser sees each element of the argument vector as either a long-form
//! option (`--name` or `--name=value`) or a plain value. These helpers are
//! pure and context-free.
//!
//! # Examples
//!
//! ```
//! use command_args_core::token::{is_long_form_option, option_argument, option_name};
//!
//! assert!(is_long_form_option("--output=dist"));
//! assert_eq!(option_name("--output=dist"), "--output");
//! assert_eq!(option_argument("--output=dist"), Some("dist"));
//!
//! assert!(!is_long_form_option("-o"));
//! assert!(!is_long_form_option("--"));
//! ```

/// Prefix that introduces a long-form option.
pub const LONG_FORM_PREFIX: &str = "--";

const VALUE_SEPARATOR: char = '=';

/// Returns `true` if `token` is a long-form option.
///
/// The token must start with exactly two hyphens followed by at least one
/// more character. A bare `-` or `--` is a plain value.
pub fn is_long_form_option(token: &str) -> bool {
    token
        .strip_prefix(LONG_FORM_PREFIX)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|first| first != '-')
}

/// Returns the `--name` part of an option token, dropping any `=value`.
pub fn option_name(token: &str) -> &str {
    token
        .split_once(VALUE_SEPARATOR)
        .map_or(token, |(name, _)| name)
}

/// Returns the inline value after the first `=`, if there is one.
///
/// `--name=` yields `Some("")`, which is distinct from `--name` (`None`).
pub fn option_argument(token: &str) -> Option<&str> {
    token
        .split_once(VALUE_SEPARATOR)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_name() {
        assert_eq!(option_name("--option"), "--option");
        assert_eq!(option_name("--option="), "--option");
        assert_eq!(option_name("--option=a=b"), "--option");
    }

    #[test]
    fn test_option_argument() {
        assert_eq!(option_argument("--option=arg"), Some("arg"));
        assert_eq!(option_argument("--option="), Some(""));
        assert_eq!(option_argument("--option=a=b"), Some("a=b"));
        assert_eq!(option_argument("--option"), None);
    }

    #[test]
    fn test_is_long_form_option() {
        assert!(is_long_form_option("--option"));
        assert!(is_long_form_option("--オプション"));
        assert!(is_long_form_option("--o=value"));
        assert!(!is_long_form_option("option"));
        assert!(!is_long_form_option("-"));
        assert!(!is_long_form_option("-o"));
        assert!(!is_long_form_option("--"));
        assert!(!is_long_form_option("---option"));
        assert!(!is_long_form_option(""));
    }
}
