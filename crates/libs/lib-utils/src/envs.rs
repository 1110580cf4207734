//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, treating unset and blank values as absent.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Parse an environment variable if it is set, otherwise fall back to `default`.
///
/// A variable that is set but malformed is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_opt(name) {
        Some(val) => val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name)),
        None => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "missing environment variable {name}"),
            Error::WrongFormat(name) => write!(fmt, "environment variable {name} has the wrong format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_SURELY_UNSET"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_SURELY_UNSET"))
        );
        assert_eq!(get_env_opt("LIB_UTILS_TEST_SURELY_UNSET"), None);
    }

    #[test]
    fn test_parse_or_default() {
        let value: u64 = get_env_parse_or("LIB_UTILS_TEST_SURELY_UNSET_2", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_wrong_format() {
        env::set_var("LIB_UTILS_TEST_BAD_NUMBER", "twelve");
        let parsed: Result<u64, _> = get_env_parse("LIB_UTILS_TEST_BAD_NUMBER");
        assert_eq!(parsed, Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_NUMBER")));
        let parsed: Result<u64, _> = get_env_parse_or("LIB_UTILS_TEST_BAD_NUMBER", 1);
        assert!(parsed.is_err());
        env::remove_var("LIB_UTILS_TEST_BAD_NUMBER");
    }
}
