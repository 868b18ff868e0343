use std::{env, str::FromStr};

/// Parse an `envvar` as `T`. Return `fallback` if env missing or parsing fails.
pub fn parse_env_or<T: FromStr>(envvar: &str, fallback: T) -> T {
    env::var(envvar)
        .map(|s| T::from_str(&s).ok())
        .ok()
        .flatten()
        .unwrap_or(fallback)
}

/// Reads an `envvar`, treating an empty value the same as a missing one.
pub fn non_empty_env(envvar: &str) -> Option<String> {
    env::var(envvar).ok().filter(|s| !s.trim().is_empty())
}
