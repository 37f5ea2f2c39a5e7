//! Configuration constants and utilities for listling
//!
//! The attribute keys are fixed (they are part of the markup and swap
//! contract), while the default words can be overridden per process through
//! environment variables.

use serde_json::Value;

use crate::reactive::Attributes;

/// Attribute holding the first word of an item
pub const PART_ONE_KEY: &str = "part1";

/// Attribute holding the second word of an item (counter-suffixed on add)
pub const PART_TWO_KEY: &str = "part2";

/// Default value for the first word
pub const DEFAULT_PART_ONE: &str = "hello";

/// Default value for the second word
pub const DEFAULT_PART_TWO: &str = "world";

/// Environment variable overriding the first word's default
pub const PART_ONE_ENV_VAR: &str = "LISTLING_PART_ONE";

/// Environment variable overriding the second word's default
pub const PART_TWO_ENV_VAR: &str = "LISTLING_PART_TWO";

fn env_or(var: &str, fallback: &str) -> String {
    std::env::var_os(var)
        .and_then(|value| value.into_string().ok())
        .unwrap_or_else(|| fallback.to_string())
}

/// First word default, honoring the environment override
pub fn part_one() -> String {
    env_or(PART_ONE_ENV_VAR, DEFAULT_PART_ONE)
}

/// Second word default, honoring the environment override
pub fn part_two() -> String {
    env_or(PART_TWO_ENV_VAR, DEFAULT_PART_TWO)
}

/// Default attribute set applied to freshly created items
pub fn default_attributes() -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(PART_ONE_KEY.to_string(), Value::String(part_one()));
    attributes.insert(PART_TWO_KEY.to_string(), Value::String(part_two()));
    attributes
}
