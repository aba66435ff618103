//! Raw, unvalidated options as a host or config file supplies them.
//!
//! Every field is optional. Turning this into a usable configuration (defaults, regex
//! compilation, chain validation) is the domain's job; see `impsort_domain::Config`.
//!
//! Deserialization is lenient: a value of the wrong type (`sortDestructuredSpecifiers = "yes"`)
//! becomes `None` with a warning instead of failing the whole document, so the default applies.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOptions {
    /// Split external and internal imports (external first).
    #[serde(
        alias = "groupExternalInternal",
        alias = "groups",
        deserialize_with = "lenient"
    )]
    pub group_external_internal: Option<bool>,

    /// Regex source identifying internal module paths.
    #[serde(
        alias = "internalPathPattern",
        alias = "internal_pattern",
        alias = "internalPattern",
        deserialize_with = "lenient"
    )]
    pub internal_path_pattern: Option<String>,

    #[serde(
        alias = "sortStrategyChain",
        alias = "sort_strategies",
        alias = "sortStrategies",
        deserialize_with = "lenient"
    )]
    pub sort_strategy_chain: Option<Vec<RawStrategy>>,

    #[serde(
        alias = "sortDestructuredSpecifiers",
        alias = "sort_destructured_imports",
        alias = "sortDestructuredImports",
        deserialize_with = "lenient"
    )]
    pub sort_destructured_specifiers: Option<bool>,
}

/// A chain entry: either a bare strategy name or `{ strategy, direction }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawStrategy {
    Name(String),
    Entry {
        strategy: String,
        #[serde(
            default,
            deserialize_with = "lenient",
            skip_serializing_if = "Option::is_none"
        )]
        direction: Option<String>,
    },
}

impl RawStrategy {
    pub fn strategy_name(&self) -> &str {
        match self {
            RawStrategy::Name(name) => name,
            RawStrategy::Entry { strategy, .. } => strategy,
        }
    }

    pub fn direction_name(&self) -> Option<&str> {
        match self {
            RawStrategy::Name(_) => None,
            RawStrategy::Entry { direction, .. } => direction.as_deref(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(Option<T>),
    Invalid(#[allow(dead_code)] IgnoredAny),
}

/// `Some` for a well-typed value, `None` for null or anything malformed.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Valid(value) => value,
        Lenient::Invalid(_) => {
            warn!(
                expected = std::any::type_name::<T>(),
                "ignoring malformed option value, using default"
            );
            None
        }
    })
}
