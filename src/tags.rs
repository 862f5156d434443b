//! Tag filtering applied before tags reach the output record

use std::collections::{BTreeMap, BTreeSet};

/// Prefix of AWS-managed system tags, never surfaced
pub const AWS_TAG_KEY_PREFIX: &str = "aws:";

/// Tag keys the caller does not want to see in read output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreTagsConfig {
    /// Exact keys to drop
    pub keys: BTreeSet<String>,
    /// Key prefixes to drop
    pub key_prefixes: Vec<String>,
}

impl IgnoreTagsConfig {
    pub fn should_ignore(&self, key: &str) -> bool {
        key.starts_with(AWS_TAG_KEY_PREFIX)
            || self.keys.contains(key)
            || self.key_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }

    pub fn apply<'a, I>(&self, tags: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        tags.into_iter()
            .filter(|(key, _)| !self.should_ignore(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
