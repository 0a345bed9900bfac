use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for aggregate identifier types
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Render the id as a string (tab keys, DOM ids, list keys)
    fn as_string(&self) -> String;

    /// Parse the id back from its string form
    fn from_string(s: &str) -> Result<Self, String>;
}
