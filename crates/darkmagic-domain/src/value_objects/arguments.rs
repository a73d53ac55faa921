//! Assembled arguments handed to a callable

use std::any::{Any, type_name};
use std::sync::Arc;

use super::value::Value;
use crate::constants::OPTIONAL_SUFFIX;
use crate::error::{Error, Result};

/// Ordered argument list for one invocation
///
/// Slots follow the declared parameter order; an absent slot is an optional
/// dependency that could not be found, or a producer that produced nothing.
/// Lookups accept the declared name with or without the optional suffix.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    target: String,
    names: Vec<String>,
    values: Vec<Option<Value>>,
}

impl Arguments {
    /// Create an argument list for `target`
    ///
    /// `names` and `values` are paired by index.
    pub fn new<S: Into<String>>(target: S, names: Vec<String>, values: Vec<Option<Value>>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self {
            target: target.into(),
            names,
            values,
        }
    }

    /// Empty argument list for a zero-arity target
    pub fn empty<S: Into<String>>(target: S) -> Self {
        Self::new(target, Vec::new(), Vec::new())
    }

    /// Name of the callable receiving these arguments
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no slots
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Slot by position
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Iterate `(declared name, slot)` pairs in declared order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Option::as_ref))
    }

    /// Required argument of type `T`
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        self.optional::<T>(name)?.ok_or_else(|| {
            Error::invalid_argument(format!(
                "argument [{name}] of [{}] is absent",
                self.target
            ))
        })
    }

    /// Optional argument of type `T`
    ///
    /// Fails when `name` was never declared or holds another type.
    pub fn optional<T: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<T>>> {
        let Some(index) = self.position(name) else {
            return Err(Error::invalid_argument(format!(
                "[{}] did not declare an argument named [{name}]",
                self.target
            )));
        };

        match &self.values[index] {
            None => Ok(None),
            Some(value) => value.downcast::<T>().map(Some).ok_or_else(|| {
                Error::invalid_argument(format!(
                    "argument [{name}] of [{}] is a {}, not a {}",
                    self.target,
                    value.type_name(),
                    type_name::<T>()
                ))
            }),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        let bare = name.strip_suffix(OPTIONAL_SUFFIX).unwrap_or(name);
        self.names.iter().position(|declared| {
            declared == name || declared.strip_suffix(OPTIONAL_SUFFIX).unwrap_or(declared) == bare
        })
    }
}
