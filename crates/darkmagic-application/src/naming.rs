//! Naming-convention classification
//!
//! Used only when a callable carries no explicit classification tag.

use darkmagic_domain::constants::{DO_NOT_INJECT_MARKER, FORCE_INJECT_MARKER};
use darkmagic_domain::value_objects::Classification;

/// Result of reading an exported name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingVerdict {
    /// Classification implied by the name
    pub classification: Classification,
    /// Whether the name forces auto-injection
    pub forced: bool,
}

/// Classify a callable by its exported name
///
/// `inject_` forces a producer; `$` and type-like names (`Connection`) are
/// classes; anything else is a producer.
pub fn classify_exported_name(exported: &str) -> NamingVerdict {
    if exported.starts_with(FORCE_INJECT_MARKER) {
        return NamingVerdict {
            classification: Classification::Producer,
            forced: true,
        };
    }

    let class_like = exported.starts_with(DO_NOT_INJECT_MARKER)
        || exported
            .chars()
            .next()
            .is_some_and(|first| first.is_alphabetic() && first.is_uppercase());

    NamingVerdict {
        classification: if class_like {
            Classification::Class
        } else {
            Classification::Producer
        },
        forced: false,
    }
}
