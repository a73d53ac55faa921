//! Domain constants
//!
//! Reserved names and markers understood by every layer.

/// Trailing parameter name reserved for the completion continuation
pub const CONTINUATION_PARAM: &str = "callback";

/// Suffix marking a dependency as optional (`cache_`)
pub const OPTIONAL_SUFFIX: char = '_';

/// Exported-name prefix that keeps a callable from ever being auto-invoked
pub const DO_NOT_INJECT_MARKER: &str = "$";

/// Exported-name prefix that forces auto-invocation regardless of policy
pub const FORCE_INJECT_MARKER: &str = "inject_";

/// Name reported for callables registered without one
pub const ANONYMOUS_TARGET: &str = "anonymous";
