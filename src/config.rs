//! Emission policy.
//!
//! [`EmitterConfig`] controls whether a dirty output channel may still be
//! written to, which headers never replace earlier values, and how large the
//! body chunks are.

use std::num::NonZeroUsize;

/// Default body chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(8192) {
    Some(size) => size,
    None => unreachable!(),
};

/// Header names that never replace earlier values by default.
pub const DEFAULT_REPLACE_EXEMPT: &[&str] = &["Set-Cookie"];

/// Policy applied by [`crate::ResponseEmitter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitterConfig {
    force_emit: bool,
    replace_exempt: Vec<String>,
    chunk_size: NonZeroUsize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            force_emit: true,
            replace_exempt: DEFAULT_REPLACE_EXEMPT
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EmitterConfig {
    /// Create the default policy: forced emission on, `Set-Cookie` exempt,
    /// 8 KiB chunks.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Allow or refuse writing to a dirty output channel.
    #[must_use]
    pub fn with_force_emit(mut self, force_emit: bool) -> Self {
        self.force_emit = force_emit;
        self
    }

    /// Replace the set of header names exempt from replace semantics.
    #[must_use]
    pub fn with_replace_exempt<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replace_exempt = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the body chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Whether a dirty output channel is still written to.
    #[must_use]
    pub fn force_emit(&self) -> bool { self.force_emit }

    /// Set whether a dirty output channel is still written to.
    pub fn set_force_emit(&mut self, force_emit: bool) { self.force_emit = force_emit; }

    /// Header names exempt from replace semantics.
    #[must_use]
    pub fn replace_exempt(&self) -> &[String] { &self.replace_exempt }

    /// Returns true if `name` never replaces earlier values.
    #[must_use]
    pub fn is_replace_exempt(&self, name: &str) -> bool {
        self.replace_exempt
            .iter()
            .any(|exempt| exempt.eq_ignore_ascii_case(name))
    }

    /// Body chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> NonZeroUsize { self.chunk_size }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_force_emit_with_set_cookie_exempt() {
        let config = EmitterConfig::default();
        assert!(config.force_emit());
        assert_eq!(config.chunk_size().get(), 8192);
        assert!(config.is_replace_exempt("set-cookie"));
        assert!(!config.is_replace_exempt("Content-Type"));
    }

    #[test]
    fn exempt_set_is_configurable() {
        let config = EmitterConfig::new().with_replace_exempt(["Link", "Warning"]);
        assert_eq!(config.replace_exempt(), &["Link".to_owned(), "Warning".to_owned()]);
        assert!(config.is_replace_exempt("LINK"));
        assert!(!config.is_replace_exempt("Set-Cookie"));
    }
}
