use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ConfigurationSource
///
/// Provenance of a configured value. Variants are ordered by precedence, so
/// `Explicit > DataAnnotation > Convention` and `max` picks the stronger one.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ConfigurationSource {
    Convention,
    DataAnnotation,
    Explicit,
}

impl ConfigurationSource {
    /// Returns `true` when a write from `self` may replace a value recorded
    /// with `current`. An unset source is overridden by anything.
    #[must_use]
    pub fn overrides(self, current: Option<Self>) -> bool {
        current.is_none_or(|current| self >= current)
    }

    /// Combine two sources, keeping the higher precedence.
    #[must_use]
    pub fn max_with(self, other: Option<Self>) -> Self {
        other.map_or(self, |other| self.max(other))
    }

    /// Source to use for attribute-driven configuration.
    #[must_use]
    pub const fn from_data_annotation(from_data_annotation: bool) -> Self {
        if from_data_annotation {
            Self::DataAnnotation
        } else {
            Self::Convention
        }
    }
}

///
/// Configured
///
/// A value paired with the source that configured it.
///
/// Writes below the recorded precedence are rejected, and clearing the value
/// also clears the recorded source.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Configured<T> {
    value: Option<T>,
    source: Option<ConfigurationSource>,
}

impl<T> Default for Configured<T> {
    fn default() -> Self {
        Self::unset()
    }
}

impl<T> Configured<T> {
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            value: None,
            source: None,
        }
    }

    #[must_use]
    pub const fn new(value: T, source: ConfigurationSource) -> Self {
        Self {
            value: Some(value),
            source: Some(source),
        }
    }

    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub const fn source(&self) -> Option<ConfigurationSource> {
        self.source
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Store `value` if `source` may override the recorded source.
    ///
    /// Returns `true` when the write was applied.
    pub fn set(&mut self, value: Option<T>, source: ConfigurationSource) -> bool {
        if !source.overrides(self.source) {
            return false;
        }

        self.source = match value {
            Some(_) => Some(source.max_with(self.source)),
            None => None,
        };
        self.value = value;

        true
    }
}

impl<T: PartialEq> Configured<T> {
    /// Returns `true` if `set(value, source)` would be accepted, or if the
    /// requested value is already the current one.
    #[must_use]
    pub fn can_set(&self, value: Option<&T>, source: ConfigurationSource) -> bool {
        source.overrides(self.source) || self.value.as_ref() == value
    }
}

impl<T: Clone> Configured<T> {
    #[must_use]
    pub fn cloned(&self) -> Option<T> {
        self.value.clone()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_source() -> impl Strategy<Value = ConfigurationSource> {
        prop_oneof![
            Just(ConfigurationSource::Convention),
            Just(ConfigurationSource::DataAnnotation),
            Just(ConfigurationSource::Explicit),
        ]
    }

    #[test]
    fn precedence_order_is_explicit_over_annotation_over_convention() {
        assert!(ConfigurationSource::Explicit > ConfigurationSource::DataAnnotation);
        assert!(ConfigurationSource::DataAnnotation > ConfigurationSource::Convention);
        assert!(ConfigurationSource::Convention.overrides(None));
        assert!(!ConfigurationSource::Convention.overrides(Some(ConfigurationSource::Explicit)));
        assert!(ConfigurationSource::Explicit.overrides(Some(ConfigurationSource::Explicit)));
    }

    #[test]
    fn convention_after_explicit_keeps_explicit_value() {
        let mut name = Configured::unset();

        assert!(name.set(Some("dbo_fn"), ConfigurationSource::Explicit));
        assert!(!name.set(Some("conv_fn"), ConfigurationSource::Convention));

        assert_eq!(name.get(), Some(&"dbo_fn"));
        assert_eq!(name.source(), Some(ConfigurationSource::Explicit));
    }

    #[test]
    fn clearing_resets_value_and_source() {
        let mut schema = Configured::new("dbo", ConfigurationSource::DataAnnotation);

        assert!(schema.set(None, ConfigurationSource::Explicit));

        assert_eq!(schema.get(), None);
        assert_eq!(schema.source(), None);

        // anything may configure it again once cleared
        assert!(schema.set(Some("sales"), ConfigurationSource::Convention));
        assert_eq!(schema.source(), Some(ConfigurationSource::Convention));
    }

    #[test]
    fn can_set_accepts_unchanged_value_from_weaker_source() {
        let schema = Configured::new("dbo", ConfigurationSource::Explicit);

        assert!(schema.can_set(Some(&"dbo"), ConfigurationSource::Convention));
        assert!(!schema.can_set(Some(&"other"), ConfigurationSource::Convention));
        assert!(!schema.can_set(None, ConfigurationSource::DataAnnotation));
    }

    #[test]
    fn from_data_annotation_maps_flag() {
        assert_eq!(
            ConfigurationSource::from_data_annotation(true),
            ConfigurationSource::DataAnnotation
        );
        assert_eq!(
            ConfigurationSource::from_data_annotation(false),
            ConfigurationSource::Convention
        );
    }

    proptest! {
        #[test]
        fn recorded_source_never_downgrades(first in arb_source(), second in arb_source()) {
            let mut value = Configured::unset();
            value.set(Some(1_u32), first);
            let applied = value.set(Some(2_u32), second);

            prop_assert_eq!(applied, second >= first);
            prop_assert_eq!(value.source(), Some(first.max(second)));
            let expected = if applied { 2 } else { 1 };
            prop_assert_eq!(value.get(), Some(&expected));
        }

        #[test]
        fn writes_in_any_order_end_at_strongest_source(
            sources in prop::collection::vec(arb_source(), 1..8),
        ) {
            let mut value = Configured::unset();
            for (i, source) in sources.iter().enumerate() {
                value.set(Some(i), *source);
            }

            let strongest = sources.iter().copied().max();
            prop_assert_eq!(value.source(), strongest);
        }
    }
}
