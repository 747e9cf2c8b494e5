use std::sync::Arc;

use lynkan_domain::{
    Clock, DeviceIdConfig, DeviceIdentifier, Diagnostic, Error, NativeIdSource, Origin,
    Resolution,
};
use tracing::{debug, warn};

/// Strategy used where the OS already keeps a reinstall-proof identifier.
///
/// The native id is returned untouched when it is usable. Otherwise an
/// ephemeral `<prefix><millis>` value is synthesized. That fallback is not
/// persisted, so a device stuck in the defective state gets a new identifier
/// on every call.
pub struct NativeIdResolver {
    config: DeviceIdConfig,
    source: Arc<dyn NativeIdSource>,
    clock: Arc<dyn Clock>,
}

impl NativeIdResolver {
    pub fn new(
        config: DeviceIdConfig,
        source: Arc<dyn NativeIdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { config, source, clock }
    }

    pub fn resolve(&self) -> Resolution {
        match self.read_native() {
            Ok(identifier) => {
                debug!(origin = %identifier.origin(), "Resolved native device id");
                Resolution::new(identifier)
            }
            Err(diagnostic) => {
                warn!(%diagnostic, "Native device id rejected, using ephemeral fallback");
                let identifier =
                    DeviceIdentifier::ephemeral(&self.config.fallback_prefix, self.clock.now_millis());
                Resolution::with_diagnostics(identifier, vec![diagnostic])
            }
        }
    }

    fn read_native(&self) -> Result<DeviceIdentifier, Diagnostic> {
        let value = match self.source.read() {
            Ok(Some(value)) => value,
            Ok(None) => return Err(Diagnostic::BlankValue),
            Err(error) => return Err(Diagnostic::SourceUnavailable(error)),
        };

        if value.trim().is_empty() {
            return Err(Diagnostic::BlankValue);
        }
        if self.config.is_known_bad(&value) {
            return Err(Diagnostic::KnownBadValue(value));
        }

        DeviceIdentifier::new(value, Origin::NativeOsId).map_err(|error| match error {
            Error::InvalidIdentifier(value) => Diagnostic::InvalidValue(value),
            other => Diagnostic::SourceUnavailable(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    struct StaticSource(Option<&'static str>);

    impl NativeIdSource for StaticSource {
        fn read(&self) -> lynkan_domain::Result<Option<String>> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct BrokenSource;

    impl NativeIdSource for BrokenSource {
        fn read(&self) -> lynkan_domain::Result<Option<String>> {
            Err(Error::source_unavailable("settings provider denied access"))
        }
    }

    /// Advances by one millisecond on every read.
    struct TickingClock(AtomicI64);

    impl Clock for TickingClock {
        fn now_millis(&self) -> i64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn fixture(source: impl NativeIdSource + 'static) -> NativeIdResolver {
        NativeIdResolver::new(
            DeviceIdConfig::default(),
            Arc::new(source),
            Arc::new(TickingClock(AtomicI64::new(1_760_000_000_000))),
        )
    }

    #[test]
    fn test_valid_native_id_is_returned_unchanged() {
        let resolver = fixture(StaticSource(Some("a1b2c3d4e5f60718")));

        for _ in 0..3 {
            let actual = resolver.resolve();

            assert_eq!(actual.identifier.value(), "a1b2c3d4e5f60718");
            assert_eq!(actual.identifier.origin(), Origin::NativeOsId);
            assert!(actual.is_clean());
        }
    }

    #[test]
    fn test_sentinel_falls_back() {
        let resolver = fixture(StaticSource(Some("9774d56d682e549c")));

        let actual = resolver.resolve();

        assert_eq!(actual.identifier.value(), "ANDROID_FALLBACK_1760000000000");
        assert_eq!(actual.identifier.origin(), Origin::EphemeralGenerated);
        assert!(matches!(
            actual.diagnostic(),
            Some(Diagnostic::KnownBadValue(value)) if value == "9774d56d682e549c"
        ));
    }

    #[test]
    fn test_null_and_blank_fall_back() {
        for source in [StaticSource(None), StaticSource(Some("")), StaticSource(Some("  "))] {
            let actual = fixture(source).resolve();

            assert!(actual.identifier.value().starts_with("ANDROID_FALLBACK_"));
            assert!(matches!(actual.diagnostic(), Some(Diagnostic::BlankValue)));
        }
    }

    #[test]
    fn test_source_error_is_swallowed() {
        let actual = fixture(BrokenSource).resolve();

        assert_eq!(actual.identifier.origin(), Origin::EphemeralGenerated);
        assert!(matches!(actual.diagnostic(), Some(Diagnostic::SourceUnavailable(_))));
    }

    #[test]
    fn test_unprintable_native_id_is_an_invalid_value() {
        let actual = fixture(StaticSource(Some("a1b2\u{7}c3d4"))).resolve();

        assert_eq!(actual.identifier.origin(), Origin::EphemeralGenerated);
        assert!(matches!(
            actual.diagnostic(),
            Some(Diagnostic::InvalidValue(value)) if value == "a1b2\u{7}c3d4"
        ));
    }

    #[test]
    fn test_fallback_differs_between_calls() {
        let resolver = fixture(StaticSource(None));

        let first = resolver.resolve().into_identifier();
        let second = resolver.resolve().into_identifier();

        assert_ne!(first, second);
        let digits = first.value().trim_start_matches("ANDROID_FALLBACK_");
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_custom_prefix_and_sentinels() {
        let resolver = NativeIdResolver::new(
            DeviceIdConfig::default()
                .fallback_prefix("FALLBACK-")
                .known_bad_sentinels(vec!["0000000000000000".to_string()]),
            Arc::new(StaticSource(Some("0000000000000000"))),
            Arc::new(TickingClock(AtomicI64::new(7))),
        );

        let actual = resolver.resolve();

        assert_eq!(actual.identifier.value(), "FALLBACK-7");
    }
}
