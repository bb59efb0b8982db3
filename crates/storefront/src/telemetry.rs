//! Logging and error reporting setup for the server binary.

use std::borrow::Cow;

use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::StorefrontConfig;

const DEFAULT_FILTER: &str = "nursery_storefront=info,tower_http=debug";

/// Start Sentry (when a DSN is configured) and install the global subscriber.
///
/// Sentry is started first so the subscriber's Sentry layer has a hub. Keep
/// the returned guard alive for the life of the process; dropping it flushes
/// pending events.
pub fn init(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: config.sentry_environment.clone().map(Cow::Owned),
                sample_rate: config.sentry_sample_rate,
                traces_sample_rate: config.sentry_traces_sample_rate,
                attach_stacktrace: true,
                ..Default::default()
            },
        ))
    });

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let (json, text) = if config.log_json {
        (Some(fmt::layer().json().flatten_event(true)), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .with(sentry_tracing::layer().event_filter(|metadata| sentry_filter(*metadata.level())))
        .init();

    if guard.is_some() {
        tracing::info!("Sentry initialized");
    }
    guard
}

/// Warnings and errors become Sentry events; info and debug become breadcrumbs.
fn sentry_filter(level: Level) -> EventFilter {
    match level {
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        Level::TRACE => EventFilter::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentry_filter_levels() {
        let bits = |level| sentry_filter(level).bits();
        assert_eq!(bits(Level::ERROR), EventFilter::Event.bits());
        assert_eq!(bits(Level::WARN), EventFilter::Event.bits());
        assert_eq!(bits(Level::INFO), EventFilter::Breadcrumb.bits());
        assert_eq!(bits(Level::DEBUG), EventFilter::Breadcrumb.bits());
        assert_eq!(bits(Level::TRACE), EventFilter::Ignore.bits());
    }
}
