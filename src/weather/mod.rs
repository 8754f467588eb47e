//! Upstream weather fetching
//!
//! Calls are serialized with a minimum spacing and answered from the
//! response cache while fresh. A failed call never surfaces as an error:
//! it falls back to the last cached response or to no data at all.

use crate::Result;
use crate::cache::{CacheKey, ResponseCache};
use crate::models::{ForecastModel, HourlySeries, LaunchSite, SiteForecast};
use crate::paragliding::{ForecastHorizon, build_site_forecast};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Source of hourly series for a site
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, site: &LaunchSite, model: ForecastModel) -> Result<HourlySeries>;
}

/// Enforces a minimum delay between consecutive upstream calls
#[derive(Debug)]
pub struct RequestSpacer {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RequestSpacer {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Time until the next call may go out
    #[must_use]
    pub fn time_until_next_request(&self) -> Duration {
        self.last_request.map_or(Duration::ZERO, |last| {
            self.min_interval.saturating_sub(last.elapsed())
        })
    }

    /// Sleep until the next call may go out and record it
    pub async fn wait(&mut self) {
        let remaining = self.time_until_next_request();
        if !remaining.is_zero() {
            debug!(wait_ms = remaining.as_millis() as u64, "Spacing upstream request");
            tokio::time::sleep(remaining).await;
        }
        self.last_request = Some(Instant::now());
    }
}

/// Provider plus spacing plus cache, one per batch run
pub struct ForecastFetcher<'a, P> {
    provider: P,
    spacer: RequestSpacer,
    cache: &'a mut ResponseCache<HourlySeries>,
}

impl<'a, P: WeatherProvider> ForecastFetcher<'a, P> {
    pub fn new(
        provider: P,
        spacer: RequestSpacer,
        cache: &'a mut ResponseCache<HourlySeries>,
    ) -> Self {
        Self {
            provider,
            spacer,
            cache,
        }
    }

    /// Hourly series for a site, `None` when neither upstream nor cache has it
    #[instrument(skip_all, fields(site = %site.id, model = %model))]
    pub async fn fetch(&mut self, site: &LaunchSite, model: ForecastModel) -> Option<HourlySeries> {
        let key = CacheKey::new(site.latitude, site.longitude, model);

        if let Some(series) = self.cache.get_fresh(&key) {
            debug!(%key, "Serving cached response");
            return Some(series);
        }

        self.spacer.wait().await;

        match self.provider.fetch(site, model).await {
            Ok(series) => {
                self.cache.put(key, series.clone());
                Some(series)
            }
            Err(e) => {
                warn!(error = %e, "Upstream fetch failed");
                let stale = self.cache.get_any(&key);
                if stale.is_some() {
                    info!(%key, "Falling back to stale cached response");
                }
                stale
            }
        }
    }

    /// Fetch both models for a site and build its forecast
    pub async fn forecast_site(
        &mut self,
        site: &LaunchSite,
        start: NaiveDate,
        horizon: ForecastHorizon,
    ) -> SiteForecast {
        let high_res = self.fetch(site, ForecastModel::HighRes).await;
        let low_res = self.fetch(site, ForecastModel::LowRes).await;
        build_site_forecast(site, high_res.as_ref(), low_res.as_ref(), start, horizon)
    }

    /// Forecasts for every site, in input order
    pub async fn forecast_all(
        &mut self,
        sites: &[LaunchSite],
        start: NaiveDate,
        horizon: ForecastHorizon,
    ) -> Vec<SiteForecast> {
        let mut forecasts = Vec::with_capacity(sites.len());
        for site in sites {
            info!(site = %site.name, "Fetching forecast");
            forecasts.push(self.forecast_site(site, start, horizon).await);
        }
        forecasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ForecastError;
    use crate::models::{RawHourlySample, SiteType};
    use chrono::NaiveDateTime;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Provider returning one fixed sample, or failing when switched off
    #[derive(Clone, Default)]
    struct StubProvider {
        calls: Arc<AtomicUsize>,
        failing: Arc<AtomicBool>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch(&self, _site: &LaunchSite, model: ForecastModel) -> Result<HourlySeries> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ForecastError::api(model.tag(), "HTTP 503 Service Unavailable"));
            }
            let sample = RawHourlySample {
                time: NaiveDateTime::parse_from_str("2026-10-19T12:00", "%Y-%m-%dT%H:%M").unwrap(),
                temperature: 75.0,
                dew_point: 45.0,
                relative_humidity: 35.0,
                cloud_cover: 20.0,
                wind_speed: 10.0,
                wind_direction: 260.0,
                wind_gust: 14.0,
                precipitation: 0.0,
                precipitation_probability: 0.0,
                cape: None,
                lifted_index: None,
                boundary_layer_height: None,
            };
            Ok(HourlySeries::new(model, vec![sample]))
        }
    }

    fn site() -> LaunchSite {
        LaunchSite::new(
            "dunlap",
            "Dunlap",
            3200.0,
            (36.74, -119.1),
            "SW-W",
            20.0,
            SiteType::Thermal,
        )
    }

    fn spacer() -> RequestSpacer {
        RequestSpacer::new(Duration::ZERO)
    }

    #[test]
    fn test_spacer_starts_open() {
        let spacer = RequestSpacer::new(Duration::from_secs(60));
        assert_eq!(spacer.time_until_next_request(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_spacer_blocks_after_request() {
        let mut spacer = RequestSpacer::new(Duration::from_secs(60));
        spacer.wait().await;
        assert!(spacer.time_until_next_request() > Duration::from_secs(50));
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_upstream() {
        let provider = StubProvider::default();
        let mut cache = ResponseCache::new(chrono::Duration::minutes(60));
        let mut fetcher = ForecastFetcher::new(provider.clone(), spacer(), &mut cache);

        assert!(fetcher.fetch(&site(), ForecastModel::LowRes).await.is_some());
        assert!(fetcher.fetch(&site(), ForecastModel::LowRes).await.is_some());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        assert!(fetcher.fetch(&site(), ForecastModel::HighRes).await.is_some());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_without_cache_is_none() {
        let provider = StubProvider::default();
        provider.failing.store(true, Ordering::SeqCst);
        let mut cache = ResponseCache::new(chrono::Duration::minutes(60));
        let mut fetcher = ForecastFetcher::new(provider, spacer(), &mut cache);

        assert!(fetcher.fetch(&site(), ForecastModel::HighRes).await.is_none());
    }

    #[tokio::test]
    async fn test_failure_serves_stale_entry() {
        let provider = StubProvider::default();
        // Zero TTL: every entry is stale as soon as it is stored
        let mut cache = ResponseCache::new(chrono::Duration::zero());
        let mut fetcher = ForecastFetcher::new(provider.clone(), spacer(), &mut cache);

        let first = fetcher.fetch(&site(), ForecastModel::LowRes).await;
        provider.failing.store(true, Ordering::SeqCst);
        let second = fetcher.fetch(&site(), ForecastModel::LowRes).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(first, second);
    }
}
