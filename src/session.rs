//! Build session: one displayed report, replaced only by the newest build
//!
//! Every submitted build takes a generation number before any remote call. A build
//! may publish its report only while its generation is still the newest one issued,
//! so a slow earlier request can never overwrite a later one. Failed builds leave
//! the displayed report untouched.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::config::AirRouteConfig;
use crate::models::{BuildRequest, RouteAirQualityReport};
use crate::pipeline::RouteAirQualityAggregator;
use crate::{AirRouteError, Result};

/// A report together with the generation that produced it
#[derive(Debug, Clone)]
pub struct DisplayedReport {
    pub generation: u64,
    pub report: Arc<RouteAirQualityReport>,
}

/// Result of a build that did not fail
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// The report is now the displayed one
    Displayed(DisplayedReport),
    /// A newer build was submitted meanwhile; this report was discarded
    Superseded { generation: u64, latest: u64 },
}

/// Generation counter plus the currently displayed report
#[derive(Debug, Default)]
pub struct ReportBoard {
    latest: AtomicU64,
    displayed: RwLock<Option<DisplayedReport>>,
}

impl ReportBoard {
    /// Issue the next generation number
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Newest generation issued so far
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest() == generation
    }

    /// Publish `report` if `generation` is still the newest; `None` when stale
    pub async fn publish(
        &self,
        generation: u64,
        report: RouteAirQualityReport,
    ) -> Option<DisplayedReport> {
        let mut displayed = self.displayed.write().await;

        let newer_shown = displayed
            .as_ref()
            .is_some_and(|shown| shown.generation >= generation);
        if !self.is_current(generation) || newer_shown {
            return None;
        }

        let entry = DisplayedReport {
            generation,
            report: Arc::new(report),
        };
        *displayed = Some(entry.clone());
        Some(entry)
    }

    pub async fn current(&self) -> Option<DisplayedReport> {
        self.displayed.read().await.clone()
    }
}

/// Runs builds and keeps the displayed report consistent
pub struct BuildSession {
    aggregator: RouteAirQualityAggregator,
    board: ReportBoard,
    build_timeout: Duration,
}

impl BuildSession {
    #[must_use]
    pub fn new(aggregator: RouteAirQualityAggregator, build_timeout: Duration) -> Self {
        Self {
            aggregator,
            board: ReportBoard::default(),
            build_timeout,
        }
    }

    pub fn from_config(config: &AirRouteConfig) -> Result<Self> {
        let aggregator = RouteAirQualityAggregator::from_config(config)?;
        Ok(Self::new(
            aggregator,
            Duration::from_secs(config.http.build_timeout_seconds.into()),
        ))
    }

    /// Submit a build. Invalid input is rejected before a generation is issued.
    /// Errors are logged in detail and returned; the displayed report only
    /// changes when this build is still the newest on completion.
    #[instrument(skip(self, request), fields(start = %request.start, end = %request.end))]
    pub async fn submit(&self, request: BuildRequest) -> Result<BuildOutcome> {
        // rejected input must not supersede a build in flight
        if let Err(e) = request.validate() {
            warn!("Rejected build request: {}", e);
            return Err(e);
        }

        let generation = self.board.begin();

        let result = tokio::time::timeout(
            self.build_timeout,
            self.aggregator
                .build(&request.start, &request.end, request.mode),
        )
        .await
        .map_err(|_| {
            AirRouteError::upstream(
                "pipeline",
                format!("build timed out after {}s", self.build_timeout.as_secs()),
            )
        })
        .and_then(std::convert::identity);

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                error!(generation, kind = e.code(), "Build failed: {}", e);
                return Err(e);
            }
        };

        match self.board.publish(generation, report).await {
            Some(displayed) => {
                info!(generation, "Report displayed");
                Ok(BuildOutcome::Displayed(displayed))
            }
            None => {
                let latest = self.board.latest();
                info!(generation, latest, "Discarding stale report");
                Ok(BuildOutcome::Superseded { generation, latest })
            }
        }
    }

    /// The report currently on display, if any build has succeeded
    pub async fn current(&self) -> Option<DisplayedReport> {
        self.board.current().await
    }
}
