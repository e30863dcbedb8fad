//! In-process providers for pipeline tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use airroute::models::AirQualityObservation;
use airroute::providers::ProviderRoute;
use airroute::{
    AirQualityProvider, AirRouteError, Coordinate, Geocoder, Providers, RouteAirQualityAggregator,
    RouteProvider, TransportMode, WaypointSampler,
};
use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

fn place(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude, "fake").unwrap()
}

pub fn delhi() -> Coordinate {
    place(28.70, 77.10)
}

pub fn agra() -> Coordinate {
    place(27.18, 78.02)
}

pub fn jaipur() -> Coordinate {
    place(26.91, 75.79)
}

/// Geocoder with a fixed gazetteer; reverse lookups name points by coordinates
#[derive(Default)]
pub struct FakeGeocoder {
    places: Vec<(&'static str, Coordinate)>,
    unnamed: bool,
    pub search_calls: AtomicUsize,
    pub reverse_calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self {
            places: vec![("Delhi", delhi()), ("Agra", agra()), ("Jaipur", jaipur())],
            ..Self::default()
        }
    }

    /// Reverse lookups return no candidates
    pub fn unnamed() -> Self {
        Self {
            unnamed: true,
            ..Self::new()
        }
    }

    pub fn label(point: Coordinate) -> String {
        format!("Place {:.2},{:.2}", point.latitude(), point.longitude())
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(&self, text: &str) -> airroute::Result<Vec<Coordinate>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .places
            .iter()
            .filter(|(name, _)| *name == text)
            .map(|(_, coordinate)| *coordinate)
            .collect())
    }

    async fn reverse(&self, point: Coordinate) -> airroute::Result<Vec<String>> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        if self.unnamed {
            return Ok(Vec::new());
        }
        Ok(vec![Self::label(point)])
    }
}

/// Router returning a straight line of `points` points between start and end
pub struct FakeRouter {
    points: usize,
    distance_m: f64,
    duration_s: f64,
    pub calls: AtomicUsize,
}

impl FakeRouter {
    pub fn new(points: usize) -> Self {
        Self {
            points,
            distance_m: 233_400.0,
            duration_s: 12_630.0,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RouteProvider for FakeRouter {
    async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
        _mode: TransportMode,
    ) -> airroute::Result<Option<ProviderRoute>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.points == 0 {
            return Ok(None);
        }

        let steps = (self.points - 1).max(1) as f64;
        let path = (0..self.points)
            .map(|i| {
                if i + 1 == self.points {
                    return Ok(end);
                }
                let t = i as f64 / steps;
                Coordinate::new(
                    start.latitude() + (end.latitude() - start.latitude()) * t,
                    start.longitude() + (end.longitude() - start.longitude()) * t,
                    "fake",
                )
            })
            .collect::<airroute::Result<Vec<_>>>()?;

        Ok(Some(ProviderRoute {
            path,
            distance_m: self.distance_m,
            duration_s: self.duration_s,
        }))
    }
}

/// Holds back observations of one coordinate until released
pub struct Gate {
    pub point: Coordinate,
    pub entered: Notify,
    pub release: Semaphore,
}

impl Gate {
    pub fn new(point: Coordinate) -> Arc<Self> {
        Arc::new(Self {
            point,
            entered: Notify::new(),
            release: Semaphore::new(0),
        })
    }
}

/// Air-quality provider reporting a fixed level
pub struct FakeAirQuality {
    level: Option<f64>,
    gate: Option<Arc<Gate>>,
    pub failing: AtomicBool,
    pub calls: AtomicUsize,
}

impl FakeAirQuality {
    pub fn new(level: Option<f64>) -> Self {
        Self {
            level,
            gate: None,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn gated(level: Option<f64>, gate: Arc<Gate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(level)
        }
    }
}

#[async_trait]
impl AirQualityProvider for FakeAirQuality {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn observe(&self, point: Coordinate) -> airroute::Result<AirQualityObservation> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.gate.as_ref().filter(|gate| gate.point == point) {
            gate.entered.notify_one();
            let _permit = gate
                .release
                .acquire()
                .await
                .map_err(|_| AirRouteError::upstream("fake", "gate closed"))?;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(AirRouteError::upstream("fake", "HTTP 503 Service Unavailable"));
        }

        Ok(AirQualityObservation {
            raw_index: self.level,
            level: self.level,
        })
    }
}

/// Fakes plus the aggregator wired to them
pub struct Harness {
    pub geocoder: Arc<FakeGeocoder>,
    pub router: Arc<FakeRouter>,
    pub air_quality: Arc<FakeAirQuality>,
    pub aggregator: RouteAirQualityAggregator,
}

impl Harness {
    pub fn new(geocoder: FakeGeocoder, router: FakeRouter, air_quality: FakeAirQuality) -> Self {
        Self::with_sampler(geocoder, router, air_quality, WaypointSampler::default())
    }

    pub fn with_sampler(
        geocoder: FakeGeocoder,
        router: FakeRouter,
        air_quality: FakeAirQuality,
        sampler: WaypointSampler,
    ) -> Self {
        let geocoder = Arc::new(geocoder);
        let router = Arc::new(router);
        let air_quality = Arc::new(air_quality);

        let providers = Providers {
            geocoder: geocoder.clone(),
            router: router.clone(),
            air_quality: air_quality.clone(),
        };
        let aggregator = RouteAirQualityAggregator::new(providers, sampler, 4);

        Self {
            geocoder,
            router,
            air_quality,
            aggregator,
        }
    }

    /// Delhi/Agra setup: 5-point route, level 3 everywhere
    pub fn standard() -> Self {
        Self::new(
            FakeGeocoder::new(),
            FakeRouter::new(5),
            FakeAirQuality::new(Some(3.0)),
        )
    }
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
