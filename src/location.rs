//! One-shot device location lookup for the add form.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{LocationConfig, LocationSource};

/// Location acquisition failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("location request timed out")]
    Timeout,

    #[error("location capability not supported")]
    Unsupported,
}

impl LocationError {
    /// Text for the inline banner above the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::Unsupported => "Geolocation is not supported on this system.",
            _ => "Location access is required to submit the form.",
        }
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Fixed-point text with 6 decimal places, as written into the form.
    pub fn to_fixed(&self) -> (String, String) {
        (format!("{:.6}", self.latitude), format!("{:.6}", self.longitude))
    }
}

/// Source of the current position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request the current position once.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Returns coordinates from configuration.
pub struct FixedLocation {
    coords: Coordinates,
}

impl FixedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coords: Coordinates { latitude, longitude },
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coords)
    }
}

/// No location capability on this system.
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// IP geolocation lookup over HTTP.
///
/// Expects a JSON body with numeric `lat` and `lon` fields and an optional
/// `status` that is `"fail"` when the lookup could not be resolved.
pub struct HttpLocation {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl HttpLocation {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> LocationError {
    if e.is_timeout() {
        LocationError::Timeout
    } else {
        LocationError::Unavailable(e.to_string())
    }
}

#[async_trait]
impl LocationProvider for HttpLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let response = self.client.get(&self.url).send().await.map_err(map_transport_error)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(LocationError::PermissionDenied),
            status if !status.is_success() => {
                return Err(LocationError::Unavailable(format!("lookup returned {status}")));
            }
            _ => {}
        }

        let body: IpLookup = response.json().await.map_err(map_transport_error)?;

        if body.status.as_deref() == Some("fail") {
            return Err(LocationError::Unavailable(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) if crate::geo::in_range(latitude, longitude) => {
                Ok(Coordinates { latitude, longitude })
            }
            _ => Err(LocationError::Unavailable("lookup returned no usable coordinates".to_string())),
        }
    }
}

/// Build the provider selected in configuration.
pub fn provider_from_config(config: &LocationConfig) -> Arc<dyn LocationProvider> {
    match config.provider {
        LocationSource::Fixed => {
            info!("Using fixed location {}, {}", config.latitude, config.longitude);
            Arc::new(FixedLocation::new(config.latitude, config.longitude))
        }
        LocationSource::Http => match HttpLocation::new(&config.url, config.timeout_secs) {
            Ok(provider) => {
                info!("Using IP geolocation at {}", config.url);
                Arc::new(provider)
            }
            Err(e) => {
                warn!("Location client unavailable, disabling location: {}", e);
                Arc::new(NoLocation)
            }
        },
        LocationSource::Disabled => {
            info!("Location disabled by configuration");
            Arc::new(NoLocation)
        }
    }
}
