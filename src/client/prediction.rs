//! Prediction API client
//!
//! One submission is one linear exchange:
//! - `GET <base>/` must answer 200, otherwise the service is unreachable
//! - `POST <base>/<model>_prediction` with the flat measurement payload
//! - decode `results.prediction` and `results.probability`
//!
//! No retries and no caching; the caller resubmits.

use crate::config::{ApiConfig, DEFAULT_BASE_URL};
use crate::errors::{PredictError, Result};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use crate::types::{ModelKind, PredictionRequest, PredictionResult};
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

/// Default bound on the liveness probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on the scoring call
pub const DEFAULT_SCORING_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`PredictionClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub probe_timeout: Duration,
    pub scoring_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            scoring_timeout: DEFAULT_SCORING_TIMEOUT,
        }
    }
}

impl From<&ApiConfig> for ClientConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            probe_timeout: api.probe_timeout(),
            scoring_timeout: api.scoring_timeout(),
        }
    }
}

/// Client for the Sepsis prediction service
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
    probe_timeout: Duration,
    scoring_timeout: Duration,
    telemetry: Option<TelemetryCollector>,
}

impl PredictionClient {
    /// Create a client from explicit settings
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sepsischeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(PredictError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            probe_timeout: config.probe_timeout,
            scoring_timeout: config.scoring_timeout,
            telemetry: None,
        })
    }

    /// Create a client for `base_url` with default timeouts
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    /// Attach a telemetry collector
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn scoring_timeout(&self) -> Duration {
        self.scoring_timeout
    }

    /// Liveness probe address
    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// Scoring address for `model`
    pub fn endpoint_url(&self, model: ModelKind) -> String {
        format!("{}/{}", self.base_url, model.endpoint())
    }

    /// Check whether the service answers `GET /` with 200.
    ///
    /// Connection failures and probe timeouts count as not alive.
    pub async fn check_liveness(&self) -> Result<bool> {
        let url = self.root_url();
        let started = Instant::now();
        self.record(TelemetryEvent::ProbeSent {
            url: url.clone(),
            timestamp: started,
        });

        let status = match self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => Some(response.status()),
            Err(_) => None,
        };

        self.record(TelemetryEvent::ProbeCompleted {
            status: status.map(|s| s.as_u16()),
            duration_ms: started.elapsed().as_millis() as u64,
            timestamp: Instant::now(),
        });

        Ok(status == Some(StatusCode::OK))
    }

    /// Score `request` with `model`.
    ///
    /// The scoring call is never issued when the liveness probe fails.
    pub async fn predict(
        &self,
        model: ModelKind,
        request: &PredictionRequest,
    ) -> Result<PredictionResult> {
        let outcome = self.run_prediction(model, request).await;
        if let Err(e) = &outcome {
            self.record(TelemetryEvent::Failure {
                reason: e.to_string(),
                timestamp: Instant::now(),
            });
        }
        outcome
    }

    async fn run_prediction(
        &self,
        model: ModelKind,
        request: &PredictionRequest,
    ) -> Result<PredictionResult> {
        if !self.check_liveness().await? {
            return Err(PredictError::ServiceUnreachable);
        }

        let url = self.endpoint_url(model);
        let started = Instant::now();
        self.record(TelemetryEvent::ScoringSent {
            model,
            url: url.clone(),
            timestamp: started,
        });

        let response = self
            .client
            .post(&url)
            .json(request)
            .timeout(self.scoring_timeout)
            .send()
            .await
            .map_err(|e| self.scoring_error(e))?;

        let status = response.status();
        self.record(TelemetryEvent::ScoringCompleted {
            status: status.as_u16(),
            duration_ms: started.elapsed().as_millis() as u64,
            timestamp: Instant::now(),
        });

        if status != StatusCode::OK {
            return Err(PredictError::RequestFailed {
                status: status.as_u16(),
            });
        }

        // The request timeout also covers reading the body.
        let body = response.text().await.map_err(|e| self.scoring_error(e))?;
        PredictionResult::from_body(&body)
    }

    fn scoring_error(&self, err: reqwest::Error) -> PredictError {
        if err.is_timeout() {
            PredictError::Timeout {
                seconds: self.scoring_timeout.as_secs(),
            }
        } else {
            PredictError::HttpError(err)
        }
    }

    fn record(&self, event: TelemetryEvent) {
        if let Some(telemetry) = &self.telemetry {
            telemetry.record(event);
        }
    }
}
