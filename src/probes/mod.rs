//! Capability probes against the Telnyx v2 API.
//!
//! Each probe issues a single HTTP request (or a short prerequisite lookup
//! followed by one), checks the status code, and folds the outcome into a
//! [`ProbeResult`]. Transport errors, non-200 statuses, parse failures, and
//! missing prerequisite resources all become `success = false` results;
//! no error escapes a probe and nothing is retried.
//!
//! The `sms` and `voice` probes cause real traffic: a live SMS is sent and a
//! live call is placed when the account has the required resources.

pub mod balance;
pub mod connectivity;
pub mod esim;
pub mod sms;
pub mod voice;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::error::{AppError, Result};

/// Body of the SMS sent by the `sms` probe
pub const TEST_MESSAGE: &str = "Telnyx preflight check - your verification code is: 123456";

/// Fixed error recorded when sms/voice run without a destination number
pub const NO_PHONE_ERROR: &str = "no test phone provided";

/// Error recorded when sms/voice run without a configured outbound number
pub const NO_FROM_NUMBER_ERROR: &str =
    "no outbound number configured; set TELNYX_FROM_NUMBER or numbers.from_number";

/// Result of a single probe invocation
///
/// Flat record with capability-specific fields; absent fields are omitted
/// from JSON. Constructed once and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Whether the probe passed
    pub success: bool,
    /// Wall-clock duration of the probe in milliseconds
    pub duration_ms: u64,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP status code of the decisive response, if one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Short human-readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Raw response body (connectivity probe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Account balance (balance probe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    /// Balance currency code (balance probe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Message identifier (sms probe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Per-recipient delivery status (sms probe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_status: Option<String>,
    /// Call control identifier (voice probe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_control_id: Option<String>,
    /// Call leg identifier (voice probe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_leg_id: Option<String>,
    /// Number of SIM card groups found (esim probe)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sim_group_count: Option<usize>,
}

impl ProbeResult {
    pub fn success(duration_ms: u64) -> Self {
        Self {
            success: true,
            duration_ms,
            error: None,
            http_status: None,
            detail: None,
            data: None,
            balance: None,
            currency: None,
            message_id: None,
            delivery_status: None,
            call_control_id: None,
            call_leg_id: None,
            sim_group_count: None,
        }
    }

    pub fn failure(duration_ms: u64, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::success(duration_ms)
        }
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_balance(mut self, balance: f64, currency: String) -> Self {
        self.balance = Some(balance);
        self.currency = Some(currency);
        self
    }

    pub fn with_message(mut self, message_id: String, delivery_status: String) -> Self {
        self.message_id = Some(message_id);
        self.delivery_status = Some(delivery_status);
        self
    }

    pub fn with_call(mut self, call_control_id: String, call_leg_id: String) -> Self {
        self.call_control_id = Some(call_control_id);
        self.call_leg_id = Some(call_leg_id);
        self
    }

    pub fn with_sim_groups(mut self, count: usize) -> Self {
        self.sim_group_count = Some(count);
        self
    }
}

/// Context passed to probe implementations
///
/// Holds the HTTP client with the bearer credential baked into its default
/// headers; the credential itself is immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    pub client: Client,
    pub base_url: String,
    /// Destination number for SMS/voice probes
    pub phone: Option<String>,
    /// Outbound number the account owns
    pub from_number: Option<String>,
    pub verbose: bool,
}

impl ProbeContext {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| AppError::Auth("API key contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            phone: None,
            from_number: None,
            verbose: false,
        })
    }

    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }

    pub fn with_from_number(mut self, from_number: Option<String>) -> Self {
        self.from_number = from_number;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// A single capability check against the Telnyx API
#[async_trait]
pub trait Probe: Send + Sync {
    /// Key under which the result appears in the results mapping
    fn key(&self) -> &'static str;

    /// Human-readable display name
    fn name(&self) -> &'static str;

    /// Pause inserted after this probe so consecutive calls stay under the
    /// API's implicit rate limits
    fn cooldown(&self) -> Duration {
        Duration::from_secs(1)
    }

    /// Run the probe to completion; never returns an error
    async fn run(&self, ctx: &ProbeContext) -> ProbeResult;
}

/// All probes in suite order
pub fn all_probes() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(connectivity::ConnectivityProbe),
        Box::new(balance::BalanceProbe),
        Box::new(sms::SmsProbe),
        Box::new(voice::VoiceProbe),
        Box::new(esim::EsimProbe),
    ]
}

/// Helper to measure execution time
pub async fn measure_time<F, T>(f: F) -> (T, u64)
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    let result = f.await;
    let duration_ms = start.elapsed().as_millis() as u64;
    (result, duration_ms)
}

/// The Telnyx API wraps every response body in a `data` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_order() {
        let keys: Vec<_> = all_probes().iter().map(|p| p.key()).collect();
        assert_eq!(keys, ["connectivity", "balance", "sms", "voice", "esim"]);
    }

    #[test]
    fn test_send_probes_have_longer_cooldown() {
        for probe in all_probes() {
            let expected = match probe.key() {
                "sms" | "voice" => Duration::from_secs(2),
                _ => Duration::from_secs(1),
            };
            assert_eq!(probe.cooldown(), expected, "probe {}", probe.key());
        }
    }

    #[test]
    fn test_result_serialization_omits_absent_fields() {
        let result = ProbeResult::failure(12, "boom");
        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["success"], false);
        assert_eq!(obj["error"], "boom");
        assert!(!obj.contains_key("balance"));
        assert!(!obj.contains_key("message_id"));
    }

    #[test]
    fn test_result_builders() {
        let result = ProbeResult::success(80)
            .with_http_status(200)
            .with_message("msg-1".to_string(), "queued".to_string());
        assert!(result.success);
        assert_eq!(result.http_status, Some(200));
        assert_eq!(result.message_id.as_deref(), Some("msg-1"));
        assert_eq!(result.delivery_status.as_deref(), Some("queued"));
    }

    #[test]
    fn test_context_strips_trailing_slash() {
        let ctx = ProbeContext::new("key", "https://api.example.com/v2/", Duration::from_secs(5))
            .unwrap();
        assert_eq!(ctx.url("/balance"), "https://api.example.com/v2/balance");
    }
}
