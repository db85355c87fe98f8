use async_trait::async_trait;
use serde::Deserialize;

use crate::probes::{measure_time, Envelope, Probe, ProbeContext, ProbeResult};

/// Account credit balance check
pub struct BalanceProbe;

/// Telnyx reports the balance as a decimal string ("300.0000"); accept a
/// bare number as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBalance {
    Text(String),
    Number(f64),
}

impl RawBalance {
    fn as_f64(&self) -> Option<f64> {
        match self {
            RawBalance::Text(s) => s.trim().parse().ok(),
            RawBalance::Number(n) => Some(*n),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BalanceData {
    balance: RawBalance,
    currency: String,
}

#[async_trait]
impl Probe for BalanceProbe {
    fn key(&self) -> &'static str {
        "balance"
    }

    fn name(&self) -> &'static str {
        "Account balance"
    }

    async fn run(&self, ctx: &ProbeContext) -> ProbeResult {
        let url = ctx.url("/balance");

        let (result, duration_ms) = measure_time(async {
            let response = ctx
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| (None, format!("Connection error: {}", e)))?;

            let status = response.status().as_u16();
            if status == 200 {
                let body: Envelope<BalanceData> = response
                    .json()
                    .await
                    .map_err(|e| (Some(status), format!("Failed to parse response: {}", e)))?;
                let balance = body.data.balance.as_f64().ok_or_else(|| {
                    (Some(status), "balance field is not a number".to_string())
                })?;
                Ok((status, balance, body.data.currency))
            } else {
                let body = response.text().await.unwrap_or_default();
                Err((Some(status), body))
            }
        })
        .await;

        match result {
            Ok((status, balance, currency)) => {
                let detail = format!("account balance: {} {}", balance, currency);
                ProbeResult::success(duration_ms)
                    .with_http_status(status)
                    .with_balance(balance, currency)
                    .with_detail(detail)
            }
            Err((status, error)) => {
                let mut result = ProbeResult::failure(duration_ms, error);
                if let Some(status) = status {
                    result = result.with_http_status(status);
                }
                result
            }
        }
    }
}
