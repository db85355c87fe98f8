use async_trait::async_trait;

use crate::probes::{measure_time, Probe, ProbeContext, ProbeResult};

/// Basic API reachability check via the number-lookup endpoint
///
/// Queries the available-number inventory filtered to one US result; any
/// HTTP 200 proves the credential and the endpoint are both good.
pub struct ConnectivityProbe;

#[async_trait]
impl Probe for ConnectivityProbe {
    fn key(&self) -> &'static str {
        "connectivity"
    }

    fn name(&self) -> &'static str {
        "API connectivity"
    }

    async fn run(&self, ctx: &ProbeContext) -> ProbeResult {
        let url = ctx.url("/available_phone_numbers");

        let (result, duration_ms) = measure_time(async {
            let response = ctx
                .client
                .get(&url)
                .query(&[("filter[country_code]", "US"), ("filter[limit]", "1")])
                .send()
                .await
                .map_err(|e| (None, format!("Connection error: {}", e)))?;

            let status = response.status().as_u16();
            if status == 200 {
                let body: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| (Some(status), format!("Failed to parse response: {}", e)))?;
                Ok((status, body))
            } else {
                let body = response.text().await.unwrap_or_default();
                Err((Some(status), body))
            }
        })
        .await;

        match result {
            Ok((status, body)) => ProbeResult::success(duration_ms)
                .with_http_status(status)
                .with_detail("number lookup endpoint reachable")
                .with_data(body),
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
