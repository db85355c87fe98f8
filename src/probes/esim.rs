use async_trait::async_trait;
use serde::Deserialize;

use crate::probes::{measure_time, Envelope, Probe, ProbeContext, ProbeResult};

/// eSIM availability check
///
/// Lists SIM card groups; their presence means the wireless API is enabled
/// for the account. No SIM is provisioned.
pub struct EsimProbe;

#[derive(Debug, Deserialize)]
struct SimCardGroup {
    #[allow(dead_code)]
    id: String,
}

#[async_trait]
impl Probe for EsimProbe {
    fn key(&self) -> &'static str {
        "esim"
    }

    fn name(&self) -> &'static str {
        "eSIM capability"
    }

    async fn run(&self, ctx: &ProbeContext) -> ProbeResult {
        let url = ctx.url("/sim_card_groups");

        let (result, duration_ms) = measure_time(async {
            let response = ctx
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| (None, format!("eSIM service not available: {}", e)))?;

            let status = response.status().as_u16();
            if status != 200 {
                return Err((
                    Some(status),
                    format!("eSIM service not available (HTTP {})", status),
                ));
            }

            let groups: Envelope<Vec<SimCardGroup>> = response
                .json()
                .await
                .map_err(|e| (Some(status), format!("Failed to parse SIM card groups: {}", e)))?;
            if groups.data.is_empty() {
                return Err((Some(status), "no SIM card groups configured".to_string()));
            }
            Ok((status, groups.data.len()))
        })
        .await;

        match result {
            Ok((status, count)) => ProbeResult::success(duration_ms)
                .with_http_status(status)
                .with_sim_groups(count)
                .with_detail("eSIM provisioning API accessible"),
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
