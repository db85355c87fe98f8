use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::probes::{
    measure_time, Envelope, Probe, ProbeContext, ProbeResult, NO_FROM_NUMBER_ERROR,
    NO_PHONE_ERROR,
};

/// Voice call capability check
///
/// Looks up the account's call control connections and, if one exists,
/// initiates a real call to the configured destination number.
pub struct VoiceProbe;

#[derive(Debug, Deserialize)]
struct Connection {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateCallRequest<'a> {
    to: &'a str,
    from: &'a str,
    connection_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CallData {
    call_control_id: String,
    call_leg_id: String,
}

#[async_trait]
impl Probe for VoiceProbe {
    fn key(&self) -> &'static str {
        "voice"
    }

    fn name(&self) -> &'static str {
        "Voice capability"
    }

    fn cooldown(&self) -> Duration {
        Duration::from_secs(2)
    }

    async fn run(&self, ctx: &ProbeContext) -> ProbeResult {
        let phone = match &ctx.phone {
            Some(p) => p.clone(),
            None => return ProbeResult::failure(0, NO_PHONE_ERROR),
        };
        let from = match &ctx.from_number {
            Some(f) => f.clone(),
            None => return ProbeResult::failure(0, NO_FROM_NUMBER_ERROR),
        };

        let (result, duration_ms) = measure_time(async {
            let connections_url = ctx.url("/connections");
            let response = ctx
                .client
                .get(&connections_url)
                .send()
                .await
                .map_err(|e| (None, format!("no call control connections found: {}", e)))?;

            let status = response.status().as_u16();
            if status != 200 {
                return Err((
                    Some(status),
                    format!("no call control connections found (HTTP {})", status),
                ));
            }

            let connections: Envelope<Vec<Connection>> = response
                .json()
                .await
                .map_err(|e| (Some(status), format!("Failed to parse connections: {}", e)))?;
            let connection = connections.data.first().ok_or((
                Some(status),
                "no call control connections configured".to_string(),
            ))?;

            let body = CreateCallRequest {
                to: &phone,
                from: &from,
                connection_id: &connection.id,
            };

            let response = ctx
                .client
                .post(ctx.url("/calls"))
                .json(&body)
                .send()
                .await
                .map_err(|e| (None, format!("call initiation error: {}", e)))?;

            let status = response.status().as_u16();
            if status == 200 {
                let call: Envelope<CallData> = response
                    .json()
                    .await
                    .map_err(|e| (Some(status), format!("Failed to parse response: {}", e)))?;
                Ok((status, call.data.call_control_id, call.data.call_leg_id))
            } else {
                let body = response.text().await.unwrap_or_default();
                Err((Some(status), body))
            }
        })
        .await;

        match result {
            Ok((status, call_control_id, call_leg_id)) => ProbeResult::success(duration_ms)
                .with_http_status(status)
                .with_call(call_control_id, call_leg_id),
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
