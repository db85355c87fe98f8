use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::probes::{
    measure_time, Envelope, Probe, ProbeContext, ProbeResult, NO_FROM_NUMBER_ERROR,
    NO_PHONE_ERROR, TEST_MESSAGE,
};

/// SMS send capability check
///
/// Looks up the account's messaging profiles and, if one exists, sends a
/// real test SMS through it to the configured destination number.
pub struct SmsProbe;

#[derive(Debug, Deserialize)]
struct MessagingProfile {
    id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    to: &'a str,
    from: &'a str,
    text: &'a str,
    messaging_profile_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct Recipient {
    status: String,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    id: String,
    to: Vec<Recipient>,
}

#[async_trait]
impl Probe for SmsProbe {
    fn key(&self) -> &'static str {
        "sms"
    }

    fn name(&self) -> &'static str {
        "SMS capability"
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
            let profiles_url = ctx.url("/messaging_profiles");
            let response = ctx
                .client
                .get(&profiles_url)
                .send()
                .await
                .map_err(|e| (None, format!("no messaging profiles found: {}", e)))?;

            let status = response.status().as_u16();
            if status != 200 {
                return Err((
                    Some(status),
                    format!("no messaging profiles found (HTTP {})", status),
                ));
            }

            let profiles: Envelope<Vec<MessagingProfile>> = response
                .json()
                .await
                .map_err(|e| (Some(status), format!("Failed to parse profiles: {}", e)))?;
            let profile = profiles
                .data
                .first()
                .ok_or((Some(status), "no messaging profiles configured".to_string()))?;

            let body = SendMessageRequest {
                to: &phone,
                from: &from,
                text: TEST_MESSAGE,
                messaging_profile_id: &profile.id,
            };

            let response = ctx
                .client
                .post(ctx.url("/messages"))
                .json(&body)
                .send()
                .await
                .map_err(|e| (None, format!("SMS send error: {}", e)))?;

            let status = response.status().as_u16();
            if status == 200 {
                let message: Envelope<MessageData> = response
                    .json()
                    .await
                    .map_err(|e| (Some(status), format!("Failed to parse response: {}", e)))?;
                let delivery_status = message
                    .data
                    .to
                    .first()
                    .map(|r| r.status.clone())
                    .ok_or((Some(status), "response missing recipient status".to_string()))?;
                Ok((status, message.data.id, delivery_status))
            } else {
                let body = response.text().await.unwrap_or_default();
                Err((Some(status), body))
            }
        })
        .await;

        match result {
            Ok((status, message_id, delivery_status)) => ProbeResult::success(duration_ms)
                .with_http_status(status)
                .with_message(message_id, delivery_status),
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
