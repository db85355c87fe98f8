//! Shared fixtures for the mock-server tests.
//!
//! Response bodies follow the Telnyx v2 envelope: every payload sits under
//! a top-level `data` key.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::time::Duration;
use telnyx_preflight::probes::ProbeContext;
use wiremock::MockServer;

pub const API_KEY: &str = "KEY_test_0123456789";
pub const TEST_PHONE: &str = "+15551230000";
pub const FROM_NUMBER: &str = "+15559870000";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Probe context pointed at the mock server, without phone numbers.
pub fn context_for(server: &MockServer) -> ProbeContext {
    ProbeContext::new(API_KEY, &server.uri(), Duration::from_secs(5))
        .expect("failed to build probe context")
}

/// Probe context with destination and outbound numbers set.
pub fn full_context_for(server: &MockServer) -> ProbeContext {
    context_for(server)
        .with_phone(Some(TEST_PHONE.to_string()))
        .with_from_number(Some(FROM_NUMBER.to_string()))
}

pub fn bearer_header() -> String {
    format!("Bearer {}", API_KEY)
}

pub fn numbers_body() -> Value {
    json!({
        "data": [
            {
                "phone_number": "+19705550123",
                "record_type": "available_phone_number",
                "region_information": [{"region_name": "US", "region_type": "country_code"}]
            }
        ],
        "metadata": {"total_results": 1}
    })
}

pub fn balance_body(balance: &str, currency: &str) -> Value {
    json!({
        "data": {
            "balance": balance,
            "credit_limit": "0.00000",
            "currency": currency,
            "record_type": "balance"
        }
    })
}

pub fn profiles_body(ids: &[&str]) -> Value {
    json!({
        "data": ids
            .iter()
            .map(|id| json!({"id": id, "name": "Preflight profile", "record_type": "messaging_profile"}))
            .collect::<Vec<_>>()
    })
}

pub fn message_body(id: &str, status: &str) -> Value {
    json!({
        "data": {
            "id": id,
            "record_type": "message",
            "to": [{"phone_number": TEST_PHONE, "status": status}]
        }
    })
}

pub fn connections_body(ids: &[&str]) -> Value {
    json!({
        "data": ids
            .iter()
            .map(|id| json!({"id": id, "connection_name": "Preflight connection", "record_type": "connection"}))
            .collect::<Vec<_>>()
    })
}

pub fn call_body(call_control_id: &str, call_leg_id: &str) -> Value {
    json!({
        "data": {
            "call_control_id": call_control_id,
            "call_leg_id": call_leg_id,
            "record_type": "call",
            "is_alive": true
        }
    })
}

pub fn sim_groups_body(count: usize) -> Value {
    json!({
        "data": (0..count)
            .map(|i| json!({"id": format!("group-{}", i), "name": format!("SIM group {}", i), "record_type": "sim_card_group"}))
            .collect::<Vec<_>>()
    })
}
