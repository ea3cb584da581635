//! Tests for the capability-gated tool registry.
//!
//! Tests include:
//! - Reduced mode (no client) surface
//! - Full mode surface and descriptor/handler consistency
//! - Argument validation ahead of network activity
//! - Error classification at the dispatch boundary

use std::sync::Arc;

use sepbridge_client::{Sep2Client, Sep2Config};
use sepbridge_tools::{ToolError, ToolRegistry};
use serde_json::json;

const EXPECTED_FULL_SURFACE: &[&str] = &[
    "sep2_get_custom_endpoint",
    "sep2_get_demand_response_programs",
    "sep2_get_der_programs",
    "sep2_get_device_capabilities",
    "sep2_get_end_devices",
    "sep2_get_mirror_usage_points",
    "sep2_get_response_sets",
    "sep2_get_self_device",
    "sep2_get_time",
    "sep2_get_usage_points",
    "sep2_status",
    "sep2_test_connection",
];

/// A client whose server address is guaranteed unreachable quickly.
/// Registry construction and argument validation never touch the
/// network, so the address only matters for tests that exercise real
/// calls (which expect failure).
fn unreachable_client() -> Arc<Sep2Client> {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let config = Sep2Config {
        base_url: "http://127.0.0.1:1".to_string(),
        cert_path: None,
        cert_value: Some(format!("{}{}", cert.pem(), key_pair.serialize_pem())),
        key_path: None,
        key_value: None,
        ca_path: None,
        ca_value: None,
        insecure: false,
        timeout_ms: 2_000,
        user_agent: "sepbridge-test".to_string(),
    };
    Arc::new(Sep2Client::new(config).unwrap())
}

#[test]
fn test_reduced_mode_advertises_exactly_status() {
    let registry = ToolRegistry::for_client(None);
    let definitions = registry.definitions();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].name, "sep2_status");
}

#[test]
fn test_full_mode_advertises_complete_surface() {
    let registry = ToolRegistry::for_client(Some(unreachable_client()));
    let names: Vec<String> = registry.definitions().iter().map(|d| d.name.clone()).collect();
    assert_eq!(names, EXPECTED_FULL_SURFACE);
}

#[test]
fn test_every_definition_carries_object_schema() {
    let registry = ToolRegistry::for_client(Some(unreachable_client()));
    for definition in registry.definitions() {
        assert_eq!(definition.input_schema["type"], "object", "{}", definition.name);
    }
}

#[tokio::test]
async fn test_descriptor_handler_consistency() {
    // Every advertised tool must dispatch: a call with empty arguments
    // either succeeds or fails for a reason other than NotFound.
    let registry = ToolRegistry::for_client(Some(unreachable_client()));
    for definition in registry.definitions() {
        match registry.execute(&definition.name, json!({})).await {
            Ok(_) => {}
            Err(ToolError::NotFound(_)) => {
                panic!("advertised tool {} has no handler", definition.name)
            }
            Err(_) => {}
        }
    }
}

#[tokio::test]
async fn test_unknown_tool_is_not_found() {
    let registry = ToolRegistry::for_client(Some(unreachable_client()));
    let err = registry.execute("sep2_reboot", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::NotFound(_)));
}

#[tokio::test]
async fn test_custom_endpoint_requires_path_argument() {
    let registry = ToolRegistry::for_client(Some(unreachable_client()));

    let err = registry
        .execute("sep2_get_custom_endpoint", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArguments(_)));

    let err = registry
        .execute("sep2_get_custom_endpoint", json!({"endpoint": ""}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArguments(_)));
}

#[tokio::test]
async fn test_data_tool_failure_is_classified_execution_error() {
    let registry = ToolRegistry::for_client(Some(unreachable_client()));
    let err = registry
        .execute("sep2_get_time", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::Execution(_)));
    assert!(err.to_string().contains("/tm"));
}

#[tokio::test]
async fn test_test_connection_reports_failure_without_error() {
    // The probe is diagnostic: an unreachable server still yields Ok
    // output describing the failure.
    let registry = ToolRegistry::for_client(Some(unreachable_client()));
    let output = registry
        .execute("sep2_test_connection", json!({}))
        .await
        .unwrap();
    assert!(output.content[0].text.contains("Connection test failed"));
}

#[tokio::test]
async fn test_status_reports_ready_with_client() {
    let registry = ToolRegistry::for_client(Some(unreachable_client()));
    let output = registry.execute("sep2_status", json!({})).await.unwrap();
    assert!(output.content[0].text.contains("initialized and ready"));
}
