//! Data retrieval tools, one per well-known SEP2 resource, plus an
//! arbitrary-endpoint escape hatch.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use sepbridge_client::{Sep2Client, Sep2Response};

use crate::error::{Result, ToolError};
use crate::tool::{
    empty_object_schema, object_schema, string_property, DynTool, Tool, ToolOutput,
};

fn render(label: &str, response: &Sep2Response) -> Result<ToolOutput> {
    let json = serde_json::to_string_pretty(&response.data)?;
    Ok(ToolOutput::text(format!("{label}:\n{json}")))
}

macro_rules! resource_tool {
    ($tool:ident, $name:literal, $label:literal, $description:literal, $method:ident) => {
        pub struct $tool {
            client: Arc<Sep2Client>,
        }

        impl $tool {
            pub fn new(client: Arc<Sep2Client>) -> Self {
                Self { client }
            }
        }

        #[async_trait]
        impl Tool for $tool {
            fn name(&self) -> &str {
                $name
            }

            fn description(&self) -> &str {
                $description
            }

            fn input_schema(&self) -> Value {
                empty_object_schema()
            }

            async fn execute(&self, _args: Value) -> Result<ToolOutput> {
                let response = self.client.$method().await?;
                render($label, &response)
            }
        }
    };
}

resource_tool!(
    DeviceCapabilitiesTool,
    "sep2_get_device_capabilities",
    "Device Capabilities",
    "Get the discovery document advertising available SEP2 resources",
    device_capabilities
);

resource_tool!(
    DemandResponseProgramsTool,
    "sep2_get_demand_response_programs",
    "Demand Response Programs",
    "Get demand response programs from the SEP2 server",
    demand_response_programs
);

resource_tool!(
    DerProgramsTool,
    "sep2_get_der_programs",
    "DER Programs",
    "Get DER (Distributed Energy Resource) programs from the SEP2 server",
    der_programs
);

resource_tool!(
    ResponseSetsTool,
    "sep2_get_response_sets",
    "Response Sets",
    "Get response sets from the SEP2 server",
    response_sets
);

resource_tool!(
    TimeTool,
    "sep2_get_time",
    "Server Time",
    "Get current time from the SEP2 server",
    time
);

resource_tool!(
    UsagePointsTool,
    "sep2_get_usage_points",
    "Usage Points",
    "Get usage points from the SEP2 server",
    usage_points
);

resource_tool!(
    EndDevicesTool,
    "sep2_get_end_devices",
    "End Devices",
    "Get end devices from the SEP2 server",
    end_devices
);

resource_tool!(
    MirrorUsagePointsTool,
    "sep2_get_mirror_usage_points",
    "Mirror Usage Points",
    "Get mirror usage points from the SEP2 server",
    mirror_usage_points
);

resource_tool!(
    SelfDeviceTool,
    "sep2_get_self_device",
    "Self Device",
    "Get the self device resource from the SEP2 server",
    self_device
);

/// Fetch an arbitrary resource path supplied by the caller.
pub struct CustomEndpointTool {
    client: Arc<Sep2Client>,
}

impl CustomEndpointTool {
    pub fn new(client: Arc<Sep2Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CustomEndpointTool {
    fn name(&self) -> &str {
        "sep2_get_custom_endpoint"
    }

    fn description(&self) -> &str {
        "Get data from a custom SEP2 endpoint"
    }

    fn input_schema(&self) -> Value {
        object_schema(
            serde_json::json!({
                "endpoint": string_property("The endpoint path (e.g., \"/dcap\", \"/tm\")"),
            }),
            vec!["endpoint"],
        )
    }

    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        // Argument validation happens before any network activity.
        let endpoint = args
            .get("endpoint")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ToolError::InvalidArguments("endpoint parameter is required".to_string())
            })?;

        let response = self.client.custom_endpoint(endpoint).await?;
        render(&format!("Custom Endpoint ({endpoint})"), &response)
    }
}

/// All data tools, for registration when a client is configured.
pub fn data_tools(client: &Arc<Sep2Client>) -> Vec<DynTool> {
    vec![
        Arc::new(DeviceCapabilitiesTool::new(client.clone())),
        Arc::new(DemandResponseProgramsTool::new(client.clone())),
        Arc::new(DerProgramsTool::new(client.clone())),
        Arc::new(ResponseSetsTool::new(client.clone())),
        Arc::new(TimeTool::new(client.clone())),
        Arc::new(UsagePointsTool::new(client.clone())),
        Arc::new(EndDevicesTool::new(client.clone())),
        Arc::new(MirrorUsagePointsTool::new(client.clone())),
        Arc::new(SelfDeviceTool::new(client.clone())),
        Arc::new(CustomEndpointTool::new(client.clone())),
    ]
}
