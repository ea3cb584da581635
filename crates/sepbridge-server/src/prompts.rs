//! Static prompt content served next to the tools.

use serde::Serialize;

/// Descriptor advertised by `prompts/list`.
#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<serde_json::Value>,
}

/// Lookup table from prompt name to static content. Unlike the tool
/// registry this has no reduced mode; guidance text is useful before the
/// backend is configured.
pub struct PromptRegistry {
    prompts: Vec<(PromptDefinition, &'static str)>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self {
            prompts: vec![(
                PromptDefinition {
                    name: "sep2_navigation_guide",
                    description: "Guide for navigating SEP2 resources via hypermedia links",
                    arguments: Vec::new(),
                },
                NAVIGATION_GUIDE,
            )],
        }
    }

    pub fn definitions(&self) -> Vec<PromptDefinition> {
        self.prompts.iter().map(|(def, _)| def.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<(&PromptDefinition, &'static str)> {
        self.prompts
            .iter()
            .find(|(def, _)| def.name == name)
            .map(|(def, content)| (def, *content))
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const NAVIGATION_GUIDE: &str = r#"# SEP2 Resource Navigation

IEEE 2030.5 servers are hypermedia-driven: every resource carries links
to related resources, so the whole API is discoverable from one starting
point.

## Start at the discovery document

Call `sep2_get_device_capabilities` first. The response advertises the
server's resource collections:

- `TimeLink` - server time (`sep2_get_time`)
- `EndDeviceListLink` - registered end devices (`sep2_get_end_devices`)
- `UsagePointListLink` - metering usage points (`sep2_get_usage_points`)
- `DemandResponseProgramListLink` - DR programs
  (`sep2_get_demand_response_programs`)
- `DERProgramListLink` - DER programs (`sep2_get_der_programs`)
- `MirrorUsagePointListLink` - mirrored metering
  (`sep2_get_mirror_usage_points`)
- `SelfDeviceLink` - the client's own device record
  (`sep2_get_self_device`)

The `pollRate` attribute on the discovery document is the server's
suggested refresh interval in seconds.

## Follow links with the custom endpoint tool

List entries carry `href` attributes pointing at individual resources.
Fetch any of them with `sep2_get_custom_endpoint`, for example
`{"endpoint": "/edev/1"}` for the first end device, or
`{"endpoint": "/upt/1/mr"}` for a usage point's meter readings.

Links ending in `ListLink` are collections; their `all` attribute is the
total entry count.

## Checking connectivity

`sep2_status` reports whether the bridge has a configured client and
which settings are missing. `sep2_test_connection` performs a live fetch
of the discovery document and reports the outcome.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_guide_registered() {
        let registry = PromptRegistry::new();
        assert_eq!(registry.definitions().len(), 1);

        let (def, content) = registry.get("sep2_navigation_guide").unwrap();
        assert_eq!(def.name, "sep2_navigation_guide");
        assert!(content.contains("/edev/1"));
    }

    #[test]
    fn test_unknown_prompt() {
        let registry = PromptRegistry::new();
        assert!(registry.get("nonexistent").is_none());
    }
}
