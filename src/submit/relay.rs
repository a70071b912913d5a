use crate::core::gate;
use crate::core::record::FormRecord;
use crate::core::registry::FlowBlueprint;
use crate::submit::client::Transport;
use crate::submit::payload::SubmitRequest;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

/// Wire shape accepted by the downstream lead automation: the validated lead
/// plus a server-stamped submission time.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RelayEnvelope {
    pub flow: String,
    pub submitted_at: DateTime<Utc>,
    pub lead: JsonValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayReceipt {
    /// The payload passed local schema validation and the lead counts as
    /// captured, whatever happened downstream.
    pub accepted: bool,
    /// The downstream automation actually acknowledged the envelope.
    pub delivered: bool,
}

/// Fire-and-forget forwarder to the external sheet automation. Once a lead
/// validates locally it is reported as captured; a downstream failure is an
/// operator concern, not a submitter-facing one.
pub struct LeadRelay {
    path: String,
}

impl LeadRelay {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn forward(
        &self,
        blueprint: &FlowBlueprint,
        record: &FormRecord,
        transport: &dyn Transport,
    ) -> RelayReceipt {
        if !gate::validate_record(blueprint, record).is_empty() {
            return RelayReceipt {
                accepted: false,
                delivered: false,
            };
        }

        let envelope = RelayEnvelope {
            flow: blueprint.id().to_string(),
            submitted_at: Utc::now(),
            lead: record.to_json(),
        };
        let body = match serde_json::to_value(&envelope) {
            Ok(body) => body,
            Err(err) => {
                warn!(flow = blueprint.id(), error = %err, "lead relay envelope failed to encode");
                return RelayReceipt {
                    accepted: true,
                    delivered: false,
                };
            }
        };

        let request = SubmitRequest {
            path: self.path.clone(),
            body,
        };
        match transport.send(&request) {
            Ok(response) if response.success => {
                info!(flow = blueprint.id(), "lead relayed downstream");
                RelayReceipt {
                    accepted: true,
                    delivered: true,
                }
            }
            Ok(_) => {
                warn!(flow = blueprint.id(), "lead relay rejected the envelope");
                RelayReceipt {
                    accepted: true,
                    delivered: false,
                }
            }
            Err(err) => {
                warn!(flow = blueprint.id(), error = %err, "lead relay delivery failed");
                RelayReceipt {
                    accepted: true,
                    delivered: false,
                }
            }
        }
    }
}
