//! Export encoding
//!
//! Encodes a report, the export trigger ranking and the month's overuse
//! status into a self-describing document for the document renderer.

use crate::clock::ReferenceTime;
use crate::error::AnalysisError;
use crate::types::{OveruseStatus, Report};
use crate::report::TriggerShare;
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current export document schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Document handed to the export renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub schema_version: String,
    pub producer: ExportProducer,
    /// Reference time the report was computed against (RFC 3339)
    pub computed_for: String,
    pub report: Report,
    pub trigger_shares: Vec<TriggerShare>,
    pub medication_overuse: OveruseStatus,
}

/// Encoder for export documents
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn encode(
        &self,
        report: Report,
        trigger_shares: Vec<TriggerShare>,
        medication_overuse: OveruseStatus,
        reference: &ReferenceTime,
    ) -> ExportDocument {
        ExportDocument {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            producer: ExportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_for: reference.now().to_rfc3339(),
            report,
            trigger_shares,
            medication_overuse,
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(
        &self,
        report: Report,
        trigger_shares: Vec<TriggerShare>,
        medication_overuse: OveruseStatus,
        reference: &ReferenceTime,
    ) -> Result<String, AnalysisError> {
        let document = self.encode(report, trigger_shares, medication_overuse, reference);
        serde_json::to_string_pretty(&document).map_err(AnalysisError::Json)
    }
}
