//! Wire DTOs for the workforce-backend contract.
//!
//! The upstream wraps every response in one envelope shape and uses
//! camelCase field names throughout.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// The upstream response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub succeeded: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, mapping `succeeded: false` and a missing body to
    /// gateway errors.
    pub fn into_data(self) -> Result<T, GatewayError> {
        if !self.succeeded {
            return Err(GatewayError::Rejected(
                self.message
                    .unwrap_or_else(|| "upstream reported failure".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| GatewayError::InvalidResponse("missing data field".to_string()))
    }
}

/// Payload of the role-name feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleNameData {
    pub name: String,
}

/// Request body for the assignment persist call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPermissionsRequest {
    pub entity_id: i64,
    pub permissions_list: Vec<String>,
}
