//! Household member model

use serde::{Deserialize, Serialize};

use super::ids::{ChangeLogId, MemberId, TransactionId};

/// A person sharing one or more subscriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Record identifier
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// Payments recorded for this member
    #[serde(default)]
    pub transaction_ids: Vec<TransactionId>,

    /// Membership intervals this member took part in
    #[serde(default)]
    pub change_log_ids: Vec<ChangeLogId>,
}

impl Member {
    /// Create a member with no payments or memberships
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            transaction_ids: Vec::new(),
            change_log_ids: Vec::new(),
        }
    }
}
