//! Policy options, approved decisions, and published directives.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crisis::CrisisType;
use crate::prediction::AllPredictions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyCategory {
    #[serde(rename = "Water Supply")]
    WaterSupply,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Agriculture & Food")]
    AgricultureAndFood,
    #[serde(rename = "Energy")]
    Energy,
    #[serde(rename = "Public Services")]
    PublicServices,
    #[serde(rename = "General")]
    General,
}

impl PolicyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PolicyCategory::WaterSupply => "Water Supply",
            PolicyCategory::Transportation => "Transportation",
            PolicyCategory::AgricultureAndFood => "Agriculture & Food",
            PolicyCategory::Energy => "Energy",
            PolicyCategory::PublicServices => "Public Services",
            PolicyCategory::General => "General",
        }
    }
}

impl fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One recommended action offered to an operator.
///
/// `id` is the 1-based position of the option in its batch. It is only
/// meaningful within that batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOption {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub impact: String,
    /// Public-facing directive text.
    pub instruction_text: String,
    pub category: PolicyCategory,
    pub based_on: Vec<String>,
}

/// Unique identifier of a recorded decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(String);

impl DecisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionStatus {
    Pending,
    Published,
}

/// An approved policy option, as recorded by the decision ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDecision {
    pub id: DecisionId,
    pub alert_type: CrisisType,
    /// Every option offered in the batch the selection was made from.
    #[serde(rename = "aiOptions")]
    pub options: Vec<PolicyOption>,
    pub selected_option_id: Option<u32>,
    pub status: DecisionStatus,
    pub approved_by: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<AllPredictions>,
}

impl PolicyDecision {
    /// The option that was selected, if it is part of the recorded batch.
    pub fn selected_option(&self) -> Option<&PolicyOption> {
        let id = self.selected_option_id?;
        self.options.iter().find(|o| o.id == id)
    }

    pub fn is_published(&self) -> bool {
        self.status == DecisionStatus::Published
    }
}

/// A directive that has been superseded by a newer one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveItem {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PolicyCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: u32, category: PolicyCategory) -> PolicyOption {
        PolicyOption {
            id,
            title: format!("option {id}"),
            description: String::new(),
            impact: String::new(),
            instruction_text: format!("directive {id}"),
            category,
            based_on: vec!["All Data Sources".into()],
        }
    }

    #[test]
    fn category_wire_labels() {
        let json = serde_json::to_string(&PolicyCategory::AgricultureAndFood).unwrap();
        assert_eq!(json, "\"Agriculture & Food\"");
        assert_eq!(PolicyCategory::PublicServices.to_string(), "Public Services");
    }

    #[test]
    fn selected_option_resolves_within_batch() {
        let decision = PolicyDecision {
            id: DecisionId::generate(),
            alert_type: CrisisType::Normal,
            options: vec![
                option(1, PolicyCategory::Transportation),
                option(2, PolicyCategory::General),
            ],
            selected_option_id: Some(2),
            status: DecisionStatus::Published,
            approved_by: Some("Admin".into()),
            published_at: None,
            created_at: Utc::now(),
            predictions: None,
        };
        assert_eq!(
            decision.selected_option().map(|o| o.category),
            Some(PolicyCategory::General)
        );
        assert!(decision.is_published());
    }

    #[test]
    fn decision_wire_names() {
        let decision = PolicyDecision {
            id: DecisionId::new("d-1"),
            alert_type: CrisisType::WaterCrisis,
            options: vec![option(1, PolicyCategory::WaterSupply)],
            selected_option_id: Some(1),
            status: DecisionStatus::Published,
            approved_by: Some("Admin".into()),
            published_at: None,
            created_at: Utc::now(),
            predictions: None,
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["status"], "PUBLISHED");
        assert_eq!(json["alertType"], "WATER_CRISIS");
        assert_eq!(json["aiOptions"][0]["instructionText"], "directive 1");
        assert_eq!(json["selectedOptionId"], 1);
    }
}
