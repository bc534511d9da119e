//! Decision ledger: trait definition and in-memory implementation.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::info;
use urbanintel_types::{
    AllPredictions, CrisisType, DecisionId, DecisionStatus, PolicyDecision, PolicyOption,
};

use crate::error::LedgerError;

/// An operator's approval of one option from an offered batch.
#[derive(Clone, Debug, PartialEq)]
pub struct ApprovalRequest {
    /// Crisis type of the run the batch came from.
    pub alert_type: CrisisType,
    /// The full batch offered to the operator.
    pub options: Vec<PolicyOption>,
    pub selected_option_id: u32,
    pub operator: String,
    pub predictions: Option<AllPredictions>,
    pub requested_at: DateTime<Utc>,
}

/// Records approved decisions.
///
/// Recorded decisions are never modified or removed.
pub trait DecisionLedger: Send + Sync {
    /// Validate the request and record it as a published decision.
    fn record(&self, request: ApprovalRequest) -> Result<PolicyDecision, LedgerError>;

    fn get(&self, id: &DecisionId) -> Result<PolicyDecision, LedgerError>;

    /// All recorded decisions, newest first.
    fn history(&self) -> Result<Vec<PolicyDecision>, LedgerError>;
}

/// Append-only ledger held in process memory.
#[derive(Default)]
pub struct InMemoryDecisionLedger {
    decisions: RwLock<Vec<PolicyDecision>>,
}

impl InMemoryDecisionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self
            .decisions
            .read()
            .map_err(|_| LedgerError::Poisoned)?
            .len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }
}

impl DecisionLedger for InMemoryDecisionLedger {
    fn record(&self, request: ApprovalRequest) -> Result<PolicyDecision, LedgerError> {
        let operator = request.operator.trim();
        if operator.is_empty() {
            return Err(LedgerError::EmptyOperator);
        }
        if !request
            .options
            .iter()
            .any(|o| o.id == request.selected_option_id)
        {
            return Err(LedgerError::UnknownOption(request.selected_option_id));
        }

        let decision = PolicyDecision {
            id: DecisionId::generate(),
            alert_type: request.alert_type,
            options: request.options,
            selected_option_id: Some(request.selected_option_id),
            status: DecisionStatus::Published,
            approved_by: Some(operator.to_string()),
            published_at: Some(request.requested_at),
            created_at: request.requested_at,
            predictions: request.predictions,
        };

        self.decisions
            .write()
            .map_err(|_| LedgerError::Poisoned)?
            .push(decision.clone());

        info!(
            decision = %decision.id,
            alert = decision.alert_type.as_str(),
            option = request.selected_option_id,
            operator,
            "decision recorded"
        );
        Ok(decision)
    }

    fn get(&self, id: &DecisionId) -> Result<PolicyDecision, LedgerError> {
        let decisions = self.decisions.read().map_err(|_| LedgerError::Poisoned)?;
        decisions
            .iter()
            .find(|d| &d.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    fn history(&self) -> Result<Vec<PolicyDecision>, LedgerError> {
        let decisions = self.decisions.read().map_err(|_| LedgerError::Poisoned)?;
        Ok(decisions.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use urbanintel_types::PolicyCategory;

    fn option(id: u32) -> PolicyOption {
        PolicyOption {
            id,
            title: format!("option {id}"),
            description: "d".into(),
            impact: "i".into(),
            instruction_text: format!("directive {id}"),
            category: PolicyCategory::General,
            based_on: vec!["All Data Sources".into()],
        }
    }

    fn request(selected: u32, operator: &str, minute: u32) -> ApprovalRequest {
        ApprovalRequest {
            alert_type: CrisisType::Normal,
            options: vec![option(1), option(2)],
            selected_option_id: selected,
            operator: operator.into(),
            predictions: None,
            requested_at: Utc.with_ymd_and_hms(2024, 8, 1, 9, minute, 0).unwrap(),
        }
    }

    #[test]
    fn records_published_decision() {
        let ledger = InMemoryDecisionLedger::new();
        let decision = ledger.record(request(2, "  Admin ", 0)).unwrap();
        assert!(decision.is_published());
        assert_eq!(decision.approved_by.as_deref(), Some("Admin"));
        assert_eq!(decision.selected_option().unwrap().title, "option 2");
        assert_eq!(decision.published_at, Some(decision.created_at));
        assert_eq!(ledger.get(&decision.id).unwrap(), decision);
    }

    #[test]
    fn history_is_newest_first() {
        let ledger = InMemoryDecisionLedger::new();
        let first = ledger.record(request(1, "a", 0)).unwrap();
        let second = ledger.record(request(2, "b", 5)).unwrap();
        let history = ledger.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
    }

    #[test]
    fn rejects_blank_operator() {
        let ledger = InMemoryDecisionLedger::new();
        assert_eq!(
            ledger.record(request(1, "   ", 0)).unwrap_err(),
            LedgerError::EmptyOperator
        );
        assert!(ledger.is_empty().unwrap());
    }

    #[test]
    fn rejects_option_outside_batch() {
        let ledger = InMemoryDecisionLedger::new();
        assert_eq!(
            ledger.record(request(3, "Admin", 0)).unwrap_err(),
            LedgerError::UnknownOption(3)
        );
        assert_eq!(ledger.len().unwrap(), 0);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let ledger = InMemoryDecisionLedger::new();
        let err = ledger.get(&DecisionId::new("missing")).unwrap_err();
        assert_eq!(err, LedgerError::NotFound("missing".into()));
    }

    #[test]
    fn shared_across_threads() {
        use std::sync::Arc;

        let ledger = Arc::new(InMemoryDecisionLedger::new());
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    ledger.record(request(1, &format!("op-{n}"), n)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(ledger.len().unwrap(), 4);
    }
}
