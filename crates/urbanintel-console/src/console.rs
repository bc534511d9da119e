//! Run orchestration.
//!
//! [`CityConsole`] owns the engines, the directive board, and the decision
//! ledger. A refresh runs predict, classify and synthesize as one unit; the
//! previous report stays in place unless the whole run succeeds.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use urbanintel_forecast::{
    generate_final_recommendations, get_crisis_type, PredictionEngine, RuleEngine,
};
use urbanintel_types::{AllPredictions, CityData, CrisisAssessment, PolicyDecision, PolicyOption};

use crate::directive::{ActiveDirective, DirectiveBoard};
use crate::error::ConsoleError;
use crate::ledger::{ApprovalRequest, DecisionLedger};

/// Which engine produced a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    Primary,
    /// The primary engine was unavailable and the rule engine ran instead.
    Fallback,
}

/// Everything one refresh produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub snapshot: CityData,
    pub predictions: AllPredictions,
    pub crisis: CrisisAssessment,
    pub recommendations: Vec<PolicyOption>,
    pub engine: EngineMode,
    pub engine_name: String,
}

impl CycleReport {
    pub fn option(&self, id: u32) -> Option<&PolicyOption> {
        self.recommendations.iter().find(|o| o.id == id)
    }
}

pub struct CityConsole {
    primary: Box<dyn PredictionEngine>,
    fallback: RuleEngine,
    ledger: Box<dyn DecisionLedger>,
    board: DirectiveBoard,
    current: Option<CycleReport>,
}

impl CityConsole {
    pub fn new(
        primary: Box<dyn PredictionEngine>,
        fallback: RuleEngine,
        ledger: Box<dyn DecisionLedger>,
    ) -> Self {
        Self {
            primary,
            fallback,
            ledger,
            board: DirectiveBoard::new(),
            current: None,
        }
    }

    /// Run one forecast cycle on `snapshot`.
    ///
    /// A recoverable primary failure reruns the cycle on the rule engine.
    /// Validation failures are returned and leave the current report as it
    /// was.
    pub fn refresh(&mut self, snapshot: CityData) -> Result<&CycleReport, ConsoleError> {
        let (predictions, engine, engine_name) = match self.primary.predict(&snapshot) {
            Ok(predictions) => (predictions, EngineMode::Primary, self.primary.name()),
            Err(err) if err.is_recoverable() => {
                warn!(
                    snapshot = %snapshot.id,
                    engine = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %err,
                    "primary engine unavailable, using fallback"
                );
                let predictions = self.fallback.predict(&snapshot)?;
                (predictions, EngineMode::Fallback, self.fallback.name())
            }
            Err(err) => return Err(err.into()),
        };
        let engine_name = engine_name.to_string();

        let crisis = get_crisis_type(&snapshot, &predictions);
        let recommendations = generate_final_recommendations(&snapshot, &predictions);

        info!(
            snapshot = %snapshot.id,
            engine = %engine_name,
            crisis = crisis.crisis_type.as_str(),
            severity = crisis.severity.as_str(),
            options = recommendations.len(),
            "cycle complete"
        );

        Ok(&*self.current.insert(CycleReport {
            snapshot,
            predictions,
            crisis,
            recommendations,
            engine,
            engine_name,
        }))
    }

    /// Approve option `option_id` from the current report, stamped now.
    pub fn approve(
        &mut self,
        option_id: u32,
        operator: &str,
    ) -> Result<PolicyDecision, ConsoleError> {
        self.approve_at(option_id, operator, Utc::now())
    }

    /// Record the approval in the ledger and publish the option's directive.
    ///
    /// Nothing is published if the ledger rejects the approval.
    pub fn approve_at(
        &mut self,
        option_id: u32,
        operator: &str,
        at: DateTime<Utc>,
    ) -> Result<PolicyDecision, ConsoleError> {
        let report = self.current.as_ref().ok_or(ConsoleError::NoActiveRun)?;
        let option = report
            .option(option_id)
            .ok_or(ConsoleError::UnknownOption(option_id))?
            .clone();

        let decision = self.ledger.record(ApprovalRequest {
            alert_type: report.crisis.crisis_type,
            options: report.recommendations.clone(),
            selected_option_id: option_id,
            operator: operator.to_string(),
            predictions: Some(report.predictions.clone()),
            requested_at: at,
        })?;

        self.board.publish(option.instruction_text, option.category, at);
        info!(
            decision = %decision.id,
            option = option_id,
            category = option.category.label(),
            "directive published"
        );
        Ok(decision)
    }

    pub fn current(&self) -> Option<&CycleReport> {
        self.current.as_ref()
    }

    pub fn active_directive(&self) -> Option<&ActiveDirective> {
        self.board.active()
    }

    pub fn board(&self) -> &DirectiveBoard {
        &self.board
    }

    pub fn ledger(&self) -> &dyn DecisionLedger {
        self.ledger.as_ref()
    }

    /// Name of the configured primary engine.
    pub fn engine_name(&self) -> &str {
        self.primary.name()
    }
}
