//! Command implementations behind the `urbanintel` binary.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use urbanintel_console::{
    ActiveDirective, CityConsole, ConsoleError, CycleReport, EngineMode, InMemoryDecisionLedger,
};
use urbanintel_forecast::{
    ModelBlendEngine, PredictionEngine, RuleEngine, SnapshotGenerator, StaticModelOutputs,
};
use urbanintel_types::{CityData, ModelOutputs, PolicyDecision};

use crate::config::{CliConfig, EngineConfig};
use crate::error::{CliError, CliResult};

/// Where a cycle's snapshot comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapshotSource {
    /// JSON snapshot file; takes precedence over `seed`.
    pub path: Option<String>,
    pub seed: Option<u64>,
}

impl SnapshotSource {
    pub fn load(&self, at: DateTime<Utc>) -> CliResult<CityData> {
        if let Some(path) = &self.path {
            debug!(path = %path, "reading snapshot file");
            return read_json(path);
        }
        let mut generator = match self.seed {
            Some(seed) => SnapshotGenerator::from_seed(seed),
            None => SnapshotGenerator::from_entropy(),
        };
        Ok(generator.generate_at(at))
    }
}

/// A completed approval.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOutcome {
    pub decision: PolicyDecision,
    pub directive: ActiveDirective,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> CliResult<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Model outputs from `path`; an unreadable file leaves the model unavailable.
pub fn load_model_outputs(path: &str) -> StaticModelOutputs {
    match read_json::<ModelOutputs>(path) {
        Ok(outputs) => StaticModelOutputs::new(outputs),
        Err(err) => {
            warn!(path = %path, error = %err, "model outputs unavailable");
            StaticModelOutputs::unavailable(err.to_string())
        }
    }
}

/// Console with the rule engine as fallback, and the model blend as primary
/// when a model output file is given.
pub fn build_console(engine: &EngineConfig, model_outputs: Option<&str>) -> CityConsole {
    let rules = RuleEngine::new(engine.confidence);
    let primary: Box<dyn PredictionEngine> = match model_outputs {
        Some(path) => Box::new(ModelBlendEngine::with_config(
            rules.clone(),
            load_model_outputs(path),
            engine.blend(),
        )),
        None => Box::new(rules.clone()),
    };
    CityConsole::new(primary, rules, Box::new(InMemoryDecisionLedger::new()))
}

/// `urbanintel sample`
pub fn sample(config: &CliConfig, seed: Option<u64>, at: DateTime<Utc>) -> CliResult<CityData> {
    SnapshotSource {
        path: None,
        seed: seed.or(config.sample.seed),
    }
    .load(at)
}

/// `urbanintel run`
pub fn run(
    config: &CliConfig,
    source: &SnapshotSource,
    model_outputs: Option<&str>,
    at: DateTime<Utc>,
) -> CliResult<CycleReport> {
    let snapshot = with_configured_seed(config, source).load(at)?;
    let mut console = build_console(&config.engine, model_outputs);
    Ok(console.refresh(snapshot)?.clone())
}

/// `urbanintel approve`
pub fn approve(
    config: &CliConfig,
    source: &SnapshotSource,
    model_outputs: Option<&str>,
    option: u32,
    operator: &str,
    at: DateTime<Utc>,
) -> CliResult<ApprovalOutcome> {
    let snapshot = with_configured_seed(config, source).load(at)?;
    let mut console = build_console(&config.engine, model_outputs);
    console.refresh(snapshot)?;
    let decision = console.approve_at(option, operator, at)?;
    let directive = console
        .active_directive()
        .cloned()
        .ok_or(ConsoleError::NoActiveRun)?;
    Ok(ApprovalOutcome {
        decision,
        directive,
    })
}

fn with_configured_seed(config: &CliConfig, source: &SnapshotSource) -> SnapshotSource {
    SnapshotSource {
        path: source.path.clone(),
        seed: source.seed.or(config.sample.seed),
    }
}

pub fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Plain-text rendering of a cycle.
pub fn render_report(report: &CycleReport) -> String {
    let p = &report.predictions;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Snapshot {} ({} engine: {})",
        report.snapshot.id,
        match report.engine {
            EngineMode::Primary => "primary",
            EngineMode::Fallback => "fallback",
        },
        report.engine_name
    );
    let _ = writeln!(
        out,
        "Crisis: {} [{}]",
        report.crisis.crisis_type.as_str(),
        report.crisis.severity.as_str()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Water     {} ({}%, {}) - {}",
        p.water_supply.status,
        p.water_supply.shortage_level,
        p.water_supply.shortage_duration,
        p.water_supply.reason
    );
    let _ = writeln!(
        out,
        "Traffic   {}% congestion, peak {} - {}",
        p.traffic.congestion_level, p.traffic.peak_hours, p.traffic.reason
    );
    if !p.traffic.roads_to_avoid.is_empty() {
        let _ = writeln!(out, "          avoid: {}", p.traffic.roads_to_avoid.join(", "));
    }
    let _ = writeln!(
        out,
        "Food      +{}% ({}) - {}",
        p.food_price.price_change_percent, p.food_price.supply_status, p.food_price.reason
    );
    let _ = writeln!(
        out,
        "Energy    +{}% ({:.2} -> {:.2}) - {}",
        p.energy_price.price_change_percent,
        p.energy_price.current_rate,
        p.energy_price.predicted_rate,
        p.energy_price.reason
    );
    let _ = writeln!(
        out,
        "Services  {} ({})",
        p.public_services.road_maintenance_plan, p.public_services.maintenance_timeline
    );
    if let Some(reason) = &p.public_services.cleanup_reason {
        let _ = writeln!(out, "          cleanup: {reason}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations:");
    for option in &report.recommendations {
        let _ = writeln!(
            out,
            "  [{}] {} ({})",
            option.id,
            option.title,
            option.category.label()
        );
        let _ = writeln!(out, "      {}", option.description);
        let _ = writeln!(out, "      directive: {}", option.instruction_text);
    }
    out
}

/// Plain-text rendering of an approval.
pub fn render_approval(outcome: &ApprovalOutcome) -> String {
    let decision = &outcome.decision;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Decision {} ({}) approved by {}",
        decision.id,
        decision.alert_type.as_str(),
        decision.approved_by.as_deref().unwrap_or("-")
    );
    if let Some(option) = decision.selected_option() {
        let _ = writeln!(out, "Option [{}] {}", option.id, option.title);
    }
    let _ = writeln!(
        out,
        "Directive ({}): {}",
        outcome.directive.category.label(),
        outcome.directive.text
    );
    out
}
