//! Demo entry point.
//!
//! Reconciles a sample bill of materials against the live API when
//! `SUPPLYRECON_CORPORATION_ID` is set, otherwise against a built-in sample
//! log. Then plays out simulated deliveries for whatever is still open.
//! Simulated output is logged with `simulated = true` and never written back
//! into the reconciliation source.

use anyhow::Context;
use chrono::{Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use supplyrecon_core::{CharacterId, LocationId, Requirement, Subdivision, TimeWindow, TypeId};
use supplyrecon_events::{MovementAction, MovementLogEntry};
use supplyrecon_infra::{
    EventSource, HttpEventSource, InMemoryEventSource, Reconciler, SourceConfig, SyncNotifier,
    TracingNotifier,
};
use supplyrecon_inventory::simulate::simulate;
use supplyrecon_inventory::{DeliveryClaim, aggregate, fold_totals, required_type_ids};

const SAMPLE_FACILITY: LocationId = LocationId::new(1_030_000_000_000);
const MAX_SIMULATION_ROUNDS: usize = 10;

fn bill_of_materials() -> anyhow::Result<Vec<Requirement>> {
    Ok(vec![
        Requirement::outstanding(TypeId::new(34), 500)?,
        Requirement::outstanding(TypeId::new(35), 200)?,
        Requirement::outstanding(TypeId::new(36), 80)?,
    ])
}

fn sample_log() -> Vec<MovementLogEntry> {
    let now = Utc::now();
    let entry = |action, type_id, quantity, minutes_ago| MovementLogEntry {
        logged_at: now - Duration::minutes(minutes_ago),
        character_id: CharacterId::new(2_112_625_428),
        location_id: SAMPLE_FACILITY,
        location_flag: "CorpSAG2".to_string(),
        action,
        type_id: TypeId::new(type_id),
        quantity,
        old_config_bitmask: None,
        new_config_bitmask: None,
        password_type: None,
    };
    vec![
        entry(MovementAction::Add, 34, 200, 90),
        entry(MovementAction::Add, 34, 150, 60),
        entry(MovementAction::Remove, 34, 50, 45),
        entry(MovementAction::Add, 35, 200, 30),
    ]
}

fn subdivision_from_env() -> anyhow::Result<Subdivision> {
    let raw = std::env::var("SUPPLYRECON_SUBDIVISION").unwrap_or_else(|_| "2".to_string());
    let number: u8 = raw.trim().parse().context("SUPPLYRECON_SUBDIVISION")?;
    Ok(Subdivision::new(number)?)
}

async fn run<S, N>(reconciler: &Reconciler<S, N>, subdivision: Subdivision) -> anyhow::Result<()>
where
    S: EventSource,
    N: SyncNotifier,
{
    let requirements = bill_of_materials()?;
    let since = Utc::now() - Duration::days(30);

    let result = reconciler.reconcile(subdivision, &requirements, Some(since)).await;
    if !result.source.is_available() {
        tracing::warn!(source = ?result.source, "reconciling without data");
    }

    let names = reconciler.type_names(&required_type_ids(&requirements)).await;
    for p in &result.progress {
        let name = names.get(&p.type_id()).map(String::as_str).unwrap_or("unknown");
        tracing::info!(
            type_id = %p.type_id(),
            name,
            required = p.requirement.quantity_required(),
            delivered = p.requirement.quantity_delivered(),
            remaining = p.remaining(),
            "requirement"
        );
    }

    if let Some(first) = result.deliveries.first() {
        let claim = DeliveryClaim::new(
            first.type_id(),
            first.quantity(),
            first.character_id(),
            subdivision,
            TimeWindow::around(first.timestamp(), Duration::hours(1))?,
        );
        let verified = reconciler.verify_delivery(&claim).await;
        tracing::info!(type_id = %claim.type_id, quantity = claim.quantity, verified, "spot check");
    }

    let contents = reconciler.current_contents(subdivision).await;
    tracing::info!(contents = ?contents.contents, source = ?contents.source, "on hand");

    // Simulated rounds live only in this loop's local state.
    let mut open: Vec<Requirement> = result.progress.iter().map(|p| p.requirement).collect();
    let mut rng = StdRng::from_entropy();
    for round in 1..=MAX_SIMULATION_ROUNDS {
        if open.iter().all(Requirement::is_fulfilled) {
            break;
        }
        let simulated = simulate(&open, subdivision, &mut rng);
        for d in &simulated {
            tracing::info!(
                round,
                simulated = d.is_simulated(),
                type_id = %d.type_id(),
                quantity = d.quantity(),
                character_id = %d.character_id(),
                "simulated delivery"
            );
        }
        let totals = aggregate(&simulated);
        open = fold_totals(&open, &totals)
            .into_iter()
            .map(|p| p.requirement)
            .collect();
    }

    for r in &open {
        tracing::info!(
            type_id = %r.type_id(),
            remaining = r.remaining(),
            fulfilled = r.is_fulfilled(),
            simulated = true,
            "projected requirement"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    supplyrecon_observability::init();

    let subdivision = subdivision_from_env()?;

    match SourceConfig::from_env() {
        Ok(config) => {
            tracing::info!(?config, "using live inventory API");
            let source = HttpEventSource::new(&config)?;
            let reconciler = Reconciler::new(source, config.facility_id).with_notifier(TracingNotifier);
            run(&reconciler, subdivision).await
        }
        Err(err) => {
            tracing::warn!(error = %err, "no API configuration; using built-in sample log");
            let source = InMemoryEventSource::new()
                .with_logs(sample_log())
                .with_type_name(TypeId::new(34), "Tritanium")
                .with_type_name(TypeId::new(35), "Pyerite")
                .with_type_name(TypeId::new(36), "Mexallon");
            let reconciler = Reconciler::new(source, Some(SAMPLE_FACILITY)).with_notifier(TracingNotifier);
            run(&reconciler, subdivision).await
        }
    }
}
