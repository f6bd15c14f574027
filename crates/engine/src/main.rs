//! RiftRoll - Main entry point.
//!
//! Loads the catalog, rolls one full loadout for the configured role and
//! prints the saved result as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use riftroll_engine::infrastructure::{app_settings::AppSettings, catalog_file::JsonFileCatalog};
use riftroll_engine::use_cases::{CycleMode, StepOutcome, TriggerOutcome};
use riftroll_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riftroll_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting RiftRoll");

    let mut settings = AppSettings::from_env();
    settings.catalog_path = resolve_catalog_path(&settings.catalog_path);
    tracing::info!(
        role = %settings.role,
        policy = %settings.flight_policy,
        catalog = %settings.catalog_path.display(),
        "Settings loaded"
    );

    let catalog = Arc::new(JsonFileCatalog::new(settings.catalog_path.clone()));
    let app = App::with_system_ports(settings, catalog)?;

    app.load_catalog().await?;

    let outcome = tokio::select! {
        outcome = app.randomize_all(CycleMode::Animated) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
            return Ok(());
        }
    };

    let report = match outcome {
        TriggerOutcome::Completed { report, .. } => report,
        other => anyhow::bail!("randomize-all did not run: {other:?}"),
    };

    for step in &report.steps {
        match &step.outcome {
            StepOutcome::Settled { previews } => {
                tracing::debug!(selector = step.selector, previews = *previews, "Step settled")
            }
            other => tracing::warn!(selector = step.selector, outcome = ?other, "Step did not settle"),
        }
    }

    let saved = app.use_cases.loadouts.save.execute(report.record).await?;
    println!("{}", serde_json::to_string_pretty(&saved)?);

    Ok(())
}

/// Relative catalog paths are tried against the working directory first,
/// then against the repo root.
fn resolve_catalog_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let from_root = repo_root().join(path);
    if from_root.exists() {
        from_root
    } else {
        path.to_path_buf()
    }
}

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn load_dotenv_from_repo_root() {
    let repo_root = repo_root();

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
