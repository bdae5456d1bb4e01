// Pre-suite hook: removes synthetic users and links left behind by earlier
// runs. Run it before `cargo test --features e2e-tests` when several test
// binaries share one database, or from CI before the suite starts.
// Exits non-zero if the cleanup fails, so the pipeline stops there.

use anyhow::Context;
use shortbeyond_e2e::configuration::get_configuration;
use shortbeyond_e2e::startup::Harness;
use shortbeyond_e2e::suite::SuiteSetup;
use shortbeyond_e2e::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("prepare_suite".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let harness = Harness::build(configuration)?;
    let setup = SuiteSetup::new(harness.lifecycle_manager());

    let report = setup
        .run_once()
        .await
        .context("Pre-suite cleanup failed.")?;
    tracing::info!(
        links_deleted = report.links_deleted,
        users_deleted = report.users_deleted,
        completed_at = %report.completed_at,
        "Pre-suite cleanup finished"
    );

    Ok(())
}
