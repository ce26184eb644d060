use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tsr_processor::{
    args::Args,
    database::db::DbClient,
    model::{snapshot::player_snapshots, tsr_model::TsrModel},
    utils::report_utils
};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args);

    let client = DbClient::connect(args.connection_string.as_str())
        .await
        .expect("Failed to connect to database. Application cannot start without a valid database connection.");

    let records = client
        .get_match_records()
        .await
        .expect("Failed to fetch match records");

    let mut model = TsrModel::new();
    let result = model.process(&records);

    client
        .save_pre_match_stats(&result.pre_match_stats)
        .await
        .expect("Failed to save pre-match stats");

    let as_of = args.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let snapshots = player_snapshots(&model.rating_tracker, as_of);

    report_utils::write_report(&args.report_path, &snapshots).expect("Failed to write player report");

    info!(
        applied = result.applied,
        walkovers = result.walkovers,
        unsupported_surface = result.unsupported_surface,
        players_reported = snapshots.len(),
        %as_of,
        "Processing run complete"
    );
}

fn init_tracing(args: &Args) {
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&args.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}
