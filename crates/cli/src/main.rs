//! counselhub operator entry point.
//!
//! Loads configuration, connects to the database, brings the schema up to
//! date and runs a single administrative command.

mod command;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use counselhub_common::{AppResult, Config, config::LogFormat};
use counselhub_core::Services;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use command::{Command, USAGE};

fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counselhub=info".into()),
        )
        .init();
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => error!(error = %e, "Failed to render output"),
    }
}

async fn run(command: Command, config: &Config) -> AppResult<()> {
    let db = counselhub_db::init(config).await?;
    info!("Connected to database");

    counselhub_db::migrate(&db).await?;
    if !command.needs_schema() {
        info!("Migrations applied");
        return Ok(());
    }

    let services = Services::new(Arc::new(db));

    match command {
        Command::Migrate => {}
        Command::Seed => {
            let created = services.registration.seed_counsellors().await?;
            let admin = services.registration.ensure_admin(&config.bootstrap).await?;
            print_json(&json!({ "counsellors_created": created, "admin": admin.email }));
        }
        Command::Match { interests } => {
            let counsellor = services.matcher.match_counsellor(&interests).await?;
            print_json(&json!({ "interests": interests, "counsellor": counsellor }));
        }
        Command::DeactivateStudent { student_id } => {
            let report = services.deactivation.deactivate_student(&student_id).await?;
            print_json(&json!({
                "student_id": student_id,
                "rows_removed": report.total(),
                "steps": report,
            }));
        }
        Command::ActivateStudent { student_id } => {
            services.deactivation.activate_student(&student_id).await?;
            print_json(&json!({ "student_id": student_id, "is_active": true }));
        }
        Command::DeactivateCounsellor {
            counsellor_id,
            replacement_id,
        } => {
            let summary = services
                .deactivation
                .deactivate_counsellor(&counsellor_id, &replacement_id)
                .await?;
            print_json(&json!({
                "counsellor_id": counsellor_id,
                "replacement_id": replacement_id,
                "summary": summary,
            }));
        }
        Command::ActivateCounsellor { counsellor_id } => {
            services
                .deactivation
                .activate_counsellor(&counsellor_id)
                .await?;
            print_json(&json!({ "counsellor_id": counsellor_id, "is_available": true }));
        }
        Command::ApproveRequest {
            counsellor_id,
            request_id,
        } => {
            let appointment = services
                .requests
                .approve(&counsellor_id, &request_id)
                .await?;
            print_json(&json!({ "appointment": appointment }));
        }
        Command::RejectRequest {
            counsellor_id,
            request_id,
        } => {
            services.requests.reject(&counsellor_id, &request_id).await?;
            print_json(&json!({ "request_id": request_id, "rejected": true }));
        }
        Command::Notifications { account } => {
            let items = services.notifications.recent(&account).await?;
            let unread = services.notifications.unread_count(&account).await?;
            print_json(&json!({
                "account": account.to_string(),
                "unread": unread,
                "recent": items,
            }));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{USAGE}", e.user_message());
            return Ok(ExitCode::from(2));
        }
    };

    let config = Config::load().context("failed to load configuration")?;
    init_tracing(config.logging.format);

    info!(?command, "Starting counselhub");

    match run(command, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{}: {}", e.error_code(), e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
