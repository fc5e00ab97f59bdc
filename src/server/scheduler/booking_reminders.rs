use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{booking::BookingService, realtime::RealtimeHub},
};

/// Every 15 minutes, on the minute.
const REMINDER_SCHEDULE: &str = "0 */15 * * * *";

/// Starts the booking reminder scheduler.
///
/// The job notifies the house owner and technician of each accepted booking scheduled
/// within the next 24 hours. Each booking is reminded once.
///
/// # Arguments
/// - `db`: Database connection
/// - `realtime`: Hub used to push the reminder notifications to connected clients
pub async fn start_scheduler(db: DatabaseConnection, realtime: RealtimeHub) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(REMINDER_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let realtime = realtime.clone();

        Box::pin(async move {
            process_reminders(&db, &realtime).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Booking reminder scheduler started");

    Ok(())
}

async fn process_reminders(db: &DatabaseConnection, realtime: &RealtimeHub) {
    match BookingService::new(db, realtime)
        .send_due_reminders(Utc::now())
        .await
    {
        Ok(0) => {}
        Ok(sent) => tracing::info!(sent, "Booking reminders sent"),
        Err(e) => tracing::error!("Error processing booking reminders: {}", e),
    }
}
