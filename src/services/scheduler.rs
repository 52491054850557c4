use chrono::{Duration, Local, NaiveDateTime};
use log::{error, info};
use tokio::task::JoinHandle;

use crate::database::DbPool;
use crate::domain::week;
use crate::services::reset::WeeklyResetService;

/// Spawn the background task that performs the weekly reset every Sunday
/// at local midnight. Runs for the lifetime of the server.
pub fn start_weekly_reset_task(pool: DbPool) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let wait = duration_until_next_reset(Local::now().naive_local());
            info!(
                "Next weekly reset scheduled in {} seconds",
                wait.as_secs()
            );
            tokio::time::sleep(wait).await;

            let service = WeeklyResetService::new(pool.clone());
            if let Err(e) = service.perform_weekly_reset() {
                error!("Error during weekly reset: {:?}", e);
            }
        }
    })
}

/// Time until the next Sunday 00:00:00 strictly after `now`
pub fn duration_until_next_reset(now: NaiveDateTime) -> std::time::Duration {
    let next = week::current_week_start(now) + Duration::days(7);
    (next - now).to_std().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn saturday_night_rolls_over_at_midnight() {
        // 2025-01-11 is a Saturday; next reset is 2025-01-12 00:00
        let wait = duration_until_next_reset(at(2025, 1, 11, 23, 0, 0));
        assert_eq!(wait.as_secs(), 3600);
    }

    #[test]
    fn sunday_midnight_waits_a_full_week() {
        let wait = duration_until_next_reset(at(2025, 1, 5, 0, 0, 0));
        assert_eq!(wait.as_secs(), 7 * 24 * 3600);
    }
}
