//! Countdown tick background task

use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error};

use crate::{
    services::Alert,
    state::{FrameSender, SharedView},
};

/// Recompute the view's countdown every `period` and publish the new frame.
///
/// Runs until aborted by the owning view.
pub async fn countdown_ticker_task(
    view: SharedView,
    period: Duration,
    frames: FrameSender,
    alert: Arc<dyn Alert>,
) {
    debug!("Starting countdown ticker every {:?}", period);

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let frame = match view.lock() {
            Ok(mut view) => {
                view.tick(Instant::now(), alert.as_ref());
                view.frame()
            }
            Err(e) => {
                error!("Failed to lock countdown view, stopping ticker: {}", e);
                break;
            }
        };

        frames.send_replace(Some(frame));
    }
}
