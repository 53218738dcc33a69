//! The open countdown view and its tick task

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info};

use super::{CountdownConfig, CountdownState, DisplayFrame};
use crate::{services::Alert, tasks::countdown_ticker_task};

/// Frames published to the display layer; `None` while no view is open
pub type FrameSender = Arc<watch::Sender<Option<DisplayFrame>>>;

/// Countdown plus the options it was configured with
#[derive(Debug, Clone)]
pub struct ViewState {
    pub countdown: CountdownState,
    pub config: CountdownConfig,
}

impl ViewState {
    pub fn new(config: CountdownConfig, now: Instant) -> Self {
        Self {
            countdown: CountdownState::new(config.time, now),
            config,
        }
    }

    /// Swap in a new configuration, keeping playback as it is
    pub fn reload(&mut self, config: CountdownConfig, now: Instant) {
        debug!("Reloading countdown with {}", config.time);
        self.countdown.load_duration(config.time, now);
        self.config = config;
    }

    /// Advance the countdown and fire the alert on completion
    pub fn tick(&mut self, now: Instant, alert: &dyn Alert) {
        if self.countdown.tick(now) {
            info!("Countdown of {} complete", self.config.time);
            if self.config.sound_enabled {
                alert.play();
            }
        }
    }

    pub fn frame(&self) -> DisplayFrame {
        self.countdown.frame(self.config.show_labels)
    }
}

pub type SharedView = Arc<Mutex<ViewState>>;

/// An open countdown view. Dropping it cancels the tick task.
#[derive(Debug)]
pub struct CountdownView {
    shared: SharedView,
    ticker: JoinHandle<()>,
}

impl CountdownView {
    /// Create the countdown state and start ticking it every `period`
    pub fn open(
        config: CountdownConfig,
        period: Duration,
        frames: FrameSender,
        alert: Arc<dyn Alert>,
    ) -> Self {
        let shared = Arc::new(Mutex::new(ViewState::new(config, Instant::now())));
        let ticker = tokio::spawn(countdown_ticker_task(
            Arc::clone(&shared),
            period,
            frames,
            alert,
        ));
        info!("Countdown view opened for {}", config.time);
        Self { shared, ticker }
    }

    pub fn shared(&self) -> &SharedView {
        &self.shared
    }
}

impl Drop for CountdownView {
    fn drop(&mut self) {
        self.ticker.abort();
        info!("Countdown view closed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::state::TimeSpec;

    #[derive(Debug, Default)]
    struct CountingAlert(AtomicUsize);

    impl Alert for CountingAlert {
        fn play(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config(seconds: u32, sound_enabled: bool) -> CountdownConfig {
        CountdownConfig {
            time: TimeSpec::new(0, 0, seconds),
            show_labels: true,
            sound_enabled,
        }
    }

    #[test]
    fn plays_alert_once_when_sound_enabled() {
        let alert = CountingAlert::default();
        let t0 = Instant::now();
        let mut view = ViewState::new(config(2, true), t0);
        view.countdown.start(t0);

        for step in 0..10u64 {
            view.tick(t0 + Duration::from_secs(step), &alert);
        }
        assert_eq!(alert.0.load(Ordering::SeqCst), 1);
        assert!(view.frame().completed);
        assert!(view.frame().show_labels);
    }

    #[test]
    fn silent_when_sound_disabled() {
        let alert = CountingAlert::default();
        let t0 = Instant::now();
        let mut view = ViewState::new(config(1, false), t0);
        view.countdown.start(t0);
        view.tick(t0 + Duration::from_secs(5), &alert);

        assert_eq!(alert.0.load(Ordering::SeqCst), 0);
        assert!(view.countdown.completion_signaled());
    }

    #[test]
    fn reload_rearms_the_alert() {
        let alert = CountingAlert::default();
        let t0 = Instant::now();
        let mut view = ViewState::new(config(1, true), t0);
        view.countdown.start(t0);
        view.tick(t0 + Duration::from_secs(1), &alert);

        view.reload(config(1, true), t0 + Duration::from_secs(2));
        view.tick(t0 + Duration::from_secs(3), &alert);
        assert_eq!(alert.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dropping_the_view_stops_its_ticker() {
        let (tx, _rx) = watch::channel(None);
        let view = CountdownView::open(
            config(5, false),
            Duration::from_millis(5),
            Arc::new(tx),
            Arc::new(CountingAlert::default()),
        );
        let shared = Arc::clone(view.shared());
        drop(view);
        tokio::task::yield_now().await;

        // only the test's clone of the state is left once the task is gone
        for _ in 0..100 {
            if Arc::strong_count(&shared) == 1 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("ticker task still holds the view state");
    }
}
