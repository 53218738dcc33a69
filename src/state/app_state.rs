//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use super::{CountdownConfig, CountdownView, DisplayFrame, FrameSender, ViewState};
use crate::services::Alert;

/// Failures of playback and view control
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("No countdown view is open")]
    NoView,
    #[error("Failed to lock {0}")]
    Lock(&'static str),
}

/// Current configuration and frame of the open view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub config: CountdownConfig,
    pub frame: DisplayFrame,
}

impl ViewSnapshot {
    fn of(view: &ViewState) -> Self {
        Self {
            config: view.config,
            frame: view.frame(),
        }
    }
}

/// Result of submitting a configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    Opened(ViewSnapshot),
    Updated(ViewSnapshot),
}

impl Applied {
    pub fn snapshot(&self) -> ViewSnapshot {
        match self {
            Applied::Opened(s) | Applied::Updated(s) => *s,
        }
    }
}

/// Main application state: at most one open countdown view plus its observers
#[derive(Debug)]
pub struct AppState {
    /// Countdown view, present between open and close
    view: Mutex<Option<CountdownView>>,
    /// Tick cadence for every view opened from this state
    pub tick_interval: Duration,
    /// Completion action shared by all views
    alert: Arc<dyn Alert>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for display frames
    pub frame_tx: FrameSender,
    /// Keep the receiver alive to prevent channel closure
    pub _frame_rx: watch::Receiver<Option<DisplayFrame>>,
}

impl AppState {
    pub fn new(port: u16, host: String, tick_interval: Duration, alert: Arc<dyn Alert>) -> Self {
        let (frame_tx, frame_rx) = watch::channel(None);

        Self {
            view: Mutex::new(None),
            tick_interval,
            alert,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            frame_tx: Arc::new(frame_tx),
            _frame_rx: frame_rx,
        }
    }

    /// Subscribe to display frames
    pub fn subscribe(&self) -> watch::Receiver<Option<DisplayFrame>> {
        self.frame_tx.subscribe()
    }

    fn lock_view(&self) -> Result<MutexGuard<'_, Option<CountdownView>>, ControlError> {
        self.view.lock().map_err(|_| ControlError::Lock("countdown view"))
    }

    /// Run `f` against the open view's state and publish the resulting frame
    fn with_view<F>(&self, action: &str, f: F) -> Result<ViewSnapshot, ControlError>
    where
        F: FnOnce(&mut ViewState),
    {
        let slot = self.lock_view()?;
        let view = slot.as_ref().ok_or(ControlError::NoView)?;
        let mut state = view
            .shared()
            .lock()
            .map_err(|_| ControlError::Lock("countdown state"))?;

        f(&mut *state);
        let snapshot = ViewSnapshot::of(&state);
        drop(state);
        drop(slot);

        self.record_action(action);
        self.frame_tx.send_replace(Some(snapshot.frame));
        Ok(snapshot)
    }

    /// Open the view with `config`, or reload the open one
    pub fn apply_config(&self, config: CountdownConfig) -> Result<Applied, ControlError> {
        let mut slot = self.lock_view()?;
        if slot.is_some() {
            drop(slot);
            info!("Updating countdown to {}", config.time);
            let snapshot = self.with_view("update", |view| view.reload(config, Instant::now()))?;
            return Ok(Applied::Updated(snapshot));
        }

        let view = CountdownView::open(
            config,
            self.tick_interval,
            Arc::clone(&self.frame_tx),
            Arc::clone(&self.alert),
        );
        let snapshot = {
            let state = view
                .shared()
                .lock()
                .map_err(|_| ControlError::Lock("countdown state"))?;
            ViewSnapshot::of(&state)
        };
        *slot = Some(view);
        drop(slot);

        self.record_action("open");
        self.frame_tx.send_replace(Some(snapshot.frame));
        Ok(Applied::Opened(snapshot))
    }

    /// Play/Pause toggle
    pub fn toggle(&self) -> Result<ViewSnapshot, ControlError> {
        let alert = Arc::clone(&self.alert);
        let snapshot = self.with_view("toggle", |view| {
            let now = Instant::now();
            if view.countdown.is_running() {
                view.tick(now, alert.as_ref());
            }
            view.countdown.toggle(now);
        })?;
        let verb = if snapshot.frame.running { "playing" } else { "paused" };
        info!("Countdown {} at {:.1}s remaining", verb, snapshot.frame.remaining_seconds);
        Ok(snapshot)
    }

    pub fn play(&self) -> Result<ViewSnapshot, ControlError> {
        let snapshot = self.with_view("play", |view| {
            if !view.countdown.is_running() {
                view.countdown.start(Instant::now());
            }
        })?;
        info!("Countdown playing at {:.1}s remaining", snapshot.frame.remaining_seconds);
        Ok(snapshot)
    }

    pub fn pause(&self) -> Result<ViewSnapshot, ControlError> {
        let alert = Arc::clone(&self.alert);
        let snapshot = self.with_view("pause", |view| {
            if view.countdown.is_running() {
                // account for the time since the last tick before freezing
                view.tick(Instant::now(), alert.as_ref());
                view.countdown.stop();
            }
        })?;
        info!("Countdown paused at {:.1}s remaining", snapshot.frame.remaining_seconds);
        Ok(snapshot)
    }

    /// Close the view, cancelling its tick task
    pub fn close_view(&self) -> Result<(), ControlError> {
        let view = self.lock_view()?.take().ok_or(ControlError::NoView)?;
        drop(view);

        self.record_action("close");
        self.frame_tx.send_replace(None);
        Ok(())
    }

    /// Current snapshot, `None` while no view is open
    pub fn snapshot(&self) -> Result<Option<ViewSnapshot>, ControlError> {
        let slot = self.lock_view()?;
        let Some(view) = slot.as_ref() else {
            return Ok(None);
        };
        let state = view
            .shared()
            .lock()
            .map_err(|_| ControlError::Lock("countdown state"))?;
        Ok(Some(ViewSnapshot::of(&state)))
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to record last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
