//! Terminal rendering of the countdown view

use tokio::{
    io::{self, AsyncWriteExt},
    sync::watch,
};
use tracing::{debug, info, warn};

use crate::state::DisplayFrame;

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Render one frame as a single line.
///
/// Separators widen as unit groups collapse, standing in for the larger
/// type of a graphical view.
pub fn render_frame(frame: &DisplayFrame) -> String {
    let digits = &frame.digits;
    let pair = |tens: u8, ones: u8| format!("{tens}{ones}");

    let mut groups = Vec::with_capacity(3);
    if digits.show_hours_unit {
        groups.push((pair(digits.hours_tens, digits.hours_ones), "Hours"));
    }
    if digits.show_minutes_unit {
        groups.push((pair(digits.minutes_tens, digits.minutes_ones), "Minutes"));
    }
    groups.push((pair(digits.seconds_tens, digits.seconds_ones), "Seconds"));

    let gap = " ".repeat(usize::from(frame.emphasis));
    let body = if frame.show_labels {
        groups
            .iter()
            .map(|(pair, label)| format!("{pair} {label}"))
            .collect::<Vec<_>>()
            .join(&format!(" {gap}:{gap} "))
    } else {
        groups
            .into_iter()
            .map(|(pair, _)| pair)
            .collect::<Vec<_>>()
            .join(&format!("{gap}:{gap}"))
    };

    let marker = if frame.completed {
        "[done]"
    } else if frame.running {
        "[play]"
    } else {
        "[paused]"
    };
    format!("{marker} {body}")
}

async fn draw(stdout: &mut io::Stdout, output: &str) -> io::Result<()> {
    stdout.write_all(output.as_bytes()).await?;
    stdout.flush().await
}

/// Redraw the countdown line whenever its rendering changes
pub async fn terminal_view_task(mut frames: watch::Receiver<Option<DisplayFrame>>) {
    info!("Starting terminal view");

    let mut stdout = io::stdout();
    let mut last_line: Option<String> = None;

    while frames.changed().await.is_ok() {
        let frame = *frames.borrow_and_update();
        let output = match frame {
            Some(frame) => {
                let line = render_frame(&frame);
                if last_line.as_deref() == Some(line.as_str()) {
                    continue;
                }
                let output = format!("{CLEAR_LINE}{line}");
                last_line = Some(line);
                output
            }
            None => {
                if last_line.take().is_none() {
                    continue;
                }
                format!("{CLEAR_LINE}[closed]\n")
            }
        };

        if let Err(e) = draw(&mut stdout, &output).await {
            warn!("Failed to draw countdown: {}", e);
        }
    }

    debug!("Frame channel closed, terminal view stopped");
}
