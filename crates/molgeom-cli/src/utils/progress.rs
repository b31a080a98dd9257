use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use molgeom::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// What the bar currently shows.
///
/// A phase either announces its length with `TaskStart` (one step per coupling record)
/// or streams increments without one (one step per trajectory frame). Streaming phases
/// keep the spinner and count frames in the message instead.
struct BarState {
    bar: ProgressBar,
    phase: &'static str,
    bounded: bool,
}

impl BarState {
    fn streaming_message(&self) -> String {
        format!("{}: {} frame(s)", self.phase, self.bar.position())
    }
}

/// Renders workflow progress on stderr with `indicatif`.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks state without drawing anything (`--quiet`).
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(Self::spinner_style());
        bar.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState {
                bar,
                phase: "",
                bounded: false,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress state mutex was poisoned; dropping a progress event.");
                return;
            };
            Self::apply(&mut state, progress);
        })
    }

    fn apply(state: &mut BarState, progress: Progress) {
        let bar = &state.bar;
        match progress {
            Progress::PhaseStart { name } => {
                bar.reset();
                bar.set_length(0);
                bar.set_style(Self::spinner_style());
                bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                bar.set_message(name);
                state.phase = name;
                state.bounded = false;
            }
            Progress::TaskStart { total_steps } => {
                bar.disable_steady_tick();
                bar.reset();
                bar.set_length(total_steps);
                bar.set_style(Self::bar_style());
                bar.set_message(state.phase);
                state.bounded = true;
            }
            Progress::TaskIncrement => {
                bar.inc(1);
                if !state.bounded {
                    bar.set_message(state.streaming_message());
                }
            }
            Progress::TaskFinish => {
                let length = bar.length().unwrap_or(0);
                if bar.position() < length {
                    bar.set_position(length);
                }
                bar.finish();
            }
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                let summary = if state.bounded || bar.position() == 0 {
                    format!("✓ {}", state.phase)
                } else {
                    format!("✓ {}", state.streaming_message())
                };
                bar.finish_with_message(summary);
            }
            Progress::Message(msg) => {
                if bar.is_finished() {
                    bar.set_message(msg);
                } else {
                    bar.println(format!("  {}", msg));
                }
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        match ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} records ({eta})") {
            Ok(style) => style
                .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                })
                .progress_chars("##-"),
            Err(_) => ProgressStyle::default_bar(),
        }
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn snapshot(handler: &CliProgressHandler) -> (String, u64, Option<u64>, bool) {
        let state = handler.state.lock().unwrap();
        let bar = &state.bar;
        (bar.message(), bar.position(), bar.length(), bar.is_finished())
    }

    #[test]
    fn fresh_handler_shows_nothing() {
        let (message, position, length, finished) = snapshot(&CliProgressHandler::hidden());
        assert_eq!(message, "");
        assert_eq!(position, 0);
        assert_eq!(length, Some(0));
        assert!(finished);
    }

    #[test]
    fn feature_records_fill_a_bounded_bar() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Features" });
        callback(Progress::TaskStart { total_steps: 4 });
        callback(Progress::TaskIncrement);
        assert_eq!(snapshot(&handler), ("Features".to_string(), 1, Some(4), false));

        callback(Progress::TaskFinish);
        let (_, position, _, finished) = snapshot(&handler);
        assert_eq!(position, 4);
        assert!(finished);

        callback(Progress::PhaseFinish);
        assert_eq!(snapshot(&handler).0, "✓ Features");
    }

    #[test]
    fn streamed_frames_are_counted_in_the_message() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Measuring" });
        for _ in 0..3 {
            callback(Progress::TaskIncrement);
        }
        assert_eq!(snapshot(&handler).0, "Measuring: 3 frame(s)");

        callback(Progress::PhaseFinish);
        let (message, _, _, finished) = snapshot(&handler);
        assert_eq!(message, "✓ Measuring: 3 frame(s)");
        assert!(finished);
    }

    #[test]
    fn new_phase_resets_the_previous_count() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Topology" });
        callback(Progress::TaskStart { total_steps: 2 });
        callback(Progress::TaskIncrement);
        callback(Progress::PhaseStart { name: "Measuring" });

        assert_eq!(snapshot(&handler), ("Measuring".to_string(), 0, Some(0), false));
        assert!(!handler.state.lock().unwrap().bounded);
    }

    #[test]
    fn message_after_a_finished_phase_replaces_the_summary() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Features" });
        callback(Progress::PhaseFinish);
        callback(Progress::Message("wrote 12 rows".to_string()));
        assert_eq!(snapshot(&handler).0, "wrote 12 rows");
    }

    #[test]
    fn callback_can_be_driven_from_another_thread() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Measuring" });
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        assert_eq!(snapshot(&handler).0, "✓ Measuring: 1 frame(s)");
    }
}
