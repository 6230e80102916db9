use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::warn;
use tranchesel::engine::progress::{Progress, ProgressCallback};

#[derive(Debug)]
pub enum UiEvent {
    Progress(Progress),
    Log(String),
}

pub struct UiManager {
    mp: Arc<MultiProgress>,
    state: BarState,
    event_receiver: mpsc::Receiver<UiEvent>,
    shutdown_receiver: watch::Receiver<bool>,
    _sentinel_bar: ProgressBar,
}

#[derive(Default)]
struct BarState {
    active_bar: Option<ProgressBar>,
    base_message: String,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, event_receiver) = mpsc::channel(1024);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let mp = Arc::new(MultiProgress::new());
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        let _sentinel_bar = mp.add(ProgressBar::hidden());
        let manager = Self {
            mp,
            state: BarState::default(),
            event_receiver,
            shutdown_receiver,
            _sentinel_bar,
        };

        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
                result = self.shutdown_receiver.changed() => {
                    if result.is_err() || *self.shutdown_receiver.borrow() {
                        break;
                    }
                }
            }
        }
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(event);
        }
        if let Some(bar) = self.state.active_bar.take() {
            bar.finish_and_clear();
        }
        self._sentinel_bar.finish_and_clear();
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Log(msg) => {
                self.mp.println(msg).ok();
            }
            UiEvent::Progress(progress) => self.handle_progress(progress),
        }
    }

    fn handle_progress(&mut self, progress: Progress) {
        match progress {
            Progress::PhaseStart { name } => {
                if let Some(bar) = self.state.active_bar.take() {
                    bar.finish_and_clear();
                }

                let pb = self.mp.add(ProgressBar::new_spinner());
                pb.enable_steady_tick(Duration::from_millis(80));
                pb.set_style(Self::spinner_style());
                pb.set_message(name.to_string());

                self.state.active_bar = Some(pb);
                self.state.base_message = name.to_string();
            }
            Progress::PhaseFinish => {
                if let Some(bar) = self.state.active_bar.take() {
                    bar.finish_and_clear();
                }

                let final_message = format!("✓ {}", self.state.base_message);
                self.mp.println(final_message).ok();

                self.state.base_message.clear();
            }
            Progress::TaskStart { total } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.set_style(Self::bar_style());
                    bar.set_length(total);
                    bar.set_position(0);
                    bar.disable_steady_tick();
                }
            }
            Progress::TaskIncrement { amount } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.inc(amount);
                }
            }
            Progress::TaskFinish => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.finish();
                }
            }
            Progress::RoundFinished {
                round,
                pattern,
                ligands,
                target,
            } => {
                let line = format!(
                    "  Round {:>3}: {} -> {} / {} ligands",
                    round, pattern, ligands, target
                );
                self.mp.println(line).ok();
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.set_message(format!(
                        "{} ({} ligands)",
                        self.state.base_message, ligands
                    ));
                }
            }
            Progress::StatusUpdate { text } => {
                if let Some(bar) = self.state.active_bar.as_ref() {
                    bar.set_message(format!("{} ({})", self.state.base_message, text));
                }
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<45} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("━╸ ")
    }
}

#[derive(Clone)]
pub struct CliProgressHandler {
    sender: mpsc::Sender<UiEvent>,
}

impl CliProgressHandler {
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self { sender }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let sender = self.sender.clone();
        Box::new(move |progress: Progress| {
            if let Err(e) = sender.try_send(UiEvent::Progress(progress)) {
                warn!("Failed to send progress update to UI channel: {}", e);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_manager() -> (UiManager, mpsc::Sender<UiEvent>) {
        let (manager, sender, _shutdown) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        (manager, sender)
    }

    fn start_phase(manager: &mut UiManager, name: &'static str) {
        manager.handle_event(UiEvent::Progress(Progress::PhaseStart { name }));
    }

    #[test]
    fn handle_phase_start_creates_new_spinner() {
        let (mut manager, _) = setup_manager();
        assert!(manager.state.active_bar.is_none());

        start_phase(&mut manager, "Seeding");

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Seeding");
        assert_eq!(manager.state.base_message, "Seeding");
    }

    #[test]
    fn handle_phase_start_replaces_existing_bar() {
        let (mut manager, _) = setup_manager();
        start_phase(&mut manager, "Seeding");
        start_phase(&mut manager, "Filter Search");

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Filter Search");
        assert_eq!(manager.state.base_message, "Filter Search");
    }

    #[test]
    fn handle_phase_finish_clears_active_bar() {
        let (mut manager, _) = setup_manager();
        start_phase(&mut manager, "Trimming");

        manager.handle_event(UiEvent::Progress(Progress::PhaseFinish));

        assert!(manager.state.active_bar.is_none());
        assert!(manager.state.base_message.is_empty());
    }

    #[test]
    fn task_events_drive_the_bar() {
        let (mut manager, _) = setup_manager();
        start_phase(&mut manager, "Rank Scan");

        manager.handle_event(UiEvent::Progress(Progress::TaskStart { total: 100 }));
        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.length(), Some(100));
        assert_eq!(bar.position(), 0);

        manager.handle_event(UiEvent::Progress(Progress::TaskIncrement { amount: 10 }));
        assert_eq!(manager.state.active_bar.as_ref().unwrap().position(), 10);

        manager.handle_event(UiEvent::Progress(Progress::TaskFinish));
        assert!(manager.state.active_bar.as_ref().unwrap().is_finished());
    }

    #[test]
    fn round_finished_updates_bar_message() {
        let (mut manager, _) = setup_manager();
        start_phase(&mut manager, "Filter Search");

        manager.handle_event(UiEvent::Progress(Progress::RoundFinished {
            round: 1,
            pattern: "[AB][X]".to_string(),
            ligands: 17,
            target: 15,
        }));

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Filter Search (17 ligands)");
    }

    #[test]
    fn handle_status_update_changes_bar_message() {
        let (mut manager, _) = setup_manager();
        start_phase(&mut manager, "Seeding");

        manager.handle_event(UiEvent::Progress(Progress::StatusUpdate {
            text: "seed [A][X] -> 10 ligands".into(),
        }));

        let bar = manager.state.active_bar.as_ref().unwrap();
        assert_eq!(bar.message(), "Seeding (seed [A][X] -> 10 ligands)");
    }

    #[tokio::test]
    async fn cli_progress_handler_sends_progress_event() {
        let (sender, mut receiver) = mpsc::channel(1);
        let handler = CliProgressHandler::new(sender);
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Testing" });

        match receiver.recv().await {
            Some(UiEvent::Progress(Progress::PhaseStart { name })) => assert_eq!(name, "Testing"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn run_drains_pending_events_and_stops_on_shutdown() {
        let (manager, sender, shutdown) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        let handle = tokio::spawn(manager.run());

        sender
            .send(UiEvent::Log("log line".to_string()))
            .await
            .unwrap();
        shutdown.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("UI manager did not stop")
            .unwrap();
    }

    #[test]
    fn log_and_status_events_print_without_a_bar() {
        let (mut manager, _) = setup_manager();
        manager.handle_event(UiEvent::Log("Test log message".to_string()));
        manager.handle_event(UiEvent::Progress(Progress::StatusUpdate {
            text: "seed [A][X] -> 10 ligands".to_string(),
        }));
        assert!(manager.state.active_bar.is_none());
    }
}
