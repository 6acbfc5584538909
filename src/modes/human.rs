use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Instant;
use tokio::time::{interval, MissedTickBehavior};

use crate::audio::{AudioBackend, SoundCue};
use crate::game::{Direction, Game, GameConfig, GameEvent, Geometry, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

use super::tick_gate::TickGate;

/// Runs `restore` on drop unless disarmed
///
/// Covers early returns and unwinding panics between raw mode going on and
/// the normal cleanup path.
struct TerminalGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    fn disarm(mut self) {
        self.restore = None;
    }
}

impl<F: FnOnce()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

/// Best-effort terminal restore when the normal cleanup cannot run
fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stderr = stderr();
    let _ = execute!(stderr, LeaveAlternateScreen, Show);
}

/// Keyboard-driven play in the terminal
///
/// One frame polls input, runs a simulation tick when the [`TickGate`]
/// allows it, counts the level-up banner down, syncs the background music
/// and draws.
pub struct HumanMode<A: AudioBackend> {
    game: Game,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: A,
    tick_gate: TickGate,
    last_frame: Instant,
    should_quit: bool,
}

impl<A: AudioBackend> HumanMode<A> {
    pub fn new(config: GameConfig, audio: A) -> Self {
        let now = Instant::now();
        let tick_gate = TickGate::new(config.tick_interval(), now);
        let renderer = Renderer::new(Geometry::from_config(&config));
        let mut metrics = GameMetrics::new();
        metrics.on_run_start(now);

        Self {
            game: Game::new(config),
            metrics,
            renderer,
            input_handler: InputHandler::new(),
            audio,
            tick_gate,
            last_frame: now,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard::new(restore_terminal);
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.audio.set_music_playing(false);
        guard.disarm();
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Session over: {} games played, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.game.config().frame_interval());
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        self.last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Simulation and drawing
                _ = frame_timer.tick() => {
                    self.advance_frame(Instant::now());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = &mut ctrl_c => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => self.steer(direction),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn steer(&mut self, direction: Direction) {
        let was_running = self.game.is_running();
        if self.game.steer(direction) && !was_running {
            self.metrics.on_run_start(Instant::now());
        }
    }

    /// Everything a frame does except drawing
    fn advance_frame(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        if self.tick_gate.ready(now) {
            let outcome = self.game.update();
            self.apply_outcome(&outcome);
        }

        self.game.tick_banner(elapsed);
        self.audio.set_music_playing(self.game.is_running());
        if self.game.is_running() {
            self.metrics.update(now);
        }
    }

    fn apply_outcome(&mut self, outcome: &TickOutcome) {
        for event in &outcome.events {
            if let Some(cue) = SoundCue::for_event(event) {
                self.audio.play(cue);
            }
            if let GameEvent::GameOver { final_score } = event {
                self.metrics.on_game_over(*final_score);
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, GameStatus};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::cell::Cell as Flag;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<SoundCue>,
        music_playing: bool,
    }

    impl AudioBackend for RecordingAudio {
        fn play(&mut self, cue: SoundCue) {
            self.played.push(cue);
        }

        fn set_music_playing(&mut self, playing: bool) {
            self.music_playing = playing;
        }
    }

    fn test_mode() -> HumanMode<RecordingAudio> {
        let mut config = GameConfig::default();
        config.seed = Some(1);
        config.tick_interval_ms = 100;
        let mut mode = HumanMode::new(config, RecordingAudio::default());
        mode.game.place_food(Cell::new(20, 20));
        mode
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = test_mode();
        assert!(mode.game.is_running());
        assert_eq!(mode.game.score(), 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_frames_tick_only_on_interval() {
        let mut mode = test_mode();
        let start = mode.last_frame;

        mode.advance_frame(start + Duration::from_millis(50));
        assert_eq!(mode.game.snake().head(), Cell::new(6, 9));
        assert!(mode.audio.music_playing);

        mode.advance_frame(start + Duration::from_millis(100));
        assert_eq!(mode.game.snake().head(), Cell::new(7, 9));

        mode.advance_frame(start + Duration::from_millis(150));
        assert_eq!(mode.game.snake().head(), Cell::new(7, 9));
    }

    #[test]
    fn test_arrow_key_steers() {
        let mut mode = test_mode();
        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.game.snake().direction(), Direction::Down);

        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.game.snake().direction(), Direction::Down);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = test_mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_game_over_cues_and_resume() {
        let mut mode = test_mode();
        let start = mode.last_frame;
        mode.handle_event(key(KeyCode::Up));

        for n in 1..=10 {
            mode.advance_frame(start + Duration::from_millis(100 * n));
        }

        assert_eq!(mode.game.status(), GameStatus::Stopped);
        assert_eq!(mode.audio.played, vec![SoundCue::Wall, SoundCue::GameOver]);
        assert!(!mode.audio.music_playing);
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Right));
        mode.advance_frame(start + Duration::from_millis(1050));
        assert!(mode.game.is_running());
        assert!(mode.audio.music_playing);
    }

    #[test]
    fn test_eating_plays_cue() {
        let mut mode = test_mode();
        let start = mode.last_frame;
        mode.game.place_food(Cell::new(7, 9));

        mode.advance_frame(start + Duration::from_millis(100));

        assert_eq!(mode.game.score(), 1);
        assert_eq!(mode.audio.played, vec![SoundCue::Eat]);
    }

    #[test]
    fn test_banner_counts_down_with_frames() {
        let mut mode = test_mode();
        let start = mode.last_frame;

        for n in 1..=3u32 {
            let head = mode.game.snake().head();
            mode.game.place_food(head.step(Direction::Right));
            mode.advance_frame(start + Duration::from_millis(100) * n);
        }
        assert!(mode.game.banner().is_some());
        assert!(mode.audio.played.contains(&SoundCue::LevelUp));

        mode.advance_frame(start + Duration::from_millis(2350));
        assert!(mode.game.banner().is_none());
    }

    #[test]
    fn test_terminal_guard_restores_on_early_return() {
        let restored = Flag::new(0);
        let setup = || -> Result<()> {
            let _guard = TerminalGuard::new(|| restored.set(restored.get() + 1));
            anyhow::bail!("Failed to enter alternate screen")
        };

        assert!(setup().is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_terminal_guard_restores_on_panic() {
        let restored = Flag::new(0);
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = TerminalGuard::new(|| restored.set(restored.get() + 1));
            panic!("frame loop failed");
        }));

        assert!(result.is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_terminal_guard_disarmed_on_clean_exit() {
        let restored = Flag::new(0);
        let guard = TerminalGuard::new(|| restored.set(restored.get() + 1));
        guard.disarm();
        assert_eq!(restored.get(), 0);
    }
}
