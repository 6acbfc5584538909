use std::time::{Duration, Instant};

/// Session statistics shown next to the board
pub struct GameMetrics {
    pub run_started: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the clock of the current run
    pub fn update(&mut self, now: Instant) {
        self.elapsed_time = now.saturating_duration_since(self.run_started);
    }

    pub fn on_run_start(&mut self, now: Instant) {
        self.run_started = now;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
