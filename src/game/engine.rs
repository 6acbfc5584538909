use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use super::{
    config::GameConfig,
    direction::Direction,
    food::Food,
    state::{Cell, Snake},
};

/// Text shown when the level goes up
pub const LEVEL_UP_TEXT: &str = "Level Up";

/// Whether the snake is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Game over; the next accepted direction resumes play
    Stopped,
}

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AteFood,
    LeveledUp { level: u32 },
    Collision(CollisionType),
    GameOver { final_score: u32 },
}

/// Events produced by one [`Game::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    pub fn ate_food(&self) -> bool {
        self.events.contains(&GameEvent::AteFood)
    }

    pub fn collision(&self) -> Option<CollisionType> {
        self.events.iter().find_map(|event| match event {
            GameEvent::Collision(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::GameOver { .. }))
    }
}

/// Transient message with a countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUpBanner {
    pub text: String,
    pub remaining: Duration,
}

impl LevelUpBanner {
    pub fn new(duration: Duration) -> Self {
        Self {
            text: LEVEL_UP_TEXT.to_string(),
            remaining: duration,
        }
    }

    /// Count down by `elapsed`; returns false once the banner has expired
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        !self.remaining.is_zero()
    }
}

/// The game: snake, food, counters and the running/stopped state machine
pub struct Game {
    config: GameConfig,
    snake: Snake,
    food: Food,
    status: GameStatus,
    score: u32,
    eat_count: u32,
    level: u32,
    banner: Option<LevelUpBanner>,
    rng: StdRng,
}

impl Game {
    /// Create a running game in the spawn layout
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let snake = Snake::new();
        let food = Food::spawn(config.grid_extent(), |cell| snake.contains(cell), &mut rng);

        Self {
            config,
            snake,
            food,
            status: GameStatus::Running,
            score: 0,
            eat_count: 0,
            level: 1,
            banner: None,
            rng,
        }
    }

    /// Run one simulation step
    ///
    /// Does nothing while stopped. Otherwise the snake advances, then food,
    /// edge and tail collisions are checked in that order; a collision ends
    /// the run and skips the remaining checks.
    pub fn update(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.status != GameStatus::Running {
            return outcome;
        }

        self.snake.advance();

        self.check_food_collision(&mut outcome);
        if self.check_edge_collision(&mut outcome) {
            return outcome;
        }
        self.check_tail_collision(&mut outcome);

        outcome
    }

    /// Apply a directional input
    ///
    /// A reversal is ignored. An accepted direction while stopped starts
    /// the next run. Returns whether the direction was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.snake.steer(direction) {
            return false;
        }

        if self.status == GameStatus::Stopped {
            self.status = GameStatus::Running;
            info!("Resuming play heading {:?}", direction);
        }
        true
    }

    /// Count the level-up banner down by one frame
    pub fn tick_banner(&mut self, elapsed: Duration) {
        if let Some(banner) = self.banner.as_mut() {
            if !banner.tick(elapsed) {
                self.banner = None;
            }
        }
    }

    fn check_food_collision(&mut self, outcome: &mut TickOutcome) {
        if self.snake.head() != self.food.position() {
            return;
        }

        self.respawn_food();
        self.snake.grow();
        self.eat_count += 1;
        outcome.events.push(GameEvent::AteFood);

        if self.eat_count >= self.config.foods_per_level {
            self.eat_count = 0;
            self.level += 1;
            self.banner = Some(LevelUpBanner::new(self.config.banner_duration()));
            outcome.events.push(GameEvent::LeveledUp { level: self.level });
            info!("Level up: now at level {}", self.level);
        }

        self.score += 1;
        debug!("Ate food, score {}", self.score);
    }

    fn check_edge_collision(&mut self, outcome: &mut TickOutcome) -> bool {
        if self.snake.head().is_within(self.config.grid_extent()) {
            return false;
        }
        self.game_over(CollisionType::Wall, outcome);
        true
    }

    fn check_tail_collision(&mut self, outcome: &mut TickOutcome) -> bool {
        if !self.snake.collides_with_body(self.snake.head()) {
            return false;
        }
        self.game_over(CollisionType::SelfCollision, outcome);
        true
    }

    /// End the run and put the board back in its spawn layout
    ///
    /// `eat_count` survives the reset, so progress towards the next level
    /// carries over into the next run.
    fn game_over(&mut self, collision: CollisionType, outcome: &mut TickOutcome) {
        let final_score = self.score;
        info!(
            "Game over ({:?}) with score {} at level {}",
            collision, final_score, self.level
        );

        self.snake.reset();
        self.respawn_food();
        self.status = GameStatus::Stopped;
        self.score = 0;
        self.level = 1;

        outcome.events.push(GameEvent::Collision(collision));
        outcome.events.push(GameEvent::GameOver { final_score });
    }

    fn respawn_food(&mut self) {
        let grid = self.config.grid_extent();
        debug_assert!(self.snake.len() < (grid as usize) * (grid as usize));
        let snake = &self.snake;
        self.food
            .respawn(grid, |cell| snake.contains(cell), &mut self.rng);
    }

    /// Move the food to `cell`, for scripted play
    #[doc(hidden)]
    pub fn place_food(&mut self, cell: Cell) {
        self.food = Food::new(cell);
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food.position()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn eat_count(&self) -> u32 {
        self.eat_count
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn banner(&self) -> Option<&LevelUpBanner> {
        self.banner.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_game() -> Game {
        let mut config = GameConfig::default();
        config.seed = Some(11);
        Game::new(config)
    }

    /// Put food right in front of the head and tick once
    fn eat_next(game: &mut Game) -> TickOutcome {
        let target = game.snake.head().step(game.snake.direction());
        game.place_food(target);
        game.update()
    }

    #[test]
    fn test_new_game() {
        let game = seeded_game();
        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.eat_count(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.banner().is_none());
        assert!(!game.snake().contains(game.food()));
    }

    #[test]
    fn test_basic_movement() {
        let mut game = seeded_game();
        game.place_food(Cell::new(20, 20));

        let outcome = game.update();

        assert!(outcome.events.is_empty());
        let body: Vec<Cell> = game.snake().segments().collect();
        assert_eq!(body, vec![Cell::new(7, 9), Cell::new(6, 9), Cell::new(5, 9)]);
    }

    #[test]
    fn test_food_consumption() {
        let mut game = seeded_game();

        let outcome = eat_next(&mut game);

        assert!(outcome.ate_food());
        assert_eq!(game.score(), 1);
        assert_eq!(game.eat_count(), 1);
        assert!(game.snake().grow_pending());
        assert!(!game.snake().contains(game.food()));

        game.place_food(Cell::new(20, 20));
        game.update();
        assert_eq!(game.snake().len(), 4);
    }

    #[test]
    fn test_level_up_after_three_foods() {
        let mut game = seeded_game();

        eat_next(&mut game);
        eat_next(&mut game);
        assert_eq!(game.level(), 1);
        assert!(game.banner().is_none());

        let outcome = eat_next(&mut game);
        assert!(outcome.events.contains(&GameEvent::LeveledUp { level: 2 }));
        assert_eq!(game.level(), 2);
        assert_eq!(game.eat_count(), 0);
        assert_eq!(game.score(), 3);

        let banner = game.banner().unwrap();
        assert_eq!(banner.text, LEVEL_UP_TEXT);
        assert_eq!(banner.remaining, Duration::from_secs(2));
    }

    #[test]
    fn test_banner_countdown() {
        let mut game = seeded_game();
        for _ in 0..3 {
            eat_next(&mut game);
        }

        game.tick_banner(Duration::from_millis(1500));
        assert_eq!(
            game.banner().map(|b| b.remaining),
            Some(Duration::from_millis(500))
        );

        game.tick_banner(Duration::from_millis(500));
        assert!(game.banner().is_none());
    }

    #[test]
    fn test_wall_collision() {
        let mut game = seeded_game();
        game.place_food(Cell::new(0, 0));
        game.snake = Snake::from_body(
            [Cell::new(24, 5), Cell::new(23, 5), Cell::new(22, 5)],
            Direction::Right,
        )
        .unwrap();
        game.score = 4;
        game.level = 3;

        let outcome = game.update();

        assert_eq!(outcome.collision(), Some(CollisionType::Wall));
        assert!(outcome.events.contains(&GameEvent::GameOver { final_score: 4 }));
        assert_eq!(game.status(), GameStatus::Stopped);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(*game.snake(), Snake::new());
    }

    #[test]
    fn test_each_edge_ends_run_once() {
        let starts = [
            (Cell::new(0, 5), Direction::Left),
            (Cell::new(24, 5), Direction::Right),
            (Cell::new(5, 0), Direction::Up),
            (Cell::new(5, 24), Direction::Down),
        ];

        for (head, direction) in starts {
            let mut game = seeded_game();
            game.place_food(Cell::new(12, 12));
            game.snake = Snake::from_body([head], direction).unwrap();

            let outcome = game.update();

            let game_overs = outcome
                .events
                .iter()
                .filter(|event| matches!(event, GameEvent::GameOver { .. }))
                .count();
            assert_eq!(game_overs, 1, "heading {:?}", direction);
            assert!(!game.is_running());
        }
    }

    #[test]
    fn test_self_collision() {
        let mut game = seeded_game();
        game.place_food(Cell::new(20, 20));
        // Head at (5,5) turning up into its own body at (5,4)
        game.snake = Snake::from_body(
            [
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 4),
                Cell::new(5, 4),
                Cell::new(4, 4),
            ],
            Direction::Left,
        )
        .unwrap();
        game.steer(Direction::Up);

        let outcome = game.update();

        assert_eq!(outcome.collision(), Some(CollisionType::SelfCollision));
        assert_eq!(game.status(), GameStatus::Stopped);
    }

    #[test]
    fn test_stopped_game_does_not_move() {
        let mut game = seeded_game();
        game.status = GameStatus::Stopped;
        let before = game.snake().clone();

        let outcome = game.update();

        assert!(outcome.events.is_empty());
        assert_eq!(*game.snake(), before);
    }

    #[test]
    fn test_steer_resumes_stopped_game() {
        let mut game = seeded_game();
        game.status = GameStatus::Stopped;

        assert!(!game.steer(Direction::Left));
        assert_eq!(game.status(), GameStatus::Stopped);

        assert!(game.steer(Direction::Up));
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.snake().direction(), Direction::Up);
    }

    #[test]
    fn test_game_over_keeps_eat_count() {
        let mut game = seeded_game();
        eat_next(&mut game);
        eat_next(&mut game);
        assert_eq!(game.eat_count(), 2);

        game.snake = Snake::from_body([Cell::new(24, 0)], Direction::Right).unwrap();
        game.update();

        assert!(!game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.eat_count(), 2);
    }

    #[test]
    fn test_food_respawned_clear_of_reset_snake() {
        for seed in 0..50 {
            let mut config = GameConfig::new(10);
            config.seed = Some(seed);
            let mut game = Game::new(config);
            game.snake = Snake::from_body([Cell::new(0, 0)], Direction::Up).unwrap();

            game.update();

            assert!(!game.snake().contains(game.food()));
        }
    }
}
