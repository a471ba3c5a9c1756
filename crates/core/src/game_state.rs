//! Game state module - the session state machine
//!
//! Ties the board, movement engine, factory and scoring together:
//!
//! - **Idle**: not started yet; input and gravity are ignored
//! - **Running**: gravity and input are active
//! - **GameOver**: terminal until [`GameState::start`] runs a full reset
//!
//! Gravity, input moves and rotations each have their own [`Cooldown`], so
//! every category of motion keeps its own pace. All calls take the current
//! timestamp explicitly.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::Rng;

use crate::board::Board;
use crate::config::EngineConfig;
use crate::factory::{ActivePiece, PieceFactory};
use crate::movement::{self, MoveOutcome};
use crate::scoring::{gravity_interval_ms, Progress};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::timing::Cooldown;
use crate::types::{Direction, GameAction};

/// Pending events kept until a collaborator drains them.
const EVENT_CAPACITY: usize = 8;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

/// Notable things that happened, for sound cues and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Started,
    LinesCleared { lines: u32, points: u32 },
    LevelUp { level: u32, gravity_interval_ms: u64 },
    GameOver { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    next: ActivePiece,
    factory: PieceFactory<R>,
    progress: Progress,
    gravity: Cooldown,
    move_cooldown: Cooldown,
    rotate_cooldown: Cooldown,
    running: bool,
    over: bool,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState<StdRng> {
    /// Create an idle game. Uses `config.seed` when set, entropy otherwise.
    pub fn new(config: EngineConfig) -> Self {
        let factory = match config.seed {
            Some(seed) => PieceFactory::seeded(seed),
            None => PieceFactory::from_entropy(),
        };
        Self::with_factory(config, factory)
    }

    /// Idle game with a fixed seed and default pacing.
    pub fn seeded(seed: u64) -> Self {
        Self::new(EngineConfig::default().with_seed(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create an idle game drawing pieces from `factory`.
    pub fn with_factory(config: EngineConfig, mut factory: PieceFactory<R>) -> Self {
        let next = factory.pick();
        Self {
            config,
            board: Board::new(),
            active: None,
            next,
            factory,
            progress: Progress::new(),
            gravity: Cooldown::new(config.base_gravity_ms, 0),
            move_cooldown: Cooldown::new(config.move_cooldown_ms, 0),
            rotate_cooldown: Cooldown::new(config.rotate_cooldown_ms, 0),
            running: false,
            over: false,
            events: ArrayVec::new(),
        }
    }

    /// Begin a new game. No-op while already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.running {
            return false;
        }

        self.reset(now_ms);
        self.running = true;
        self.push_event(GameEvent::Started);
        tracing::info!("game started");
        true
    }

    /// Reinitialize the session: empty board, level 1, zero score and lines,
    /// base gravity, and two fresh pieces (current + next).
    pub fn reset(&mut self, now_ms: u64) {
        self.progress = Progress::new();
        self.over = false;
        self.board.reset();

        self.gravity = Cooldown::new(self.config.base_gravity_ms, now_ms);
        self.move_cooldown.restart(now_ms);
        self.rotate_cooldown.restart(now_ms);

        let current = self.factory.pick();
        self.next = self.factory.pick();
        // An empty board always has room at the spawn position.
        movement::spawn(&mut self.board, &current);
        self.active = Some(current);
    }

    /// Frame step: apply gravity when its interval has elapsed.
    ///
    /// Returns true when gravity fired this call.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.running || !self.gravity.ready(now_ms) {
            return false;
        }
        self.step_gravity(now_ms);
        true
    }

    fn step_gravity(&mut self, now_ms: u64) {
        let Some(mut piece) = self.active else {
            return;
        };

        match movement::try_move(&mut self.board, &mut piece, Direction::Down) {
            MoveOutcome::Moved => {
                self.active = Some(piece);
                tracing::trace!(row = piece.row, "gravity step");
            }
            MoveOutcome::Blocked(_) => self.lock_piece(now_ms),
            MoveOutcome::TopOut => self.game_over(),
        }
    }

    /// The active piece has settled: clear rows, score, then bring in the next piece.
    fn lock_piece(&mut self, now_ms: u64) {
        self.gravity.restart(now_ms);
        self.active = None;

        let lines = self.board.clear_full_rows().len() as u32;
        let result = self.progress.apply_clear(lines);

        if result.lines > 0 {
            tracing::debug!(lines, points = result.points, "lines cleared");
            self.push_event(GameEvent::LinesCleared {
                lines,
                points: result.points,
            });
        }

        if let Some(level) = result.level_up {
            let interval = gravity_interval_ms(
                level,
                self.config.base_gravity_ms,
                self.config.gravity_floor_ms,
            );
            self.gravity.set_interval(interval);
            tracing::info!(level, gravity_interval_ms = interval, "level up");
            self.push_event(GameEvent::LevelUp {
                level,
                gravity_interval_ms: interval,
            });
        }

        self.advance_piece();
    }

    /// Promote the preview piece and draw a new preview.
    fn advance_piece(&mut self) {
        let current = self.next;
        self.next = self.factory.pick();

        match movement::spawn(&mut self.board, &current) {
            MoveOutcome::Moved => self.active = Some(current),
            _ => self.game_over(),
        }
    }

    fn game_over(&mut self) {
        self.running = false;
        self.over = true;
        tracing::info!(
            score = self.progress.score,
            level = self.progress.level,
            lines = self.progress.lines,
            "game over"
        );
        self.push_event(GameEvent::GameOver {
            score: self.progress.score,
        });
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Move the active piece one cell, throttled by the move cooldown.
    ///
    /// A refused downward move does not lock the piece; only gravity locks.
    pub fn move_block(&mut self, direction: Direction, now_ms: u64) -> bool {
        if !self.running || !self.move_cooldown.ready(now_ms) {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        match movement::try_move(&mut self.board, &mut piece, direction) {
            MoveOutcome::Moved => {
                self.active = Some(piece);
                true
            }
            MoveOutcome::Blocked(_) => false,
            MoveOutcome::TopOut => {
                self.game_over();
                false
            }
        }
    }

    /// Rotate the active piece in place, throttled by the rotation cooldown.
    pub fn rotate_block(&mut self, now_ms: u64) -> bool {
        if !self.running || !self.rotate_cooldown.ready(now_ms) {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        match movement::try_rotate(&mut self.board, &mut piece) {
            Ok(()) => {
                self.active = Some(piece);
                true
            }
            Err(_) => false,
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> bool {
        match action {
            GameAction::MoveLeft => self.move_block(Direction::Left, now_ms),
            GameAction::MoveRight => self.move_block(Direction::Right, now_ms),
            GameAction::MoveDown => self.move_block(Direction::Down, now_ms),
            GameAction::Rotate => self.rotate_block(now_ms),
            GameAction::Start => self.start(now_ms),
        }
    }

    /// Drain pending events, oldest first.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Running
        } else if self.over {
            Phase::GameOver
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn gravity_interval_ms(&self) -> u64 {
        self.gravity.interval_ms()
    }

    pub fn next_piece(&self) -> &ActivePiece {
        &self.next
    }

    /// The falling piece; `None` before the first start and once a lock ended the game.
    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next.kind();
        out.running = self.running;
        out.over = self.over;
        out.level = self.progress.level;
        out.score = self.progress.score;
        out.lines = self.progress.lines;
        out.gravity_interval_ms = self.gravity.interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<StdRng> {
    fn default() -> Self {
        Self::seeded(1)
    }
}
