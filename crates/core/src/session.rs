//! Game session - the top-level state machine
//!
//! Owns the board, the active piece, timers, score and hold slot, and advances
//! all of them once per frame. Screens:
//!
//! - `Playing` from construction (a piece is spawned immediately)
//! - `Playing -> AwaitBegin` when a piece locks above the visible board
//! - `AwaitBegin -> Playing` on an explicit start, which resets the round

use crate::board::Board;
use crate::pieces::TilePos;
use crate::repeat::AutoRepeat;
use crate::rng::{next_shape, SimpleRng};
use crate::scoring::{level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::tetromino::Tetromino;
use crate::timing::{Gravity, LockDecision, LockDelay};
use crate::types::*;

/// Complete single-player session
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Tetromino,
    screen: Screen,
    score: u32,
    level: u32,
    lines: u32,
    fps: u32,
    gravity: Gravity,
    lock: LockDelay,
    hold: Option<BlockType>,
    /// Set once hold is used, cleared by the next successful lock
    hold_locked: bool,
    last_spawned: Option<BlockType>,
    rng: SimpleRng,
    repeat: AutoRepeat,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// New session at the default frame rate, already playing
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let first = next_shape(&mut rng, None);
        Self::assemble(rng, Board::new(), first)
    }

    /// Start a round on a prepared board with a chosen first piece
    pub fn with_board(seed: u32, board: Board, first: BlockType) -> Self {
        Self::assemble(SimpleRng::new(seed), board, first)
    }

    /// Gravity tuned for a different frame rate (one row per second at level 1)
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self.gravity = Gravity::new(fps);
        self
    }

    fn assemble(rng: SimpleRng, board: Board, first: BlockType) -> Self {
        let active = Tetromino::spawn(first, board.stack_height());
        Self {
            board,
            active,
            screen: Screen::Playing,
            score: 0,
            level: 1,
            lines: 0,
            fps: DEFAULT_FPS,
            gravity: Gravity::new(DEFAULT_FPS),
            lock: LockDelay::new(),
            hold: None,
            hold_locked: false,
            last_spawned: Some(first),
            rng,
            repeat: AutoRepeat::new(),
            events: vec![GameEvent::Started, GameEvent::Spawned { kind: first }],
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    pub fn hold_piece(&self) -> Option<BlockType> {
        self.hold
    }

    pub fn hold_locked(&self) -> bool {
        self.hold_locked
    }

    pub fn frames_for_gravity(&self) -> u32 {
        self.gravity.frames_for_gravity()
    }

    pub fn lock_delay(&self) -> &LockDelay {
        &self.lock
    }

    /// Where the active piece would land (used for the shadow)
    pub fn shadow(&self) -> Tetromino {
        self.active.landed(&self.board)
    }

    /// Pivot of the shadow piece
    pub fn end_location(&self) -> TilePos {
        self.active.end_location(&self.board)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board;
        out.active = Some(ActiveSnapshot::from(&self.active));
        out.shadow = Some(*self.shadow().cells());
        out.screen = self.screen;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.hold = self.hold;
        out.hold_locked = self.hold_locked;
        out.frames_for_gravity = self.gravity.frames_for_gravity();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Run one frame: discrete actions, held keys, then timers.
    ///
    /// An action that changes the screen (start, or a game-over hard drop)
    /// ends input handling for the frame.
    pub fn process_frame(&mut self, input: &FrameInput, now_ms: u64) {
        let mut screen_changed = false;
        for &action in &input.actions {
            let before = self.screen;
            self.apply_action(action);
            if self.screen != before {
                screen_changed = true;
                break;
            }
        }

        if !screen_changed {
            self.apply_held(input.held, now_ms);
        }
        self.update(now_ms);
    }

    /// Apply a discrete action. Returns whether it had an effect.
    ///
    /// While awaiting a new round, hard drop doubles as start (both on Space).
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match (self.screen, action) {
            (Screen::AwaitBegin, GameAction::Start | GameAction::HardDrop) => self.start(),
            (Screen::AwaitBegin, _) => false,
            (Screen::Playing, GameAction::HardDrop) => {
                self.hard_drop();
                true
            }
            (Screen::Playing, GameAction::RotateCw) => {
                self.rotate(RotationDirection::Clockwise)
            }
            (Screen::Playing, GameAction::RotateCcw) => {
                self.rotate(RotationDirection::CounterClockwise)
            }
            (Screen::Playing, GameAction::Hold) => self.hold(),
            (Screen::Playing, GameAction::Start | GameAction::Quit) => false,
        }
    }

    /// Apply continuous held-key state through the auto-repeat counters
    pub fn apply_held(&mut self, held: HeldKeys, now_ms: u64) {
        if self.screen != Screen::Playing {
            return;
        }
        let moves = self.repeat.step(held);
        if moves.soft_drop {
            self.soft_drop(now_ms);
        }
        if let Some(direction) = moves.shift {
            self.move_horizontal(direction);
        }
    }

    /// Shift the piece one column; success requests a lock-delay reset
    pub fn move_horizontal(&mut self, direction: Direction) -> bool {
        if self.screen != Screen::Playing {
            return false;
        }
        let moved = self.active.move_horizontal(&self.board, direction);
        if moved {
            self.lock.request_reset();
        }
        moved
    }

    /// Rotate with SRS kicks; any non-O rotation requests a lock-delay reset
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        if self.screen != Screen::Playing {
            return false;
        }
        let rotated = self.active.rotate(&self.board, direction);
        if rotated {
            self.lock.request_reset();
        }
        rotated
    }

    /// Move down one row by hand. Restarts the gravity count on success.
    pub fn soft_drop(&mut self, now_ms: u64) -> bool {
        if self.screen != Screen::Playing || !self.active.descend(&self.board) {
            return false;
        }
        self.gravity.restart();
        self.lock.note_pivot(self.active.pivot().row, now_ms);
        true
    }

    /// Drop to the landing row and lock immediately.
    /// Returns false when the lock ended the round (or no round is running).
    pub fn hard_drop(&mut self) -> bool {
        if self.screen != Screen::Playing {
            return false;
        }
        while self.active.descend(&self.board) {}
        self.lock_and_respawn()
    }

    /// Swap the active shape with the hold slot, once per piece
    pub fn hold(&mut self) -> bool {
        if self.screen != Screen::Playing || self.hold_locked {
            return false;
        }

        let current = self.active.kind();
        let swapped_in = self.hold.replace(current);
        self.events.push(GameEvent::Held {
            kind: current,
            swapped_in,
        });
        match swapped_in {
            Some(kind) => self.spawn_kind(kind),
            None => self.spawn_next(),
        }

        self.hold_locked = true;
        self.lock.clear();
        true
    }

    /// Fix the active piece into the board, clear lines and score them.
    ///
    /// Returns the number of lines cleared, or None if any tile lies above
    /// the visible board (the board is left untouched in that case).
    pub fn place(&mut self) -> Option<usize> {
        let cells = *self.active.cells();
        if cells.iter().any(|c| !c.in_bounds()) {
            return None;
        }

        let color = self.active.color();
        for c in &cells {
            self.board.set_cell(c.row as usize, c.col as usize, color);
        }

        let cleared = self.board.clear_and_collapse().len();
        let points = line_clear_score(cleared);
        self.score += points;
        self.lines += cleared as u32;

        let level = level_for_lines(self.lines);
        if level != self.level {
            self.level = level;
            self.gravity.speed_up();
            self.events.push(GameEvent::LevelUp {
                level,
                frames_for_gravity: self.gravity.frames_for_gravity(),
            });
        }

        self.events.push(GameEvent::Locked {
            kind: self.active.kind(),
            lines_cleared: cleared as u32,
            points,
            score: self.score,
        });

        self.gravity.restart();
        self.hold_locked = false;
        Some(cleared)
    }

    /// Begin a new round from the game-over screen
    pub fn start(&mut self) -> bool {
        if self.screen != Screen::AwaitBegin {
            return false;
        }

        self.screen = Screen::Playing;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.gravity = Gravity::new(self.fps);
        self.lock.clear();
        self.hold = None;
        self.hold_locked = false;
        self.repeat.reset();
        self.board.clear();

        self.events.push(GameEvent::Started);
        self.spawn_next();
        true
    }

    /// Advance timers by one frame: lock delay first, then gravity
    pub fn update(&mut self, now_ms: u64) {
        if self.screen != Screen::Playing {
            return;
        }

        self.gravity.advance();

        let grounded = !self.active.can_descend(&self.board);
        if self.lock.poll(grounded, now_ms) == LockDecision::Lock && !self.lock_and_respawn() {
            return;
        }

        let rows = self.gravity.due(self.level);
        if rows == 0 {
            return;
        }
        for _ in 0..rows {
            if !self.active.descend(&self.board) {
                break;
            }
        }
        self.lock.note_pivot(self.active.pivot().row, now_ms);
    }

    fn lock_and_respawn(&mut self) -> bool {
        if self.place().is_none() {
            self.screen = Screen::AwaitBegin;
            self.events.push(GameEvent::GameOver {
                score: self.score,
                level: self.level,
                lines: self.lines,
            });
            return false;
        }
        self.lock.clear();
        self.spawn_next();
        true
    }

    fn spawn_next(&mut self) {
        let kind = next_shape(&mut self.rng, self.last_spawned);
        self.last_spawned = Some(kind);
        self.spawn_kind(kind);
    }

    fn spawn_kind(&mut self, kind: BlockType) {
        self.active = Tetromino::spawn(kind, self.board.stack_height());
        self.events.push(GameEvent::Spawned { kind });
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
