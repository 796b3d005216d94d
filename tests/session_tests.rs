//! Session tests - scoring, levels, hold, lock delay and the screen machine

use srs_tetris::core::{next_shape, Board, GameSession, SimpleRng, Tetromino};
use srs_tetris::types::{
    BlockType, Color, Direction, FrameInput, GameAction, GameEvent, HeldKeys, RotationDirection,
    Screen, COLUMNS, LOCK_DELAY_MS, ROWS,
};

/// Rows `0..rows` filled except column 0
fn well_board(rows: usize) -> Board {
    let mut board = Board::new();
    for row in 0..rows {
        for col in 1..COLUMNS {
            board.set_cell(row, col, Color::DEAD);
        }
    }
    board
}

/// A seed whose first random spawn after `last` is `kind`
fn seed_spawning(kind: BlockType, last: BlockType) -> u32 {
    (1..)
        .find(|&s| next_shape(&mut SimpleRng::new(s), Some(last)) == kind)
        .unwrap()
}

/// Stand an I upright and slide it into column 0
fn drop_i_into_well(game: &mut GameSession) -> bool {
    assert_eq!(game.active().kind(), BlockType::I);
    assert!(game.rotate(RotationDirection::Clockwise));
    while game.move_horizontal(Direction::Left) {}
    assert_eq!(game.active().pivot().col, 0);
    game.hard_drop()
}

fn spawned(events: &[GameEvent]) -> Vec<BlockType> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Spawned { kind } => Some(*kind),
            _ => None,
        })
        .collect()
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameSession::new(12345);
    assert_eq!(game.screen(), Screen::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.hold_piece(), None);

    let events: Vec<GameEvent> = game.drain_events().collect();
    assert_eq!(events.first(), Some(&GameEvent::Started));
    assert_eq!(spawned(&events), vec![game.active().kind()]);
}

#[test]
fn test_same_seed_same_spawn_sequence() {
    let play = |seed: u32| {
        let mut game = GameSession::new(seed);
        for _ in 0..30 {
            game.hard_drop();
        }
        let events: Vec<GameEvent> = game.drain_events().collect();
        spawned(&events)
    };

    assert_eq!(play(777), play(777));
    assert_ne!(play(777), play(123_456));
}

#[test]
fn test_hard_drop_on_empty_board_reaches_row_0() {
    let mut game = GameSession::new(5);
    let kind = game.active().kind();
    assert!(game.hard_drop());

    let filled: usize = (0..COLUMNS)
        .filter(|&col| !game.board().cell_at(0, col).is_empty())
        .count();
    assert!(filled >= 1, "{:?} left row 0 empty", kind);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_single_line_clear_shifts_rows_down() {
    // Row 0 full except the four columns the spawned I covers.
    let mut board = Board::new();
    for col in (0..3).chain(7..COLUMNS) {
        board.set_cell(0, col, Color::DEAD);
    }
    board.set_cell(1, 9, Color::GREEN);

    let mut game = GameSession::with_board(1, board, BlockType::I);
    assert!(game.hard_drop());

    assert_eq!(game.score(), 100);
    assert_eq!(game.lines(), 1);
    // Old row 1 moved into row 0.
    assert_eq!(game.board().cell_at(0, 9), Color::GREEN);
    assert!((0..9).all(|col| game.board().cell_at(0, col).is_empty()));
    assert!(game.board().row(ROWS - 1).iter().all(|c| c.is_empty()));

    let events: Vec<GameEvent> = game.drain_events().collect();
    assert!(events.contains(&GameEvent::Locked {
        kind: BlockType::I,
        lines_cleared: 1,
        points: 100,
        score: 100,
    }));
}

#[test]
fn test_four_lines_score_800() {
    let mut game = GameSession::with_board(1, well_board(4), BlockType::I);
    assert!(drop_i_into_well(&mut game));

    assert_eq!(game.score(), 800);
    assert_eq!(game.lines(), 4);
    assert_eq!(game.level(), 1);
    assert!(game.board().cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_fifth_line_levels_up_and_speeds_gravity() {
    let seed = seed_spawning(BlockType::I, BlockType::I);
    let mut game = GameSession::with_board(seed, well_board(5), BlockType::I);
    let initial_interval = game.frames_for_gravity();

    assert!(drop_i_into_well(&mut game));
    assert_eq!(game.lines(), 4);
    assert_eq!(game.level(), 1);

    // The leftover row still has its hole in column 0.
    assert!(drop_i_into_well(&mut game));
    assert_eq!(game.lines(), 5);
    assert_eq!(game.level(), 2);
    assert_eq!(game.score(), 900);
    assert!(game.frames_for_gravity() < initial_interval);
    assert_eq!(game.frames_for_gravity(), 27);

    let events: Vec<GameEvent> = game.drain_events().collect();
    assert!(events.contains(&GameEvent::LevelUp {
        level: 2,
        frames_for_gravity: 27,
    }));
}

#[test]
fn test_hold_swaps_once_per_piece() {
    let mut game = GameSession::with_board(9, Board::new(), BlockType::T);

    assert!(game.hold());
    assert_eq!(game.hold_piece(), Some(BlockType::T));
    let replacement = game.active().kind();
    assert!(!game.hold(), "second hold in one piece life must be refused");
    assert_eq!(game.active().kind(), replacement);

    assert!(game.hard_drop());
    assert!(!game.hold_locked());
    let next = game.active().kind();
    assert!(game.hold());
    assert_eq!(game.active().kind(), BlockType::T);
    assert_eq!(game.hold_piece(), Some(next));

    // Swapped-in pieces start at the spawn point.
    assert_eq!(game.active().pivot().row, ROWS as i32 - 2);
}

#[test]
fn test_hold_swap_does_not_count_as_a_spawn() {
    // The draw after the second lock must avoid the last random shape, not
    // the shape that came back from hold. Pick a seed where the two differ.
    let draws = |seed: u32| {
        let mut rng = SimpleRng::new(seed);
        let first = next_shape(&mut rng, Some(BlockType::T));
        let second = next_shape(&mut rng, Some(first));
        let after_swap = next_shape(&mut rng.clone(), Some(BlockType::T));
        let third = next_shape(&mut rng, Some(second));
        (first, second, third, after_swap)
    };
    let seed = (1..)
        .find(|&s| {
            let (_, _, third, after_swap) = draws(s);
            third != after_swap
        })
        .unwrap();
    let (first, second, third, _) = draws(seed);

    let mut game = GameSession::with_board(seed, Board::new(), BlockType::T);
    assert!(game.hold()); // empty slot: banks T, draws a random piece
    assert_eq!(game.active().kind(), first);
    assert!(game.hard_drop());
    assert_eq!(game.active().kind(), second);

    assert!(game.hold()); // swaps T back in
    assert_eq!(game.active().kind(), BlockType::T);
    assert!(game.hard_drop());
    assert_eq!(game.active().kind(), third);
}

#[test]
fn test_lock_delay_extends_at_most_four_times() {
    let mut game = GameSession::with_board(3, Board::new(), BlockType::O);
    let mut now = 1_000;
    while game.soft_drop(now) {}
    assert_eq!(game.active().pivot().row, 0);

    // Each window ends with a pending move, so it is extended.
    for (i, direction) in [Direction::Left, Direction::Right, Direction::Left, Direction::Right]
        .into_iter()
        .enumerate()
    {
        assert!(game.move_horizontal(direction));
        game.update(now + LOCK_DELAY_MS - 1);
        assert!(game.board().cells().iter().all(|c| c.is_empty()));
        now += LOCK_DELAY_MS;
        game.update(now);
        assert!(game.board().cells().iter().all(|c| c.is_empty()));
        assert_eq!(game.lock_delay().resets() as usize, i + 1);
    }

    // Credits used up: the next expiry locks even with a pending move.
    assert!(game.move_horizontal(Direction::Left));
    now += LOCK_DELAY_MS;
    game.update(now);
    assert!(!game.board().cells().iter().all(|c| c.is_empty()));
    assert_eq!(game.screen(), Screen::Playing);
}

#[test]
fn test_lock_without_moves_after_one_window() {
    let mut game = GameSession::with_board(3, Board::new(), BlockType::T);
    while game.soft_drop(0) {}
    game.update(LOCK_DELAY_MS - 1);
    assert!(game.board().cells().iter().all(|c| c.is_empty()));
    game.update(LOCK_DELAY_MS);
    assert_eq!(game.board().cell_at(0, 4), Color::VIOLET);
}

#[test]
fn test_lock_above_board_ends_round_and_start_resets() {
    let mut board = Board::new();
    for row in 0..ROWS {
        board.set_cell(row, 4, Color::DEAD);
    }
    let mut game = GameSession::with_board(11, board, BlockType::T);

    assert!(!game.hard_drop());
    assert_eq!(game.screen(), Screen::AwaitBegin);
    assert_eq!(*game.board(), board, "a rejected lock must not touch the board");
    assert!(game.snapshot().game_over());

    let events: Vec<GameEvent> = game.drain_events().collect();
    assert!(events.contains(&GameEvent::GameOver {
        score: 0,
        level: 1,
        lines: 0,
    }));

    assert!(game.apply_action(GameAction::Start));
    assert_eq!(game.screen(), Screen::Playing);
    assert!(game.board().cells().iter().all(|c| c.is_empty()));
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert!(!game.apply_action(GameAction::Start));
}

#[test]
fn test_space_restarts_and_swallows_the_rest_of_the_frame() {
    let mut board = Board::new();
    for row in 0..ROWS {
        board.set_cell(row, 4, Color::DEAD);
    }
    let mut game = GameSession::with_board(11, board, BlockType::I);
    game.hard_drop();
    assert_eq!(game.screen(), Screen::AwaitBegin);
    game.drain_events().for_each(drop);

    let mut input = FrameInput::default();
    input.actions.push(GameAction::HardDrop);
    input.actions.push(GameAction::HardDrop);
    input.held = HeldKeys {
        left: true,
        ..HeldKeys::default()
    };
    game.process_frame(&input, 0);

    assert_eq!(game.screen(), Screen::Playing);
    // The second Space was not applied as a hard drop of the new piece.
    assert!(game.board().cells().iter().all(|c| c.is_empty()));
    let fresh = Tetromino::spawn(game.active().kind(), None);
    assert_eq!(
        game.active().cells(),
        fresh.cells(),
        "held left must not shift on the start frame"
    );
}

#[test]
fn test_held_keys_shift_and_soft_drop() {
    let mut game = GameSession::with_board(2, Board::new(), BlockType::T);
    let start = game.active().pivot();

    let input = FrameInput {
        held: HeldKeys {
            left: true,
            right: false,
            soft_drop: true,
        },
        ..FrameInput::default()
    };
    game.process_frame(&input, 0);
    assert_eq!(game.active().pivot().col, start.col - 1);
    assert_eq!(game.active().pivot().row, start.row - 1);

    // Inside the auto-repeat delay nothing more happens.
    game.process_frame(&input, 33);
    assert_eq!(game.active().pivot().col, start.col - 1);
    assert_eq!(game.active().pivot().row, start.row - 1);
}

#[test]
fn test_gravity_one_row_per_second_at_default_fps() {
    let mut game = GameSession::with_board(2, Board::new(), BlockType::S);
    let row = game.active().pivot().row;
    let idle = FrameInput::default();

    for frame in 0..29u64 {
        game.process_frame(&idle, frame * 33);
    }
    assert_eq!(game.active().pivot().row, row);
    game.process_frame(&idle, 29 * 33);
    assert_eq!(game.active().pivot().row, row - 1);
}

#[test]
fn test_snapshot_mirrors_session() {
    let game = GameSession::with_board(4, Board::new(), BlockType::L);
    let snap = game.snapshot();

    assert_eq!(snap.board, *game.board());
    assert_eq!(snap.screen, Screen::Playing);
    let active = snap.active.unwrap();
    assert_eq!(active.kind, BlockType::L);
    assert_eq!(&active.cells, game.active().cells());
    assert_eq!(snap.shadow, Some(*game.shadow().cells()));
    assert_eq!(game.end_location(), game.shadow().pivot());
    assert_eq!(snap.frames_for_gravity, 30);
}
