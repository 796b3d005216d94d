//! Board tests - grid access, stack height and line clearing

use srs_tetris::core::Board;
use srs_tetris::types::{Color, COLUMNS, ROWS, TOTAL_TILE_COUNT};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.cells().len(), TOTAL_TILE_COUNT);

    for row in 0..ROWS {
        for col in 0..COLUMNS {
            assert!(
                board.cell_at(row, col).is_empty(),
                "Cell ({}, {}) should be empty",
                row,
                col
            );
        }
    }
    assert_eq!(board.stack_height(), None);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(ROWS as i32, 0), None);
    assert_eq!(board.get(0, COLUMNS as i32), None);

    // Above the board is never occupied.
    assert!(!board.is_occupied(ROWS as i32 + 3, 4));
}

#[test]
fn test_board_row_and_flat_index_agree() {
    let mut board = Board::new();
    assert!(board.set_cell(3, 7, Color::RED));

    assert_eq!(board.cell_at(3, 7), Color::RED);
    assert_eq!(board.flat(3 * COLUMNS + 7), Color::RED);
    assert_eq!(board.get(3, 7), Some(Color::RED));
    assert!(board.is_occupied(3, 7));
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::new();
    assert!(!board.set_cell(ROWS, 0, Color::RED));
    assert!(!board.set_cell(0, COLUMNS, Color::RED));
    assert_eq!(board, Board::new());
}

#[test]
#[should_panic]
fn test_cell_at_panics_outside_board() {
    let board = Board::new();
    let _ = board.cell_at(ROWS, 0);
}

#[test]
fn test_stack_height_is_highest_occupied_row() {
    let mut board = Board::new();
    board.set_cell(0, 0, Color::GREEN);
    board.set_cell(12, 9, Color::GREEN);
    board.set_cell(5, 4, Color::GREEN);
    assert_eq!(board.stack_height(), Some(12));
}

#[test]
fn test_clear_single_bottom_row() {
    // Row 0 full except column 3, then the missing tile arrives.
    let mut board = Board::from_ascii(&["#.........", "###.######"], Color::DEAD);
    board.set_cell(0, 3, Color::VIOLET);

    let cleared = board.clear_and_collapse();
    assert_eq!(cleared.as_slice(), &[0]);

    // Old row 1 is the new row 0, the top row is empty.
    assert_eq!(board.cell_at(0, 0), Color::DEAD);
    for col in 1..COLUMNS {
        assert!(board.cell_at(0, col).is_empty());
    }
    assert!(board.row(ROWS - 1).iter().all(|c| c.is_empty()));
    assert_eq!(board.stack_height(), Some(0));
}

#[test]
fn test_clear_preserves_order_of_survivors() {
    let mut board = Board::from_ascii(
        &[
            "#.........", // row 5
            "##########", // row 4, cleared
            ".#........", // row 3
            "##########", // row 2, cleared
            "##########", // row 1, cleared
            "..#.......", // row 0
        ],
        Color::ORANGE,
    );

    let cleared = board.clear_and_collapse();
    assert_eq!(cleared.as_slice(), &[1, 2, 4]);

    let expected = Board::from_ascii(&["#.........", ".#........", "..#......."], Color::ORANGE);
    assert_eq!(board, expected);
}

#[test]
fn test_clear_nothing_is_noop() {
    let mut board = Board::from_ascii(&["#.#.#.#.#.", ".#.#.#.#.#"], Color::YELLOW);
    let before = board;
    assert!(board.clear_and_collapse().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_clear_full_board() {
    let mut board = Board::new();
    for row in 0..ROWS {
        for col in 0..COLUMNS {
            board.set_cell(row, col, Color::LIGHT_BLUE);
        }
    }
    assert_eq!(board.clear_and_collapse().len(), ROWS);
    assert_eq!(board, Board::new());
}

#[test]
fn test_clear_matches_reference_model_on_pseudo_random_boards() {
    // Compare against a naive Vec-of-rows model.
    let mut state = 0x1234_5678u32;
    let mut next = || {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        state >> 16
    };

    for _ in 0..200 {
        let mut board = Board::new();
        let mut model: Vec<Vec<bool>> = Vec::new();
        for row in 0..ROWS {
            let full_row = next() % 3 == 0;
            let mut cells = vec![false; COLUMNS];
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = full_row || next() % 2 == 0;
                if *cell {
                    board.set_cell(row, col, Color::RED);
                }
            }
            model.push(cells);
        }

        let full: Vec<usize> = (0..ROWS).filter(|&r| model[r].iter().all(|&c| c)).collect();
        let mut survivors: Vec<Vec<bool>> = model.into_iter().filter(|r| !r.iter().all(|&c| c)).collect();
        survivors.resize(ROWS, vec![false; COLUMNS]);

        let cleared = board.clear_and_collapse();
        assert_eq!(cleared.as_slice(), full.as_slice());
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                assert_eq!(
                    !board.cell_at(row, col).is_empty(),
                    survivors[row][col],
                    "row {} col {}",
                    row,
                    col
                );
            }
        }
    }
}
