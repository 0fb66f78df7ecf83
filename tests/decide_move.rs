use assert_matches::assert_matches;
use mcts::games::gomoku::{detect_win, Board, GomokuMove, Stone, BOARD_SIZE, CENTER};
use mcts::{decide_move, EngineError, MctsPlayer, SearchConfig};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::io::Write;

fn board_with(stones: &[(usize, usize, Stone)]) -> Board {
    let mut board = Board::new();
    for &(r, c, s) in stones {
        board.place(GomokuMove(r, c), s);
    }
    board
}

/// Fills every cell in 2x2 colour blocks; no line is longer than two.
fn patterned_board(empty: &[GomokuMove]) -> Board {
    let mut board = Board::new();
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if empty.contains(&GomokuMove(r, c)) {
                continue;
            }
            let stone = if ((c + 2 * r) / 2) % 2 == 0 { Stone::Black } else { Stone::White };
            board.place(GomokuMove(r, c), stone);
        }
    }
    board
}

fn midgame_board() -> Board {
    board_with(&[
        (9, 9, Stone::Black),
        (9, 10, Stone::White),
        (10, 10, Stone::Black),
        (8, 8, Stone::White),
        (10, 9, Stone::Black),
        (11, 9, Stone::White),
    ])
}

#[test]
fn test_empty_board_opens_at_center() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    for color in [Stone::Black, Stone::White] {
        assert_eq!(decide_move(&Board::new(), color, &mut rng).unwrap(), CENTER);
    }
    assert_eq!(CENTER, GomokuMove(9, 9));
}

#[test]
fn test_full_board_has_no_moves() {
    let board = patterned_board(&[]);
    assert!(board.is_full());
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    assert_matches!(
        decide_move(&board, Stone::Black, &mut rng),
        Err(EngineError::NoMovesAvailable)
    );
}

#[test]
fn test_malformed_boards_are_rejected() {
    let short = vec![vec!['.'; BOARD_SIZE]; BOARD_SIZE - 1];
    assert_matches!(Board::from_grid(&short), Err(EngineError::InvalidBoard(_)));

    let mut ragged = vec![vec!['.'; BOARD_SIZE]; BOARD_SIZE];
    ragged[0].push('.');
    assert_matches!(Board::from_grid(&ragged), Err(EngineError::InvalidBoard(_)));

    let mut unknown = vec![vec!['.'; BOARD_SIZE]; BOARD_SIZE];
    unknown[4][4] = '?';
    assert_matches!(Board::from_grid(&unknown), Err(EngineError::InvalidBoard(_)));
}

#[test]
fn test_board_is_not_mutated_and_move_is_empty() {
    let board = midgame_board();
    let before = board.clone();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);

    let mv = decide_move(&board, Stone::Black, &mut rng).unwrap();
    assert_eq!(board, before);
    assert!(board.is_empty_at(mv.0, mv.1));
}

#[test]
fn test_same_seed_same_move() {
    let board = midgame_board();
    let config = SearchConfig::default();
    let mut first = MctsPlayer::seeded(config, 1234);
    let mut second = MctsPlayer::seeded(config, 1234);

    assert_eq!(
        first.decide_move(&board, Stone::White).unwrap(),
        second.decide_move(&board, Stone::White).unwrap()
    );
    assert_eq!(first.last_stats(), second.last_stats());
}

#[test]
fn test_first_reply_is_next_to_the_opening_stone() {
    let board = board_with(&[(9, 9, Stone::Black)]);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
    let mv = decide_move(&board, Stone::White, &mut rng).unwrap();
    let neighbors = [GomokuMove(8, 9), GomokuMove(10, 9), GomokuMove(9, 8), GomokuMove(9, 10)];
    assert!(neighbors.contains(&mv), "unexpected reply {}", mv);
}

#[test]
fn test_forced_win_is_played() {
    // Black's only empty neighbour completes the row.
    let mut stones: Vec<_> = (0..4).map(|c| (0, c, Stone::Black)).collect();
    stones.extend((0..4).map(|c| (1, c, Stone::White)));
    let mut board = board_with(&stones);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
    let mv = decide_move(&board, Stone::Black, &mut rng).unwrap();
    assert_eq!(mv, GomokuMove(0, 4));

    board.place(mv, Stone::Black);
    assert_eq!(detect_win(&board, mv.0, mv.1), Some(Stone::Black));
}

#[test]
fn test_winning_completion_is_found() {
    let mut stones: Vec<_> = (0..4).map(|c| (0, c, Stone::Black)).collect();
    stones.extend((0..3).map(|c| (1, c, Stone::White)));
    let board = board_with(&stones);

    let found = (0..10).any(|seed| {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        decide_move(&board, Stone::Black, &mut rng).unwrap() == GomokuMove(0, 4)
    });
    assert!(found, "no seeded run completed the five");
}

#[test]
fn test_open_four_is_completed() {
    let mut stones: Vec<_> = (5..9).map(|c| (9, c, Stone::Black)).collect();
    stones.extend((5..8).map(|c| (10, c, Stone::White)));
    let board = board_with(&stones);
    let wins = [GomokuMove(9, 4), GomokuMove(9, 9)];

    let found = (0..10).any(|seed| {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        wins.contains(&decide_move(&board, Stone::Black, &mut rng).unwrap())
    });
    assert!(found, "no seeded run completed the open four");
}

#[test]
fn test_near_full_board_terminates() {
    let empty = [GomokuMove(0, 0), GomokuMove(9, 9), GomokuMove(18, 18)];
    let board = patterned_board(&empty);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);

    for color in [Stone::Black, Stone::White] {
        let mv = decide_move(&board, color, &mut rng).unwrap();
        assert!(empty.contains(&mv), "unexpected move {}", mv);
    }
}

#[test]
fn test_decide_from_board_file() {
    let board = midgame_board();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", board).unwrap();

    let loaded = Board::load(file.path()).unwrap();
    assert_eq!(loaded, board);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(21);
    let mv = decide_move(&loaded, Stone::Black, &mut rng).unwrap();
    assert!(loaded.is_empty_at(mv.0, mv.1));
}

#[test]
fn test_missing_board_file() {
    let dir = tempfile::tempdir().unwrap();
    assert_matches!(Board::load(dir.path().join("missing.txt")), Err(EngineError::Io(_)));
}
