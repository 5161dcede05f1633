//! Integration tests for boxes-bot
//!
//! These exercise the public API end to end: the move rule, the heuristic
//! table, the chain phase analysis, the search, and the text protocol.

use boxes_bot::board::{Board, Direction, Sides};
use boxes_bot::chains::{compute_corridors, forced_capture_count, has_reached_mid_state};
use boxes_bot::error::{EngineError, ProtocolError};
use boxes_bot::heuristic::{find_action, score_move};
use boxes_bot::minimax::{Search, alpha_beta, minimax};
use boxes_bot::protocol::{Engine, TokenReader, read_header, read_turn};
use boxes_bot::selector::{EndgameStrategy, EngineConfig, decide_move};
use boxes_bot::state::{GameState, Move, box_id};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Build a board from `(box id, sides)` pairs, the way the referee sends it.
fn board_from(size: usize, boxes: &[(&str, &str)]) -> Board {
    let mut board = Board::new(size);
    for &(id, sides) in boxes {
        let bytes = id.as_bytes();
        let x = (bytes[0] - b'A') as usize;
        let y = (bytes[1] - b'1') as usize;
        board.set_open_sides(x, y, Sides::parse(sides).unwrap());
    }
    board
}

/// Render a whole turn in protocol form.
fn turn_input(player: u8, opponent: u8, board: &Board) -> String {
    let boxes: Vec<String> = board
        .boxes()
        .filter(|(_, _, s)| !s.is_empty())
        .map(|(x, y, s)| format!("{} {s}", box_id(x, y)))
        .collect();
    format!("{player} {opponent}\n{}\n{}\n", boxes.len(), boxes.join("\n"))
}

/// Play a whole game with the engine on both sides. Completing a box
/// gives the mover another turn. Returns the final state and the number
/// of moves played.
fn self_play(size: usize, strategy: EndgameStrategy, seed: u64) -> (GameState, usize) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut state = GameState::new(Board::full(size), 0, 0);
    let mut moves = 0;

    while !state.board.is_fully_captured() {
        let before = state.board.total_open_sides();
        let chosen = decide_move(&state.board, strategy, &mut rng).expect("live board has a move");
        let completed = state.play(chosen.mv);
        let removed = before - state.board.total_open_sides();
        assert!(removed == 1 || removed == 2, "move {} removed {removed} sides", chosen.mv);
        moves += 1;
        if completed == 0 {
            state.my_turn = !state.my_turn;
        }
    }

    (state, moves)
}

// =============================================================================
// Move rule
// =============================================================================

#[test]
fn test_full_game_captures_every_box_once() {
    for seed in 0..5 {
        let (state, moves) = self_play(3, EndgameStrategy::SmallestCorridor, seed);
        assert_eq!(usize::from(state.player_score + state.opponent_score), 9);
        // 24 distinct sides on a 3x3 grid of boxes.
        assert_eq!(moves, 24);
    }
}

#[test]
fn test_full_game_with_giveaway_strategy() {
    for seed in 0..5 {
        let (state, moves) = self_play(4, EndgameStrategy::MinimizeGiveaway, seed);
        assert_eq!(usize::from(state.player_score + state.opponent_score), 16);
        assert_eq!(moves, 40);
    }
}

#[test]
fn test_points_per_move() {
    // No capture.
    let mut state = GameState::new(Board::full(2), 0, 0);
    assert_eq!(state.play_side(0, 0, Direction::Up), 0);
    assert_eq!(state.score_diff(), 0);

    // Single capture.
    let board = board_from(2, &[("A1", "R"), ("B1", "LT"), ("B2", "B")]);
    let mut state = GameState::new(board, 0, 0);
    assert_eq!(state.play_side(0, 0, Direction::Right), 1);
    assert_eq!(state.player_score, 1);

    // Double capture.
    let board = board_from(2, &[("A1", "R"), ("B1", "L")]);
    let mut state = GameState::new(board, 0, 0);
    assert_eq!(state.play_side(0, 0, Direction::Right), 2);
    assert_eq!(state.player_score, 2);
}

// =============================================================================
// Heuristic
// =============================================================================

#[test]
fn test_single_box_board_picks_last_side() {
    let board = board_from(1, &[("A1", "T")]);
    let mut rng = fastrand::Rng::with_seed(0);
    let best = find_action(&board, &mut rng).unwrap();
    assert_eq!(best.mv, Move::new(0, 0, Direction::Up));
    assert_eq!(best.score, 100);
}

#[test]
fn test_sacrifice_next_to_single() {
    let board = board_from(2, &[("A1", "RT"), ("B1", "L"), ("A2", "B")]);
    assert_eq!(score_move(&board, 0, 0, Direction::Right), 10);
}

#[test]
fn test_score_move_leaves_board_alone() {
    let board = board_from(2, &[("A1", "RT"), ("B1", "L"), ("A2", "B")]);
    let copy = board.clone();
    score_move(&board, 0, 0, Direction::Right);
    assert_eq!(board, copy);
}

// =============================================================================
// Chain phase
// =============================================================================

#[test]
fn test_chain_phase_on_typical_endgame() {
    // A 3-long corridor on the bottom row and a 2-long one in column C.
    let board = board_from(
        3,
        &[
            ("A1", "LR"),
            ("B1", "LR"),
            ("C1", "L"),
            ("C2", "T"),
            ("C3", "BR"),
        ],
    );
    assert!(!has_reached_mid_state(&board));

    let board = board_from(
        3,
        &[
            ("A1", "LR"),
            ("B1", "LR"),
            ("C1", "LR"),
            ("C2", "TR"),
            ("C3", "BR"),
        ],
    );
    assert!(has_reached_mid_state(&board));

    let coloring = compute_corridors(&board);
    assert_eq!(coloring.region_count(), 2);
    let mut sizes = coloring.region_sizes();
    sizes.sort();
    assert_eq!(sizes, vec![2, 3]);
    assert_eq!(coloring.best_color().map(|(_, size)| size), Some(2));
    assert_eq!(coloring.to_string(), "..1\n..1\n000\n");

    let mut rng = fastrand::Rng::with_seed(5);
    let chosen = decide_move(&board, EndgameStrategy::SmallestCorridor, &mut rng).unwrap();
    assert_eq!(chosen.mv.x, 2);
    assert!(chosen.mv.y >= 1);
}

#[test]
fn test_giveaway_strategy_counts_cascade() {
    let board = board_from(2, &[("A1", "TR"), ("A2", "B"), ("B1", "L")]);
    let state = GameState::new(board, 0, 0);
    assert_eq!(forced_capture_count(&state), 3);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_minimax_depth_zero_any_board() {
    for (p, o) in [(0u8, 0u8), (4, 1), (0, 9)] {
        let state = GameState::new(Board::full(3), p, o);
        assert_eq!(minimax(&state, 0, true), i32::from(p) - i32::from(o));
    }
}

#[test]
fn test_search_variants_agree_on_small_board() {
    let board = board_from(2, &[("A1", "LT"), ("A2", "BR"), ("B2", "LT"), ("B1", "R")]);
    let state = GameState::new(board, 0, 0);
    for depth in 0..=4 {
        let plain = minimax(&state, depth, true);
        assert_eq!(alpha_beta(&state, depth, i32::MIN, i32::MAX, true), plain);
        assert_eq!(Search::new().evaluate(&state, depth), Some(plain));
    }
}

// =============================================================================
// Protocol
// =============================================================================

#[test]
fn test_protocol_reads_rendered_turn() {
    let board = board_from(3, &[("A1", "LR"), ("B1", "LR"), ("C1", "LR"), ("A3", "TL")]);
    let input = format!("3\nA\n{}", turn_input(2, 3, &board));
    let mut reader = TokenReader::new(input.as_bytes());
    let header = read_header(&mut reader).unwrap();
    assert_eq!(header.board_size, 3);
    let turn = read_turn(&mut reader, 3).unwrap().unwrap();
    assert_eq!(turn.board, board);
    assert_eq!((turn.player_score, turn.opponent_score), (2, 3));
    assert!(read_turn(&mut reader, 3).unwrap().is_none());
}

#[test]
fn test_protocol_game_loop_plays_endgame() {
    let board = board_from(3, &[("A1", "LR"), ("B1", "LR"), ("C1", "LR"), ("A3", "TL")]);
    let input = format!("3\nB\n{}", turn_input(2, 3, &board));
    let mut output = Vec::new();
    let config = EngineConfig {
        search_depth: 1,
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_seed(config, 9);
    engine.run(input.as_bytes(), &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "A3 T\n");
}

#[test]
fn test_protocol_reports_no_legal_move() {
    let input = "2\nA\n0 0\n0\n";
    let mut engine = Engine::with_seed(EngineConfig::default(), 1);
    let err = engine.run(input.as_bytes(), Vec::new()).unwrap_err();
    assert!(matches!(err, ProtocolError::Engine(EngineError::NoLegalMove)));
}

#[test]
fn test_protocol_rejects_unknown_side() {
    let input = "2\nA\n0 0\n1\nA1 Q\n";
    let mut engine = Engine::with_seed(EngineConfig::default(), 1);
    let err = engine.run(input.as_bytes(), Vec::new()).unwrap_err();
    assert!(matches!(err, ProtocolError::UnknownSide { letter: 'Q', .. }));
}
