//! Property tests over random partially played games.

use proptest::prelude::*;

use boxes_bot::board::Board;
use boxes_bot::chains::{compute_corridors, has_reached_mid_state};
use boxes_bot::heuristic::score_move;
use boxes_bot::minimax::minimax;
use boxes_bot::state::{GameState, Move};

/// Play the moves picked by `picks` from a fresh board, alternating the
/// mover after every move that completes nothing.
fn play_out(size: usize, picks: &[usize]) -> GameState {
    let mut state = GameState::new(Board::full(size), 0, 0);
    for &pick in picks {
        let moves: Vec<_> = state.board.legal_moves().collect();
        if moves.is_empty() {
            break;
        }
        let completed = state.play(Move::from(moves[pick % moves.len()]));
        if completed == 0 {
            state.my_turn = !state.my_turn;
        }
    }
    state
}

fn captured_boxes(board: &Board) -> usize {
    board.boxes().filter(|(_, _, s)| s.is_empty()).count()
}

/// Reference table for one move, from the two open counts.
fn expected_score(own: usize, neighbor: Option<usize>) -> i32 {
    let own_part = match own {
        1 => 100,
        2 => -90,
        _ => 0,
    };
    let neighbor_part = match (neighbor, own) {
        (Some(1), _) => 100,
        (Some(2), 1) => 150,
        (Some(2), _) => -90,
        _ => 0,
    };
    own_part + neighbor_part
}

proptest! {
    #[test]
    fn prop_move_removes_one_or_two_sides(size in 1usize..=5, picks in prop::collection::vec(any::<usize>(), 0..60), next in any::<usize>()) {
        let mut state = play_out(size, &picks);
        let moves: Vec<_> = state.board.legal_moves().collect();
        prop_assume!(!moves.is_empty());
        let mv = Move::from(moves[next % moves.len()]);

        let sides_before = state.board.total_open_sides();
        let captured_before = captured_boxes(&state.board);
        let points_before = state.player_score + state.opponent_score;
        let expected_removed = if state.board.neighbor(mv.x, mv.y, mv.dir).is_some() { 2 } else { 1 };

        let completed = state.play(mv);

        prop_assert_eq!(sides_before - state.board.total_open_sides(), expected_removed);
        prop_assert_eq!(usize::from(completed), captured_boxes(&state.board) - captured_before);
        prop_assert_eq!(state.player_score + state.opponent_score - points_before, completed);
    }

    #[test]
    fn prop_scores_match_captured_boxes(size in 1usize..=5, picks in prop::collection::vec(any::<usize>(), 0..80)) {
        let state = play_out(size, &picks);
        let total = usize::from(state.player_score) + usize::from(state.opponent_score);
        prop_assert_eq!(total, captured_boxes(&state.board));
        prop_assert!(total <= size * size);
        prop_assert_eq!(state.board.first_unmirrored_side(), None);
    }

    #[test]
    fn prop_score_move_follows_table(size in 1usize..=5, picks in prop::collection::vec(any::<usize>(), 0..60)) {
        let state = play_out(size, &picks);
        let board = &state.board;
        for (x, y, d) in board.legal_moves() {
            let neighbor = board.neighbor(x, y, d).map(|(nx, ny, _)| board.open_count(nx, ny));
            prop_assert_eq!(score_move(board, x, y, d), expected_score(board.open_count(x, y), neighbor));
        }
    }

    #[test]
    fn prop_corridors_cover_narrow_boxes(size in 1usize..=5, picks in prop::collection::vec(any::<usize>(), 0..80)) {
        let state = play_out(size, &picks);
        let board = &state.board;
        let coloring = compute_corridors(board);

        let narrow = board.boxes().filter(|(_, _, s)| matches!(s.len(), 1 | 2)).count();
        prop_assert_eq!(coloring.region_sizes().iter().sum::<usize>(), narrow);

        for (x, y, sides) in board.boxes() {
            match sides.len() {
                1 | 2 => {
                    prop_assert!(coloring.color(x, y).is_some());
                }
                _ => {
                    prop_assert_eq!(coloring.color(x, y), None);
                }
            }
        }

        if let Some((_, size)) = coloring.best_color() {
            prop_assert_eq!(Some(size), coloring.region_sizes().into_iter().min());
        }
    }

    #[test]
    fn prop_single_open_box_blocks_chain_phase(size in 1usize..=5, picks in prop::collection::vec(any::<usize>(), 0..80)) {
        let state = play_out(size, &picks);
        if state.board.boxes().any(|(_, _, s)| s.len() == 1) {
            prop_assert!(!has_reached_mid_state(&state.board));
        }
    }

    #[test]
    fn prop_minimax_depth_zero_is_score_diff(size in 1usize..=4, picks in prop::collection::vec(any::<usize>(), 0..40), maximizing in any::<bool>()) {
        let state = play_out(size, &picks);
        prop_assert_eq!(minimax(&state, 0, maximizing), state.score_diff());
    }
}
