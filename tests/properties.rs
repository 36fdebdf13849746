//! Property-based tests for the rule engine.
//!
//! Boards are generated either as arbitrary stone layouts or by playing
//! random legal moves from the empty board.

use std::collections::HashSet;

use nine_go::board::{Board, Color, Point};
use nine_go::constants::N;
use nine_go::error::MoveError;
use nine_go::game::Game;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point> {
    (0..N, 0..N)
}

fn arb_color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::Black), Just(Color::White)]
}

/// Any layout of stones; not necessarily reachable in play.
fn arb_board() -> impl Strategy<Value = Board> {
    proptest::collection::vec(0u8..3, N * N).prop_map(|cells| {
        let rows: Vec<String> = cells
            .chunks(N)
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        1 => 'X',
                        2 => 'O',
                        _ => '.',
                    })
                    .collect()
            })
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        Board::from_rows(&rows)
    })
}

/// A game reached by random legal moves (and the odd pass).
fn arb_game() -> impl Strategy<Value = Game> {
    proptest::collection::vec(0usize..1000, 0..60).prop_map(|choices| {
        let mut game = Game::new();
        for choice in choices {
            if game.is_over() {
                break;
            }
            let moves = game.legal_moves(game.to_move());
            if moves.is_empty() || choice % 50 == 0 {
                game.pass().unwrap();
            } else {
                game.attempt_move(moves[choice % moves.len()]).unwrap();
            }
        }
        game
    })
}

/// Reference answer: BFS over same-colored stones looking for an empty neighbor.
fn reachable_empty(board: &Board, start: Point) -> bool {
    let Some(color) = board.get(start) else {
        return false;
    };
    let mut seen = HashSet::new();
    let mut queue = vec![start];
    while let Some(pt) = queue.pop() {
        if !seen.insert(pt) {
            continue;
        }
        for n in board.neighbors(pt) {
            match board.get(n) {
                None => return true,
                Some(c) if c == color => queue.push(n),
                _ => {}
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn group_liberties_matches_reachability(board in arb_board(), pt in arb_point()) {
        prop_assert_eq!(board.group_liberties(pt), reachable_empty(&board, pt));
        prop_assert_eq!(board.group_liberties(pt), board.liberty_count(pt) > 0);
    }

    #[test]
    fn remove_group_clears_exactly_the_group(board in arb_board(), pt in arb_point()) {
        let mut after = board;
        let removed: HashSet<Point> = after.remove_group(pt).into_iter().collect();
        for row in 0..N {
            for col in 0..N {
                let p = (row, col);
                if removed.contains(&p) {
                    prop_assert_eq!(board.get(p), board.get(pt));
                    prop_assert_eq!(after.get(p), None);
                } else {
                    prop_assert_eq!(after.get(p), board.get(p));
                }
            }
        }
    }

    #[test]
    fn rejected_moves_leave_game_unchanged(
        game in arb_game(),
        pt in arb_point(),
        color in arb_color(),
    ) {
        let mut probe = game.clone();
        let legal = game.is_legal_move(pt, color);
        match probe.play(pt, color) {
            Ok(_) => prop_assert!(legal && !game.is_over()),
            Err(MoveError::GameOver) => prop_assert!(game.is_over()),
            Err(_) => {
                prop_assert!(!legal);
                prop_assert_eq!(probe.board(), game.board());
                prop_assert_eq!(probe.to_move(), game.to_move());
                prop_assert_eq!(probe.ko_point(), game.ko_point());
                prop_assert_eq!(probe.history_len(), game.history_len());
            }
        }
    }

    #[test]
    fn every_stone_keeps_a_liberty_after_legal_play(game in arb_game()) {
        let board = game.board();
        for row in 0..N {
            for col in 0..N {
                if board.get((row, col)).is_some() {
                    prop_assert!(board.group_liberties((row, col)));
                }
            }
        }
    }

    #[test]
    fn undo_restores_previous_state(game in arb_game(), pt in arb_point()) {
        let mut next = game.clone();
        let color = game.to_move();
        if next.play(pt, color).is_ok() {
            next.undo().unwrap();
            prop_assert_eq!(next.board(), game.board());
            prop_assert_eq!(next.to_move(), game.to_move());
            prop_assert_eq!(next.ko_point(), game.ko_point());
            prop_assert_eq!(next.consecutive_passes(), game.consecutive_passes());
            prop_assert_eq!(next.last_move(), game.last_move());
        }
    }

    #[test]
    fn ko_is_set_only_by_single_captures(game in arb_game(), pt in arb_point()) {
        let mut next = game.clone();
        if let Ok(outcome) = next.attempt_move(pt) {
            let expected = match outcome.captured.as_slice() {
                [single] => Some(*single),
                _ => None,
            };
            prop_assert_eq!(next.ko_point(), expected);
        }
    }

    #[test]
    fn stone_count_score_formula(game in arb_game()) {
        let result = game.result();
        let board = game.board();
        prop_assert_eq!(result.black, board.count(Color::Black));
        prop_assert_eq!(result.white, board.count(Color::White));
        prop_assert_eq!(result.margin, result.black as f32 - (result.white as f32 + 3.75));
    }

    #[test]
    fn area_is_at_least_stone_count(board in arb_board(), color in arb_color()) {
        prop_assert!(board.area(color) >= board.count(color));
        prop_assert!(board.area(Color::Black) + board.area(Color::White) <= (N * N) as u32);
    }
}
