//! With a handful of empty squares left, the hard Othello player searches to the
//! end of the game, so it must never miss a forced win.

use arena::games::othello::{OthelloAi, OthelloState};
use arena::search::random_move;
use arena::{ComputerPlayer, Difficulty, GameRng, GameState, Player};
use rand::SeedableRng;

fn final_margin(state: &OthelloState, me: Player) -> i32 {
    let (black, white) = state.disc_counts();
    let diff = black as i32 - white as i32;
    if me == Player::One {
        diff
    } else {
        -diff
    }
}

/// Exact best final disc margin for `me`.
fn solve(state: &OthelloState, me: Player) -> i32 {
    if state.is_terminal() {
        return final_margin(state, me);
    }
    let children = state.get_possible_moves().into_iter().map(|mv| {
        let mut child = state.clone();
        child.make_move(&mv);
        solve(&child, me)
    });
    if state.get_current_player() == me {
        children.max().unwrap_or(i32::MIN)
    } else {
        children.min().unwrap_or(i32::MAX)
    }
}

fn empties(state: &OthelloState) -> usize {
    let (black, white) = state.disc_counts();
    64 - black - white
}

fn random_endgame(seed: u64, max_empty: usize) -> Option<OthelloState> {
    let mut rng = GameRng::seed_from_u64(seed);
    let mut state = OthelloState::new();
    while !state.is_terminal() && empties(&state) > max_empty {
        let mv = random_move(&state, &mut rng)?;
        state.make_move(&mv);
    }
    (!state.is_terminal()).then_some(state)
}

#[test]
fn test_hard_player_plays_perfect_endgames() {
    let ai = OthelloAi::default();
    let mut positions = 0;
    for seed in 0..40 {
        let Some(state) = random_endgame(seed, 4) else {
            continue;
        };
        positions += 1;
        let me = state.get_current_player();
        let best = solve(&state, me);

        let mut rng = GameRng::seed_from_u64(seed);
        let mv = ai.choose_move(&state, Difficulty::Hard, &mut rng).unwrap();
        let mut after = state.clone();
        after.make_move(&mv);
        let achieved = solve(&after, me);

        assert_eq!(achieved, best, "seed {}: chose {:?} worth {} instead of {}", seed, mv, achieved, best);
        if best > 0 {
            assert!(achieved > 0, "seed {}: missed a forced win", seed);
        }
    }
    assert!(positions >= 20, "only {} endgames reached", positions);
}
