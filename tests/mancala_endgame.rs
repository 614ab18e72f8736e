//! Late Mancala positions reached by random play. Whenever the side to move
//! can force a win within the hard player's horizon, its choice must keep it.

use arena::games::mancala::{MancalaAi, MancalaState};
use arena::search::random_move;
use arena::{ComputerPlayer, Difficulty, GameRng, GameState, Player};
use rand::SeedableRng;

/// True if `me` can force a win within `plies` moves, extra turns included.
fn forced_win(state: &MancalaState, me: Player, plies: usize) -> bool {
    if state.is_terminal() {
        return state.get_winner() == Some(me);
    }
    if plies == 0 {
        return false;
    }
    let mut children = state.get_possible_moves().into_iter().map(|mv| {
        let mut child = state.clone();
        child.make_move(&mv);
        forced_win(&child, me, plies - 1)
    });
    if state.get_current_player() == me {
        children.any(|won| won)
    } else {
        children.all(|won| won)
    }
}

fn stones_in_pits(state: &MancalaState) -> u32 {
    [Player::One, Player::Two]
        .into_iter()
        .flat_map(MancalaState::pits)
        .map(|i| state.board()[i])
        .sum()
}

#[test]
fn test_hard_player_never_misses_a_forced_win() {
    let ai = MancalaAi::default();
    let horizon = ai.search_depth;
    let mut winning_positions = 0;

    for seed in 0..30 {
        let mut rng = GameRng::seed_from_u64(seed);
        let mut state = MancalaState::new();
        while !state.is_terminal() {
            if stones_in_pits(&state) <= 16 {
                let me = state.get_current_player();
                if forced_win(&state, me, horizon) {
                    winning_positions += 1;
                    let mv = ai.choose_move(&state, Difficulty::Hard, &mut rng).unwrap();
                    let mut after = state.clone();
                    after.make_move(&mv);
                    assert!(
                        forced_win(&after, me, horizon - 1),
                        "seed {}: {:?} gives up the win in {:?}",
                        seed,
                        mv,
                        state.board()
                    );
                }
            }
            let Some(mv) = random_move(&state, &mut rng) else {
                break;
            };
            state.make_move(&mv);
        }
    }
    assert!(winning_positions >= 10, "only {} winning positions found", winning_positions);
}
