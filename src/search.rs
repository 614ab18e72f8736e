//! # Search Strategies
//!
//! Game-agnostic move selection used by the computer players:
//!
//! - **Minimax with alpha-beta pruning** over any [`GameState`], scored by a
//!   game-specific [`Evaluator`]. The maximizing role is "the side to move is
//!   the searching side", so a move that grants another turn (Mancala store
//!   landing, Othello pass) keeps the role instead of flipping it.
//! - **Greedy one-ply** selection over pre-scored candidates.
//! - **Uniform random** selection from the legal moves.
//!
//! Every root choice breaks ties uniformly at random through the injected RNG,
//! so tests either seed the generator or assert membership in the optimal set.

use crate::{GameState, Player};
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Static evaluation of a position for the minimax search.
pub trait Evaluator<S: GameState> {
    /// Scores `state` from `perspective`'s point of view. `ply` is the distance
    /// from the root, which lets evaluators prefer quicker wins.
    fn evaluate(&self, state: &S, perspective: Player, ply: usize) -> i32;
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Returns the value of `state` for `perspective`. The state is never
/// modified; each branch is explored on a clone.
pub fn alpha_beta<S, E>(
    state: &S,
    depth: usize,
    ply: usize,
    mut alpha: i32,
    mut beta: i32,
    perspective: Player,
    evaluator: &E,
) -> i32
where
    S: GameState,
    E: Evaluator<S>,
{
    if depth == 0 || state.is_terminal() {
        return evaluator.evaluate(state, perspective, ply);
    }

    let moves = state.get_possible_moves();
    if moves.is_empty() {
        return evaluator.evaluate(state, perspective, ply);
    }

    if state.get_current_player() == perspective {
        let mut best = i32::MIN;
        for mv in &moves {
            let mut child = state.clone();
            child.make_move(mv);
            let score = alpha_beta(&child, depth - 1, ply + 1, alpha, beta, perspective, evaluator);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for mv in &moves {
            let mut child = state.clone();
            child.make_move(mv);
            let score = alpha_beta(&child, depth - 1, ply + 1, alpha, beta, perspective, evaluator);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Scores every root move with an exact (full window) search of `depth` plies,
/// counting the root move itself as the first ply.
pub fn score_root_moves<S, E>(state: &S, depth: usize, evaluator: &E) -> Vec<(S::Move, i32)>
where
    S: GameState,
    E: Evaluator<S>,
{
    let perspective = state.get_current_player();
    let depth = depth.max(1);
    state
        .get_possible_moves()
        .into_iter()
        .map(|mv| {
            let mut child = state.clone();
            child.make_move(&mv);
            let score = alpha_beta(&child, depth - 1, 1, i32::MIN, i32::MAX, perspective, evaluator);
            (mv, score)
        })
        .collect()
}

/// Returns every candidate sharing the maximal score.
pub fn best_candidates<M: Clone>(scored: &[(M, i32)]) -> Vec<M> {
    let Some(best) = scored.iter().map(|(_, s)| *s).max() else {
        return Vec::new();
    };
    scored
        .iter()
        .filter(|(_, s)| *s == best)
        .map(|(m, _)| m.clone())
        .collect()
}

/// Minimax move choice: best root move, ties broken uniformly at random.
pub fn choose_minimax_move<S, E, R>(state: &S, depth: usize, evaluator: &E, rng: &mut R) -> Option<S::Move>
where
    S: GameState,
    E: Evaluator<S>,
    R: Rng + ?Sized,
{
    if state.is_terminal() {
        return None;
    }
    let scored = score_root_moves(state, depth, evaluator);
    let chosen = pick_best(scored.clone(), rng);
    debug!(
        "minimax depth {} scored {} root moves, best {:?}, chose {:?}",
        depth,
        scored.len(),
        scored.iter().map(|(_, s)| *s).max(),
        chosen
    );
    chosen
}

/// Greedy selection over pre-scored candidates with uniform random tie-breaking.
pub fn pick_best<M: Clone, R: Rng + ?Sized>(scored: Vec<(M, i32)>, rng: &mut R) -> Option<M> {
    best_candidates(&scored).choose(rng).cloned()
}

/// Uniformly random legal move, `None` when the side to move has none.
pub fn random_move<S: GameState, R: Rng + ?Sized>(state: &S, rng: &mut R) -> Option<S::Move> {
    if state.is_terminal() {
        return None;
    }
    state.get_possible_moves().choose(rng).cloned()
}
