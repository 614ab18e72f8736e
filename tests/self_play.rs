//! Computer against computer over whole games, checking the rule invariants
//! that must hold after every move.

use arena::config::{AiSettings, GameKind};
use arena::game_wrapper::GameWrapper;
use arena::games::mancala::MancalaState;
use arena::{seeded_rng, Difficulty, GameRng, GameState, GameStatus, Player, TurnOutcome};

fn play_out(kind: GameKind, first: Difficulty, second: Difficulty, rng: &mut GameRng, mut check: impl FnMut(&GameWrapper, TurnOutcome)) -> GameWrapper {
    let ai = AiSettings::default();
    let mut game = GameWrapper::new(kind).unwrap();
    let mut plies = 0;
    while !game.is_terminal() {
        let player = game.get_current_player();
        let difficulty = if player == Player::One { first } else { second };
        let mv = game.choose_move(&ai, difficulty, rng).unwrap();
        assert!(game.is_legal(&mv), "{} chose illegal {}", kind, mv);
        let outcome = game.apply_move(player, &mv).unwrap();
        check(&game, outcome);
        plies += 1;
        assert!(plies < 500, "{} did not finish", kind);
    }
    game
}

#[test]
fn test_tictactoe_hard_never_loses() {
    for seed in 0..10 {
        let mut rng = seeded_rng(Some(seed));
        let hard_vs_hard = play_out(GameKind::TicTacToe, Difficulty::Hard, Difficulty::Hard, &mut rng, |_, _| {});
        assert_eq!(hard_vs_hard.status(), GameStatus::Draw);

        let hard_first = play_out(GameKind::TicTacToe, Difficulty::Hard, Difficulty::Easy, &mut rng, |_, _| {});
        assert_ne!(hard_first.get_winner(), Some(Player::Two));

        let hard_second = play_out(GameKind::TicTacToe, Difficulty::Easy, Difficulty::Hard, &mut rng, |_, _| {});
        assert_ne!(hard_second.get_winner(), Some(Player::One));
    }
}

#[test]
fn test_mancala_conserves_stones() {
    for seed in 0..5 {
        let mut rng = seeded_rng(Some(seed));
        let game = play_out(GameKind::Mancala, Difficulty::Hard, Difficulty::Easy, &mut rng, |g, outcome| {
            let GameWrapper::Mancala(m) = g else { unreachable!() };
            assert_eq!(m.board().iter().sum::<u32>(), 48);
            if outcome == TurnOutcome::ExtraTurn {
                assert!(!m.is_terminal());
            }
        });
        let GameWrapper::Mancala(m) = game else { unreachable!() };
        assert_eq!(m.store(Player::One) + m.store(Player::Two), 48);
        for player in [Player::One, Player::Two] {
            assert!(MancalaState::pits(player).all(|i| m.board()[i] == 0));
        }
    }
}

#[test]
fn test_dots_and_boxes_boxes_all_claimed() {
    for seed in 0..5 {
        let mut rng = seeded_rng(Some(seed));
        let game = play_out(GameKind::DotsAndBoxes, Difficulty::Easy, Difficulty::Hard, &mut rng, |_, _| {});
        let GameWrapper::DotsAndBoxes(d) = game else { unreachable!() };
        assert_eq!(d.score(Player::One) + d.score(Player::Two), 9);
        assert!(d.undrawn_edges().is_empty());
    }
}

#[test]
fn test_othello_turns_only_repeat_on_pass() {
    for seed in 0..3 {
        let mut rng = seeded_rng(Some(seed));
        let mut previous = Player::One;
        play_out(GameKind::Othello, Difficulty::Easy, Difficulty::Easy, &mut rng, |g, outcome| {
            if g.is_terminal() {
                return;
            }
            let next = g.get_current_player();
            match outcome {
                TurnOutcome::Alternate => assert_ne!(next, previous),
                TurnOutcome::OpponentPassed => assert_eq!(next, previous),
                TurnOutcome::ExtraTurn => panic!("othello has no extra turns"),
            }
            previous = next;
        });
    }
}

#[test]
fn test_every_game_finishes_with_a_consistent_status() {
    for kind in GameKind::ALL.into_iter().filter(|k| k.is_two_player()) {
        let mut rng = seeded_rng(Some(7));
        let game = play_out(kind, Difficulty::Easy, Difficulty::Easy, &mut rng, |_, _| {});
        match game.status() {
            GameStatus::Win(p) => assert_eq!(game.get_winner(), Some(p)),
            GameStatus::Draw => assert_eq!(game.get_winner(), None),
            GameStatus::InProgress => panic!("{} finished without a result", kind),
        }
    }
}
