use quoridor::strategy::{RandomStrategy, Strategy};
use quoridor::{
    Cell, GameState, IllegalReason, PlayerCount, PlayerId, Quoridor, QuoridorError, Turn, Wall,
};

fn two_player(turns: &[&str]) -> Quoridor {
    let mut game = Quoridor::two_player("ann", "bob").unwrap();
    game.replay(turns).unwrap();
    game
}

fn destinations(game: &Quoridor) -> Vec<String> {
    game.legal_destinations().iter().map(Cell::to_string).collect()
}

fn reason(game: &mut Quoridor, turn: &str) -> IllegalReason {
    let player = game.current_player();
    game.do_turn(player, turn).unwrap_err().reason().unwrap()
}

#[test]
fn setup_errors_leave_the_game_unchanged() {
    let mut game = Quoridor::new(PlayerCount::Two);
    assert_eq!(
        game.do_turn(PlayerId(0), "e2"),
        Err(QuoridorError::WrongState {
            expected: GameState::Playing,
            actual: GameState::Init
        })
    );

    game.create_player("ann").unwrap();
    assert_eq!(
        game.begin_game(),
        Err(QuoridorError::InvalidPlayerCount {
            registered: 1,
            required: 2
        })
    );
    assert_eq!(game.state(), GameState::Init);

    assert_eq!(game.create_player("bob"), Ok(PlayerId(1)));
    assert_eq!(
        game.create_player("cat"),
        Err(QuoridorError::GameFull { capacity: 2 })
    );
    game.begin_game().unwrap();
    assert!(matches!(
        game.create_player("cat"),
        Err(QuoridorError::WrongState { .. })
    ));
    assert_eq!(game.players()[0].walls(), 10);
}

#[test]
fn turns_must_be_taken_in_order() {
    let mut game = two_player(&[]);
    assert_eq!(
        game.do_turn(PlayerId(1), "e8"),
        Err(QuoridorError::NotYourTurn {
            player: PlayerId(1),
            to_move: PlayerId(0)
        })
    );
    game.do_turn(PlayerId(0), "e2").unwrap();
    assert_eq!(game.current_player(), PlayerId(1));
    game.do_turn(PlayerId(1), "e8").unwrap();
    assert_eq!(game.current_player(), PlayerId(0));
}

#[test]
fn malformed_and_unreachable_turns() {
    let mut game = two_player(&[]);
    for bad in ["", "z9", "e0", "He9", "hE5", "e2 ", "Ve55", "X"] {
        assert_eq!(reason(&mut game, bad), IllegalReason::Malformed, "{bad:?}");
    }
    assert_eq!(reason(&mut game, "e3"), IllegalReason::NotReachable);
    assert_eq!(reason(&mut game, "e1"), IllegalReason::NotReachable);
    assert_eq!(game.history().count(), 0);
}

#[test]
fn adjacent_pawn_can_be_jumped_straight() {
    let game = two_player(&["e2", "e8", "e3", "e7", "e4", "Va1", "e5", "e6"]);
    assert_eq!(game.current_player(), PlayerId(0));
    assert_eq!(destinations(&game), vec!["e4", "d5", "f5", "e7"]);
}

#[test]
fn wall_behind_the_pawn_turns_the_jump_diagonal() {
    let game = two_player(&["e2", "e8", "e3", "e7", "e4", "e6", "e5", "He6"]);
    assert_eq!(destinations(&game), vec!["e4", "d5", "f5", "d6", "f6"]);
}

#[test]
fn walled_diagonal_is_not_offered() {
    let game = two_player(&[
        "Ve5", "e8", "e2", "e7", "e3", "e6", "e4", "He6", "e5", "Ha1",
    ]);
    // Ve5 closes e5|f5 and e6|f6
    assert_eq!(destinations(&game), vec!["e4", "d5", "d6"]);
}

#[test]
fn jump_off_the_board_falls_back_to_the_diagonals() {
    let game = two_player(&[
        "e2", "Ha1", "e3", "Hc1", "e4", "Ha3", "e5", "Hc3", "e6", "Ha5", "e7", "Hc5", "e8", "Ha7",
    ]);
    assert_eq!(game.current_player(), PlayerId(0));
    assert_eq!(game.players()[1].position().to_string(), "e9");
    // nothing lies behind e9, so both sides of it are offered
    assert_eq!(destinations(&game), vec!["e7", "d8", "f8", "d9", "f9"]);
}

#[test]
fn third_pawn_behind_forces_the_diagonal() {
    let mut game = Quoridor::new(PlayerCount::Four);
    for name in ["a", "b", "c", "d"] {
        game.create_player(name).unwrap();
    }
    game.begin_game().unwrap();
    assert_eq!(game.players()[3].walls(), 5);
    game.replay([
        "e2", "i6", "e8", "a4", //
        "e3", "h6", "e7", "a5", //
        "e4", "g6", "e6", "a4", //
        "Ha8", "f6", "e5", "a5", //
        "Hc8", "e6", "Hh8", "a4",
    ])
    .unwrap();

    assert_eq!(game.current_player(), PlayerId(0));
    assert_eq!(destinations(&game), vec!["e3", "d4", "f4", "d5", "f5"]);
}

#[test]
fn wall_that_seals_a_player_in_is_rejected_and_retracted() {
    let mut game = two_player(&["Vd1", "Ve1"]);
    let walls_before = game.board().walls().to_vec();
    let masks_before = game.board().wall_masks();

    assert_eq!(
        reason(&mut game, "He2"),
        IllegalReason::CutsOffPath {
            player: PlayerId(0)
        }
    );
    let (legal, why) = game.turn_is_legal("He2");
    assert!(!legal);
    assert_eq!(why, "cuts player 1 off from their goal");

    assert_eq!(game.board().walls(), walls_before.as_slice());
    assert_eq!(game.board().wall_masks(), masks_before);
    assert_eq!(game.players()[0].walls(), 9);
    assert_eq!(game.current_player(), PlayerId(0));
}

#[test]
fn crossing_overlapping_and_repeated_walls() {
    let mut game = two_player(&["He5"]);
    assert_eq!(
        reason(&mut game, "Ve5"),
        IllegalReason::Crosses("He5".parse().unwrap())
    );
    assert_eq!(
        reason(&mut game, "Hf5"),
        IllegalReason::Overlaps("He5".parse().unwrap())
    );
    assert_eq!(
        reason(&mut game, "Hd5"),
        IllegalReason::Overlaps("He5".parse().unwrap())
    );
    assert_eq!(reason(&mut game, "He5"), IllegalReason::AlreadyPlayed);
    // touching end to end two slots over is fine
    assert!(game.turn_is_legal("Hg5").0);
    assert!(game.turn_is_legal("Vd5").0);
}

#[test]
fn wall_allowance_runs_out() {
    let walls = [
        "Ha3", "Hc3", "Hf3", "Ha5", "Hc5", "Hf5", "Ha7", "Hc7", "Hf7", "Hh1",
    ];
    let mut game = two_player(&[]);
    for (i, wall) in walls.iter().enumerate() {
        game.do_turn(PlayerId(0), wall).unwrap();
        let step = if i % 2 == 0 { "e8" } else { "e9" };
        game.do_turn(PlayerId(1), step).unwrap();
    }
    assert_eq!(game.players()[0].walls(), 0);
    assert_eq!(reason(&mut game, "Hh8"), IllegalReason::NoWallsLeft);
    assert!(game.legal_walls().is_empty());
    assert!(game.legal_turns().iter().all(|t| !t.is_wall()));
}

#[test]
fn reaching_the_goal_ends_the_game() {
    let mut game = two_player(&[
        "e2", "d9", "e3", "c9", "e4", "d9", "e5", "c9", "e6", "d9", "e7", "c9", "e8", "d9",
    ]);
    assert_eq!(game.winner(), None);
    game.do_turn(PlayerId(0), "e9").unwrap();

    assert_eq!(game.state(), GameState::Over);
    assert_eq!(game.winner(), Some(PlayerId(0)));
    assert!(game.legal_destinations().is_empty());
    assert_eq!(
        game.do_turn(PlayerId(1), "d8"),
        Err(QuoridorError::WrongState {
            expected: GameState::Playing,
            actual: GameState::Over
        })
    );
}

#[test]
fn random_play_never_disconnects_anyone() {
    for seed in 0..4 {
        let mut game = two_player(&[]);
        let mut players = [RandomStrategy::new(Some(seed)), RandomStrategy::new(Some(seed + 100))];
        for _ in 0..80 {
            let seat = game.current_player().0;
            let turn = players[seat].choose_turn(&game).unwrap();
            let player = game.current_player();
            game.do_turn(player, &turn.to_string()).unwrap();

            for p in game.players() {
                assert!(game.board().distance(p.position(), p.goal()).is_some());
            }
            for &wall in game.board().walls() {
                assert!(!game.board().has_wall(wall.cross()));
            }
            if game.is_over() {
                break;
            }
        }
    }
}

#[test]
fn typed_turns_match_their_notation() {
    let mut game = two_player(&[]);
    game.play(Turn::Wall(Wall::horizontal(4, 4))).unwrap();
    game.play(Turn::Move(Cell::new(7, 4))).unwrap();
    let history: Vec<String> = game.history().map(|t| t.to_string()).collect();
    assert_eq!(history, vec!["He5", "e8"]);
}
