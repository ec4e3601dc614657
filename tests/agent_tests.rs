use infexion::{
    Action, Agent, HexPos, IllegalAction, Player, ProtocolError, Ruleset, SearchError,
    SearchLimits, Strategy,
};

fn spawn(r: u8, q: u8) -> Action {
    Action::Spawn {
        cell: HexPos::new(r, q),
    }
}

#[test]
fn opening_move_is_the_centre_spawn() {
    let mut agent = Agent::new(Player::Red, Ruleset::default());
    let action = agent.decide().expect("opening");
    assert_eq!(action, spawn(3, 3));
    // decide never commits: the harness reports the action back.
    assert_eq!(agent.state().turn_count(), 0);
}

#[test]
fn reported_actions_fold_into_the_local_state() {
    let mut agent = Agent::new(Player::Blue, Ruleset::default());
    agent.apply_external_action(spawn(3, 3)).expect("red move");
    assert_eq!(agent.state().turn_count(), 1);
    assert_eq!(agent.state().to_move, Player::Blue);

    agent.apply_external_action(spawn(1, 1)).expect("own move");
    assert_eq!(agent.state().turn_count(), 2);
    assert_eq!(agent.state().to_move, Player::Red);
}

#[test]
fn illegal_reported_action_is_a_protocol_fault_not_a_crash() {
    let mut agent = Agent::new(Player::Blue, Ruleset::default());
    agent.apply_external_action(spawn(3, 3)).expect("red move");
    let before_turns = agent.state().turn_count();

    let err = agent.apply_external_action(spawn(3, 3)).unwrap_err();
    assert_eq!(
        err,
        ProtocolError::IllegalExternal(IllegalAction::Occupied(HexPos::new(3, 3)))
    );
    // A rejected report leaves the local state untouched.
    assert_eq!(agent.state().turn_count(), before_turns);
}

#[test]
fn minimax_agent_decides_a_legal_action_midgame() {
    let mut agent = Agent::new(Player::Red, Ruleset::default())
        .with_limits(SearchLimits::depth(2));
    agent.apply_external_action(spawn(3, 3)).expect("red");
    agent.apply_external_action(spawn(0, 0)).expect("blue");

    let action = agent.decide().expect("decision");
    assert!(agent.state().legal_actions().contains(&action));
}

#[test]
fn greedy_agent_decides_a_legal_action_midgame() {
    let mut agent =
        Agent::new(Player::Red, Ruleset::default()).with_strategy(Strategy::Greedy);
    agent.apply_external_action(spawn(3, 3)).expect("red");
    agent.apply_external_action(spawn(0, 0)).expect("blue");

    let snapshot = agent.state().clone();
    let action = agent.decide().expect("decision");
    assert!(agent.state().legal_actions().contains(&action));
    assert_eq!(agent.state(), &snapshot, "greedy probe must restore state");
}

#[test]
fn random_agent_is_reproducible_for_a_fixed_seed() {
    let build = || {
        let mut agent = Agent::new(Player::Red, Ruleset::default())
            .with_strategy(Strategy::Random { seed: 42 });
        agent.apply_external_action(spawn(3, 3)).expect("red");
        agent.apply_external_action(spawn(0, 0)).expect("blue");
        agent
    };
    let first = build().decide().expect("decision");
    let second = build().decide().expect("decision");
    assert_eq!(first, second);
    assert!(build().state().legal_actions().contains(&first));
}

#[test]
fn finished_game_surfaces_no_legal_moves() {
    let rules = Ruleset {
        max_turns: 2,
        ..Ruleset::default()
    };
    let mut agent = Agent::new(Player::Red, rules).with_strategy(Strategy::Greedy);
    agent.apply_external_action(spawn(0, 0)).expect("red");
    agent.apply_external_action(spawn(5, 5)).expect("blue");
    assert!(agent.state().is_terminal());

    let err = agent.decide().unwrap_err();
    assert_eq!(err, SearchError::NoLegalMoves(Player::Red));
}
