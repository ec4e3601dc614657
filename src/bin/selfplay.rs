use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use infexion::{
    apply_action, load_weights_from_json, Agent, GameState, Player, Ruleset, SearchLimits,
    Strategy, Weights,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Minimax,
    Greedy,
    Random,
}

fn strategy_for(arg: StrategyArg, seed: u64) -> Strategy {
    match arg {
        StrategyArg::Minimax => Strategy::Minimax,
        StrategyArg::Greedy => Strategy::Greedy,
        StrategyArg::Random => Strategy::Random { seed },
    }
}

/// Self-play driver: pits two agents against each other and reports results.
#[derive(Parser, Debug)]
#[command(name = "selfplay", about = "Infexion agent self-play driver")]
struct Args {
    /// Search depth ceiling for minimax agents
    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// Per-decision wall-clock budget in milliseconds (enables iterative
    /// deepening)
    #[arg(long)]
    time_ms: Option<u64>,

    /// Strategy for the Red agent
    #[arg(long, value_enum, default_value = "minimax")]
    red: StrategyArg,

    /// Strategy for the Blue agent
    #[arg(long, value_enum, default_value = "greedy")]
    blue: StrategyArg,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Base seed for random strategies
    #[arg(long, default_value_t = 0x00C0_FFEE)]
    seed: u64,

    /// Optional JSON file with evaluation weights
    #[arg(long)]
    weights: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let rules = Ruleset::default();
    let weights = match &args.weights {
        Some(path) => load_weights_from_json(path).map_err(|e| format!("Weights load error: {e}"))?,
        None => Weights::default(),
    };
    let limits = SearchLimits {
        max_depth: args.depth,
        time_ms: args.time_ms,
    };

    let mut red_wins = 0u32;
    let mut blue_wins = 0u32;
    let mut draws = 0u32;

    for game in 0..args.games {
        let game_seed = args.seed.wrapping_add(u64::from(game));
        let mut red = Agent::new(Player::Red, rules)
            .with_strategy(strategy_for(args.red, game_seed))
            .with_weights(weights)
            .with_limits(limits);
        let mut blue = Agent::new(Player::Blue, rules)
            .with_strategy(strategy_for(args.blue, game_seed.rotate_left(17)))
            .with_weights(weights)
            .with_limits(limits);

        // The driver owns the authoritative state; agents mirror it through
        // reported actions, exactly as a turn-exchange harness would.
        let mut referee = GameState::new(rules);
        let mut forfeited: Option<Player> = None;

        while !referee.is_terminal() {
            let mover = referee.to_move;
            let decision = if mover == Player::Red {
                red.decide()
            } else {
                blue.decide()
            };
            let action = match decision {
                Ok(action) => action,
                Err(e) => {
                    eprintln!("[selfplay] game {game}: {e}");
                    forfeited = Some(mover);
                    break;
                }
            };
            apply_action(&mut referee, action)?;
            red.apply_external_action(action)?;
            blue.apply_external_action(action)?;
        }

        let outcome = match forfeited {
            Some(side) => Some(side.opponent()),
            None => referee.winner(),
        };
        match outcome {
            Some(Player::Red) => red_wins += 1,
            Some(Player::Blue) => blue_wins += 1,
            None => draws += 1,
        }
        println!(
            "[selfplay] game {game}: {} after {} turns",
            match outcome {
                Some(side) => format!("{side} wins"),
                None => "draw".to_string(),
            },
            referee.turn_count()
        );
    }

    println!(
        "[selfplay] {} games: Red {red_wins}, Blue {blue_wins}, draws {draws}",
        args.games
    );
    Ok(())
}
