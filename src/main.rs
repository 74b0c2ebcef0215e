use clap::Parser;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use raumschach::controller::{GameController, MoveResultType};
use raumschach::engine::params::{DEFAULT_DEPTH, DEFAULT_THREADS};
use raumschach::engine::player::{AiPlayer, Player, PlayerKind};
use raumschach::game::board::KingState;
use raumschach::game::moves::MovePool;
use raumschach::game::pieces::Color;
use raumschach::utils::{BoardSquare, BoardSquareExt, GameCommand};

#[derive(Parser)]
#[command(name = "raumschach")]
#[command(about = "Raumschach (5x5x5 chess) engine", long_about = None)]
struct Cli {
    /// Who plays White
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    white: PlayerKind,

    /// Who plays Black
    #[arg(long, value_enum, default_value_t = PlayerKind::Ai)]
    black: PlayerKind,

    /// Plies searched by AI players
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Seed for the hash keys and tie-breaking; random when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Threads searching root moves in parallel
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Pick randomly among equally good AI moves
    #[arg(long)]
    tie_break: bool,
}

fn create_player(kind: PlayerKind, color: Color, tie_break: Option<u64>) -> Player {
    match (kind, tie_break) {
        (PlayerKind::Ai, Some(seed)) => Player::Ai(AiPlayer::new(color).with_tie_break(seed)),
        _ => Player::new(kind, color),
    }
}

fn report_state(controller: &GameController) {
    if controller.state != KingState::Normal {
        println!("{:?}", controller.state);
    }
}

fn respond_ai(controller: &mut GameController) {
    if let Some(board_move) = controller.play_ai_move() {
        println!("{:?} plays {}", !controller.turn, board_move.unparse());
        controller.print(None);
        report_state(controller);
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let move_pool = MovePool::new(&mut rng);

    let white_seed = cli.tie_break.then(|| rng.next_u64());
    let black_seed = cli.tie_break.then(|| rng.next_u64());
    let players = [
        create_player(cli.white, Color::White, white_seed),
        create_player(cli.black, Color::Black, black_seed),
    ];

    let mut controller = GameController::new(&move_pool, players);
    controller.set_option("depth", &cli.depth.to_string());
    controller.set_option("threads", &cli.threads.to_string());

    controller.print(None);
    respond_ai(&mut controller);

    loop {
        match GameCommand::receive() {
            GameCommand::Quit => break,
            GameCommand::New => {
                controller.new_game();
                controller.print(None);
                respond_ai(&mut controller);
            }
            GameCommand::Show => controller.print(None),
            GameCommand::Move(notation) => match controller.try_move_piece(&notation) {
                MoveResultType::Success => {
                    controller.print(None);
                    report_state(&controller);
                    respond_ai(&mut controller);
                }
                result => {
                    log::warn!("Rejected move {}: {:?}", notation, result);
                    println!("{:?}", result);
                }
            },
            GameCommand::Moves(square_string) => {
                let destinations = BoardSquare::parse(square_string.as_str())
                    .and_then(|square| controller.legal_destinations(square));

                match destinations {
                    Some(destinations) => {
                        let listed = destinations
                            .iter_positions()
                            .map(|square| square.unparse())
                            .collect::<Vec<_>>();

                        println!("{}: {}", square_string, listed.join(" "));
                        controller.print(Some(destinations));
                    }
                    None => {
                        log::warn!("No piece of the side to move on {}", square_string);
                        println!("{:?}", MoveResultType::WrongSource);
                    }
                }
            }
            GameCommand::Go => {
                if controller.game_over {
                    println!("{:?}", MoveResultType::GameOver);
                } else if controller.player(controller.turn).is_ai() {
                    respond_ai(&mut controller);
                } else {
                    match controller.suggest_move() {
                        Some(board_move) => println!("bestmove {}", board_move.unparse()),
                        None => println!("bestmove (none)"),
                    }
                }
            }
            GameCommand::State => println!("{:?}", controller.update_state()),
            GameCommand::Save(path) => match controller.save(&path) {
                Ok(()) => println!("Saved to {}", path),
                Err(e) => {
                    log::warn!("Failed to save {}: {}", path, e);
                    println!("Error: {}", e);
                }
            },
            GameCommand::Load(path) => match controller.load(&path) {
                Ok(()) => {
                    controller.print(None);
                    report_state(&controller);
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}", path, e);
                    println!("Error: {}", e);
                }
            },
            GameCommand::SetOption(name, value) => controller.set_option(&name, &value),
            GameCommand::Perft(depth_string) => match depth_string.parse::<usize>() {
                Ok(depth) => {
                    let moves = controller.perft(depth);

                    for (board_move, count) in &moves {
                        println!("{}: {}", board_move.unparse(), count);
                    }

                    let total: usize = moves.iter().map(|(_, count)| count).sum();
                    println!("\nNodes: {}", total);
                }
                Err(_) => log::warn!("Invalid perft depth: {}", depth_string),
            },
            GameCommand::Invalid(input) => {
                if !input.is_empty() {
                    log::warn!("Unknown command: {}", input);
                }
            }
        }
    }
}
