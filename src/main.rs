use clap::Parser;
use minesweeper_engine::{
    FieldView, GameError, GameState, Registry, action::parse_action, cleanup::start_cleanup_task,
    cli::Cli, config::Config,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

fn render(rows: &[Vec<FieldView>]) -> String {
    let mut out = String::from("   ");
    for column in 0..rows.len() {
        out.push_str(&format!("{column:>2}"));
    }
    out.push('\n');

    for (row, fields) in rows.iter().enumerate() {
        out.push_str(&format!("{row:>2} "));
        for field in fields {
            let symbol = match (field.disclosed, field.bombs_around) {
                (false, _) => '#',
                (true, 0) => '.',
                (true, n) => char::from(b'0' + n),
            };
            out.push(' ');
            out.push(symbol);
        }
        out.push('\n');
    }

    out
}

fn report(err: &GameError) {
    if err.ends_game() {
        info!("Player lost: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
    println!("Game over!");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt::init();
    info!("Starting minesweeper console");

    let config = Config::from_env();
    let registry = Registry::new();
    let cleanup = tokio::spawn(start_cleanup_task(registry.clone(), config));

    let id = match registry.create(cli.source()) {
        Ok(id) => id,
        Err(err) => {
            report(&err);
            cleanup.abort();
            return;
        }
    };
    info!("Playing game {}", id);

    if let Ok(game) = registry.get(&id) {
        println!("{}", render(&game.lock().await.snapshot()));
    }
    println!("Enter moves as row:column");

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let game = match registry.get(&id) {
            Ok(game) => game,
            Err(err) => {
                report(&err);
                break;
            }
        };

        let (row, column) = match parse_action(&line) {
            Ok(position) => position,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let mut game = game.lock().await;
        if let Err(err) = game.reveal_at(row, column) {
            report(&err);
            break;
        }

        match game.state() {
            GameState::Won => {
                println!("{}", render(&game.snapshot()));
                println!("You won!");
                break;
            }
            GameState::Lost => {
                println!("Game over!");
                break;
            }
            GameState::Active => println!("{}", render(&game.snapshot())),
        }
    }

    cleanup.abort();
    info!("Shutting down");
}
