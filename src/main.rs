use std::env;
use std::time::Duration;

use dotenv::dotenv;
use landbot::bot::{Bot, BotConfig};
use landbot::default_observer::DefaultObserver;
use landbot::store::GithubStore;
use landbot::types::Team;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn get_env_var_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|val| val.parse::<u64>().ok())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("landbot=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let token = env::var("GITLAND_TOKEN")
        .expect("GITLAND_TOKEN environment variable is required, see README.md");
    let players: Vec<String> = env::var("GITLAND_PLAYERS")
        .expect("GITLAND_PLAYERS environment variable is required, see README.md")
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let mut config = BotConfig {
        players,
        ..BotConfig::default()
    };
    if let Ok(owner) = env::var("GITLAND_WORLD_OWNER") {
        config.world_owner = owner;
    }
    if let Ok(repo) = env::var("GITLAND_WORLD_REPO") {
        config.world_repo = repo;
    }
    if let Ok(repo) = env::var("GITLAND_CLIENT_REPO") {
        config.client_repo = repo;
    }
    if let Ok(team) = env::var("GITLAND_TEAM") {
        config.privileged_team =
            Team::from_name(&team).expect("GITLAND_TEAM must be red, green or blue");
    }
    if let Some(tick_ms) = get_env_var_u64("GITLAND_TICK_MS") {
        config.tick = Duration::from_millis(tick_ms);
    }

    tracing::info!(
        "Controlling {} player(s) on the {:?} team, tick every {:.0}s",
        config.players.len(),
        config.privileged_team,
        config.tick.as_secs_f64()
    );

    let store = GithubStore::new(&token)?;
    let mut bot = Bot::new(store, config, DefaultObserver);
    bot.run().await;

    Ok(())
}
