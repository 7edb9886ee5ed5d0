use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use mnprofile::{
    cli,
    config::{self, Config},
    error,
    types::{TimeRange, TrackLimit},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web server
    Serve(ServeOptions),

    /// Print the Spotify authorization URL
    AuthUrl(AuthUrlOptions),

    /// Generate a profile from a JSON track file
    Profile(ProfileOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on (overrides SERVER_ADDRESS)
    #[clap(long)]
    addr: Option<String>,

    /// Open the page in the default browser
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AuthUrlOptions {
    /// Listening window: short_term, medium_term or long_term
    #[clap(long, default_value_t = TimeRange::default())]
    time_range: TimeRange,

    /// Number of top tracks to read (1-50)
    #[clap(long, default_value_t = TrackLimit::default())]
    track_limit: TrackLimit,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfileOptions {
    /// JSON file with an array of {"name", "artist"} objects
    #[clap(long)]
    tracks: PathBuf,

    /// Name to address the profile to
    #[clap(long)]
    name: Option<String>,

    /// Also generate an image
    #[clap(long)]
    image: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => {
            let mut config = load_config();
            if let Some(addr) = opt.addr {
                config = config.with_server_addr(addr);
            }
            cli::serve(config, opt.open).await
        }
        Command::AuthUrl(opt) => {
            let config = load_config();
            cli::auth_url(&config.spotify, opt.time_range, opt.track_limit).await
        }
        Command::Profile(opt) => {
            let config = load_config();
            cli::profile(&config.openai, &opt.tracks, opt.name, opt.image).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
