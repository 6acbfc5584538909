use anyhow::Result;
use clap::Parser;
use cowboy_snake::audio;
use cowboy_snake::game::GameConfig;
use cowboy_snake::logging::{self, LogLevel};
use cowboy_snake::modes::HumanMode;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cowboy_snake")]
#[command(version, about = "Single-screen arcade Snake for the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between simulation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Frames drawn per second (1 to 1000)
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Directory with eat.wav, wall.mp3, endgame.mp3, levelup.wav and music.mp3
    #[arg(long)]
    sounds: Option<PathBuf>,

    /// Play without sound
    #[arg(long)]
    mute: bool,

    /// Where to write the log
    #[arg(long, default_value = "cowboy_snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(fps) = self.fps {
            config.frames_per_second = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Fail on bad settings before touching the terminal
    let config = cli.game_config()?;
    logging::init(&cli.log_file, cli.log_level)?;
    info!("Starting the game with {:?}", config);

    let audio = audio::open_backend(cli.sounds.as_deref(), cli.mute)?;

    let mut human_mode = HumanMode::new(config, audio);
    human_mode.run().await?;

    info!("Exiting");
    Ok(())
}
