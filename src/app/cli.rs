use clap::Parser;

/// kino - browse and play your media server from the terminal
#[derive(Parser, Debug)]
#[command(name = "kino", version, about)]
pub struct Args {
    /// Media server base URL (overrides config.toml)
    #[arg(long, short = 's')]
    pub server: Option<String>,

    /// Username for the server session
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password for the server session
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// mpv binary used as the playback surface
    #[arg(long, default_value = "mpv")]
    pub mpv: String,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
