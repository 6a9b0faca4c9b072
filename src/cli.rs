use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "ytscribe", about = "YouTube transcript API with a persistent cache", version)]
pub struct Cli {
    /// SQLite connection string for the transcript cache
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:transcripts.db")]
    pub database_url: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Caption language requested from YouTube
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
