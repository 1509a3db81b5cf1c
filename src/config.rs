use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Browse an artist's profile, albums, top tracks and related artists
#[derive(Parser, Debug)]
#[command(name = "artist-explorer", version, about)]
pub struct Args {
    /// Base url of the backend relay
    #[arg(long, short = 's', default_value = "http://localhost:3000")]
    pub server: String,

    /// Artist to load on startup
    #[arg(long, short = 'a')]
    pub artist: Option<String>,

    /// Directory for daily log files
    #[arg(long, default_value = ".logs")]
    pub log_dir: PathBuf,

    /// Backend request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

impl Args {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let args = Args::parse_from(["artist-explorer"]);
        assert_eq!(args.server, "http://localhost:3000");
        assert_eq!(args.artist, None);
        assert_eq!(args.log_dir, PathBuf::from(".logs"));
        assert_eq!(args.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn startup_artist_keeps_its_spaces() {
        let args = Args::parse_from(["artist-explorer", "--artist", "Kanye West", "--timeout", "0"]);
        assert_eq!(args.artist.as_deref(), Some("Kanye West"));
        assert_eq!(args.request_timeout(), Duration::from_secs(1));
    }
}
