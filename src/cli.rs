use clap::Parser;

/// Grow blobs with the mouse and watch them chase, flee and swallow each other
#[derive(Parser, Debug)]
#[command()]
pub struct Args {
    /// Fixed framerate limit
    ///
    /// if omitted the simulation follows the display refresh rate
    #[arg(short, long, default_value_t = 0)]
    pub framerate: u32,

    /// Seed for the random jitter, random if omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Start with the simulation paused
    #[arg(long)]
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_vsync_and_running() {
        let args = Args::try_parse_from(["blob_simulation"]).unwrap();
        assert_eq!(args.framerate, 0);
        assert_eq!(args.seed, None);
        assert!(!args.paused);
    }

    #[test]
    fn parses_all_flags() {
        let args =
            Args::try_parse_from(["blob_simulation", "-f", "60", "--seed", "9", "--paused"])
                .unwrap();
        assert_eq!(args.framerate, 60);
        assert_eq!(args.seed, Some(9));
        assert!(args.paused);
    }
}
