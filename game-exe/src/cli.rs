use argh::FromArgs;
use gameplay::log;

/// Headless raycast soak: builds the demo world, casts and sorts a number
/// of frames and reports timings
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug
    #[argh(option)]
    pub verbose: Option<log::LevelFilter>,
    /// screen width in pixels
    #[argh(option, default = "0")]
    pub width: u32,
    /// screen height in pixels
    #[argh(option, default = "0")]
    pub height: u32,
    /// field of view in degrees
    #[argh(option, default = "0")]
    pub fov: u32,
    /// screen columns per ray, 1-4. Wider is faster and uglier
    #[argh(option, default = "0")]
    pub strip_width: usize,
    /// how many frames to cast
    #[argh(option, default = "240")]
    pub frames: u32,
}
