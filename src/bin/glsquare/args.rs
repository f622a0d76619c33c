use std::path::PathBuf;

use clap::Parser;

use glsquare::scheduler::DEFAULT_PERIOD;

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to a JSON5 document with the shader scripts (built-in if omitted)
    #[arg(short, long)]
    pub document: Option<PathBuf>,
    /// Milliseconds between frames
    #[arg(short, long, default_value_t = DEFAULT_PERIOD.as_millis() as u64)]
    pub interval: u64,
    /// Render into a recording backend instead of opening a window
    #[arg(long)]
    pub headless: bool,
    /// Frames to render in headless mode
    #[arg(long, default_value_t = 4)]
    pub frames: u32,
}
