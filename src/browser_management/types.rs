use std::path::PathBuf;

/// Chromium launch flags used for every browser start. Tuned for running as
/// root inside a minimal container with a small /dev/shm.
pub const LAUNCH_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--no-first-run",
    "--no-zygote",
];

/// Initial window size passed on the command line. Capture pages override
/// this per page with a device metrics override.
pub const INITIAL_WINDOW: (u32, u32) = (1920, 1080);

#[derive(Debug, PartialEq, Clone)]
pub struct LaunchSpec {
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
}

impl Default for LaunchSpec {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
        }
    }
}
