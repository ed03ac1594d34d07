use super::types::*;
use crate::error_handling::types::ConfigError;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Application configuration structure that defines all runtime parameters.
///
/// Every option can be supplied either as a command-line flag or through its
/// environment variable, which is the usual channel when running inside a
/// container. Values are parsed with `clap` and validated once at startup.
///
/// # Fields Overview
///
/// - `dashboard_url`: the page that gets captured
/// - `login_url`: where the interactive login form lives
/// - selectors locating the username/password/submit elements on that form
/// - `username` / `password`: credentials typed into the form
/// - viewport dimensions and scale factor applied to every capture page
/// - `cookie_file` / `latest_image`: persistence paths for the session and
///   the cached screenshot
/// - `bind_address` / `port`: HTTP listener endpoint
#[derive(Parser, Debug, Clone)]
pub struct Config {
    /// URL of the dashboard page to capture.
    ///
    /// # Command Line
    /// Use `--dashboard-url <URL>` or the `DASHBOARD_URL` environment variable
    #[arg(long, env = "DASHBOARD_URL", default_value = "http://127.0.0.1:8080/")]
    pub dashboard_url: String,

    /// URL of the login page.
    ///
    /// # Command Line
    /// Use `--login-url <URL>` or the `LOGIN_URL` environment variable
    #[arg(long, env = "LOGIN_URL", default_value = "http://127.0.0.1:8080/#/login")]
    pub login_url: String,

    /// CSS selector for the username input on the login form.
    ///
    /// # Command Line
    /// Use `--user-selector <SELECTOR>` or the `USER_SELECTOR` environment variable
    #[arg(long, env = "USER_SELECTOR", default_value = "#username")]
    pub user_selector: String,

    /// CSS selector for the password input on the login form.
    ///
    /// # Command Line
    /// Use `--pass-selector <SELECTOR>` or the `PASS_SELECTOR` environment variable
    #[arg(long, env = "PASS_SELECTOR", default_value = "#password")]
    pub pass_selector: String,

    /// CSS selector for the submit button on the login form.
    ///
    /// # Command Line
    /// Use `--submit-selector <SELECTOR>` or the `SUBMIT_SELECTOR` environment variable
    #[arg(long, env = "SUBMIT_SELECTOR", default_value = "button[type=\"submit\"]")]
    pub submit_selector: String,

    /// Optional CSS selector that marks the dashboard as fully rendered.
    ///
    /// When set, capture waits for this element before taking the screenshot.
    /// When unset, a network-idle heuristic decides readiness instead.
    ///
    /// # Command Line
    /// Use `--ready-selector <SELECTOR>` or the `READY_SELECTOR` environment variable
    #[arg(long, env = "READY_SELECTOR")]
    pub ready_selector: Option<String>,

    /// Username typed into the login form.
    ///
    /// # Command Line
    /// Use `--username <USER>` or the `VITRINE_USER` environment variable
    #[arg(long, env = "VITRINE_USER", default_value = "")]
    pub username: String,

    /// Password typed into the login form.
    ///
    /// # Command Line
    /// Use `--password <PASS>` or the `VITRINE_PASS` environment variable
    #[arg(long, env = "VITRINE_PASS", default_value = "")]
    pub password: String,

    /// Viewport width in CSS pixels.
    ///
    /// # Command Line
    /// Use `--viewport-width <PX>` or the `VIEWPORT_WIDTH` environment variable
    #[arg(long, env = "VIEWPORT_WIDTH", default_value_t = 3840)]
    pub viewport_width: u32,

    /// Viewport height in CSS pixels.
    ///
    /// # Command Line
    /// Use `--viewport-height <PX>` or the `VIEWPORT_HEIGHT` environment variable
    #[arg(long, env = "VIEWPORT_HEIGHT", default_value_t = 2160)]
    pub viewport_height: u32,

    /// Device scale factor applied to the viewport.
    ///
    /// # Command Line
    /// Use `--device-scale-factor <FACTOR>` or the `DEVICE_SCALE_FACTOR` environment variable
    #[arg(long, env = "DEVICE_SCALE_FACTOR", default_value_t = 2.0)]
    pub device_scale_factor: f64,

    /// File where session cookies are persisted between runs.
    ///
    /// # Command Line
    /// Use `--cookie-file <PATH>` or the `COOKIE_FILE` environment variable
    #[arg(long, env = "COOKIE_FILE", default_value = "cookies.json")]
    pub cookie_file: PathBuf,

    /// File where the most recent screenshot is cached.
    ///
    /// # Command Line
    /// Use `--latest-image <PATH>` or the `LATEST_IMAGE` environment variable
    #[arg(long, env = "LATEST_IMAGE", default_value = "latest.png")]
    pub latest_image: PathBuf,

    /// Run the browser headless.
    ///
    /// # Command Line
    /// Use `--headless <BOOL>` or the `HEADLESS` environment variable
    #[arg(long, env = "HEADLESS", default_value_t = true, action = clap::ArgAction::Set)]
    pub headless: bool,

    /// Explicit path to the Chrome or Chromium executable.
    ///
    /// When unset, the browser is located through the usual system lookup.
    ///
    /// # Command Line
    /// Use `--chrome-executable <PATH>` or the `CHROME_EXECUTABLE` environment variable
    #[arg(long, env = "CHROME_EXECUTABLE")]
    pub chrome_executable: Option<PathBuf>,

    /// Network address to bind the HTTP server to.
    ///
    /// # Command Line
    /// Use `--bind-address <ADDRESS>` or the `BIND_ADDRESS` environment variable
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Port number for the HTTP server.
    ///
    /// # Command Line
    /// Use `--port <PORT>` or the `PORT` environment variable
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,
}

impl Config {
    /// Creates a new `Config` by parsing command-line arguments and the
    /// environment, then validating the result.
    ///
    /// # Panics
    /// Panics if the command-line arguments cannot be parsed. This typically
    /// happens when invalid values are provided. The panic includes a helpful
    /// error message for the user
    ///
    /// # Returns
    /// A validated `Config` instance, or a `ConfigError` describing what is
    /// wrong with the supplied values
    pub fn from_args() -> Result<Self, ConfigError> {
        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    /// Checks the parsed values for combinations that cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ConfigError::MissingCredentials(String::from(
                "VITRINE_USER and VITRINE_PASS must both be set",
            )));
        }
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::BadViewport(String::from(
                "viewport dimensions must be non-zero",
            )));
        }
        if !(self.device_scale_factor > 0.0) {
            return Err(ConfigError::BadViewport(String::from(
                "device scale factor must be positive",
            )));
        }
        if self.bind_address.parse::<IpAddr>().is_err() {
            return Err(ConfigError::BadAddress(format!(
                "{} is not a valid IP address",
                self.bind_address
            )));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
            device_scale_factor: self.device_scale_factor,
        }
    }

    pub fn selectors(&self) -> Selectors {
        Selectors {
            username: self.user_selector.clone(),
            password: self.pass_selector.clone(),
            submit: self.submit_selector.clone(),
            ready: self.ready_selector.clone(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    #[cfg(test)]
    fn from_args_under_test() -> Result<Config, clap::Error> {
        Config::try_parse_from([
            "vitrine",
            "--dashboard-url",
            "http://grafana.local/d/overview",
            "--username",
            "kiosk",
            "--password",
            "secret",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Arguments fall back to these variables, so the parsing test clears
    // them to keep the ambient environment out of the assertions.
    const ENV_KEYS: &[&str] = &[
        "DASHBOARD_URL",
        "LOGIN_URL",
        "USER_SELECTOR",
        "PASS_SELECTOR",
        "SUBMIT_SELECTOR",
        "READY_SELECTOR",
        "VITRINE_USER",
        "VITRINE_PASS",
        "VIEWPORT_WIDTH",
        "VIEWPORT_HEIGHT",
        "DEVICE_SCALE_FACTOR",
        "COOKIE_FILE",
        "LATEST_IMAGE",
        "HEADLESS",
        "CHROME_EXECUTABLE",
        "BIND_ADDRESS",
        "PORT",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn sim_config() -> Config {
        Config {
            dashboard_url: String::from("http://grafana.local/d/overview"),
            login_url: String::from("http://grafana.local/login"),
            user_selector: String::from("#username"),
            pass_selector: String::from("#password"),
            submit_selector: String::from("button[type=\"submit\"]"),
            ready_selector: None,
            username: String::from("kiosk"),
            password: String::from("secret"),
            viewport_width: 3840,
            viewport_height: 2160,
            device_scale_factor: 2.0,
            cookie_file: PathBuf::from("cookies.json"),
            latest_image: PathBuf::from("latest.png"),
            headless: true,
            chrome_executable: None,
            bind_address: String::from("0.0.0.0"),
            port: 3000,
        }
    }

    #[test]
    #[serial]
    fn test_from_args() {
        clear_env();
        let expected = sim_config();

        let config = Config::from_args_under_test().unwrap_or_else(|e| panic!("{}", e));

        assert_eq!(config.dashboard_url, expected.dashboard_url);
        assert_eq!(config.user_selector, expected.user_selector);
        assert_eq!(config.pass_selector, expected.pass_selector);
        assert_eq!(config.submit_selector, expected.submit_selector);
        assert_eq!(config.viewport_width, expected.viewport_width);
        assert_eq!(config.viewport_height, expected.viewport_height);
        assert_eq!(config.cookie_file, expected.cookie_file);
        assert_eq!(config.latest_image, expected.latest_image);
        assert_eq!(config.bind_address, expected.bind_address);
        assert_eq!(config.port, expected.port);
        assert!(config.headless);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(sim_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_credentials() {
        let mut config = sim_config();
        config.password = String::new();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials(_)));
    }

    #[test]
    fn test_validate_rejects_zero_viewport() {
        let mut config = sim_config();
        config.viewport_width = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::BadViewport(_)));
    }

    #[test]
    fn test_validate_rejects_bad_bind_address() {
        let mut config = sim_config();
        config.bind_address = String::from("not-an-ip");

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::BadAddress(_)));
    }

    #[test]
    #[serial]
    fn test_url_defaults_point_at_the_local_dashboard() {
        clear_env();
        let config =
            Config::try_parse_from(["vitrine", "--username", "kiosk", "--password", "secret"])
                .unwrap_or_else(|e| panic!("{}", e));

        assert_eq!(config.dashboard_url, "http://127.0.0.1:8080/");
        assert_eq!(config.login_url, "http://127.0.0.1:8080/#/login");
    }
}
