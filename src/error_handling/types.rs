use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    MissingCredentials(String),
    BadViewport(String),
    BadAddress(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCredentials(e) => write!(f, "Credentials error: {}", e),
            ConfigError::BadViewport(e) => write!(f, "Viewport error: {}", e),
            ConfigError::BadAddress(e) => write!(f, "Bind address error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub enum BrowserError {
    LaunchFailed(String),
    Disconnected,
    CdpError(String),
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::LaunchFailed(e) => write!(f, "Browser launch failed: {}", e),
            BrowserError::Disconnected => write!(f, "Browser is disconnected"),
            BrowserError::CdpError(e) => write!(f, "CDP error: {}", e),
        }
    }
}

impl std::error::Error for BrowserError {}

impl From<chromiumoxide::error::CdpError> for BrowserError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BrowserError::CdpError(err.to_string())
    }
}

#[derive(Debug)]
pub enum StoreError {
    ReadFailed(String),
    WriteFailed(String),
    ParseFailed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ReadFailed(e) => write!(f, "Session read failed: {}", e),
            StoreError::WriteFailed(e) => write!(f, "Session write failed: {}", e),
            StoreError::ParseFailed(e) => write!(f, "Session parse failed: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug)]
pub enum LoginError {
    NavigationTimeout(String),
    FieldTimeout(String),
    Browser(BrowserError),
    CdpError(String),
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::NavigationTimeout(e) => write!(f, "Navigation timed out: {}", e),
            LoginError::FieldTimeout(e) => write!(f, "Login field never appeared: {}", e),
            LoginError::Browser(e) => write!(f, "Browser error during login: {}", e),
            LoginError::CdpError(e) => write!(f, "CDP error during login: {}", e),
        }
    }
}

impl std::error::Error for LoginError {}

impl From<BrowserError> for LoginError {
    fn from(err: BrowserError) -> Self {
        LoginError::Browser(err)
    }
}

impl From<chromiumoxide::error::CdpError> for LoginError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        LoginError::CdpError(err.to_string())
    }
}

#[derive(Debug)]
pub enum CaptureError {
    Browser(BrowserError),
    Login(LoginError),
    Screenshot(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Browser(e) => write!(f, "Browser error: {}", e),
            CaptureError::Login(e) => write!(f, "Login error: {}", e),
            CaptureError::Screenshot(e) => write!(f, "Screenshot failed: {}", e),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<BrowserError> for CaptureError {
    fn from(err: BrowserError) -> Self {
        CaptureError::Browser(err)
    }
}

impl From<LoginError> for CaptureError {
    fn from(err: LoginError) -> Self {
        CaptureError::Login(err)
    }
}

impl From<chromiumoxide::error::CdpError> for CaptureError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        CaptureError::Screenshot(err.to_string())
    }
}

#[derive(Debug)]
pub enum WebError {
    BindFailed(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::BindFailed(e) => write!(f, "Web server bind failed: {}", e),
        }
    }
}

impl std::error::Error for WebError {}

#[derive(Debug)]
pub enum ControllerError {
    ConfigurationError(ConfigError),
    WebError(WebError),
    InitializationFailed(String),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::ConfigurationError(e) => write!(f, "Configuration error: {}", e),
            ControllerError::WebError(e) => write!(f, "Web error: {}", e),
            ControllerError::InitializationFailed(e) => write!(f, "Initialization failed: {}", e),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<ConfigError> for ControllerError {
    fn from(err: ConfigError) -> Self {
        ControllerError::ConfigurationError(err)
    }
}

impl From<WebError> for ControllerError {
    fn from(err: WebError) -> Self {
        ControllerError::WebError(err)
    }
}
