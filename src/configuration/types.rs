#[derive(Debug, PartialEq, Clone)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_scale_factor: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 3840,
            height: 2160,
            device_scale_factor: 2.0,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Selectors {
    pub username: String,
    pub password: String,
    pub submit: String,
    pub ready: Option<String>,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            username: String::from("#username"),
            password: String::from("#password"),
            submit: String::from("button[type=\"submit\"]"),
            ready: None,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
