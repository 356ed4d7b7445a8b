use std::env;

/// Overrides the prompt text.
pub const PROMPT_VAR: &str = "PIPESH_PROMPT";
/// Any non-empty value turns colour off (https://no-color.org).
pub const NO_COLOR_VAR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub banner: Vec<String>,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: ">> ".to_string(),
            banner: vec![
                "Welcome to pipesh!".to_string(),
                "No tab completion and no command history.".to_string(),
            ],
            color: true,
        }
    }
}

/// Defaults, adjusted by the interpreter's environment.
pub fn init() -> Config {
    from_vars(env::vars())
}

pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Config
where
    K: AsRef<str>,
    V: Into<String>,
{
    let mut config = Config::default();
    for (key, value) in vars {
        let value: String = value.into();
        match key.as_ref() {
            PROMPT_VAR => config.prompt = value,
            NO_COLOR_VAR => config.color = config.color && value.is_empty(),
            _ => {}
        }
    }
    config
}
