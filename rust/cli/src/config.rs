use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub difficulty: String,
    pub dealer_delay_ms: u64,
    pub deck_path: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub difficulty: ValueSource,
    pub dealer_delay_ms: ValueSource,
    pub deck_path: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            difficulty: ValueSource::Default,
            dealer_delay_ms: ValueSource::Default,
            deck_path: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            difficulty: "average".into(),
            dealer_delay_ms: 800,
            deck_path: "pazaak_deck.json".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("PAZAAK_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.difficulty {
            cfg.difficulty = v;
            sources.difficulty = ValueSource::File;
        }
        if let Some(v) = f.dealer_delay_ms {
            cfg.dealer_delay_ms = v;
            sources.dealer_delay_ms = ValueSource::File;
        }
        if let Some(v) = f.deck_path {
            cfg.deck_path = v;
            sources.deck_path = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("PAZAAK_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(diff) = std::env::var("PAZAAK_DIFFICULTY")
        && !diff.is_empty()
    {
        cfg.difficulty = diff;
        sources.difficulty = ValueSource::Env;
    }
    if let Ok(delay) = std::env::var("PAZAAK_DELAY_MS")
        && !delay.is_empty()
    {
        cfg.dealer_delay_ms = delay
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid dealer_delay_ms".into()))?;
        sources.dealer_delay_ms = ValueSource::Env;
    }
    if let Ok(path) = std::env::var("PAZAAK_DECK")
        && !path.is_empty()
    {
        cfg.deck_path = path;
        sources.deck_path = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    dealer_delay_ms: Option<u64>,
    #[serde(default)]
    deck_path: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.deck_path.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: deck_path must not be empty".into(),
        ));
    }
    if cfg.dealer_delay_ms > 60_000 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: dealer_delay_ms must be <= 60000".into(),
        ));
    }
    Ok(())
}
