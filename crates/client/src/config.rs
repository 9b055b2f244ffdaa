use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub endpoint: EndpointSettings,
    pub forum: ForumSettings,
    pub poll: PollSettings,
}

#[derive(Deserialize, Clone)]
pub struct EndpointSettings {
    pub base_url: String,
}

#[derive(Deserialize, Clone)]
pub struct ForumSettings {
    // validated into a WorkId at startup
    pub work_id: i64,
}

#[derive(Deserialize, Clone)]
pub struct PollSettings {
    pub interval_ms: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("endpoint.base_url", "http://127.0.0.1:8000")?
            .set_default("forum.work_id", 1)?
            .set_default("poll.interval_ms", 1000)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("FILVIF_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("FILVIF_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
