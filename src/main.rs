use anyhow::Context;
use text_flow::SceneConfig;

/// Environment variable naming an optional JSON scene configuration.
const CONFIG_ENV: &str = "TEXT_FLOW_CONFIG";

fn main() -> anyhow::Result<()> {
    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {} from {}", CONFIG_ENV, path))?;
            SceneConfig::from_json(&json)?
        }
        Err(_) => SceneConfig::default(),
    };
    text_flow::run(config)
}
