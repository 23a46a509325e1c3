use dnstoy_domain::{CliOverrides, Config};

/// Load, override, then validate. Logging is not up yet, so failures only
/// surface through `main`'s error.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
