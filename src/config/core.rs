use super::ZipcrackConfig;
use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "ZIPCRACK_";

impl ZipcrackConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        Self::load_with_overrides(custom_config, None::<()>)
    }

    /// Load every layer, then apply CLI overrides on top
    ///
    /// `overrides` is serialized as a partial config; fields it omits keep the
    /// value from the lower layers.
    pub fn load_with_overrides<T: Serialize>(
        custom_config: Option<&str>,
        overrides: Option<T>,
    ) -> Result<Self> {
        let mut figment = Self::figment(custom_config);
        if let Some(overrides) = overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        let config: ZipcrackConfig = figment
            .extract()
            .context("Failed to parse configuration")?;
        config.validate()?;

        tracing::trace!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Provider stack without CLI overrides
    pub fn figment(custom_config: Option<&str>) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // If custom config is specified, use only that + defaults + env vars
        if let Some(custom_path) = custom_config {
            figment = figment.merge(super::smart_load::auto(custom_path));
        } else {
            let user = Self::user_config_path();
            figment = figment
                .merge(Toml::file(format!("{user}.toml")))
                .merge(Json::file(format!("{user}.json")))
                .merge(Yaml::file(format!("{user}.yaml")))
                .merge(Toml::file("zipcrack.toml"))
                .merge(Json::file("zipcrack.json"))
                .merge(Yaml::file("zipcrack.yaml"))
                .merge(Yaml::file("zipcrack.yml"));
        }

        // Environment variables always have highest priority among files
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Full merged configuration as TOML, for `config show`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/zipcrack/config"),
            Err(_) => "~/.config/zipcrack/config".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_embedded_defaults_match_struct_defaults() {
        let config: ZipcrackConfig = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .extract()
            .unwrap();
        assert_eq!(config, ZipcrackConfig::default());
    }

    #[test]
    fn test_repo_file_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file("zipcrack.toml", "[search]\nmax_length = 6\nmax_threads = 2\n")?;
            jail.set_env("ZIPCRACK_SEARCH__MAX_THREADS", "3");

            let config = ZipcrackConfig::load().expect("config should load");
            assert_eq!(config.search.max_length, 6);
            assert_eq!(config.search.max_threads, 3);
            assert_eq!(config.logging.max_backups, 5);
            Ok(())
        });
    }

    #[test]
    fn test_custom_config_and_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.json", r#"{"search": {"charset": "xyz"}}"#)?;

            #[derive(Serialize)]
            struct Overrides {
                search: SearchOverrides,
            }
            #[derive(Serialize)]
            struct SearchOverrides {
                max_length: i64,
            }

            let config = ZipcrackConfig::load_with_overrides(
                Some("custom.json"),
                Some(Overrides {
                    search: SearchOverrides { max_length: 2 },
                }),
            )
            .expect("config should load");
            assert_eq!(config.search.charset, "xyz");
            assert_eq!(config.search.max_length, 2);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("zipcrack.toml", "[search]\ncharset = \"abca\"\n")?;
            assert!(ZipcrackConfig::load().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_to_toml_round_trips_through_figment() {
        let config = ZipcrackConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: ZipcrackConfig = Figment::new()
            .merge(Toml::string(&rendered))
            .extract()
            .unwrap();
        assert_eq!(parsed, config);
    }
}
