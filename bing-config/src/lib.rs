//! Loader for search client configuration with YAML + environment overlays.
//!
//! Sources are merged in order: `BING__`-prefixed environment variables, then
//! any YAML files or inline snippets. After merging, every string value goes
//! through `${VAR}` expansion so secrets can stay out of the file:
//!
//! ```yaml
//! api_key: "${BING_API_KEY}"
//! market: en-US
//! format: json
//! adult: Moderate
//! timeout_secs: 20
//! ```
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Settings for the search facade.
///
/// `format` and `adult` are kept as raw strings here; they are checked
/// against their closed vocabularies when the facade is built.
#[derive(Debug, Clone, Deserialize)]
pub struct BingConfig {
    pub api_key: String,
    /// Override for the base endpoint (mock servers, proxies).
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub adult: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub timeout_secs: Option<u64>,
}

// Environment overrides always arrive as strings.
fn lenient_u64<'de, D>(de: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected unsigned integer, got {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid integer {s:?}: {e}"))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected unsigned integer, got {other}"
        ))),
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct BingConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for BingConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BingConfigLoader {
    /// Start with `BING__` environment overrides only.
    ///
    /// ```
    /// use bing_config::BingConfigLoader;
    ///
    /// let cfg = BingConfigLoader::new()
    ///     .with_yaml_str("api_key: abc123\nmarket: en-GB")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.api_key, "abc123");
    /// assert_eq!(cfg.market.as_deref(), Some("en-GB"));
    /// assert!(cfg.endpoint.is_none());
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("BING").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders, and deserialize.
    ///
    /// Fails when `api_key` is empty or still an unresolved placeholder.
    pub fn load(self) -> Result<BingConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: BingConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        let key = typed.api_key.trim();
        if key.is_empty() || key.contains("${") {
            return Err(ConfigError::Message(
                "api_key is empty or references an unset variable".into(),
            ));
        }

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("MKT", Some("en-US")), ("KEY", Some("k1"))], || {
            let mut v = json!([
                "market-$MKT",
                { "api_key": "${KEY}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["market-en-US", { "api_key": "k1" }, 42, true, null])
            );
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("BAZ", Some("qux")),
                ("BAR", Some("mid-${BAZ}")),
                ("FOO", Some("start-${BAR}-end")),
            ],
            || {
                let mut v = json!("X=${FOO}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn timeout_accepts_string_or_number() {
        let from_num: BingConfig =
            serde_json::from_value(json!({ "api_key": "k", "timeout_secs": 7 })).unwrap();
        assert_eq!(from_num.timeout_secs, Some(7));

        let from_str: BingConfig =
            serde_json::from_value(json!({ "api_key": "k", "timeout_secs": "9" })).unwrap();
        assert_eq!(from_str.timeout_secs, Some(9));

        let missing: BingConfig = serde_json::from_value(json!({ "api_key": "k" })).unwrap();
        assert_eq!(missing.timeout_secs, None);
    }

    #[test]
    fn timeout_rejects_garbage() {
        let got = serde_json::from_value::<BingConfig>(json!({ "api_key": "k", "timeout_secs": "soon" }));
        assert!(got.is_err());
    }
}
