//! Backend settings: command-line flags over environment over `config.json`.

use anyhow::Result;

use crate::model::{BackendConfig, ClientConfig, DEFAULT_REDIRECT_TO};

pub const URL_ENV: &str = "ACADEMY_BACKEND_URL";
pub const ANON_KEY_ENV: &str = "ACADEMY_ANON_KEY";
pub const REDIRECT_ENV: &str = "ACADEMY_REDIRECT_TO";

#[derive(Clone, Debug, Default)]
pub struct BackendOverrides {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub redirect_to: Option<String>,
}

pub fn normalize_redirect(s: &str) -> String {
    let s = s.trim();
    if s.ends_with('/') {
        s.to_string()
    } else {
        format!("{}/", s)
    }
}

pub fn resolve_backend(flags: &BackendOverrides, cfg: &ClientConfig) -> Result<BackendConfig> {
    resolve_backend_with(flags, |k| std::env::var(k).ok(), cfg)
}

pub fn resolve_backend_with(
    flags: &BackendOverrides,
    env: impl Fn(&str) -> Option<String>,
    cfg: &ClientConfig,
) -> Result<BackendConfig> {
    let file = cfg.backend.as_ref();
    let pick = |flag: &Option<String>, var: &str, from_file: Option<&String>| {
        flag.clone()
            .or_else(|| env(var))
            .or_else(|| from_file.cloned())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let base_url = pick(&flags.url, URL_ENV, file.map(|b| &b.base_url));
    let anon_key = pick(&flags.anon_key, ANON_KEY_ENV, file.map(|b| &b.anon_key));
    let (Some(base_url), Some(anon_key)) = (base_url, anon_key) else {
        anyhow::bail!(
            "backend not configured (set {} and {}, or run `academy config set --url ... --anon-key ...`)",
            URL_ENV,
            ANON_KEY_ENV
        );
    };
    url::Url::parse(&base_url)
        .map_err(|e| anyhow::anyhow!("invalid backend url `{}`: {}", base_url, e))?;

    let redirect_to = pick(&flags.redirect_to, REDIRECT_ENV, file.map(|b| &b.redirect_to))
        .unwrap_or_else(|| DEFAULT_REDIRECT_TO.to_string());

    Ok(BackendConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        anon_key,
        redirect_to: normalize_redirect(&redirect_to),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn cfg_with(url: &str, key: &str) -> ClientConfig {
        ClientConfig {
            backend: Some(BackendConfig {
                base_url: url.to_string(),
                anon_key: key.to_string(),
                redirect_to: "http://localhost:3000".to_string(),
            }),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn flags_beat_env_beat_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            (URL_ENV, "https://env.example.co"),
            (ANON_KEY_ENV, "env-key"),
        ]);
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());
        let cfg = cfg_with("https://file.example.co/", "file-key");

        let flags = BackendOverrides {
            url: Some("https://flag.example.co".to_string()),
            ..BackendOverrides::default()
        };
        let b = resolve_backend_with(&flags, lookup, &cfg).unwrap();
        assert_eq!(b.base_url, "https://flag.example.co");
        assert_eq!(b.anon_key, "env-key");
        assert_eq!(b.redirect_to, "http://localhost:3000/");

        let b = resolve_backend_with(&BackendOverrides::default(), |_| None, &cfg).unwrap();
        assert_eq!(b.base_url, "https://file.example.co");
        assert_eq!(b.anon_key, "file-key");
    }

    #[test]
    fn missing_settings_name_both_variables() {
        let err = resolve_backend_with(
            &BackendOverrides::default(),
            |_| None,
            &ClientConfig::default(),
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(URL_ENV) && msg.contains(ANON_KEY_ENV), "{}", msg);
    }

    #[test]
    fn redirect_defaults_and_normalizes() {
        let flags = BackendOverrides {
            url: Some("http://127.0.0.1:54321".to_string()),
            anon_key: Some("k".to_string()),
            redirect_to: None,
        };
        let b = resolve_backend_with(&flags, |_| None, &ClientConfig::default()).unwrap();
        assert_eq!(b.redirect_to, DEFAULT_REDIRECT_TO);
        assert_eq!(normalize_redirect(" http://x.test/app "), "http://x.test/app/");
    }
}
