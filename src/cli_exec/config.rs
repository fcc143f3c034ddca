use academy::model::BackendConfig;
use academy::settings::normalize_redirect;

use super::session::open_store;
use super::*;

fn mask_key(key: &str) -> String {
    let shown: String = key.chars().take(6).collect();
    if shown.len() < key.len() {
        format!("{}...", shown)
    } else {
        shown
    }
}

pub(super) fn handle_config_command(inv: &Invocation, command: ConfigCommands) -> Result<()> {
    let store = open_store(inv)?;

    match command {
        ConfigCommands::Show { json } => {
            let cfg = store.read_config()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&cfg).context("serialize config json")?
                );
                return Ok(());
            }
            println!("data_dir: {}", store.root().display());
            match &cfg.backend {
                Some(b) => {
                    println!("url: {}", b.base_url);
                    println!("anon_key: {}", mask_key(&b.anon_key));
                    println!("redirect_to: {}", b.redirect_to);
                }
                None => println!("No backend configured"),
            }
            println!(
                "session_timeout_secs: {}",
                cfg.session_check_timeout().as_secs()
            );
            println!("http_timeout_secs: {}", cfg.http_timeout().as_secs());
        }
        ConfigCommands::Set {
            session_timeout_secs,
            http_timeout_secs,
        } => {
            let mut cfg = store.read_config()?;
            let o = &inv.overrides;

            if o.url.is_some() || o.anon_key.is_some() || o.redirect_to.is_some() {
                let prev = cfg.backend.take();
                let base_url = o
                    .url
                    .clone()
                    .or_else(|| prev.as_ref().map(|b| b.base_url.clone()))
                    .context("no backend configured yet (pass --url and --anon-key)")?;
                let anon_key = o
                    .anon_key
                    .clone()
                    .or_else(|| prev.as_ref().map(|b| b.anon_key.clone()))
                    .context("no backend configured yet (pass --url and --anon-key)")?;
                url::Url::parse(&base_url)
                    .with_context(|| format!("invalid backend url `{}`", base_url))?;
                let redirect_to = o
                    .redirect_to
                    .clone()
                    .or_else(|| prev.as_ref().map(|b| b.redirect_to.clone()))
                    .unwrap_or_else(|| academy::model::DEFAULT_REDIRECT_TO.to_string());

                cfg.backend = Some(BackendConfig {
                    base_url: base_url.trim_end_matches('/').to_string(),
                    anon_key,
                    redirect_to: normalize_redirect(&redirect_to),
                });
            }
            if let Some(secs) = session_timeout_secs {
                cfg.session_check_timeout_secs = Some(secs);
            }
            if let Some(secs) = http_timeout_secs {
                cfg.http_timeout_secs = Some(secs);
            }

            store.write_config(&cfg)?;
            println!("Configuration saved");
        }
    }

    Ok(())
}
