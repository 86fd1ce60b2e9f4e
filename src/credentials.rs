//! GitHub token lookup and storage
//!
//! Lookup order: OS keyring, then `GH_TOKEN`, then the settings file, then
//! an interactive prompt.

use anyhow::{bail, Context, Result};
use keyring::Entry;
use std::fmt;
use tracing::{debug, warn};

use crate::core::APP_NAME;
use crate::settings::Settings;

pub const TOKEN_ENV: &str = "GH_TOKEN";
const KEYRING_USER: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Environment,
    ConfigFile,
    Prompt,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenSource::Keyring => "system keyring",
            TokenSource::Environment => "GH_TOKEN environment variable",
            TokenSource::ConfigFile => "settings file",
            TokenSource::Prompt => "interactive prompt",
        };
        f.write_str(label)
    }
}

/// Picks the first non-blank token in lookup order
pub fn token_from_sources(
    keyring: Option<String>,
    environment: Option<String>,
    config: Option<String>,
) -> Option<(String, TokenSource)> {
    [
        (keyring, TokenSource::Keyring),
        (environment, TokenSource::Environment),
        (config, TokenSource::ConfigFile),
    ]
    .into_iter()
    .find_map(|(token, source)| {
        let token = token?.trim().to_string();
        (!token.is_empty()).then_some((token, source))
    })
}

fn keyring_entry() -> keyring::Result<Entry> {
    Entry::new(APP_NAME, KEYRING_USER)
}

fn keyring_token() -> Option<String> {
    match keyring_entry().and_then(|entry| entry.get_password()) {
        Ok(token) => Some(token),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            debug!("keyring unavailable: {e}");
            None
        }
    }
}

/// Finds a stored token without prompting
pub fn lookup_token(settings: &Settings) -> Option<(String, TokenSource)> {
    token_from_sources(
        keyring_token(),
        std::env::var(TOKEN_ENV).ok(),
        settings.token.clone(),
    )
}

/// Finds a token, asking on the terminal when none is stored
pub fn resolve_token(settings: &Settings) -> Result<(String, TokenSource)> {
    if let Some(found) = lookup_token(settings) {
        debug!("using token from {}", found.1);
        return Ok(found);
    }
    let token = prompt_for_token()?;
    Ok((token, TokenSource::Prompt))
}

/// Asks for a token on the terminal without echoing it
pub fn prompt_for_token() -> Result<String> {
    let input = rpassword::prompt_password("GitHub token: ")
        .context("failed to read token from terminal")?;
    prompted_token(&input)
}

fn prompted_token(input: &str) -> Result<String> {
    let token = input.trim();
    if token.is_empty() {
        bail!("no token provided; set {TOKEN_ENV} or run 'classroom token set'");
    }
    Ok(token.to_string())
}

/// Stores the token in the keyring, or in the settings file when no keyring works
pub fn store_token(token: &str, settings: &mut Settings) -> Result<TokenSource> {
    match keyring_entry().and_then(|entry| entry.set_password(token)) {
        Ok(()) => Ok(TokenSource::Keyring),
        Err(e) => {
            warn!("keyring unavailable ({e}), storing token in the settings file");
            settings.set("token", token)?;
            settings.save()?;
            Ok(TokenSource::ConfigFile)
        }
    }
}

/// Removes stored tokens; returns false when nothing was stored
pub fn delete_token(settings: &mut Settings) -> Result<bool> {
    let mut removed = match keyring_entry().and_then(|entry| entry.delete_credential()) {
        Ok(()) => true,
        Err(keyring::Error::NoEntry) => false,
        Err(e) => {
            debug!("keyring unavailable: {e}");
            false
        }
    };
    if settings.token.take().is_some() {
        settings.save()?;
        removed = true;
    }
    Ok(removed)
}
