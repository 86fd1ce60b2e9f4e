//! GitHub token management

use anyhow::Result;

use crate::credentials::{delete_token, lookup_token, prompt_for_token, store_token};
use crate::settings::Settings;

/// Stores a token given on the command line, or asks for one
pub fn handle_token_set(token: Option<String>) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => prompt_for_token()?,
    };
    let mut settings = Settings::load()?;
    let source = store_token(token.trim(), &mut settings)?;
    println!("✅ Token saved to the {source}");
    Ok(())
}

pub fn handle_token_delete() -> Result<()> {
    let mut settings = Settings::load()?;
    if delete_token(&mut settings)? {
        println!("✅ Token deleted");
    } else {
        println!("No stored token found.");
    }
    Ok(())
}

/// Reports where the token would come from, without printing it
pub fn handle_token_status(settings: &Settings) -> Result<()> {
    match lookup_token(settings) {
        Some((_, source)) => println!("🟢 Token found in the {source}"),
        None => println!("🔴 No token found; run 'classroom token set' or export GH_TOKEN"),
    }
    Ok(())
}
