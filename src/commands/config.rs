//! Settings inspection and editing

use anyhow::Result;

use crate::settings::{config_path, Settings, KEYS};

/// Prints every setting; the token is never shown
pub fn handle_config_show(settings: &Settings) -> Result<()> {
    for key in KEYS {
        let value = settings.get(key)?;
        let shown = match (*key, value) {
            ("token", Some(_)) => "<set>".to_string(),
            (_, Some(value)) => format!("{value:?}"),
            (_, None) => "<not set>".to_string(),
        };
        println!("{key:10} {shown}");
    }
    Ok(())
}

pub fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<()> {
    let mut settings = Settings::load()?;
    settings.set(key, value)?;
    let path = settings.save()?;
    println!("✅ {key} updated in {}", path.display());
    Ok(())
}
