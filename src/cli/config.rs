use std::fs;
use std::path::PathBuf;

use crate::session::{FileStorage, Session};

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("BLOOMS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("blooms").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// The console's persistent key/value store
pub fn storage_file() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("storage.json"))
}

/// Rehydrate the session saved by a previous `auth login`
pub fn open_session() -> anyhow::Result<Session> {
    let storage = FileStorage::new(storage_file()?);
    let key = crate::config::config().session.storage_key.clone();
    Ok(Session::restore(Box::new(storage), key))
}
