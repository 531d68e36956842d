//! Local catalog seeding command.

use std::path::Path;

use serde_json::Value;
use tokio::runtime::Runtime;

use crate::album::AlbumRecord;
use crate::config::Config;
use crate::error::{Error, Result, ResultExt};
use crate::store::SqliteStore;

use super::database_url;

/// Insert the album document in `file` into the local catalog
pub fn cmd_add(
    rt: &Runtime,
    config: &Config,
    file: &Path,
    db: Option<&Path>,
) -> anyhow::Result<()> {
    let album = load_album(file)?;

    let id = rt.block_on(async {
        let store = SqliteStore::open(&database_url(config, db)).await?;
        store
            .insert_album(&album)
            .await
            .with_context(format!("adding {}", file.display()))
    })?;

    println!("✓ Added album {}", id);
    Ok(())
}

fn load_album(path: &Path) -> Result<AlbumRecord> {
    let contents = std::fs::read_to_string(path)
        .with_context(format!("reading {}", path.display()))?;

    match serde_json::from_str(&contents)? {
        Value::Object(map) => Ok(AlbumRecord::from(map)),
        _ => Err(Error::invalid_input(format!(
            "{} must contain a JSON object",
            path.display()
        ))),
    }
}
