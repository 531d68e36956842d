//! Album resolution command.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::aggregation::{AggregationService, Resolution};
use crate::album::{AlbumIdentifiers, SourceSet};
use crate::config::{self, Config};
use crate::error::Result;
use crate::providers;
use crate::store::SqliteStore;

use super::{ResolveArgs, database_url};

/// Resolve an album and print the result as pretty JSON.
///
/// Exits with status 1 when the resolution is an error.
pub fn cmd_resolve(rt: &Runtime, config: &Config, args: &ResolveArgs) -> anyhow::Result<()> {
    let timeout = request_timeout(args)?;

    let resolution = rt.block_on(async {
        let service = build_service(config, args).await?;

        let ids = AlbumIdentifiers {
            db_id: args.db_id.clone(),
            spotify_id: args.spotify_id.clone(),
            mbid: args.mbid.clone(),
            discogs_id: args.discogs_id.clone(),
            title: args.title.clone(),
            artist: args.artist.clone(),
        };
        let sources: Option<SourceSet> = args
            .sources
            .as_deref()
            .map(|tags| tags.parse().unwrap_or_default());
        let resolution = service.resolve(&ids, sources.as_ref(), timeout).await;
        service.shutdown();
        anyhow::Ok(resolution)
    })?;

    println!("{}", serde_json::to_string_pretty(&resolution)?);

    if let Resolution::Error { .. } = resolution {
        std::process::exit(1);
    }
    Ok(())
}

/// `--timeout` as a duration. A bad value is an error, never "wait for all".
fn request_timeout(args: &ResolveArgs) -> Result<Option<Duration>> {
    Ok(args.timeout.map(config::timeout_from_secs).transpose()?)
}

async fn build_service(config: &Config, args: &ResolveArgs) -> Result<AggregationService> {
    let default_timeout = config.aggregation.default_timeout()?;
    let mut credentials = config.credentials.clone();
    args.credentials.apply(&mut credentials);

    let store = SqliteStore::open(&database_url(config, args.db.as_deref())).await?;
    let providers = providers::from_config(&credentials, &config.providers)?;

    Ok(AggregationService::builder(Arc::new(store))
        .with_providers(providers)
        .max_concurrency(
            args.max_concurrency
                .unwrap_or(config.aggregation.max_concurrency),
        )
        .default_sources(config.aggregation.default_sources())
        .default_timeout(default_timeout)
        .build())
}
