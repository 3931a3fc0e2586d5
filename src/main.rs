mod cli;

use anyhow::Context;
use clap::ArgMatches;
use discogs_client::{
    CallContext, CollectionService, DatabaseService, Discogs, Options, RateLimiter, SearchRequest,
    SearchService,
};
use log::{info, warn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::build_cli();
    let matches = cmd.get_matches();
    let log_level = matches.get_one::<String>("log-level").cloned();
    let version_flag = matches.get_flag("version");

    cli::init_logging(log_level.as_deref());

    if version_flag {
        println!("discogs-client {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        return Ok(());
    };

    let options = Options::from_env().context("reading DISCOGS_* environment")?;
    info!(
        "rate limiting {}",
        if options.rate_limit.is_some() { "on" } else { "off" }
    );

    let output = match name {
        "wantlist" | "collection" => run_listing(options, name, sub).await?,
        _ => {
            let client = discogs_client::new(&options)?;
            run_single(client.as_ref(), name, sub).await?
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Complete listings fan out into many calls and are always paced.
async fn run_listing(
    mut options: Options,
    name: &str,
    sub: &ArgMatches,
) -> anyhow::Result<serde_json::Value> {
    if options.rate_limit.is_none() {
        warn!("{} always paces its calls; ignoring DISCOGS_RATE_LIMIT", name);
        options = options.rate_limit(Arc::new(RateLimiter::new()));
    }
    let client = discogs_client::new_rate_limited(&options)?;
    let ctx = CallContext::new();
    let user = required_str(sub, "username")?;
    let value = if name == "wantlist" {
        serde_json::to_value(client.complete_wantlist(&ctx, user).await?)?
    } else {
        let folder = sub.get_one::<u64>("folder").copied().unwrap_or(0);
        serde_json::to_value(client.complete_collection_items(&ctx, user, folder).await?)?
    };
    Ok(value)
}

async fn run_single(
    client: &dyn Discogs,
    name: &str,
    sub: &ArgMatches,
) -> anyhow::Result<serde_json::Value> {
    let ctx = CallContext::new();
    let value = match name {
        "folders" => {
            let user = required_str(sub, "username")?;
            serde_json::to_value(client.collection_folders(&ctx, user).await?)?
        }
        "release" => {
            let id = required_id(sub)?;
            serde_json::to_value(client.release(&ctx, id).await?)?
        }
        "artist" => {
            let id = required_id(sub)?;
            serde_json::to_value(client.artist(&ctx, id).await?)?
        }
        "search" => {
            let mut request = SearchRequest::query(required_str(sub, "query")?);
            request.per_page = sub.get_one::<u32>("per-page").copied();
            serde_json::to_value(client.search(&ctx, &request).await?)?
        }
        other => anyhow::bail!("unknown command: {}", other),
    };
    Ok(value)
}

fn required_str<'a>(sub: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    sub.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing <{}>", name))
}

fn required_id(sub: &ArgMatches) -> anyhow::Result<u64> {
    sub.get_one::<u64>("id").copied().context("missing <id>")
}
