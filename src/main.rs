mod commands;
mod constants;
mod database;
mod events;
mod tasks;
mod universalis;
mod util;

use commands::*;
use constants::*;
use dotenv::dotenv;
use futures_util::stream::StreamExt;
use std::{error::Error, sync::Arc};
use twilight_gateway::cluster::{ClusterBuilder, ShardScheme};
use twilight_http::client::ClientBuilder;
use twilight_interactions::command::CreateCommand;
use util::context::Context;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    pretty_env_logger::init();

    let client = ClientBuilder::new()
        .token(TOKEN.to_string())
        .build();
    let client = Arc::new(client);
    let client_clone = client.clone();
    let gateway_info = client
        .gateway()
        .authed()
        .exec()
        .await?
        .model()
        .await;
    let shard_scheme = match gateway_info {
        Ok(info) => ShardScheme::Range {
            from: 0,
            to: info.shards - 1,
            total: info.shards
        },
        Err(_) => ShardScheme::Auto,
    };
    let (cluster, mut events) = ClusterBuilder::new(TOKEN.to_string(), *INTENTS)
        .http_client(client_clone)
        .shard_scheme(shard_scheme)
        .build()
        .await?;
    let context = Arc::new(Context::new(client, cluster));
    let context_clone = context.clone();

    tokio::spawn(async move {
        context_clone.cluster.up().await;
    });

    context.database.create_tables().await;
    // Commands validate against the cached world list, so fill it before
    // any interaction can arrive.
    context.replace_worlds(context.universalis.worlds().await).await;

    let scheduler = tokio::spawn(tasks::start(context.clone()));

    context
        .get_interaction_client()
        .set_global_commands(&[
            SetupCommand::create_command().into(),
            TaxRateCommand::create_command().into()
        ])
        .exec()
        .await?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some((_, event)) => {
                    tokio::spawn(events::handle(event, context.clone()));
                },
                None => break
            },
            _ = &mut shutdown => {
                log::info!("Shutting down");

                break;
            }
        }
    }

    scheduler.abort();
    context.cluster.down();

    Ok(())
}
