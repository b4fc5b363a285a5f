use crate::{
    database::subscription::Subscription,
    util::{context::Context, report}
};
use std::sync::Arc;
use twilight_model::id::{Id, marker::{ChannelMarker, GuildMarker, MessageMarker}};

pub async fn run(context: Arc<Context>) {
    context.replace_worlds(context.universalis.worlds().await).await;

    let subscriptions = context.database.read_subscriptions().await;

    log::info!("Refreshing tax rate messages for {} subscription(s)", subscriptions.len());

    for subscription in subscriptions {
        refresh_subscription(&context, subscription).await;
    }
}

/// Brings one guild's posted message up to date. Every failure only skips
/// that guild; the rest of the cycle is unaffected.
async fn refresh_subscription(context: &Context, subscription: Subscription) {
    let (guild_id, channel_id, message_id) = match edit_target(&subscription) {
        Some(target) => target,
        None => return
    };
    let world = subscription.world;

    let rates = context.universalis.tax_rates(&world).await;
    let embed = match report::tax_rate_embed(&world, &rates) {
        Some(embed) => embed,
        None => {
            log::warn!("No tax rate data for '{world}', skipping guild {guild_id}");

            return;
        }
    };

    if context.cache.guild_channel(channel_id).is_none() {
        log::warn!("Channel {channel_id} for guild {guild_id} no longer exists, skipping");

        return;
    }

    if context.client.message(channel_id, message_id).exec().await.is_err() {
        log::warn!("Message {message_id} in channel {channel_id} no longer exists, skipping");

        return;
    }

    let embeds = [embed];
    let request = match context.client.update_message(channel_id, message_id).embeds(&embeds) {
        Ok(request) => request,
        Err(error) => {
            log::warn!("Invalid tax rate embed for guild {guild_id}: {error}");

            return;
        }
    };

    if let Err(error) = request.exec().await {
        log::warn!("Failed to edit the tax rate message for guild {guild_id}: {error}");
    }
}

/// Pulls the ids a refresh needs out of a row, or `None` when the row is
/// unusable and has to be skipped.
fn edit_target(subscription: &Subscription) -> Option<(Id<GuildMarker>, Id<ChannelMarker>, Id<MessageMarker>)> {
    if subscription.world.is_empty() {
        return None;
    }

    match (subscription.guild_id, subscription.channel_id, subscription.message_id) {
        (Some(guild_id), Some(channel_id), Some(message_id)) => Some((guild_id, channel_id, message_id)),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(world: &str, guild_id: u64, channel_id: u64, message_id: u64) -> Subscription {
        Subscription {
            guild_id: match guild_id { 0 => None, id => Some(Id::new(id)) },
            world: world.to_string(),
            channel_id: match channel_id { 0 => None, id => Some(Id::new(id)) },
            message_id: match message_id { 0 => None, id => Some(Id::new(id)) }
        }
    }

    #[test]
    fn rows_with_unset_fields_are_skipped() {
        assert!(edit_target(&subscription("exodus", 1, 0, 5)).is_none());
        assert!(edit_target(&subscription("exodus", 1, 4, 0)).is_none());
        assert!(edit_target(&subscription("exodus", 0, 4, 5)).is_none());
        assert!(edit_target(&subscription("", 1, 4, 5)).is_none());
    }

    #[test]
    fn a_complete_row_resolves_to_its_message() {
        let target = edit_target(&subscription("exodus", 1, 4, 5));

        assert_eq!(target, Some((Id::new(1), Id::new(4), Id::new(5))));
    }

    #[test]
    fn one_unusable_row_leaves_the_rest_resolvable() {
        let subscriptions = vec![
            subscription("exodus", 1, 10, 11),
            subscription("leviathan", 2, 0, 21),
            subscription("famfrit", 3, 30, 31)
        ];

        let targets: Vec<_> = subscriptions.iter().filter_map(edit_target).collect();

        assert_eq!(targets, vec![
            (Id::new(1), Id::new(10), Id::new(11)),
            (Id::new(3), Id::new(30), Id::new(31))
        ]);
    }
}
