use crate::{
    constants::EMBED_COLOR,
    util::{context::Context, random::{sanitize_world, title_case}, report}
};
use std::{error::Error, sync::Arc};
use twilight_embed_builder::EmbedBuilder;
use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::{
    application::{
        callback::InteractionResponse,
        interaction::{ApplicationCommand, application_command::InteractionChannel}
    },
    channel::message::MessageFlags,
    guild::Permissions
};
use twilight_util::builder::CallbackDataBuilder;

#[derive(CommandModel, CreateCommand, Debug)]
#[command(
    desc = "Sets up a channel for weekly FFXIV tax rate updates",
    name = "setup-taxrate-channel"
)]
pub struct SetupCommand {
    #[command(desc = "The server (world) name, or blank to show the current settings")]
    server: Option<String>,
    #[command(channel_types = "guild_news guild_text", desc = "The channel to post the tax rate message in (defaults to the current channel)")]
    channel: Option<InteractionChannel>
}

impl SetupCommand {
    pub async fn run(command: ApplicationCommand, context: Arc<Context>) -> Result<(), Box<dyn Error + Send + Sync>> {
        let guild_id = command.guild_id.unwrap();
        let user_id = command.member.as_ref().and_then(|member| member.user.as_ref()).map(|user| user.id);
        let is_admin = match user_id {
            Some(user_id) => match context.cache.permissions().root(user_id, guild_id) {
                Ok(permissions) => permissions.contains(Permissions::ADMINISTRATOR),
                Err(_) => false
            },
            None => false
        };

        if !is_admin {
            return respond_info(&command, &context, "Only administrators can set up the tax rate channel.").await;
        }

        let options = SetupCommand::from_interaction(command.data.clone().into())?;
        let server = options.server.unwrap_or_default();

        if server.trim().is_empty() {
            let subscription = context.database.read_subscription(guild_id).await;
            let current_server = match &subscription {
                Some(subscription) if !subscription.world.is_empty() => subscription.world.clone(),
                _ => "Not set".to_string()
            };
            let current_channel = match subscription.as_ref().and_then(|subscription| subscription.channel_id) {
                Some(channel_id) => format!("<#{channel_id}>"),
                None => "Not set".to_string()
            };

            return respond_info(
                &command,
                &context,
                &format!(
                    "To set the taxrate channel: `/setup-taxrate-channel server:<server> [channel:<channel>]`\nCurrent settings:\nServer: {current_server}\nChannel: {current_channel}"
                )
            ).await;
        }

        let server = sanitize_world(&server);

        if !context.is_valid_world(&server).await {
            return respond_info(&command, &context, &format!("Invalid server '{server}'. Please specify a valid server.")).await;
        }

        let channel_id = match &options.channel {
            Some(channel) => channel.id,
            None => command.channel_id
        };

        if context.cache.guild_channel(channel_id).is_none() {
            return respond_info(&command, &context, "Invalid channel ID.").await;
        }

        let interaction_client = context.get_interaction_client();

        interaction_client
            .interaction_callback(
                command.id,
                &command.token,
                &InteractionResponse::DeferredChannelMessageWithSource(
                    CallbackDataBuilder::new().flags(MessageFlags::EPHEMERAL).build()
                )
            )
            .exec()
            .await?;

        let rates = context.universalis.tax_rates(&server).await;
        let embed = match report::tax_rate_embed(&server, &rates) {
            Some(embed) => embed,
            None => {
                let embed = EmbedBuilder::new()
                    .color(EMBED_COLOR)
                    .description(format!("No tax rate data available for **{}**.", title_case(&server)))
                    .build()
                    .unwrap();

                interaction_client
                    .update_interaction_original(&command.token)
                    .embeds(Some(&[embed]))?
                    .exec()
                    .await?;

                return Ok(());
            }
        };

        let message = context
            .client
            .create_message(channel_id)
            .embeds(&[embed])?
            .exec()
            .await?
            .model()
            .await?;

        context.database.upsert_subscription(guild_id, &server, channel_id, message.id).await?;

        // The everyone role shares the guild's id.
        let everyone_update = context
            .client
            .update_channel_permission(channel_id, Permissions::empty(), Permissions::SEND_MESSAGES)
            .role(guild_id.cast())
            .exec()
            .await;

        if let Err(error) = everyone_update {
            log::warn!("Failed to make channel {channel_id} read-only: {error}");
        }

        let embed = EmbedBuilder::new()
            .color(EMBED_COLOR)
            .description(format!(
                "Tax rate updates set for **{server}** in <#{channel_id}> for message: <{}>",
                message.id
            ))
            .build()
            .unwrap();

        interaction_client
            .update_interaction_original(&command.token)
            .embeds(Some(&[embed]))?
            .exec()
            .await?;

        Ok(())
    }
}

async fn respond_info(command: &ApplicationCommand, context: &Context, description: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let embed = EmbedBuilder::new().color(EMBED_COLOR).description(description).build();

    context
        .get_interaction_client()
        .interaction_callback(
            command.id,
            &command.token,
            &InteractionResponse::ChannelMessageWithSource(
                CallbackDataBuilder::new()
                    .embeds(embed)
                    .flags(MessageFlags::EPHEMERAL)
                    .build()
            )
        )
        .exec()
        .await?;

    Ok(())
}
