use crate::{
    constants::EMBED_COLOR,
    universalis::TaxRates,
    util::{context::Context, random::{sanitize_world, title_case}, report}
};
use futures_util::future;
use std::{error::Error, sync::Arc};
use twilight_embed_builder::EmbedBuilder;
use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::{
    application::{callback::InteractionResponse, interaction::ApplicationCommand},
    channel::message::MessageFlags
};
use twilight_util::builder::CallbackDataBuilder;

#[derive(CommandModel, CreateCommand, Debug)]
#[command(
    desc = "Shows FFXIV market board tax rates",
    name = "taxrate"
)]
pub struct TaxRateCommand {
    #[command(desc = "The server (world) name, or 'all' to list every server")]
    server: Option<String>
}

impl TaxRateCommand {
    pub async fn run(command: ApplicationCommand, context: Arc<Context>) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = TaxRateCommand::from_interaction(command.data.clone().into())?;
        let server = sanitize_world(&options.server.unwrap_or_default());

        if server.is_empty() {
            return respond_info(&command, &context, "Please specify a server. Usage: `/taxrate <server_name>`.").await;
        }

        if server == "all" {
            return all_servers(&command, &context).await;
        }

        if !context.is_valid_world(&server).await {
            return respond_info(&command, &context, &format!("Invalid server '{server}'. Please specify a valid server.")).await;
        }

        single_server(&command, &context, &server).await
    }
}

async fn single_server(command: &ApplicationCommand, context: &Context, server: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let interaction_client = context.get_interaction_client();

    interaction_client
        .interaction_callback(
            command.id,
            &command.token,
            &InteractionResponse::DeferredChannelMessageWithSource(CallbackDataBuilder::new().build())
        )
        .exec()
        .await?;

    let rates = context.universalis.tax_rates(server).await;
    let embed = match report::tax_rate_embed(server, &rates) {
        Some(embed) => embed,
        None => EmbedBuilder::new()
            .color(EMBED_COLOR)
            .description(format!("No tax rate data available for **{}**.", title_case(server)))
            .build()
            .unwrap()
    };

    interaction_client
        .update_interaction_original(&command.token)
        .embeds(Some(&[embed]))?
        .exec()
        .await?;

    Ok(())
}

async fn all_servers(command: &ApplicationCommand, context: &Context) -> Result<(), Box<dyn Error + Send + Sync>> {
    context
        .get_interaction_client()
        .interaction_callback(
            command.id,
            &command.token,
            &InteractionResponse::DeferredChannelMessageWithSource(CallbackDataBuilder::new().build())
        )
        .exec()
        .await?;

    let mut delivered = 0;

    if let Err(error) = deliver_all_pages(command, context, &mut delivered).await {
        log::warn!("Failed to deliver the all-servers report: {error}");

        let embed = EmbedBuilder::new()
            .color(EMBED_COLOR)
            .description(format!("An error occurred while fetching tax rates for all servers: {error}"))
            .build()
            .unwrap();

        // Pages already sent stay up; the error lands after them, or replaces
        // the deferred response if nothing went out at all.
        if delivered == 0 {
            context
                .get_interaction_client()
                .update_interaction_original(&command.token)
                .embeds(Some(&[embed]))?
                .exec()
                .await?;
        } else {
            context.client.create_message(command.channel_id).embeds(&[embed])?.exec().await?;
        }
    }

    Ok(())
}

async fn deliver_all_pages(command: &ApplicationCommand, context: &Context, delivered: &mut usize) -> Result<(), Box<dyn Error + Send + Sync>> {
    let worlds = context.universalis.worlds().await;

    if worlds.is_empty() {
        let embed = EmbedBuilder::new().color(EMBED_COLOR).description("No servers found.").build()?;

        context
            .get_interaction_client()
            .update_interaction_original(&command.token)
            .embeds(Some(&[embed]))?
            .exec()
            .await?;

        return Ok(());
    }

    let pages = report::world_pages(&worlds);
    let total_pages = pages.len();

    for (index, page) in pages.into_iter().enumerate() {
        let reports = fetch_page_reports(context, page).await;
        let embed = EmbedBuilder::new()
            .color(EMBED_COLOR)
            .title("FFXIV Market Tax Rates - All Servers")
            .description(report::all_worlds_page(index + 1, total_pages, &reports))
            .build()?;

        if index == 0 {
            context
                .get_interaction_client()
                .update_interaction_original(&command.token)
                .embeds(Some(&[embed]))?
                .exec()
                .await?;
        } else {
            context.client.create_message(command.channel_id).embeds(&[embed])?.exec().await?;
        }

        *delivered += 1;
    }

    Ok(())
}

async fn fetch_page_reports(context: &Context, worlds: &[String]) -> Vec<(String, TaxRates)> {
    let fetches = worlds.iter().map(|world| async move {
        (world.clone(), context.universalis.tax_rates(world).await)
    });

    future::join_all(fetches).await
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
