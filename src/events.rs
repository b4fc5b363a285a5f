use crate::{
    commands::*,
    util::context::Context
};
use std::sync::Arc;
use twilight_model::{
    application::interaction::Interaction,
    gateway::event::Event
};

pub async fn handle(event: Event, context: Arc<Context>) {
    context.cache.update(&event);

    match event {
        Event::InteractionCreate(interaction) => {
            if interaction.guild_id().is_none() {
                return;
            }

            if let Interaction::ApplicationCommand(command) = interaction.0 {
                let result = match command.data.name.as_str() {
                    "setup-taxrate-channel" => SetupCommand::run(*command, context).await,
                    "taxrate" => TaxRateCommand::run(*command, context).await,
                    _ => Ok(())
                };

                if let Err(error) = result {
                    log::warn!("Command handling failed: {error}");
                }
            }
        },
        Event::Ready(ready) => log::info!("{}#{} is online!", ready.user.name, ready.user.discriminator),
        _ => {}
    }
}
