use crate::database::Database;
use std::error::Error;
use tokio_postgres::Row;
use twilight_model::id::{Id, marker::{ChannelMarker, GuildMarker, MessageMarker}};

#[derive(Debug)]
pub struct Subscription {
    pub guild_id: Option<Id<GuildMarker>>,
    pub world: String,
    pub channel_id: Option<Id<ChannelMarker>>,
    pub message_id: Option<Id<MessageMarker>>
}

// Discord ids are never zero, but `Id::new` panics on one, so a zeroed
// column maps to `None` instead of taking the refresh task down.
impl From<Row> for Subscription {
    fn from(row: Row) -> Self {
        Self {
            guild_id: match row.get::<_, i64>(0) {
                0 => None,
                guild_id => Some(Id::new(guild_id as u64))
            },
            world: row.get(1),
            channel_id: match row.get::<_, i64>(2) {
                0 => None,
                channel_id => Some(Id::new(channel_id as u64))
            },
            message_id: match row.get::<_, i64>(3) {
                0 => None,
                message_id => Some(Id::new(message_id as u64))
            }
        }
    }
}

impl Database {
    pub async fn read_subscription(&self, guild_id: Id<GuildMarker>) -> Option<Subscription> {
        let client = self.get_object().await.ok()?;
        let query = "SELECT * FROM subscription WHERE guild_id = $1;";

        match client.query_one(query, &[&(guild_id.get() as i64)]).await {
            Ok(row) => Some(row.into()),
            Err(_) => None
        }
    }

    /// Every stored subscription. Read failures degrade to an empty list so
    /// the refresh cycle carries on.
    pub async fn read_subscriptions(&self) -> Vec<Subscription> {
        let client = match self.get_object().await {
            Ok(client) => client,
            Err(error) => {
                log::warn!("Failed to reach the database: {error}");

                return vec![];
            }
        };

        match client.query("SELECT * FROM subscription;", &[]).await {
            Ok(rows) => rows.into_iter().map(Subscription::from).collect(),
            Err(error) => {
                log::warn!("Failed to read subscriptions: {error}");

                vec![]
            }
        }
    }

    pub async fn upsert_subscription(
        &self,
        guild_id: Id<GuildMarker>,
        world: &str,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let client = self.get_object().await?;
        let query = "
            INSERT INTO subscription(guild_id, world, channel_id, message_id)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (guild_id)
            DO
            UPDATE SET
                world = EXCLUDED.world,
                channel_id = EXCLUDED.channel_id,
                message_id = EXCLUDED.message_id
        ";

        client
            .query(query, &[
                &(guild_id.get() as i64),
                &world,
                &(channel_id.get() as i64),
                &(message_id.get() as i64)
            ])
            .await?;

        Ok(())
    }
}
