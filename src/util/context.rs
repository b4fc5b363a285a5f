use crate::{
    constants::APPLICATION_ID,
    database::Database,
    universalis::Universalis
};
use std::{collections::HashSet, sync::Arc};
use tokio::sync::RwLock;
use twilight_cache_inmemory::{InMemoryCache, ResourceType};
use twilight_gateway::Cluster;
use twilight_http::client::{Client, InteractionClient};

pub struct Context {
    pub cache: InMemoryCache,
    pub client: Arc<Client>,
    pub cluster: Cluster,
    pub database: Database,
    pub universalis: Universalis,
    worlds: RwLock<HashSet<String>>
}


impl Context {
    pub fn new(client: Arc<Client>, cluster: Cluster) -> Self {
        let resource_types = ResourceType::CHANNEL
            | ResourceType::GUILD
            | ResourceType::MEMBER
            | ResourceType::ROLE
            | ResourceType::USER_CURRENT;

        Self {
            cache: InMemoryCache::builder()
                .resource_types(resource_types)
                .build(),
            client,
            cluster,
            database: Database::new(),
            universalis: Universalis::new(),
            worlds: RwLock::new(HashSet::new())
        }
    }

    pub fn get_interaction_client(&self) -> InteractionClient {
        self.client.interaction(*APPLICATION_ID)
    }

    /// Swaps in a fresh world list wholesale. Readers see the old set or the
    /// new one, never a partial mix.
    pub async fn replace_worlds(&self, worlds: Vec<String>) {
        *self.worlds.write().await = worlds.into_iter().collect();
    }

    pub async fn is_valid_world(&self, world: &str) -> bool {
        self.worlds.read().await.contains(world)
    }
}
