pub mod subscription;

use crate::constants::{DATABASE_HOST, DATABASE_NAME, DATABASE_PASSWORD, DATABASE_USER};
use deadpool_postgres::{Client, Manager, ManagerConfig, Pool, PoolError, RecyclingMethod};
use tokio_postgres::{Config, NoTls};

pub struct Database {
    pool: Pool
}

impl Database {
    pub fn new() -> Self {
        let mut config = Config::new();
        config
            .user(DATABASE_USER.as_str())
            .password(DATABASE_PASSWORD.as_str())
            .host(DATABASE_HOST.as_str())
            .dbname(DATABASE_NAME.as_str());

        let pool = Pool::builder(Manager::from_config(
            config,
            NoTls,
            ManagerConfig { recycling_method: RecyclingMethod::Fast }
        ))
            .max_size(16)
            .build()
            .unwrap();

        Self {
            pool
        }
    }

    async fn get_object(&self) -> Result<Client, PoolError> {
        self.pool.get().await
    }

    pub async fn create_tables(&self) {
        let client = self.get_object().await.unwrap();
        let query = "
            CREATE TABLE IF NOT EXISTS public.subscription (
                guild_id INT8 NOT NULL,
                world VARCHAR(100) NOT NULL,
                channel_id INT8 NOT NULL,
                message_id INT8 NOT NULL,
                CONSTRAINT pk_subscription PRIMARY KEY (guild_id)
            );
            CREATE UNIQUE INDEX IF NOT EXISTS idx_subscription_guild_id ON public.subscription USING btree (guild_id);
        ";

        client.batch_execute(query).await.unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // Pool construction is lazy, so this exercises the config wiring
    // without a running server.
    #[test]
    fn pool_builds_from_environment_credentials() {
        env::set_var("DATABASE_USER", "tataru");
        env::set_var("DATABASE_PASSWORD", "gil");

        let _database = Database::new();
    }
}
