mod refresh;

use chrono::{DateTime, Utc};
use crate::util::{context::Context, reset::next_publish};
use std::sync::Arc;
use tokio::time::{Instant, self};

fn until(target: DateTime<Utc>) -> Instant {
    let instant = Instant::now();
    let difference = target - Utc::now();

    instant + difference.to_std().unwrap_or_default()
}


pub async fn start(context: Arc<Context>) {
    loop {
        let target = next_publish(Utc::now());

        log::info!("Next tax rate refresh scheduled for {target}");
        time::sleep_until(until(target)).await;
        refresh::run(context.clone()).await;
    }
}
