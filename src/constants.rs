use lazy_static::lazy_static;
use std::env;
use twilight_gateway::Intents;
use twilight_model::id::{Id, marker::ApplicationMarker};

pub const EMBED_COLOR: u32 = 0x206694;

/// Market city -> retainer to visit, with map coordinates. Looked up
/// case-insensitively; cities missing from this table are never recommended.
pub const RETAINER_LOCATIONS: [(&str, &str); 8] = [
    ("Limsa Lominsa", "Frydwyb (Limsa Lominsa Lower Decks 8.3,11.5)"),
    ("Gridania", "Parnell (Old Gridania 14.6,9.3)"),
    ("Ul'dah", "Chachabi (Ul'dah - Steps of Thal 13.3,9.7)"),
    ("Ishgard", "Prunilla (The Pillars 8.1,10.9)"),
    ("Kugane", "Kazashi (Kugane 11.6,12.1)"),
    ("Crystarium", "Misfrith (The Crystarium 10.4,13.1)"),
    ("Old Sharlayan", "Tanine (Old Sharlayan 12.6,10.8)"),
    ("Tuliyollal", "Wuk Ty'ukuk (Tuliyollal 12.7,13.1)"),
];

lazy_static! {
    pub static ref APPLICATION_ID: Id<ApplicationMarker> = Id::new(env::var("APPLICATION_ID").unwrap().parse::<u64>().unwrap());
    pub static ref DATABASE_USER: String = env::var("DATABASE_USER").unwrap();
    pub static ref DATABASE_PASSWORD: String = env::var("DATABASE_PASSWORD").unwrap();
    pub static ref DATABASE_HOST: String = env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string());
    pub static ref DATABASE_NAME: String = env::var("DATABASE_NAME").unwrap_or_else(|_| "taxrate".to_string());
    pub static ref TOKEN: String = env::var("BOT_TOKEN").unwrap();
    pub static ref INTENTS: Intents = Intents::GUILDS;
}
