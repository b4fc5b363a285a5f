use crate::{
    constants::{EMBED_COLOR, RETAINER_LOCATIONS},
    universalis::TaxRates,
    util::{random::title_case, reset::next_tax_reset}
};
use chrono::{DateTime, Utc};
use twilight_embed_builder::EmbedBuilder;
use twilight_model::channel::embed::Embed;

const PAGE_SIZE: usize = 10;
const REDUCED_RATE_THRESHOLD: u8 = 5;

fn rate_line(city: &str, rate: u8) -> String {
    let reduced = if rate < REDUCED_RATE_THRESHOLD { " (Reduced)" } else { "" };

    format!("- {city}: {rate}%{reduced}\n")
}

fn recommended_retainer(city: &str) -> Option<&'static str> {
    RETAINER_LOCATIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(city))
        .map(|(_, retainer)| *retainer)
}

/// Renders the body of a single-world report. An empty report has no minimum
/// rate, so it yields `None` and callers degrade instead of posting.
pub fn tax_rate_description(rates: &TaxRates, reset: DateTime<Utc>) -> Option<String> {
    let lowest_rate = rates.minimum_rate()?;
    let cheapest = rates.iter().filter(|(_, rate)| *rate == lowest_rate).count();
    let mut description = format!("Current Tax Rates until <t:{}:F> are:\n", reset.timestamp());

    for (city, rate) in rates.iter() {
        description.push_str(&rate_line(city, *rate));
    }

    description.push_str(&format!(
        "\nBest location{} to place retainers:\n",
        if cheapest > 1 { "s" } else { "" }
    ));

    for (city, rate) in rates.iter() {
        if *rate == lowest_rate {
            if let Some(retainer) = recommended_retainer(city) {
                description.push_str(&format!("- {retainer}\n"));
            }
        }
    }

    Some(description)
}

/// Builds the embed posted for one world, or `None` when no data is available.
pub fn tax_rate_embed(world: &str, rates: &TaxRates) -> Option<Embed> {
    let description = tax_rate_description(rates, next_tax_reset(Utc::now()))?;
    let embed = EmbedBuilder::new()
        .color(EMBED_COLOR)
        .description(description)
        .title(format!("FFXIV Market Tax Rates - {}", title_case(world)))
        .build()
        .unwrap();

    Some(embed)
}

/// Splits the world list into the fixed-size pages of the all-servers view.
pub fn world_pages(worlds: &[String]) -> Vec<&[String]> {
    worlds.chunks(PAGE_SIZE).collect()
}

/// Renders one page of the all-servers view from `(world, rates)` pairs.
/// Worlds without data are reported as such instead of being dropped.
pub fn all_worlds_page(page: usize, total_pages: usize, reports: &[(String, TaxRates)]) -> String {
    let mut description = format!("Current Tax Rates for all servers (Page {page}/{total_pages}):\n");

    for (world, rates) in reports {
        if rates.is_empty() {
            description.push_str(&format!("\n**{}**: No tax rate data available.\n", title_case(world)));
        } else {
            description.push_str(&format!("\n**{}**:\n", title_case(world)));

            for (city, rate) in rates.iter() {
                description.push_str(&rate_line(city, *rate));
            }
        }
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rates_of(entries: &[(&str, u8)]) -> TaxRates {
        entries.iter().map(|(city, rate)| (city.to_string(), *rate)).collect()
    }

    #[test]
    fn every_city_tied_at_the_minimum_is_recommended() {
        let rates = rates_of(&[("Limsa Lominsa", 3), ("Gridania", 3), ("Kugane", 7)]);
        let description = tax_rate_description(&rates, Utc::now()).unwrap();

        assert!(description.contains("- Limsa Lominsa: 3% (Reduced)\n"));
        assert!(description.contains("- Gridania: 3% (Reduced)\n"));
        assert!(description.contains("- Kugane: 7%\n"));
        assert!(!description.contains("- Kugane: 7% (Reduced)"));
        assert!(description.contains("Best locations to place retainers:\n"));
        assert!(description.contains("- Frydwyb (Limsa Lominsa Lower Decks 8.3,11.5)\n"));
        assert!(description.contains("- Parnell (Old Gridania 14.6,9.3)\n"));
        assert!(!description.contains("Kazashi"));
    }

    #[test]
    fn a_single_cheapest_city_reads_singular() {
        let rates = rates_of(&[("Ishgard", 5), ("Kugane", 6)]);
        let description = tax_rate_description(&rates, Utc::now()).unwrap();

        assert!(description.contains("Best location to place retainers:\n"));
        assert!(description.contains("- Prunilla (The Pillars 8.1,10.9)\n"));
        // Five percent sits on the threshold and is not a reduced rate.
        assert!(!description.contains("(Reduced)"));
    }

    #[test]
    fn an_empty_report_yields_no_description() {
        assert!(tax_rate_description(&TaxRates::default(), Utc::now()).is_none());
    }

    #[test]
    fn cities_outside_the_retainer_table_are_not_recommended() {
        let rates = rates_of(&[("Gold Saucer", 1), ("Gridania", 1)]);
        let description = tax_rate_description(&rates, Utc::now()).unwrap();
        let recommendations = description.split("Best locations to place retainers:\n").nth(1).unwrap();

        assert!(description.contains("- Gold Saucer: 1% (Reduced)\n"));
        assert_eq!(recommendations, "- Parnell (Old Gridania 14.6,9.3)\n");
    }

    #[test]
    fn retainer_lookup_ignores_case() {
        let rates = rates_of(&[("LIMSA LOMINSA", 2)]);
        let description = tax_rate_description(&rates, Utc::now()).unwrap();

        assert!(description.contains("- Frydwyb"));
    }

    #[test]
    fn the_reset_shows_as_a_discord_timestamp() {
        let reset = Utc.with_ymd_and_hms(2022, 3, 19, 7, 0, 0).unwrap();
        let description = tax_rate_description(&rates_of(&[("Kugane", 4)]), reset).unwrap();

        assert!(description.starts_with(&format!("Current Tax Rates until <t:{}:F> are:\n", reset.timestamp())));
    }

    #[test]
    fn pages_split_in_input_order() {
        let worlds: Vec<String> = (1..=23).map(|n| format!("world{n}")).collect();
        let pages = world_pages(&worlds);

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 10);
        assert_eq!(pages[1].len(), 10);
        assert_eq!(pages[2].len(), 3);
        assert_eq!(pages[0][0], "world1");
        assert_eq!(pages[2][2], "world23");
    }

    #[test]
    fn a_short_list_fits_on_a_single_page() {
        let worlds: Vec<String> = vec!["exodus".to_string()];

        assert_eq!(world_pages(&worlds).len(), 1);
    }

    #[test]
    fn page_rendering_reports_missing_data_per_world() {
        let reports = vec![
            ("exodus".to_string(), rates_of(&[("Limsa Lominsa", 3)])),
            ("leviathan".to_string(), TaxRates::default())
        ];
        let page = all_worlds_page(1, 3, &reports);

        assert!(page.starts_with("Current Tax Rates for all servers (Page 1/3):\n"));
        assert!(page.contains("\n**Exodus**:\n- Limsa Lominsa: 3% (Reduced)\n"));
        assert!(page.contains("\n**Leviathan**: No tax rate data available.\n"));
    }
}
