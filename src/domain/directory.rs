//! Directory - Country and Games lookups

use ahash::AHashMap;

use crate::domain::medal::{CountryRef, GameRef};

/// Resolves NOC codes to display names and back.
///
/// Host countries in `/api/games` are display names, medal records use NOC
/// codes, so the ranking chart needs both directions.
#[derive(Debug, Clone, Default)]
pub struct CountryDirectory {
    names: AHashMap<String, String>,
    codes: AHashMap<String, String>,
    entries: Vec<CountryRef>,
}

impl CountryDirectory {
    pub fn new(countries: Vec<CountryRef>) -> Self {
        let mut names = AHashMap::with_capacity(countries.len());
        let mut codes = AHashMap::with_capacity(countries.len());
        for c in &countries {
            names
                .entry(c.country_noc.clone())
                .or_insert_with(|| c.country.clone());
            codes
                .entry(c.country.to_uppercase())
                .or_insert_with(|| c.country_noc.clone());
        }
        let mut entries = countries;
        entries.sort_by(|a, b| a.country.cmp(&b.country));
        Self {
            names,
            codes,
            entries,
        }
    }

    /// Display name for a code, falling back to the code itself
    pub fn name_of<'a>(&'a self, noc: &'a str) -> &'a str {
        self.names.get(noc).map(String::as_str).unwrap_or(noc)
    }

    /// Code for a display name (case-insensitive); codes resolve to themselves
    pub fn code_of(&self, country: &str) -> Option<&str> {
        if self.names.contains_key(country) {
            return self.names.get_key_value(country).map(|(k, _)| k.as_str());
        }
        self.codes.get(&country.to_uppercase()).map(String::as_str)
    }

    pub fn contains(&self, noc: &str) -> bool {
        self.names.contains_key(noc)
    }

    /// All countries sorted by display name (selector order)
    pub fn entries(&self) -> &[CountryRef] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Host NOC for a given Games year, if the host can be resolved
pub fn host_noc_for_year<'a>(
    games: &'a [GameRef],
    directory: &'a CountryDirectory,
    year: i32,
) -> Option<&'a str> {
    let game = games.iter().find(|g| g.year == year)?;
    directory.code_of(&game.host_country)
}

/// Distinct Games years in ascending order
pub fn game_years(games: &[GameRef]) -> Vec<i32> {
    let mut years: Vec<i32> = games.iter().map(|g| g.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Closest year to `target` among `years`; ties resolve to the earlier year
pub fn nearest_year(years: &[i32], target: i32) -> Option<i32> {
    years
        .iter()
        .copied()
        .min_by_key(|year| ((year - target).abs(), *year))
}
