use chrono::NaiveDate;
use stayrate_core::{CatalogError, Season};

/// Season lookup for one hotel: validated, sorted, non-overlapping
/// inclusive intervals. Pure; no side effects.
#[derive(Debug, Clone)]
pub struct SeasonCalendar {
    seasons: Vec<Season>,
}

impl SeasonCalendar {
    /// Build a calendar, rejecting any pair of overlapping intervals. A
    /// conflicting season is an operator configuration error and is never
    /// silently layered.
    pub fn try_new(mut seasons: Vec<Season>) -> Result<Self, CatalogError> {
        seasons.sort_by_key(|s| s.start_date);
        for pair in seasons.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(CatalogError::OverlappingSeasons {
                    label: pair[1].label.clone(),
                });
            }
        }
        Ok(Self { seasons })
    }

    /// The season covering `date`, if any. Binary search over the sorted
    /// starts; absence means the night is unresolvable unless a promotion
    /// covers it.
    pub fn season_for(&self, date: NaiveDate) -> Option<&Season> {
        let idx = self.seasons.partition_point(|s| s.start_date <= date);
        if idx == 0 {
            return None;
        }
        let season = &self.seasons[idx - 1];
        season.contains(date).then_some(season)
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }
}
