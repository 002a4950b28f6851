use crate::data_processing::equipment::EquipmentType;
use crate::data_processing::player_id::PlayerId;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grenade value a player was still holding when eliminated.
///
/// # Fields
///
/// * `player_id` - The player the statistics belong to.
/// * `name` - The display name seen first for this player.
/// * `total_wasted` - Summed price of every grenade held at elimination.
/// * `deaths` - Number of eliminations, with or without grenades held.
/// * `avg_per_death` - `total_wasted / deaths`, `0.0` without deaths.
/// * `items` - How many of each grenade kind were lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEconomyStat {
    #[serde(rename = "steam_id_64")]
    pub player_id: PlayerId,
    pub name: String,
    pub total_wasted: u64,
    pub deaths: u32,
    pub avg_per_death: f64,
    pub items: BTreeMap<EquipmentType, u32>,
}

impl PlayerEconomyStat {
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        PlayerEconomyStat {
            player_id,
            name: name.into(),
            total_wasted: 0,
            deaths: 0,
            avg_per_death: 0.0,
            items: BTreeMap::new(),
        }
    }

    /// Tallies one elimination while holding `equipment`.
    ///
    /// # Returns
    ///
    /// The value of the grenades lost in this elimination, so the caller can
    /// add it to its own totals.
    pub fn record_death(&mut self, equipment: &[EquipmentType]) -> u64 {
        self.deaths += 1;

        let mut lost = 0;
        for item in equipment {
            if let Some(price) = item.grenade_price() {
                lost += u64::from(price);
                *self.items.entry(*item).or_insert(0) += 1;
            }
        }
        self.total_wasted += lost;
        lost
    }

    /// Adds the counters of `other` into `self`. The average is left stale;
    /// call [`PlayerEconomyStat::refresh_average`] once all merging is done.
    pub fn merge(&mut self, other: &PlayerEconomyStat) {
        self.total_wasted += other.total_wasted;
        self.deaths += other.deaths;
        for (item, count) in &other.items {
            *self.items.entry(*item).or_insert(0) += count;
        }
    }

    pub fn refresh_average(&mut self) {
        self.avg_per_death = average_per_death(self.total_wasted, self.deaths);
    }

    /// Number of `item` lost, `0` if none.
    pub fn lost(&self, item: EquipmentType) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }
}

/// Average wasted value per death, defined as `0.0` when there are no deaths.
pub fn average_per_death(total_wasted: u64, deaths: u32) -> f64 {
    if deaths == 0 {
        return 0.0;
    }
    total_wasted as f64 / f64::from(deaths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_without_grenades_still_counts() {
        let mut stat = PlayerEconomyStat::new(PlayerId(1), "ropz");
        let lost = stat.record_death(&[EquipmentType::Knife, EquipmentType::Other]);
        stat.refresh_average();

        assert_eq!(lost, 0);
        assert_eq!(stat.deaths, 1);
        assert_eq!(stat.total_wasted, 0);
        assert!(stat.items.is_empty());
        assert_eq!(stat.avg_per_death, 0.0);
    }

    #[test]
    fn every_held_grenade_is_priced() {
        let mut stat = PlayerEconomyStat::new(PlayerId(1), "ropz");
        let lost = stat.record_death(&[
            EquipmentType::Flash,
            EquipmentType::Flash,
            EquipmentType::Molotov,
        ]);

        assert_eq!(lost, 800);
        assert_eq!(stat.lost(EquipmentType::Flash), 2);
        assert_eq!(stat.lost(EquipmentType::Molotov), 1);
        assert_eq!(stat.lost(EquipmentType::Smoke), 0);
    }

    #[test]
    fn merge_sums_counters_and_average_is_recomputed() {
        let mut first = PlayerEconomyStat::new(PlayerId(7), "broky");
        first.record_death(&[EquipmentType::Incendiary]);
        first.refresh_average();
        let mut second = PlayerEconomyStat::new(PlayerId(7), "broky");
        second.record_death(&[EquipmentType::Decoy]);
        second.record_death(&[]);
        second.record_death(&[]);
        second.refresh_average();

        first.merge(&second);
        first.refresh_average();

        assert_eq!(first.deaths, 4);
        assert_eq!(first.total_wasted, 550);
        assert_eq!(first.avg_per_death, 137.5);
    }

    #[test]
    fn zero_deaths_average_is_zero() {
        assert_eq!(average_per_death(0, 0), 0.0);
        assert_eq!(average_per_death(900, 0), 0.0);
        assert_eq!(average_per_death(500, 2), 250.0);
    }
}
