use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment a player can be holding when eliminated.
///
/// Only the grenade-class variants carry a price; everything else is ignored
/// by the economy statistics. Unrecognized names deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentType {
    #[serde(rename = "Smoke Grenade")]
    Smoke,
    #[serde(rename = "Flashbang")]
    Flash,
    #[serde(rename = "HE Grenade")]
    HighExplosive,
    #[serde(rename = "Incendiary Grenade")]
    Incendiary,
    #[serde(rename = "Molotov")]
    Molotov,
    #[serde(rename = "Decoy Grenade")]
    Decoy,
    #[serde(rename = "Knife")]
    Knife,
    #[serde(rename = "C4")]
    Bomb,
    #[serde(rename = "Kevlar Vest")]
    Kevlar,
    #[serde(rename = "Defuse Kit")]
    DefuseKit,
    #[serde(other)]
    Other,
}

/// Fixed prices of grenade-class equipment, in the order the tabular report
/// lists them.
pub const GRENADE_PRICES: [(EquipmentType, u32); 6] = [
    (EquipmentType::Smoke, 300),
    (EquipmentType::Flash, 200),
    (EquipmentType::HighExplosive, 300),
    (EquipmentType::Incendiary, 500),
    (EquipmentType::Molotov, 400),
    (EquipmentType::Decoy, 50),
];

impl EquipmentType {
    /// Price of the item if it is grenade-class, `None` otherwise.
    pub fn grenade_price(self) -> Option<u32> {
        GRENADE_PRICES
            .iter()
            .find(|(equipment, _)| *equipment == self)
            .map(|(_, price)| *price)
    }

    pub fn name(self) -> &'static str {
        match self {
            EquipmentType::Smoke => "Smoke Grenade",
            EquipmentType::Flash => "Flashbang",
            EquipmentType::HighExplosive => "HE Grenade",
            EquipmentType::Incendiary => "Incendiary Grenade",
            EquipmentType::Molotov => "Molotov",
            EquipmentType::Decoy => "Decoy Grenade",
            EquipmentType::Knife => "Knife",
            EquipmentType::Bomb => "C4",
            EquipmentType::Kevlar => "Kevlar Vest",
            EquipmentType::DefuseKit => "Defuse Kit",
            EquipmentType::Other => "Other",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grenades_have_fixed_prices() {
        assert_eq!(EquipmentType::Smoke.grenade_price(), Some(300));
        assert_eq!(EquipmentType::Flash.grenade_price(), Some(200));
        assert_eq!(EquipmentType::Incendiary.grenade_price(), Some(500));
        assert_eq!(EquipmentType::Decoy.grenade_price(), Some(50));
    }

    #[test]
    fn non_grenades_are_unpriced() {
        assert_eq!(EquipmentType::Knife.grenade_price(), None);
        assert_eq!(EquipmentType::Bomb.grenade_price(), None);
        assert_eq!(EquipmentType::Other.grenade_price(), None);
    }

    #[test]
    fn unknown_names_deserialize_as_other() {
        let parsed: Vec<EquipmentType> =
            serde_json::from_str(r#"["Molotov", "AK-47", "Flashbang"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![EquipmentType::Molotov, EquipmentType::Other, EquipmentType::Flash]
        );
    }
}
