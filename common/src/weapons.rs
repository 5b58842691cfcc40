use bevy_ecs::prelude::*;
use bevy_math::Vec3;

use crate::{config::WeaponTuning, types::WeaponType};

// ============================================================================
// Loadout
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { remaining_coins: u32 },
    AlreadyOwned,
    InsufficientCoins { needed: u32 },
}

// Owned weapons in unlock order plus the index of the equipped one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loadout {
    owned: Vec<WeaponType>,
    current: usize,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            owned: vec![WeaponType::Dart],
            current: 0,
        }
    }
}

impl Loadout {
    #[must_use]
    pub fn current(&self) -> WeaponType {
        self.owned.get(self.current).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn owns(&self, weapon: WeaponType) -> bool {
        self.owned.contains(&weapon)
    }

    // Cycles to the next owned weapon; None when there is nothing to switch to.
    pub fn cycle(&mut self) -> Option<WeaponType> {
        if self.owned.len() < 2 {
            return None;
        }
        self.current = (self.current + 1) % self.owned.len();
        Some(self.current())
    }

    // Equips an owned weapon; None if it is not owned or already equipped.
    pub fn equip(&mut self, weapon: WeaponType) -> Option<WeaponType> {
        let index = self.owned.iter().position(|w| *w == weapon)?;
        if index == self.current {
            return None;
        }
        self.current = index;
        Some(weapon)
    }

    // Returns true if the weapon was newly added.
    pub fn unlock(&mut self, weapon: WeaponType) -> bool {
        if self.owns(weapon) {
            return false;
        }
        self.owned.push(weapon);
        true
    }

    // Spends coins on a weapon and equips it.
    pub fn purchase(&mut self, weapon: WeaponType, price: u32, coins: &mut u32) -> PurchaseOutcome {
        if self.owns(weapon) {
            return PurchaseOutcome::AlreadyOwned;
        }
        if *coins < price {
            return PurchaseOutcome::InsufficientCoins { needed: price - *coins };
        }
        *coins -= price;
        self.unlock(weapon);
        self.equip(weapon);
        PurchaseOutcome::Purchased {
            remaining_coins: *coins,
        }
    }
}

// ============================================================================
// Cooldown
// ============================================================================

#[must_use]
pub fn weapon_cooldown(weapon: WeaponType, tuning: &WeaponTuning) -> f32 {
    match weapon {
        WeaponType::Dart => tuning.dart.cooldown,
        WeaponType::Katana => tuning.katana.cooldown,
    }
}

#[must_use]
pub fn weapon_damage(weapon: WeaponType, tuning: &WeaponTuning) -> u32 {
    match weapon {
        WeaponType::Dart => tuning.dart.damage,
        WeaponType::Katana => tuning.katana.damage,
    }
}

// Time of the last attack and the cooldown of the weapon that made it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShotClock {
    last_shot_time: Option<f32>,
    cooldown: f32,
}

impl ShotClock {
    #[must_use]
    pub fn can_shoot(&self, now: f32) -> bool {
        self.last_shot_time
            .is_none_or(|last| now - last >= self.cooldown)
    }

    pub const fn record_shot(&mut self, now: f32, cooldown: f32) {
        self.last_shot_time = Some(now);
        self.cooldown = cooldown;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Projectile Component
// ============================================================================

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub direction: Vec3, // unit vector
    pub weapon: WeaponType,
    pub damage: u32,
    pub speed: f32,
}

impl Projectile {
    #[must_use]
    pub fn dart(direction: Vec3, tuning: &WeaponTuning) -> Self {
        Self {
            direction: direction.normalize_or(Vec3::Z),
            weapon: WeaponType::Dart,
            damage: tuning.dart.damage,
            speed: tuning.dart.speed,
        }
    }

    #[must_use]
    pub fn step(&self, position: Vec3, delta: f32) -> Vec3 {
        position + self.direction * self.speed * delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_needs_two_weapons() {
        let mut loadout = Loadout::default();
        assert_eq!(loadout.cycle(), None);
        assert!(loadout.unlock(WeaponType::Katana));
        assert!(!loadout.unlock(WeaponType::Katana));
        assert_eq!(loadout.cycle(), Some(WeaponType::Katana));
        assert_eq!(loadout.cycle(), Some(WeaponType::Dart));
    }

    #[test]
    fn purchase_spends_coins_and_equips() {
        let mut loadout = Loadout::default();
        let mut coins = 49;
        assert_eq!(
            loadout.purchase(WeaponType::Katana, 50, &mut coins),
            PurchaseOutcome::InsufficientCoins { needed: 1 }
        );
        coins = 62;
        assert_eq!(
            loadout.purchase(WeaponType::Katana, 50, &mut coins),
            PurchaseOutcome::Purchased { remaining_coins: 12 }
        );
        assert_eq!(loadout.current(), WeaponType::Katana);
        assert_eq!(loadout.purchase(WeaponType::Katana, 50, &mut coins), PurchaseOutcome::AlreadyOwned);
        assert_eq!(coins, 12);
    }

    #[test]
    fn equip_rejects_unowned_weapons() {
        let mut loadout = Loadout::default();
        assert_eq!(loadout.equip(WeaponType::Katana), None);
        assert_eq!(loadout.equip(WeaponType::Dart), None);
        assert_eq!(loadout.current(), WeaponType::Dart);
    }

    #[test]
    fn cooldown_uses_weapon_of_last_shot() {
        let tuning = WeaponTuning::default();
        let mut clock = ShotClock::default();
        assert!(clock.can_shoot(0.0));
        clock.record_shot(1.0, weapon_cooldown(WeaponType::Katana, &tuning));
        assert!(!clock.can_shoot(1.4));
        assert!(clock.can_shoot(1.61));

        clock.record_shot(2.0, weapon_cooldown(WeaponType::Dart, &tuning));
        assert!(!clock.can_shoot(2.2));
        assert!(clock.can_shoot(2.31));
    }

    #[test]
    fn dart_flies_along_its_direction() {
        let dart = Projectile::dart(Vec3::new(0.0, 0.0, 2.0), &WeaponTuning::default());
        let next = dart.step(Vec3::ZERO, 0.1);
        assert!((next - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }
}
