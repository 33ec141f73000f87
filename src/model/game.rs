//! Static game constants supplied by the host
//!
//! Read-only for the whole match. Defaults reproduce the standard
//! 4000x4000 arena so tests and the headless runner need no host.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;

use crate::core::types::{Point, Tick};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConstants {
    /// Side length of the square map
    pub map_size: f64,

    // Melee
    /// Center-to-center reach of the staff swing
    pub staff_range: f64,
    /// Full angular width of the melee arc
    pub staff_sector: f64,
    pub staff_damage: f64,

    // Wizard movement caps (distance per tick)
    pub wizard_forward_speed: f64,
    pub wizard_backward_speed: f64,
    pub wizard_strafe_speed: f64,

    // Ranged abilities
    pub magic_missile_manacost: f64,
    pub magic_missile_direct_damage: f64,
    pub frost_bolt_manacost: f64,
    pub frost_bolt_direct_damage: f64,
    pub fireball_manacost: f64,
    pub fireball_explosion_max_damage: f64,
    pub fireball_explosion_radius: f64,
    pub haste_manacost: f64,
    pub shield_manacost: f64,

    // Minion capabilities, by kind
    pub orc_woodcutter_attack_range: f64,
    pub orc_woodcutter_damage: f64,
    pub fetish_blowdart_attack_range: f64,
    pub dart_direct_damage: f64,

    // Rune bonuses
    pub bonus_appearance_interval_ticks: Tick,
    pub bonus_radius: f64,
}

impl GameConstants {
    /// The two rune spawn spots on the main diagonal
    pub fn bonus_positions(&self) -> [Point; 2] {
        [
            Point::new(0.3 * self.map_size, 0.3 * self.map_size),
            Point::new(0.7 * self.map_size, 0.7 * self.map_size),
        ]
    }
}

impl Default for GameConstants {
    fn default() -> Self {
        Self {
            map_size: 4000.0,

            staff_range: 70.0,
            staff_sector: FRAC_PI_6,
            staff_damage: 12.0,

            wizard_forward_speed: 4.0,
            wizard_backward_speed: 3.0,
            wizard_strafe_speed: 3.0,

            magic_missile_manacost: 12.0,
            magic_missile_direct_damage: 12.0,
            frost_bolt_manacost: 36.0,
            frost_bolt_direct_damage: 35.0,
            fireball_manacost: 120.0,
            fireball_explosion_max_damage: 240.0,
            fireball_explosion_radius: 100.0,
            haste_manacost: 48.0,
            shield_manacost: 60.0,

            orc_woodcutter_attack_range: 50.0,
            orc_woodcutter_damage: 12.0,
            fetish_blowdart_attack_range: 300.0,
            dart_direct_damage: 6.0,

            bonus_appearance_interval_ticks: 2500,
            bonus_radius: 20.0,
        }
    }
}
