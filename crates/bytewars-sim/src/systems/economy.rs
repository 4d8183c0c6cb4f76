//! Energy regeneration and per-archetype deploy cooldowns.

use std::collections::BTreeMap;

use bytewars_core::config::LaneConfig;

/// Deploy energy. Regenerates in whole units.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyPool {
    current: f64,
    max: f64,
    regen_per_sec: f64,
    /// Fractional regen not yet converted to a whole unit.
    accumulator: f64,
}

impl EnergyPool {
    pub fn new(lane: &LaneConfig) -> Self {
        Self {
            current: lane.initial_energy.clamp(0.0, lane.max_energy),
            max: lane.max_energy,
            regen_per_sec: lane.energy_regen_rate,
            accumulator: 0.0,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Accrue `dt_ms` of regeneration. Nothing is banked while full.
    pub fn regenerate(&mut self, dt_ms: f64) {
        self.accumulator += self.regen_per_sec * (dt_ms / 1000.0);
        while self.accumulator >= 1.0 && self.current < self.max {
            self.current = (self.current + 1.0).min(self.max);
            self.accumulator -= 1.0;
        }
        if self.current >= self.max {
            self.accumulator = 0.0;
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.current >= f64::from(cost)
    }

    /// Deduct `cost`. Callers check `can_afford` first.
    pub fn spend(&mut self, cost: u32) {
        self.current = (self.current - f64::from(cost)).max(0.0);
    }
}

/// Remaining redeploy cooldown per unit archetype, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CooldownTable {
    remaining_ms: BTreeMap<String, f64>,
}

impl CooldownTable {
    /// A table with every given archetype ready to deploy.
    pub fn ready<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            remaining_ms: ids.into_iter().map(|id| (id.to_string(), 0.0)).collect(),
        }
    }

    /// Unknown ids count as ready.
    pub fn remaining(&self, id: &str) -> f64 {
        self.remaining_ms.get(id).copied().unwrap_or(0.0)
    }

    pub fn start(&mut self, id: &str, duration_ms: f64) {
        self.remaining_ms.insert(id.to_string(), duration_ms);
    }

    pub fn decay(&mut self, dt_ms: f64) {
        for remaining in self.remaining_ms.values_mut() {
            if *remaining > 0.0 {
                *remaining = (*remaining - dt_ms).max(0.0);
            }
        }
    }

    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.remaining_ms
    }
}
