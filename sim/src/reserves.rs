use serde::{Deserialize, Serialize};

/// Level cap applied when the host config does not override it.
pub const DEFAULT_LEVEL_CAP: u32 = 30;

/// A clamped scalar register. Observers replicate it between ticks, so any
/// write that changes the stored value marks the bar dirty until the sync
/// layer drains the marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    value: f32,
    max: f32,
    #[serde(skip)]
    dirty: bool,
}

impl Bar {
    pub fn new(max: f32, initial: f32) -> Self {
        Self {
            value: initial.clamp(0.0, max),
            max,
            dirty: false,
        }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamp to `[0, max]` and store. Always succeeds.
    pub fn set(&mut self, value: f32) {
        let clamped = value.clamp(0.0, self.max);
        if clamped != self.value {
            self.value = clamped;
            self.dirty = true;
        }
    }

    pub fn add(&mut self, delta: f32) {
        self.set(self.value + delta);
    }

    pub fn percent_fill(&self) -> f32 {
        self.value / self.max
    }

    /// True once since the last drain if the value changed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Experience level counter. Leveling stops at the cap; `can_level_up` is
/// what gates the xp coupling on mana spends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    value: u32,
    cap: u32,
}

impl Level {
    pub fn new(cap: u32) -> Self {
        Self { value: 0, cap }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn add(&mut self, amount: u32) {
        self.value = (self.value + amount).min(self.cap);
    }

    pub fn can_level_up(&self) -> bool {
        self.value < self.cap
    }
}

/// The four resource registers of one character plus its level counter.
///
/// Mana is only mutable through [`MagicReserves::set_mana`] /
/// [`MagicReserves::add_mana`]: spends route part of their cost into the xp
/// bar, and crossing a full xp bar levels the character up, which in turn
/// cheapens every later spend. Spending mana is the sole experience source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagicReserves {
    energy: Bar,
    exertion: Bar,
    mana: Bar,
    xp: Bar,
    level: Level,
}

impl Default for MagicReserves {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_CAP)
    }
}

impl MagicReserves {
    pub fn new(level_cap: u32) -> Self {
        Self {
            energy: Bar::new(100.0, 0.0),
            exertion: Bar::new(10.0, 0.0),
            mana: Bar::new(100.0, 100.0),
            xp: Bar::new(1.0, 0.0),
            level: Level::new(level_cap),
        }
    }

    pub fn energy(&self) -> &Bar {
        &self.energy
    }

    pub fn energy_mut(&mut self) -> &mut Bar {
        &mut self.energy
    }

    pub fn exertion(&self) -> &Bar {
        &self.exertion
    }

    pub fn exertion_mut(&mut self) -> &mut Bar {
        &mut self.exertion
    }

    pub fn mana(&self) -> &Bar {
        &self.mana
    }

    pub fn xp(&self) -> &Bar {
        &self.xp
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Mana setter with the xp coupling. A spend (new value below current)
    /// feeds `diff / 1000^(1+level)` into the xp bar, levels up at most once
    /// when the bar fills, and then only debits `diff / (1+level)` of mana —
    /// the level read after the potential level-up.
    pub fn set_mana(&mut self, value: f32) {
        let diff = value - self.mana.get();
        let value = if diff < 0.0 {
            if self.level.can_level_up() {
                self.xp.add(-diff / 1000f32.powi(1 + self.level.get() as i32));
                if self.xp.percent_fill() >= 1.0 {
                    self.level.add(1);
                    self.xp.set(0.0);
                }
            }
            self.mana.get() + diff / (1 + self.level.get()) as f32
        } else {
            value
        };
        self.mana.set(value);
    }

    pub fn add_mana(&mut self, delta: f32) {
        self.set_mana(self.mana.get() + delta);
    }

    /// Drains the dirty markers of all four bars; true if any changed since
    /// the last sync.
    pub fn take_dirty(&mut self) -> bool {
        // Bitwise-or so every marker is drained even after the first hit.
        self.energy.take_dirty()
            | self.exertion.take_dirty()
            | self.mana.take_dirty()
            | self.xp.take_dirty()
    }
}
