use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::config::timing;
use crate::error::Result;

/// Life-state value the target uses for a living pawn.
pub const ALIVE_LIFE_STATE: i32 = 256;

/// Which health values count as a live, drawable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HealthPolicy {
    /// Any positive health.
    Positive,
    /// `1..=max`.
    Capped { max: i32 },
}

impl Default for HealthPolicy {
    fn default() -> Self {
        HealthPolicy::Capped { max: 100 }
    }
}

impl HealthPolicy {
    pub fn accepts(&self, health: i32) -> bool {
        match *self {
            HealthPolicy::Positive => health > 0,
            HealthPolicy::Capped { max } => health > 0 && health <= max,
        }
    }
}

/// Whether and how the pawn's life-state field is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LifeStatePolicy {
    /// Skip the read entirely.
    Ignore,
    /// Keep only pawns whose life-state equals `value`.
    RequireValue { value: i32 },
}

impl Default for LifeStatePolicy {
    fn default() -> Self {
        LifeStatePolicy::RequireValue {
            value: ALIVE_LIFE_STATE,
        }
    }
}

impl LifeStatePolicy {
    pub fn accepts(&self, life_state: i32) -> bool {
        match *self {
            LifeStatePolicy::Ignore => true,
            LifeStatePolicy::RequireValue { value } => life_state == value,
        }
    }
}

/// Boolean switches exposed to the operator, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Toggle {
    #[strum(serialize = "Team check")]
    TeamCheck,
    #[strum(serialize = "Head circle")]
    HeadCircle,
    #[strum(serialize = "Skeleton rendering")]
    Skeleton,
    #[strum(serialize = "Box rendering")]
    Box,
    #[strum(serialize = "Health bar rendering")]
    HealthBar,
    #[strum(serialize = "Health text rendering")]
    HealthText,
    #[strum(serialize = "Name rendering")]
    Name,
}

impl Toggle {
    /// Hot-key digit for this switch.
    pub fn key(self) -> char {
        match self {
            Toggle::TeamCheck => '1',
            Toggle::HeadCircle => '2',
            Toggle::Skeleton => '3',
            Toggle::Box => '4',
            Toggle::HealthBar => '5',
            Toggle::HealthText => '6',
            Toggle::Name => '7',
        }
    }

    pub fn from_key(key: char) -> Option<Toggle> {
        match key {
            '1' => Some(Toggle::TeamCheck),
            '2' => Some(Toggle::HeadCircle),
            '3' => Some(Toggle::Skeleton),
            '4' => Some(Toggle::Box),
            '5' => Some(Toggle::HealthBar),
            '6' => Some(Toggle::HealthText),
            '7' => Some(Toggle::Name),
            _ => None,
        }
    }
}

/// Everything a traversal pass and the presentation layer are tuned by.
///
/// Passes take a copy at the start and never look at the shared cell again,
/// so a toggle lands on the next frame at the earliest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Drop entities on the local player's team.
    pub team_check: bool,
    pub head_circle: bool,
    /// When off only the head bone is read and projected.
    pub skeleton: bool,
    pub box_outline: bool,
    pub name: bool,
    pub health_bar: bool,
    pub health_text: bool,
    pub frame_delay_ms: u64,
    /// Number of entity-table slots scanned per pass.
    pub max_entities: usize,
    /// Entities closer than this (taxicab, world units) are dropped.
    pub min_distance: f32,
    pub health_policy: HealthPolicy,
    pub life_state_policy: LifeStatePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            team_check: true,
            head_circle: true,
            skeleton: true,
            box_outline: true,
            name: true,
            health_bar: true,
            health_text: true,
            frame_delay_ms: timing::DEFAULT_FRAME_DELAY_MS,
            max_entities: 64,
            min_distance: 35.0,
            health_policy: HealthPolicy::default(),
            life_state_policy: LifeStatePolicy::default(),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn is_enabled(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::TeamCheck => self.team_check,
            Toggle::HeadCircle => self.head_circle,
            Toggle::Skeleton => self.skeleton,
            Toggle::Box => self.box_outline,
            Toggle::HealthBar => self.health_bar,
            Toggle::HealthText => self.health_text,
            Toggle::Name => self.name,
        }
    }

    pub fn toggle(&mut self, toggle: Toggle) {
        let flag = match toggle {
            Toggle::TeamCheck => &mut self.team_check,
            Toggle::HeadCircle => &mut self.head_circle,
            Toggle::Skeleton => &mut self.skeleton,
            Toggle::Box => &mut self.box_outline,
            Toggle::HealthBar => &mut self.health_bar,
            Toggle::HealthText => &mut self.health_text,
            Toggle::Name => &mut self.name,
        };
        *flag = !*flag;
    }

    /// Shift the frame delay by `delta_ms`, clamped to the allowed range.
    pub fn adjust_frame_delay(&mut self, delta_ms: i64) {
        let next = (self.frame_delay_ms as i64).saturating_add(delta_ms);
        self.frame_delay_ms = next.clamp(
            timing::MIN_FRAME_DELAY_MS as i64,
            timing::MAX_FRAME_DELAY_MS as i64,
        ) as u64;
    }
}

/// Settings shared between the control thread and the frame loop.
///
/// Writers replace fields under the lock; readers only ever see a whole
/// [`Settings`] value through [`SharedSettings::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Settings>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn snapshot(&self) -> Settings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` to the shared value and return the resulting snapshot.
    pub fn update<F>(&self, f: F) -> Settings
    where
        F: FnOnce(&mut Settings),
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard);
        guard.clone()
    }
}
