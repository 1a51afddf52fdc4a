/// What eating a rabbit does to the snake beyond growing it.
///
/// Two policies exist in the wild for how growth interacts with speed:
/// one decouples them entirely (speed follows the accelerate input only),
/// the other slows the snake by a fixed decrement per rabbit down to a
/// floor. Both are expressible here; [`EatEffects::health_only`] is the
/// default.
#[derive(Copy, Clone, Debug)]
pub struct EatEffects {
    /// Health is set to this value on every eat
    pub restore_health: f32,
    /// Flat reduction of the cruise speed per rabbit eaten
    pub speed_penalty: f32,
    /// Cruise speed never drops below this through penalties
    pub speed_floor: f32,
}

impl EatEffects {
    /// Eating refills health and leaves speed alone
    pub fn health_only() -> Self {
        Self {
            restore_health: super::FULL_HEALTH,
            speed_penalty: 0.,
            speed_floor: 0.,
        }
    }

    /// Eating refills health and permanently slows the snake
    pub fn slowing(speed_penalty: f32, speed_floor: f32) -> Self {
        Self {
            restore_health: super::FULL_HEALTH,
            speed_penalty,
            speed_floor,
        }
    }

    pub(crate) fn apply(&self, speed: &mut f32, speed_min: &mut f32) {
        if self.speed_penalty > 0. {
            // the cruise speed drops too, otherwise the ramp would undo
            // the penalty on the next tick
            *speed_min = (*speed_min - self.speed_penalty).max(self.speed_floor);
            *speed = (*speed - self.speed_penalty).max(self.speed_floor);
        }
    }
}
