use serde::{Deserialize, Serialize};

/// Bounds for the guest stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestLimits {
    pub min: u8,
    pub max: u8,
    pub initial: u8,
}

impl Default for GuestLimits {
    fn default() -> Self {
        Self {
            min: 1,
            max: 4,
            initial: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GuestCount(u8);

impl Default for GuestCount {
    fn default() -> Self {
        Self::initial(&GuestLimits::default())
    }
}

impl GuestCount {
    #[must_use]
    pub fn initial(limits: &GuestLimits) -> Self {
        Self::clamped(limits.initial, limits)
    }

    #[must_use]
    pub fn clamped(count: u8, limits: &GuestLimits) -> Self {
        Self(count.clamp(limits.min, limits.max))
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn increment(self, limits: &GuestLimits) -> Self {
        Self::clamped(self.0.saturating_add(1), limits)
    }

    #[must_use]
    pub fn decrement(self, limits: &GuestLimits) -> Self {
        Self::clamped(self.0.saturating_sub(1), limits)
    }

    #[must_use]
    pub fn can_increment(self, limits: &GuestLimits) -> bool {
        self.0 < limits.max
    }

    #[must_use]
    pub fn can_decrement(self, limits: &GuestLimits) -> bool {
        self.0 > limits.min
    }
}
