//! Named flight controls and the per-frame control snapshot.

/// A named control the flight model reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAxis {
    TurnLeft,
    TurnRight,
    PitchUp,
    PitchDown,
    Thrust,
    Brake,
    Warp,
}

impl ControlAxis {
    pub const ALL: [ControlAxis; 7] = [
        ControlAxis::TurnLeft,
        ControlAxis::TurnRight,
        ControlAxis::PitchUp,
        ControlAxis::PitchDown,
        ControlAxis::Thrust,
        ControlAxis::Brake,
        ControlAxis::Warp,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Which controls are held at the instant a frame is simulated.
///
/// Level-triggered: a control stays held for every frame until released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    held: u8,
}

impl ControlState {
    /// Nothing held.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Snapshot with exactly the given controls held.
    pub fn from_held(axes: &[ControlAxis]) -> Self {
        axes.iter().fold(Self::idle(), |state, &axis| state.with(axis))
    }

    /// Builder-style: return a copy with `axis` held.
    pub fn with(mut self, axis: ControlAxis) -> Self {
        self.set(axis, true);
        self
    }

    pub fn set(&mut self, axis: ControlAxis, held: bool) {
        if held {
            self.held |= axis.bit();
        } else {
            self.held &= !axis.bit();
        }
    }

    pub fn is_held(&self, axis: ControlAxis) -> bool {
        self.held & axis.bit() != 0
    }

    pub fn is_idle(&self) -> bool {
        self.held == 0
    }

    /// Iterate over the held controls.
    pub fn held(&self) -> impl Iterator<Item = ControlAxis> + '_ {
        ControlAxis::ALL
            .into_iter()
            .filter(move |&axis| self.is_held(axis))
    }
}
