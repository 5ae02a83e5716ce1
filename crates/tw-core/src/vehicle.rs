//! Vehicle kind enum shared across the movement crates.
//!
//! All variants are always compiled in.  The passability rule, default speed
//! and altitude behaviour of each kind live in `tw-mobility`.

/// The three vehicle variants a map can hold.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleKind {
    /// Small surface vessel: crosses shallow water only.
    Boat,
    /// Large surface vessel: crosses deep and shallow water.
    Ship,
    /// Airborne: ignores terrain while flying, lands on landing-capable tiles.
    Airship,
}

impl VehicleKind {
    /// Every kind, in storage order.
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Boat, VehicleKind::Ship, VehicleKind::Airship];

    /// `true` for the kind that flies and therefore has an altitude.
    #[inline]
    pub fn is_airborne(self) -> bool {
        matches!(self, VehicleKind::Airship)
    }

    /// Position in [`VehicleKind::ALL`]; used to index per-kind arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            VehicleKind::Boat => 0,
            VehicleKind::Ship => 1,
            VehicleKind::Airship => 2,
        }
    }

    /// Move speed a freshly created vehicle starts with.
    pub fn default_move_speed(self) -> u8 {
        match self {
            VehicleKind::Boat => 4,
            VehicleKind::Ship => 5,
            VehicleKind::Airship => 6,
        }
    }

    /// Human-readable label, useful for log lines and save files.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Boat => "boat",
            VehicleKind::Ship => "ship",
            VehicleKind::Airship => "airship",
        }
    }
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
