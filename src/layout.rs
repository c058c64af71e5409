use crate::{
    constants::WHEEL_COUNT,
    error::{ConfigurationError, SetupErrors},
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WheelPosition {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl WheelPosition {
    /// Wheels in host index order.
    pub const ALL: [WheelPosition; WHEEL_COUNT] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::RearLeft,
        Self::RearRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    fn from_sides(left: bool, front: bool) -> Self {
        match (left, front) {
            (true, true) => Self::FrontLeft,
            (false, true) => Self::FrontRight,
            (true, false) => Self::RearLeft,
            (false, false) => Self::RearRight,
        }
    }
}

impl fmt::Display for WheelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FrontLeft => "front-left",
            Self::FrontRight => "front-right",
            Self::RearLeft => "rear-left",
            Self::RearRight => "rear-right",
        };
        f.write_str(name)
    }
}

/// Maps each wheel position to the host's suspension unit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelLayout {
    units: [usize; WHEEL_COUNT],
}

impl WheelLayout {
    /// Sorts four suspension units into front/rear and left/right.
    ///
    /// Positions are in the vehicle body frame relative to the centre of
    /// mass: `x` grows to the right and `z` grows backward, so a wheel with
    /// negative `x` and negative `z` is the front-left one.
    pub fn classify(body_positions: &[[f64; 3]]) -> Result<Self, SetupErrors> {
        let mut errors = SetupErrors::new();

        if body_positions.len() != WHEEL_COUNT {
            errors.push(ConfigurationError::WheelCount {
                found: body_positions.len(),
            });
            return Err(errors);
        }

        let mut units = [0; WHEEL_COUNT];
        let mut filled = [false; WHEEL_COUNT];

        for (index, &[x, _, z]) in body_positions.iter().enumerate() {
            // NaN compares unequal to zero but belongs to neither side either.
            if !(x < 0.0 || x > 0.0) || !(z < 0.0 || z > 0.0) {
                errors.push(ConfigurationError::AmbiguousWheel { index });
                continue;
            }

            let position = WheelPosition::from_sides(x < 0.0, z < 0.0);
            if filled[position.index()] {
                errors.push(ConfigurationError::DuplicateWheel { position });
            } else {
                filled[position.index()] = true;
                units[position.index()] = index;
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self { units })
    }

    /// Identity mapping for hosts that already report wheels in order.
    pub fn ordered() -> Self {
        Self {
            units: [0, 1, 2, 3],
        }
    }

    /// Host unit index driving `position`.
    pub fn unit(&self, position: WheelPosition) -> usize {
        self.units[position.index()]
    }
}

impl Default for WheelLayout {
    fn default() -> Self {
        Self::ordered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_regardless_of_discovery_order() {
        let positions = [
            [0.9, 0.0, 1.4],   // rear-right
            [-0.9, 0.0, -1.4], // front-left
            [-0.9, 0.0, 1.4],  // rear-left
            [0.9, 0.0, -1.4],  // front-right
        ];
        let layout = WheelLayout::classify(&positions).unwrap();

        assert_eq!(layout.unit(WheelPosition::FrontLeft), 1);
        assert_eq!(layout.unit(WheelPosition::FrontRight), 3);
        assert_eq!(layout.unit(WheelPosition::RearLeft), 2);
        assert_eq!(layout.unit(WheelPosition::RearRight), 0);
    }

    #[test]
    fn every_position_maps_to_a_distinct_unit() {
        let positions = [
            [-0.9, 0.0, 1.4],
            [0.9, 0.0, 1.4],
            [0.9, 0.0, -1.4],
            [-0.9, 0.0, -1.4],
        ];
        let layout = WheelLayout::classify(&positions).unwrap();

        let mut units: Vec<_> = WheelPosition::ALL
            .iter()
            .map(|&wheel| layout.unit(wheel))
            .collect();
        assert_eq!(units, vec![3, 2, 0, 1]);
        units.sort_unstable();
        assert_eq!(units, vec![0, 1, 2, 3]);
    }

    #[test]
    fn rejects_wrong_wheel_count() {
        let errors = WheelLayout::classify(&[[1.0, 0.0, 1.0]; 6]).unwrap_err();
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec![&ConfigurationError::WheelCount { found: 6 }]
        );
    }

    #[test]
    fn reports_every_misplaced_wheel() {
        let positions = [
            [0.0, 0.0, -1.4],
            [-0.9, 0.0, -1.4],
            [-0.9, 0.0, -1.2],
            [0.9, 0.0, f64::NAN],
        ];
        let errors = WheelLayout::classify(&positions).unwrap_err();
        assert_eq!(
            errors.iter().cloned().collect::<Vec<_>>(),
            vec![
                ConfigurationError::AmbiguousWheel { index: 0 },
                ConfigurationError::DuplicateWheel {
                    position: WheelPosition::FrontLeft
                },
                ConfigurationError::AmbiguousWheel { index: 3 },
            ]
        );
    }

    #[test]
    fn front_wheels_come_first() {
        let fronts: Vec<_> = WheelPosition::ALL
            .iter()
            .map(|wheel| (wheel.index(), wheel.is_front()))
            .collect();
        assert_eq!(fronts, vec![(0, true), (1, true), (2, false), (3, false)]);
    }
}
