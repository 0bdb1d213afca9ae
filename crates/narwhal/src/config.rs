use crate::error::{Error, Result};
use crate::geometry::{Point, Vector};

/// How the accumulated velocity is damped each iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DampingMode {
    /// Multiply by the damping vector `(damping, 0°)` component-wise in polar form.
    ///
    /// The direction of every velocity collapses to `0°`, so nodes only ever drift along the
    /// positive x-axis. Kept as the default so layouts stay bit-identical with existing
    /// consumers.
    #[default]
    Polar,
    /// Scale the velocity magnitude by `damping` and keep its direction.
    Magnitude,
}

impl DampingMode {
    pub(crate) fn apply(self, velocity: Vector, damping: f64) -> Vector {
        match self {
            DampingMode::Polar => velocity * Vector::new(damping, 0.0),
            DampingMode::Magnitude => velocity * damping,
        }
    }
}

/// How below-threshold iterations are counted toward convergence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum StopCounting {
    /// The counter only ever grows.
    #[default]
    Cumulative,
    /// The counter resets whenever an iteration moves the diagram by at least the threshold.
    Consecutive,
}

/// Physics and stop-condition parameters read by [`crate::LayoutEngine::arrange`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Configuration {
    /// Spring stiffness `k` (Hooke's law).
    pub attraction_force: f64,
    /// Charge constant `Q` (Coulomb's law).
    pub repulsion_force: f64,
    /// Rest length of every edge, in pixels.
    pub spring_length: f64,
    pub damping: f64,
    pub max_iterations: usize,
    /// Below-threshold iterations tolerated before the layout is declared converged.
    pub stop_count: usize,
    pub minimum_total_displacement: f64,
    /// Inclusive bounds for the random starting positions. Each coordinate must lie within
    /// [`Configuration::PLACEMENT_LIMIT`].
    pub min_point: Point,
    pub max_point: Point,
    pub damping_mode: DampingMode,
    pub stop_counting: StopCounting,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            attraction_force: 0.1,
            repulsion_force: 10_000.0,
            spring_length: 100.0,
            damping: 0.9,
            max_iterations: 500,
            stop_count: 15,
            minimum_total_displacement: 10.0,
            min_point: Point::new(-50, -50),
            max_point: Point::new(50, 50),
            damping_mode: DampingMode::Polar,
            stop_counting: StopCounting::Cumulative,
        }
    }
}

impl Configuration {
    /// Largest absolute coordinate accepted for `min_point` and `max_point`.
    ///
    /// Keeps placement, bounds and centering arithmetic well inside `i64`.
    pub const PLACEMENT_LIMIT: i64 = i32::MAX as i64;

    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<()> {
            Err(Error::InvalidConfiguration { field, reason })
        }

        let floats = [
            ("attraction_force", self.attraction_force),
            ("repulsion_force", self.repulsion_force),
            ("spring_length", self.spring_length),
            ("damping", self.damping),
            ("minimum_total_displacement", self.minimum_total_displacement),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return invalid(field, "must be finite");
            }
        }

        if self.attraction_force <= 0.0 {
            return invalid("attraction_force", "must be positive");
        }
        if self.repulsion_force <= 0.0 {
            return invalid("repulsion_force", "must be positive");
        }
        if self.spring_length <= 0.0 {
            return invalid("spring_length", "must be positive");
        }
        if !(0.0..1.0).contains(&self.damping) {
            return invalid("damping", "must be in [0, 1)");
        }
        if self.max_iterations == 0 {
            return invalid("max_iterations", "must be positive");
        }
        if self.minimum_total_displacement < 0.0 {
            return invalid("minimum_total_displacement", "must not be negative");
        }
        let in_range = |p: Point| {
            (-Self::PLACEMENT_LIMIT..=Self::PLACEMENT_LIMIT).contains(&p.x)
                && (-Self::PLACEMENT_LIMIT..=Self::PLACEMENT_LIMIT).contains(&p.y)
        };
        if !in_range(self.min_point) {
            return invalid("min_point", "coordinates must be within PLACEMENT_LIMIT");
        }
        if !in_range(self.max_point) {
            return invalid("max_point", "coordinates must be within PLACEMENT_LIMIT");
        }
        if self.min_point.x > self.max_point.x {
            return invalid("min_point", "x must not exceed max_point.x");
        }
        if self.min_point.y > self.max_point.y {
            return invalid("min_point", "y must not exceed max_point.y");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(cfg: &Configuration) -> &'static str {
        match cfg.validate() {
            Err(Error::InvalidConfiguration { field, .. }) => field,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        Configuration::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        let base = Configuration::default();

        let cfg = Configuration {
            damping: 1.0,
            ..base.clone()
        };
        assert_eq!(rejected_field(&cfg), "damping");

        let cfg = Configuration {
            spring_length: 0.0,
            ..base.clone()
        };
        assert_eq!(rejected_field(&cfg), "spring_length");

        let cfg = Configuration {
            repulsion_force: f64::NAN,
            ..base.clone()
        };
        assert_eq!(rejected_field(&cfg), "repulsion_force");

        let cfg = Configuration {
            max_iterations: 0,
            ..base.clone()
        };
        assert_eq!(rejected_field(&cfg), "max_iterations");

        let cfg = Configuration {
            min_point: Point::new(0, 10),
            max_point: Point::new(5, 5),
            ..base
        };
        assert_eq!(rejected_field(&cfg), "min_point");
    }

    #[test]
    fn rejects_placement_bounds_beyond_the_limit() {
        let huge = i64::MAX / 2;
        let cfg = Configuration {
            min_point: Point::new(-huge, -huge),
            max_point: Point::new(huge, huge),
            ..Default::default()
        };
        assert_eq!(rejected_field(&cfg), "min_point");

        let cfg = Configuration {
            max_point: Point::new(50, Configuration::PLACEMENT_LIMIT + 1),
            ..Default::default()
        };
        assert_eq!(rejected_field(&cfg), "max_point");

        let limit = Configuration::PLACEMENT_LIMIT;
        let cfg = Configuration {
            min_point: Point::new(-limit, -limit),
            max_point: Point::new(limit, limit),
            ..Default::default()
        };
        cfg.validate().unwrap();
    }

    #[test]
    fn zero_damping_and_stop_count_are_allowed() {
        let cfg = Configuration {
            damping: 0.0,
            stop_count: 0,
            minimum_total_displacement: 0.0,
            ..Default::default()
        };
        cfg.validate().unwrap();
    }

    #[test]
    fn polar_damping_collapses_direction() {
        let v = Vector::new(10.0, 120.0);
        let polar = DampingMode::Polar.apply(v, 0.5);
        assert_eq!(polar, Vector::new(5.0, 0.0));
        let magnitude = DampingMode::Magnitude.apply(v, 0.5);
        assert_eq!(magnitude, Vector::new(5.0, 120.0));
    }
}
