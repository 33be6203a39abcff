//! Piecewise-linear color ramp.

use serde::{Deserialize, Serialize};

/// One point of a color ramp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradientStop {
    /// Position along the ramp in `[0, 1]`.
    pub position: f32,
    /// Linear RGB color at this position.
    pub color: [f32; 3],
}

/// Errors from gradient construction.
#[derive(Debug, thiserror::Error)]
pub enum GradientError {
    /// A ramp needs at least two stops to interpolate between.
    #[error("gradient needs at least 2 stops, got {0}")]
    TooFewStops(usize),
}

/// An ordered color ramp with at least two stops.
///
/// Stops are sorted ascending by position at construction, so lookup only
/// needs to find the bracketing pair and blend linearly.
#[derive(Clone, Debug)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Build a gradient, sorting the stops by position.
    ///
    /// Fails fast when fewer than two stops are supplied; the compositor
    /// cannot guess a ramp.
    pub fn new(mut stops: Vec<GradientStop>) -> Result<Self, GradientError> {
        if stops.len() < 2 {
            return Err(GradientError::TooFewStops(stops.len()));
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { stops })
    }

    /// Black-to-white ramp matching the viewer's initial state.
    pub fn black_to_white() -> Self {
        Self {
            stops: vec![
                GradientStop {
                    position: 0.0,
                    color: [0.0, 0.0, 0.0],
                },
                GradientStop {
                    position: 1.0,
                    color: [1.0, 1.0, 1.0],
                },
            ],
        }
    }

    /// The sorted stops.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Interpolated color at ratio `t`, clamped to the ramp's ends.
    pub fn color_at(&self, t: f32) -> [f32; 3] {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        // Find the bracketing pair. Stops are sorted, so the first stop past
        // t closes the bracket.
        let hi = self
            .stops
            .iter()
            .position(|s| s.position >= t)
            .unwrap_or(self.stops.len() - 1);
        let a = self.stops[hi - 1];
        let b = self.stops[hi];

        let span = b.position - a.position;
        let blend = if span <= f32::EPSILON {
            0.0
        } else {
            (t - a.position) / span
        };
        [
            a.color[0] + (b.color[0] - a.color[0]) * blend,
            a.color[1] + (b.color[1] - a.color[1]) * blend,
            a.color[2] + (b.color[2] - a.color[2]) * blend,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(position: f32, color: [f32; 3]) -> GradientStop {
        GradientStop { position, color }
    }

    #[test]
    fn test_too_few_stops_is_an_error() {
        assert!(Gradient::new(vec![]).is_err());
        assert!(Gradient::new(vec![stop(0.0, [1.0, 0.0, 0.0])]).is_err());
    }

    #[test]
    fn test_endpoints_return_exact_stop_colors() {
        let g = Gradient::black_to_white();
        assert_eq!(g.color_at(0.0), [0.0, 0.0, 0.0]);
        assert_eq!(g.color_at(1.0), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_interior_t_blends_linearly() {
        let g = Gradient::new(vec![
            stop(0.0, [0.0, 0.0, 0.0]),
            stop(1.0, [1.0, 0.5, 0.0]),
        ])
        .unwrap();
        let c = g.color_at(0.5);
        assert!((c[0] - 0.5).abs() < 1e-6);
        assert!((c[1] - 0.25).abs() < 1e-6);
        assert!(c[2].abs() < 1e-6);
    }

    #[test]
    fn test_three_stops_bracket_correctly() {
        let g = Gradient::new(vec![
            stop(0.0, [0.0, 0.0, 0.0]),
            stop(0.5, [1.0, 0.0, 0.0]),
            stop(1.0, [1.0, 1.0, 1.0]),
        ])
        .unwrap();
        // Midway through the second span: red blending toward white.
        let c = g.color_at(0.75);
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert!((c[1] - 0.5).abs() < 1e-6);
        assert!((c[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unsorted_stops_are_sorted() {
        let g = Gradient::new(vec![
            stop(1.0, [1.0, 1.0, 1.0]),
            stop(0.0, [0.0, 0.0, 0.0]),
        ])
        .unwrap();
        assert_eq!(g.stops()[0].position, 0.0);
        assert_eq!(g.color_at(0.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_t_clamps_to_ends() {
        let g = Gradient::black_to_white();
        assert_eq!(g.color_at(-3.0), [0.0, 0.0, 0.0]);
        assert_eq!(g.color_at(7.5), [1.0, 1.0, 1.0]);
    }
}
