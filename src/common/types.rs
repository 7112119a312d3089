//! Common types used throughout motion_primitive_planner

use nalgebra::Vector2;

use crate::common::traits::TimedState;

/// Continuous planar vehicle state: position, velocity, and time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub t: f64,
}

impl Waypoint {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, t: f64) -> Self {
        Self { pos, vel, t }
    }

    /// Stationary state at a position, t = 0
    pub fn at_rest(x: f64, y: f64) -> Self {
        Self {
            pos: Vector2::new(x, y),
            vel: Vector2::zeros(),
            t: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }
}

impl TimedState for Waypoint {
    fn time(&self) -> f64 {
        self.t
    }
}

/// Quantized identity of a [`Waypoint`]
///
/// Two waypoints that round to the same position cell, velocity cell, and
/// time bucket are the same search state. Produced by the environment, which
/// owns the quantization resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaypointKey {
    pub pos: [i32; 2],
    pub vel: [i32; 2],
    pub t: i32,
}

impl WaypointKey {
    pub fn quantize(wp: &Waypoint, pos_res: f64, vel_res: f64, dt: f64) -> Self {
        Self {
            pos: [
                (wp.pos.x / pos_res).round() as i32,
                (wp.pos.y / pos_res).round() as i32,
            ],
            vel: [
                (wp.vel.x / vel_res).round() as i32,
                (wp.vel.y / vel_res).round() as i32,
            ],
            t: (wp.t / dt).round() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_time() {
        let wp = Waypoint::new(Vector2::new(1.0, 2.0), Vector2::new(0.5, 0.0), 3.0);
        assert_eq!(wp.time(), 3.0);
        assert!((wp.speed() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_key_quantization_merges_close_states() {
        let a = Waypoint::new(Vector2::new(1.02, 0.0), Vector2::zeros(), 1.0);
        let b = Waypoint::new(Vector2::new(0.98, 0.0), Vector2::zeros(), 1.0);
        let ka = WaypointKey::quantize(&a, 0.1, 0.1, 1.0);
        let kb = WaypointKey::quantize(&b, 0.1, 0.1, 1.0);
        assert_eq!(ka, kb);
    }

    #[test]
    fn test_key_quantization_separates_time_buckets() {
        let a = Waypoint::new(Vector2::zeros(), Vector2::zeros(), 0.0);
        let b = Waypoint::new(Vector2::zeros(), Vector2::zeros(), 1.0);
        let ka = WaypointKey::quantize(&a, 0.1, 0.1, 1.0);
        let kb = WaypointKey::quantize(&b, 0.1, 0.1, 1.0);
        assert_ne!(ka, kb);
    }
}
