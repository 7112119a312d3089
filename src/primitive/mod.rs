//! Motion primitives and trajectories
//!
//! A [`Primitive`] is one constant-acceleration segment of fixed duration:
//! the atomic edge of the search graph. Per axis,
//! `p(tau) = p0 + v0*tau + 0.5*u*tau^2` and `v(tau) = v0 + u*tau` for
//! `tau` in `[0, dt]`. A [`Trajectory`] is the ordered primitive sequence
//! recovered from a search; it is generic over the primitive type so the
//! search core stays independent of the vehicle model.

use nalgebra::Vector2;

use crate::common::Waypoint;

/// Constant-acceleration motion segment of duration `dt`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub p0: Vector2<f64>,
    pub v0: Vector2<f64>,
    /// Acceleration control held over the segment
    pub u: Vector2<f64>,
    /// Segment duration [s]
    pub dt: f64,
    /// Absolute start time [s]
    pub t0: f64,
}

impl Primitive {
    pub fn new(start: &Waypoint, u: Vector2<f64>, dt: f64) -> Self {
        Self {
            p0: start.pos,
            v0: start.vel,
            u,
            dt,
            t0: start.t,
        }
    }

    /// Position at local time `tau` in `[0, dt]`
    pub fn pos(&self, tau: f64) -> Vector2<f64> {
        self.p0 + self.v0 * tau + self.u * (0.5 * tau * tau)
    }

    /// Velocity at local time `tau` in `[0, dt]`
    pub fn vel(&self, tau: f64) -> Vector2<f64> {
        self.v0 + self.u * tau
    }

    /// State at the end of the segment
    pub fn end(&self) -> Waypoint {
        Waypoint::new(self.pos(self.dt), self.vel(self.dt), self.t0 + self.dt)
    }

    /// Control effort plus time cost: `(|u|^2 + time_weight) * dt`
    pub fn cost(&self, time_weight: f64) -> f64 {
        (self.u.norm_squared() + time_weight) * self.dt
    }

    /// `n + 1` states evenly spaced over the segment, endpoints included
    pub fn sample(&self, n: usize) -> Vec<Waypoint> {
        let n = n.max(1);
        (0..=n)
            .map(|i| {
                let tau = self.dt * i as f64 / n as f64;
                Waypoint::new(self.pos(tau), self.vel(tau), self.t0 + tau)
            })
            .collect()
    }
}

/// Ordered primitive sequence from start to goal
#[derive(Debug, Clone)]
pub struct Trajectory<P> {
    pub primitives: Vec<P>,
}

impl<P> Trajectory<P> {
    pub fn new(primitives: Vec<P>) -> Self {
        Self { primitives }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl<P> Default for Trajectory<P> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Trajectory<Primitive> {
    pub fn total_time(&self) -> f64 {
        self.primitives.iter().map(|pr| pr.dt).sum()
    }

    pub fn total_cost(&self, time_weight: f64) -> f64 {
        self.primitives.iter().map(|pr| pr.cost(time_weight)).sum()
    }

    /// Knot states: the start of each primitive plus the final state
    pub fn waypoints(&self) -> Vec<Waypoint> {
        let mut ws: Vec<Waypoint> = self
            .primitives
            .iter()
            .map(|pr| Waypoint::new(pr.p0, pr.v0, pr.t0))
            .collect();
        if let Some(last) = self.primitives.last() {
            ws.push(last.end());
        }
        ws
    }

    /// Roughly `n` states sampled uniformly along the whole trajectory
    pub fn sample(&self, n: usize) -> Vec<Waypoint> {
        if self.primitives.is_empty() {
            return Vec::new();
        }
        let per = (n / self.primitives.len()).max(1);
        let mut ws = Vec::new();
        for pr in &self.primitives {
            let mut part = pr.sample(per);
            if !ws.is_empty() {
                part.remove(0);
            }
            ws.append(&mut part);
        }
        ws
    }
}
