use crate::config;
use crate::types::{BodySnapshot, SimStats, Vector2};

/// A point mass. Velocity is private: every assignment passes through
/// [`Body::set_velocity`], which clamps to `max_velocity` and applies
/// friction. That happens at assignment time, constructor included, so
/// repeated assignments compound the friction.
#[derive(Clone, Debug)]
pub struct Body {
    pub position: Vector2,
    velocity: Vector2,
    pub acceleration: Vector2,
    pub mass: f64,
    pub size: f64,
    pub fixed: bool,
    friction: f64,
    max_velocity: f64,
    time_scale: f64,
    half_extents: Vector2,
}

impl Body {
    pub fn new(position: Vector2, velocity: Vector2, mass: f64, size: f64, fixed: bool) -> Self {
        let mut body = Self {
            position,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            mass,
            size,
            fixed,
            friction: config::BODY_FRICTION,
            max_velocity: config::BODY_MAX_VELOCITY,
            time_scale: config::BODY_TIME_SCALE,
            half_extents: Vector2::new(config::WORLD_HALF_WIDTH, config::WORLD_HALF_HEIGHT),
        };
        body.set_velocity(velocity);
        body
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Clamps to `max_velocity`, then applies friction, then stores. The
    /// argument is taken by value, so the caller's vector is never mutated.
    pub fn set_velocity(&mut self, velocity: Vector2) {
        let mut v = velocity;
        if v.length() > self.max_velocity {
            v.normalise().scale(self.max_velocity);
        }
        v.scale(self.friction);
        self.velocity = v;
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn set_friction(&mut self, friction: f64) {
        if !friction.is_nan() {
            self.friction = friction;
        }
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn set_max_velocity(&mut self, max_velocity: f64) {
        if !max_velocity.is_nan() {
            self.max_velocity = max_velocity;
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        if !time_scale.is_nan() {
            self.time_scale = time_scale;
        }
    }

    /// Advances velocity and position by one step and applies the edge
    /// wraparound. Fixed bodies do not move, whatever their acceleration.
    pub fn integrate(&mut self) {
        if self.fixed {
            return;
        }
        let velocity = self
            .velocity
            .add_new(self.acceleration.scale_new(self.time_scale));
        self.set_velocity(velocity);
        Vector2::add(&mut self.position, self.velocity.scale_new(self.time_scale));

        // Crossing an edge by more than the overshoot relocates the body just
        // inside the opposite edge. The 30/10 margins are deliberately
        // asymmetric, so re-entry lands slightly inside the viewport.
        if self.position.x > self.half_extents.x + config::WRAP_OVERSHOOT {
            self.position.x = -self.half_extents.x - config::WRAP_INSET;
        } else if self.position.x < -self.half_extents.x - config::WRAP_OVERSHOOT {
            self.position.x = self.half_extents.x + config::WRAP_INSET;
        }
        if self.position.y > self.half_extents.y + config::WRAP_OVERSHOOT {
            self.position.y = -self.half_extents.y - config::WRAP_INSET;
        } else if self.position.y < -self.half_extents.y - config::WRAP_OVERSHOOT {
            self.position.y = self.half_extents.y + config::WRAP_INSET;
        }
    }
}

/// The all-pairs N-body engine. Owns the body collection and the global
/// tunables; the driver calls [`Simulation::step`] once per tick and reads
/// snapshots afterwards.
pub struct Simulation {
    bodies: Vec<Body>,
    gravitational_constant: f64,
    smoothing: f64,
    time_scale: f64,
    dimensions: Vector2,
}

impl Simulation {
    pub fn new(half_extents: Vector2) -> Self {
        Self {
            bodies: Vec::new(),
            gravitational_constant: config::GRAVITATIONAL_CONSTANT,
            smoothing: config::SMOOTHING,
            time_scale: config::TIME_SCALE,
            dimensions: half_extents,
        }
    }

    /// Appends a body and returns its index. The simulation's current time
    /// scale and extents are pushed into the body here, once; changing the
    /// globals later does not touch bodies already added.
    pub fn add_body(&mut self, mut body: Body) -> usize {
        body.time_scale = self.time_scale;
        body.half_extents = self.dimensions;
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Removes by index, shifting every later body down one slot.
    /// Out-of-range indices are ignored.
    pub fn remove_body(&mut self, index: usize) {
        if index < self.bodies.len() {
            self.bodies.remove(index);
        }
    }

    /// One tick: for each body in collection order, accumulate the softened
    /// gravitational pull of every other body, then integrate that body
    /// before moving on. Bodies earlier in the collection therefore already
    /// hold their post-tick positions when later bodies compute distances;
    /// this ordering is part of the simulation's behavior, not an accident.
    pub fn step(&mut self) {
        for x in 0..self.bodies.len() {
            let origin = self.bodies[x].position;
            let mut acceleration = Vector2::ZERO;
            for y in 0..self.bodies.len() {
                if y == x {
                    // A body exerts no force on itself; the pair would
                    // otherwise divide zero by zero.
                    continue;
                }
                let other = &self.bodies[y];
                let mut distance = other.position.subtract_new(origin);
                let sq_d = distance.length_squared();
                let force = self.gravitational_constant * other.mass
                    / (sq_d * (sq_d * self.smoothing).sqrt());
                distance.scale(force);
                Vector2::add(&mut acceleration, distance);
            }
            let body = &mut self.bodies[x];
            body.acceleration = acceleration;
            body.integrate();
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn snapshot(&self, out: &mut Vec<BodySnapshot>) {
        out.clear();
        for body in &self.bodies {
            out.push(BodySnapshot {
                position: body.position,
                velocity: body.velocity,
                mass: body.mass,
                size: body.size,
                fixed: body.fixed,
            });
        }
    }

    /// Squared distance between two bodies, for proximity queries.
    pub fn distance_squared(&self, a: usize, b: usize) -> Option<f64> {
        let pa = self.bodies.get(a)?.position;
        let pb = self.bodies.get(b)?.position;
        Some(pb.subtract_new(pa).length_squared())
    }

    pub fn stats(&self) -> SimStats {
        let mut stats = SimStats::default();
        stats.body_count = self.bodies.len();
        for body in &self.bodies {
            if body.fixed {
                stats.fixed_count += 1;
            }
            stats.total_mass += body.mass;
            let speed = body.velocity.length();
            if speed > stats.max_speed {
                stats.max_speed = speed;
            }
        }
        stats
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    pub fn set_gravitational_constant(&mut self, value: f64) {
        if !value.is_nan() {
            self.gravitational_constant = value;
        }
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn set_smoothing(&mut self, value: f64) {
        if !value.is_nan() {
            self.smoothing = value;
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, value: f64) {
        if !value.is_nan() {
            self.time_scale = value;
        }
    }

    pub fn dimensions(&self) -> Vector2 {
        self.dimensions
    }

    /// New extents apply only to bodies added from now on.
    pub fn set_dimensions(&mut self, half_extents: Vector2) {
        self.dimensions = half_extents;
    }
}
