use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// One ambient particle. Coordinates are in viewport units.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: u8,
}

/// Drifting background particles that bounce off the viewport edges.
#[derive(Debug, Clone)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(count: usize, width: f64, height: f64, seed: u64) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let mut rng = Pcg64::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| Particle {
                x: rng.gen_range(0.0..=width),
                y: rng.gen_range(0.0..=height),
                size: rng.gen_range(2.0..8.0),
                vx: rng.gen_range(-0.5..0.5),
                vy: rng.gen_range(-0.5..0.5),
                opacity: rng.gen_range(50..150),
            })
            .collect();
        Self {
            width,
            height,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Move every particle one frame, reflecting off the edges.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            if p.x < 0.0 || p.x > self.width {
                p.vx = -p.vx;
                p.x = p.x.clamp(0.0, self.width);
            }
            if p.y < 0.0 || p.y > self.height {
                p.vy = -p.vy;
                p.y = p.y.clamp(0.0, self.height);
            }
        }
    }

    /// Change the viewport, pulling particles back inside it.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        for p in &mut self.particles {
            p.x = p.x.clamp(0.0, self.width);
            p.y = p.y.clamp(0.0, self.height);
        }
    }
}
