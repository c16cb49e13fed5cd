//! Celebration confetti: a bounded particle list with explicit expiry.
//!
//! Particles fall from above the top edge to past the bottom, drifting
//! sideways and fading near the end of their life. Nothing here touches the
//! word pool or the roll state.

use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::prelude::*;

/// Particles spawned by one burst.
pub const BURST_SIZE: usize = 100;

/// Upper bound on live particles; the oldest are dropped first.
pub const MAX_PARTICLES: usize = 400;

/// Shortest particle lifetime.
pub const MIN_LIFETIME: Duration = Duration::from_secs(2);

/// Longest particle lifetime.
pub const MAX_LIFETIME: Duration = Duration::from_secs(5);

/// Largest sideways drift, in columns.
const MAX_DRIFT: f32 = 10.0;

const PALETTE: [Color; 5] = [
    Color::Rgb(0xff, 0x6b, 0x6b),
    Color::Rgb(0x4e, 0xcd, 0xc4),
    Color::Rgb(0x45, 0xb7, 0xd1),
    Color::Rgb(0x96, 0xce, 0xb4),
    Color::Rgb(0xff, 0xea, 0xa7),
];

/// Glyphs cycled through as a particle spins.
const GLYPHS: [&str; 4] = ["\u{25a0}", "\u{25c6}", "\u{25aa}", "\u{25cf}"];

/// One piece of confetti.
#[derive(Debug, Clone)]
pub struct Particle {
    spawned_at: Instant,
    lifetime: Duration,
    /// Horizontal start as a fraction of the area width.
    x: f32,
    /// Columns travelled sideways over the whole fall.
    drift: f32,
    /// Total rotation in degrees over the whole fall.
    spin: f32,
    color: Color,
}

/// Where a particle is drawn at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Column relative to the area's left edge.
    pub col: i32,
    /// Row relative to the area's top edge; negative means above it.
    pub row: i32,
    /// Glyph for the current rotation.
    pub glyph: &'static str,
    /// Particle color.
    pub color: Color,
    /// Whether the particle is in the fading part of its life.
    pub faded: bool,
}

impl Particle {
    fn random<R: Rng + ?Sized>(now: Instant, rng: &mut R) -> Self {
        let lifetime = rng.random_range(MIN_LIFETIME..=MAX_LIFETIME);
        Self {
            spawned_at: now,
            lifetime,
            x: rng.random_range(0.0..1.0),
            drift: rng.random_range(-MAX_DRIFT..=MAX_DRIFT),
            spin: rng.random_range(0.0..360.0),
            color: PALETTE[rng.random_range(0..PALETTE.len())],
        }
    }

    /// Fraction of the lifetime elapsed at `now`, clamped to `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.spawned_at);
        (elapsed.as_secs_f32() / self.lifetime.as_secs_f32()).min(1.0)
    }

    /// Returns true once the particle's lifetime is over.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.spawned_at) >= self.lifetime
    }

    /// Position and look inside an area of the given size.
    pub fn place(&self, now: Instant, width: u16, height: u16) -> Placement {
        let t = self.progress(now);
        // power2 ease-out
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        let col = self.x * f32::from(width) + self.drift * eased;
        let row = -1.0 + (f32::from(height) + 3.0) * eased;
        let turn = (self.spin * eased / 90.0) as usize % GLYPHS.len();
        Placement {
            col: col.floor() as i32,
            row: row.floor() as i32,
            glyph: GLYPHS[turn],
            color: self.color,
            faded: t > 2.0 / 3.0,
        }
    }
}

/// The live confetti, owned by the display layer.
#[derive(Debug, Default)]
pub struct ConfettiField {
    particles: Vec<Particle>,
}

impl ConfettiField {
    /// An empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one burst of particles.
    pub fn burst<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) {
        self.particles
            .extend((0..BURST_SIZE).map(|_| Particle::random(now, rng)));
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
        tracing::debug!(live = self.particles.len(), "confetti burst");
    }

    /// Drop expired particles. Returns how many were removed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired(now));
        before - self.particles.len()
    }

    /// Returns true while any particle is alive.
    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if no particle is alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Paint the particles over whatever is already in `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect, now: Instant) {
        let buf = frame.buffer_mut();
        for particle in &self.particles {
            let p = particle.place(now, area.width, area.height);
            if p.col < 0 || p.row < 0 {
                continue;
            }
            let (col, row) = (p.col as u16, p.row as u16);
            if col >= area.width || row >= area.height {
                continue;
            }
            let mut style = Style::default().fg(p.color);
            if p.faded {
                style = style.add_modifier(Modifier::DIM);
            }
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(p.glyph).set_style(style);
            }
        }
    }
}
