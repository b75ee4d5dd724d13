//! Text-mode drawing of the breathing circle.
//!
//! The canvas is a grid of terminal cells. Particles move in a finer
//! sub-cell coordinate space so their drift stays slow at 30 frames per
//! second.

use std::fmt::Write;

use respira_core::{ParticleField, Rgba, StatsDisplay, VisualState, EXPANDED_SIZE};

const SUBCELL_X: f64 = 8.0;
const SUBCELL_Y: f64 = 16.0;

pub struct Scene {
    cols: usize,
    rows: usize,
    particles: ParticleField,
}

impl Scene {
    pub fn new(cols: usize, rows: usize, particle_count: usize, seed: u64) -> Self {
        let cols = cols.max(8);
        let rows = rows.max(4);
        Self {
            cols,
            rows,
            particles: ParticleField::new(
                particle_count,
                cols as f64 * SUBCELL_X,
                rows as f64 * SUBCELL_Y,
                seed,
            ),
        }
    }

    /// Advance the particles and the circle one frame and draw them.
    pub fn frame(&mut self, visual: &mut VisualState, label: &str, stats: &StatsDisplay) -> String {
        visual.frame();
        self.particles.step();
        self.draw(visual, label, stats)
    }

    pub fn draw(&self, visual: &VisualState, label: &str, stats: &StatsDisplay) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        for p in self.particles.particles() {
            let col = ((p.x / SUBCELL_X) as usize).min(self.cols - 1);
            let row = ((p.y / SUBCELL_Y) as usize).min(self.rows - 1);
            grid[row][col] = if p.opacity >= 100 { '*' } else { '.' };
        }

        let max_radius = (self.rows as f64 / 2.0) - 0.5;
        let radius = (visual.current_size() / EXPANDED_SIZE).clamp(0.0, 1.0) * max_radius;
        let cx = (self.cols as f64 - 1.0) / 2.0;
        let cy = (self.rows as f64 - 1.0) / 2.0;
        let mut inside = vec![vec![false; self.cols]; self.rows];
        for (row, cells) in inside.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                // Cells are about twice as tall as wide.
                let dx = (col as f64 - cx) / 2.0;
                let dy = row as f64 - cy;
                *cell = dx * dx + dy * dy <= radius * radius;
            }
        }

        let color = ansi_fg(visual.color());
        let mut out = String::new();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &ch) in cells.iter().enumerate() {
                if inside[row][col] {
                    let _ = write!(out, "{color}\u{2588}\x1b[0m");
                } else {
                    out.push(ch);
                }
            }
            out.push_str("\x1b[K\n");
        }
        let _ = writeln!(out, "{:^width$}\x1b[K", label, width = self.cols);
        let _ = writeln!(
            out,
            "{:^width$}\x1b[K",
            format!(
                "sessions {}  cycles {}  minutes {}",
                stats.sessions, stats.cycles, stats.minutes
            ),
            width = self.cols
        );
        out
    }
}

fn ansi_fg(c: Rgba) -> String {
    format!("\x1b[38;2;{};{};{}m", c.r, c.g, c.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use respira_core::{Phase, Statistics, VisualSink};

    fn filled(frame: &str) -> usize {
        frame.matches('\u{2588}').count()
    }

    #[test]
    fn expanded_circle_covers_more_cells() {
        let scene = Scene::new(60, 20, 0, 1);
        let stats = Statistics::default().display();

        let resting = VisualState::default();
        let mut expanded = VisualState::new(1.0);
        expanded.target_size_changed(EXPANDED_SIZE);
        expanded.frame();

        let small = filled(&scene.draw(&resting, "Ready", &stats));
        let large = filled(&scene.draw(&expanded, "Ready", &stats));
        assert!(small > 0);
        assert!(large > small * 4);
    }

    #[test]
    fn frame_shows_label_and_stats() {
        let mut scene = Scene::new(40, 10, 5, 9);
        let mut visual = VisualState::default();
        visual.phase_changed(Phase::Inhale);
        let stats = Statistics {
            sessions_completed: 3,
            total_cycles: 12,
            total_minutes: 6.25,
        }
        .display();
        let out = scene.frame(&mut visual, "Inhale (4s)", &stats);
        assert!(out.contains("Inhale (4s)"));
        assert!(out.contains("cycles 12"));
        assert!(out.contains("minutes 6.2") || out.contains("minutes 6.3"));
        assert!(out.contains("\x1b[38;2;100;200;255m"));
        assert_eq!(out.lines().count(), 12);
    }
}
