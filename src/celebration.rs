use rand::{seq::SliceRandom, Rng};
use std::time::SystemTime;

use crate::session::CompletionReport;

const SPARKS: [char; 7] = ['✨', '🎈', '⭐', '💫', '🌟', '✓', '🎉'];

/// Particle for celebration animation
#[derive(Debug, Clone)]
pub struct CelebrationParticle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    /// Part of the headline text rather than a loose spark.
    pub is_text: bool,
    pub target_x: f64,
    pub target_y: f64,
}

impl CelebrationParticle {
    fn new(x: f64, y: f64) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            // Balloons drift upwards
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: *SPARKS.choose(&mut rng).unwrap_or(&'✨'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.0..4.0),
            is_text: false,
            target_x: x,
            target_y: y,
        }
    }

    fn new_text_particle(
        x: f64,
        y: f64,
        target_x: f64,
        target_y: f64,
        symbol: char,
        color: usize,
    ) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            x,
            y,
            vel_x: target_x - x,
            vel_y: target_y - y,
            symbol,
            color_index: color,
            age: 0.0,
            max_age: rng.gen_range(3.0..5.0),
            is_text: true,
            target_x,
            target_y,
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        if self.is_text {
            let dist_to_target =
                ((self.target_x - self.x).powi(2) + (self.target_y - self.y).powi(2)).sqrt();
            if dist_to_target > 1.0 {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_x *= 0.95;
                self.vel_y *= 0.95;
            } else {
                self.x = self.target_x;
                self.y = self.target_y;
                self.vel_x = 0.0;
                self.vel_y = 0.0;
            }
        } else {
            self.x += self.vel_x * dt;
            self.y += self.vel_y * dt;
            // Slight buoyancy so sparks float off the top
            self.vel_y -= 2.0 * dt;
        }

        self.age += dt;
        self.age < self.max_age
    }
}

/// Headline for a finished quiz.
pub fn headline(report: &CompletionReport) -> &'static str {
    if report.total_questions > 0 && report.final_score == report.total_questions {
        "PERFECT!"
    } else if report.percentage >= 80.0 {
        "GREAT WORK!"
    } else {
        "QUIZ COMPLETE!"
    }
}

/// Animation state for celebration
#[derive(Debug)]
pub struct CelebrationAnimation {
    pub particles: Vec<CelebrationParticle>,
    pub start_time: SystemTime,
    /// Seconds
    pub duration: f64,
    pub is_active: bool,
    pub terminal_width: f64,
    pub terminal_height: f64,
}

impl CelebrationAnimation {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            start_time: SystemTime::now(),
            duration: 3.0,
            is_active: false,
            terminal_width: 80.0,
            terminal_height: 24.0,
        }
    }

    pub fn start(&mut self, width: u16, height: u16, text: &str) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.start_time = SystemTime::now();
        self.is_active = true;
        self.terminal_width = width as f64;
        self.terminal_height = height as f64;

        let center_x = width as f64 / 2.0;
        let center_y = height as f64 / 2.0;

        self.create_text_particles(text, center_x, center_y, &mut rng);

        for _ in 0..25 {
            let offset_x = rng.gen_range(-15.0..15.0);
            let offset_y = rng.gen_range(0.0..8.0);
            self.particles.push(CelebrationParticle::new(
                center_x + offset_x,
                center_y + offset_y,
            ));
        }
    }

    fn create_text_particles<R: Rng>(
        &mut self,
        text: &str,
        center_x: f64,
        center_y: f64,
        rng: &mut R,
    ) {
        let char_width = 2.0;
        let text_width = (text.chars().count() as f64 - 1.0) * char_width;
        let start_x = center_x - text_width / 2.0;

        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let target_x = start_x + (i as f64 * char_width);
            let target_y = center_y - 2.0;

            let from_x = center_x + rng.gen_range(-10.0..10.0);
            let from_y = center_y + rng.gen_range(-5.0..5.0);
            let color = rng.gen_range(0..7);

            self.particles.push(CelebrationParticle::new_text_particle(
                from_x, from_y, target_x, target_y, ch, color,
            ));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.particles.clear();
    }

    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        let elapsed = self.start_time.elapsed().unwrap_or_default().as_secs_f64();
        if elapsed >= self.duration {
            self.stop();
            return;
        }

        let dt = 0.1;
        let (width, height) = (self.terminal_width, self.terminal_height);
        self.particles.retain_mut(|particle| {
            let still_alive = particle.update(dt);
            if particle.is_text {
                return still_alive;
            }
            let buffer = 5.0;
            let off_screen = particle.y < -buffer
                || particle.y > height + buffer
                || particle.x < -buffer
                || particle.x > width + buffer;
            still_alive && !off_screen
        });
    }
}

impl Default for CelebrationAnimation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(score: usize, total: usize) -> CompletionReport {
        CompletionReport {
            final_score: score,
            total_questions: total,
            percentage: crate::util::percentage(score, total),
        }
    }

    #[test]
    fn test_headline_by_score() {
        assert_eq!(headline(&report(5, 5)), "PERFECT!");
        assert_eq!(headline(&report(4, 5)), "GREAT WORK!");
        assert_eq!(headline(&report(1, 5)), "QUIZ COMPLETE!");
        assert_eq!(headline(&report(0, 0)), "QUIZ COMPLETE!");
    }

    #[test]
    fn test_spark_floats_up() {
        let mut particle = CelebrationParticle::new(10.0, 10.0);
        let initial_y = particle.y;

        assert!(particle.update(0.1));
        assert!(particle.y < initial_y);
    }

    #[test]
    fn test_text_particle_moves_to_target() {
        let mut particle = CelebrationParticle::new_text_particle(0.0, 0.0, 10.0, 5.0, 'A', 0);
        assert!(particle.is_text);

        for _ in 0..10 {
            particle.update(0.1);
        }

        let distance = ((particle.target_x - particle.x).powi(2)
            + (particle.target_y - particle.y).powi(2))
        .sqrt();
        assert!(distance < 5.0);
    }

    #[test]
    fn test_start_creates_text_and_sparks() {
        let mut celebration = CelebrationAnimation::new();
        assert!(!celebration.is_active);

        celebration.start(80, 24, "PERFECT!");

        assert!(celebration.is_active);
        let text: String = celebration
            .particles
            .iter()
            .filter(|p| p.is_text)
            .map(|p| p.symbol)
            .collect();
        assert_eq!(text, "PERFECT!");
        assert!(celebration.particles.iter().any(|p| !p.is_text));
    }

    #[test]
    fn test_text_skips_spaces() {
        let mut celebration = CelebrationAnimation::new();
        celebration.start(80, 24, "QUIZ COMPLETE!");
        let text_count = celebration.particles.iter().filter(|p| p.is_text).count();
        assert_eq!(text_count, "QUIZCOMPLETE!".len());
    }

    #[test]
    fn test_update_keeps_running_within_duration() {
        let mut celebration = CelebrationAnimation::new();
        celebration.start(80, 24, "GREAT WORK!");
        for _ in 0..5 {
            celebration.update();
        }
        assert!(celebration.is_active);
    }

    #[test]
    fn test_stop_clears_particles() {
        let mut celebration = CelebrationAnimation::new();
        celebration.start(80, 24, "PERFECT!");
        celebration.stop();
        assert!(!celebration.is_active);
        assert!(celebration.particles.is_empty());
    }

    #[test]
    fn test_off_screen_sparks_removed() {
        let mut celebration = CelebrationAnimation::new();
        celebration.start(20, 10, "OK");
        celebration
            .particles
            .push(CelebrationParticle::new(100.0, 100.0));

        celebration.update();

        assert!(celebration
            .particles
            .iter()
            .all(|p| p.is_text || (p.x <= 25.0 && p.y <= 15.0)));
    }
}
