//! Parallax starfield behind the board.
//!
//! Stars drift toward the viewer through `[z_near, z_far)` and wrap back to
//! the far plane. Purely decorative; the snake never reads it.

use crate::config::StarfieldConfig;
use crate::constants::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A star projected onto the virtual canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedStar {
    pub x: f64,
    pub y: f64,
    /// 1.0 on the near plane, 0.0 on the far plane.
    pub brightness: f64,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    width: f64,
    height: f64,
    speed: f64,
    z_near: f64,
    z_far: f64,
    stars: Vec<Star>,
}

/// Floored wrap of `value` into `[min, max)`.
pub fn wrap(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 {
        return min;
    }
    min + (value - min).rem_euclid(range)
}

impl Starfield {
    pub fn new<R: Rng>(count: usize, rng: &mut R) -> Self {
        let mut field = Self {
            width: STARFIELD_CANVAS,
            height: STARFIELD_CANVAS,
            speed: DEFAULT_STAR_SPEED,
            z_near: DEFAULT_Z_NEAR,
            z_far: DEFAULT_Z_FAR,
            stars: vec![
                Star {
                    x: 0.0,
                    y: 0.0,
                    z: DEFAULT_Z_NEAR
                };
                count
            ],
        };
        field.scatter(rng);
        field
    }

    pub fn from_config<R: Rng>(config: &StarfieldConfig, rng: &mut R) -> Self {
        let mut field = Self::new(config.count, rng);
        field.speed = config.speed;
        field.z_far = config.z_far.abs();
        field.set_z_near(config.z_near, rng);
        field
    }

    /// Re-seed every star uniformly over the volume.
    fn scatter<R: Rng>(&mut self, rng: &mut R) {
        let (w, h) = (self.width, self.height);
        let (near, far) = (self.z_near, self.z_far);
        for star in &mut self.stars {
            star.x = rng.gen::<f64>() * w * 3.0 - w * 1.5;
            star.y = rng.gen::<f64>() * h * 3.0 - h * 1.5;
            star.z = rng.gen::<f64>() * (far - near) + near;
        }
    }

    /// Advance by `delta_secs`. Zero deltas and stalls (>= 0.65s) are skipped.
    pub fn update(&mut self, delta_secs: f64) {
        if delta_secs == 0.0 || delta_secs >= MAX_STAR_DELTA_SECS || delta_secs.is_nan() {
            return;
        }
        let step = self.speed * delta_secs;
        for star in &mut self.stars {
            star.z = wrap(star.z - step, self.z_near, self.z_far);
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn z_near(&self) -> f64 {
        self.z_near
    }

    pub fn z_far(&self) -> f64 {
        self.z_far
    }

    /// Move the near plane; pushes the far plane back if they would cross.
    pub fn set_z_near<R: Rng>(&mut self, near: f64, rng: &mut R) {
        self.z_near = near.abs() + 0.001;
        if self.z_near >= self.z_far {
            self.z_far = self.z_near + 1.0;
        }
        self.scatter(rng);
    }

    /// Move the far plane; keeps it at least one unit behind the near plane.
    pub fn set_z_far<R: Rng>(&mut self, far: f64, rng: &mut R) {
        self.z_far = far.abs();
        if self.z_far < self.z_near {
            self.z_far = self.z_near + 1.0;
        }
        self.scatter(rng);
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn set_star_count<R: Rng>(&mut self, count: usize, rng: &mut R) {
        self.stars.resize(
            count,
            Star {
                x: 0.0,
                y: 0.0,
                z: self.z_near,
            },
        );
        self.scatter(rng);
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Perspective-project every star onto the canvas.
    pub fn project(&self) -> impl Iterator<Item = ProjectedStar> + '_ {
        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        let z_range = self.z_far - self.z_near;
        self.stars.iter().map(move |s| ProjectedStar {
            x: cx + (s.x / s.z) * STAR_PROJECTION_SCALE,
            y: cy + (s.y / s.z) * STAR_PROJECTION_SCALE,
            brightness: (1.0 - (s.z - self.z_near) / z_range).clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn in_volume(field: &Starfield) -> bool {
        field
            .stars()
            .iter()
            .all(|s| s.z >= field.z_near() && s.z < field.z_far())
    }

    #[test]
    fn test_wrap_floored() {
        assert_eq!(wrap(0.5, 1.0, 10.0), 9.5);
        assert_eq!(wrap(10.0, 1.0, 10.0), 1.0);
        assert_eq!(wrap(4.0, 1.0, 10.0), 4.0);
        assert_eq!(wrap(-8.5, 1.0, 10.0), 9.5);
        assert_eq!(wrap(3.0, 2.0, 2.0), 2.0);
    }

    #[test]
    fn test_new_field_inside_volume() {
        let field = Starfield::new(100, &mut rng());
        assert_eq!(field.star_count(), 100);
        assert!(in_volume(&field));
        for s in field.stars() {
            assert!(s.x >= -750.0 && s.x < 750.0);
            assert!(s.y >= -750.0 && s.y < 750.0);
        }
    }

    #[test]
    fn test_update_moves_stars_closer_and_wraps() {
        let mut field = Starfield::new(50, &mut rng());
        field.set_speed(2.0);
        let before: Vec<f64> = field.stars().iter().map(|s| s.z).collect();
        field.update(0.5);
        for (old, star) in before.iter().zip(field.stars()) {
            let expected = wrap(old - 1.0, 1.0, 10.0);
            assert!((star.z - expected).abs() < 1e-9);
        }
        assert!(in_volume(&field));
    }

    #[test]
    fn test_update_skips_zero_and_stalled_frames() {
        let mut field = Starfield::new(10, &mut rng());
        let before = field.stars().to_vec();
        field.update(0.0);
        field.update(0.65);
        field.update(3.0);
        assert_eq!(field.stars(), &before[..]);
    }

    #[test]
    fn test_stopped_field_holds_still() {
        let mut field = Starfield::new(10, &mut rng());
        field.set_speed(0.0);
        let before = field.stars().to_vec();
        field.update(0.016);
        assert_eq!(field.stars(), &before[..]);
    }

    #[test]
    fn test_plane_setters_keep_order() {
        let mut r = rng();
        let mut field = Starfield::new(20, &mut r);

        field.set_z_near(-3.0, &mut r);
        assert!((field.z_near() - 3.001).abs() < 1e-12);
        assert_eq!(field.z_far(), 10.0);

        field.set_z_near(12.0, &mut r);
        assert!((field.z_far() - (field.z_near() + 1.0)).abs() < 1e-12);
        assert!(in_volume(&field));

        field.set_z_far(2.0, &mut r);
        assert!(field.z_far() > field.z_near());
        assert!(in_volume(&field));
    }

    #[test]
    fn test_set_star_count() {
        let mut r = rng();
        let mut field = Starfield::new(5, &mut r);
        field.set_star_count(12, &mut r);
        assert_eq!(field.star_count(), 12);
        field.set_star_count(3, &mut r);
        assert_eq!(field.star_count(), 3);
        assert!(in_volume(&field));
    }

    #[test]
    fn test_projection_brightness_range() {
        let field = Starfield::new(200, &mut rng());
        for p in field.project() {
            assert!((0.0..=1.0).contains(&p.brightness));
        }
    }

    #[test]
    fn test_projection_of_near_star() {
        let mut field = Starfield::new(0, &mut rng());
        field.stars.push(Star {
            x: 100.0,
            y: -40.0,
            z: 1.0,
        });
        let p = field.project().next().unwrap();
        assert!((p.x - (250.0 + 175.0)).abs() < 1e-9);
        assert!((p.y - (250.0 - 70.0)).abs() < 1e-9);
        assert!((p.brightness - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_config() {
        let config = StarfieldConfig {
            enabled: true,
            count: 7,
            speed: 0.25,
            z_near: 1.0,
            z_far: 10.0,
        };
        let field = Starfield::from_config(&config, &mut rng());
        assert_eq!(field.star_count(), 7);
        assert_eq!(field.speed(), 0.25);
        assert!(in_volume(&field));
    }
}
