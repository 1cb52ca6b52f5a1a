//! Seeded 2D value noise for deterministic terrain generation.
//!
//! Both peers regenerate identical terrain from a shared world seed instead of
//! transferring tile data, so every function here must be bit-stable for the
//! same inputs across platforms. Trigonometry goes through [`libm`] rather
//! than the platform libc for that reason.

/// Deterministic 2D value-noise sampler.
///
/// Corner values come from a seeded hash; [`ValueNoise::noise`] blends them
/// with smoothstep bilinear interpolation, and [`ValueNoise::octave_noise`]
/// composites several frequencies for natural-looking variation.
#[derive(Debug, Clone, Copy)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    /// Create a sampler for the given world seed.
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// The world seed this sampler was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Seeded corner hash in `[0, 1)`.
    ///
    /// `fract(sin(x * 12.9898 + y * 78.233 + seed) * 43758.5453)` — the
    /// classic shader one-liner. Uses `libm::sin` so the value is identical
    /// on every platform.
    fn corner(&self, x: f64, y: f64) -> f64 {
        let n = libm::sin(x * 12.9898 + y * 78.233 + self.seed as f64) * 43758.5453;
        n - n.floor()
    }

    /// Sample noise at `(x, y)`. Output is in `[0, 1)`.
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let xi = x.floor();
        let yi = y.floor();
        let xf = x - xi;
        let yf = y - yi;

        let a = self.corner(xi, yi);
        let b = self.corner(xi + 1.0, yi);
        let c = self.corner(xi, yi + 1.0);
        let d = self.corner(xi + 1.0, yi + 1.0);

        // Smoothstep fade, then bilinear blend of the four corners.
        let u = xf * xf * (3.0 - 2.0 * xf);
        let v = yf * yf * (3.0 - 2.0 * yf);

        let ab = a * (1.0 - u) + b * u;
        let cd = c * (1.0 - u) + d * u;
        ab * (1.0 - v) + cd * v
    }

    /// Multi-octave noise in `[0, 1]`.
    ///
    /// Sums `octaves` samples, doubling frequency and scaling amplitude by
    /// `persistence` each octave, then normalizes by the total amplitude so
    /// the result stays bounded regardless of octave count.
    pub fn octave_noise(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.noise(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        total / max_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_deterministic() {
        let a = ValueNoise::new(42);
        let b = ValueNoise::new(42);

        for i in 0..100 {
            let x = i as f64 * 0.37;
            let y = i as f64 * 1.91 - 13.0;
            assert_eq!(
                a.noise(x, y),
                b.noise(x, y),
                "same seed and coordinates must produce identical values"
            );
        }
    }

    #[test]
    fn test_noise_bounded() {
        let noise = ValueNoise::new(7);
        for i in -50..50 {
            for j in -50..50 {
                let v = noise.noise(i as f64 * 0.13, j as f64 * 0.29);
                assert!((0.0..1.0).contains(&v), "noise out of [0,1): {v}");
            }
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = ValueNoise::new(1);
        let b = ValueNoise::new(2);

        let mut any_different = false;
        for i in 0..20 {
            let x = i as f64 * 0.61;
            if a.noise(x, x * 0.5) != b.noise(x, x * 0.5) {
                any_different = true;
                break;
            }
        }
        assert!(any_different, "different seeds should produce different noise");
    }

    #[test]
    fn test_octave_noise_bounded() {
        let noise = ValueNoise::new(99);
        for octaves in 1..=8 {
            for i in -20..20 {
                let v = noise.octave_noise(i as f64 * 0.1, i as f64 * 0.23, octaves, 0.5);
                assert!(
                    (0.0..=1.0).contains(&v),
                    "octave noise out of [0,1] for {octaves} octaves: {v}"
                );
            }
        }
    }

    #[test]
    fn test_octave_noise_deterministic() {
        let noise = ValueNoise::new(12345);
        let a = noise.octave_noise(3.2, -1.7, 3, 0.5);
        let b = noise.octave_noise(3.2, -1.7, 3, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_octave_matches_base_noise() {
        let noise = ValueNoise::new(5);
        let x = 2.25;
        let y = -0.75;
        assert_eq!(noise.octave_noise(x, y, 1, 0.5), noise.noise(x, y));
    }
}
