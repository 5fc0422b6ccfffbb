//! Value noise and its fractal (multi-octave) sum.
//!
//! The lattice hash is the classic `fract(sin(n * 12.9898) * 43758.5453)`
//! trick. It is not a good random number generator, but it is pure and
//! cheap, which is all a border shimmer needs. All functions here are
//! deterministic: identical inputs give bit-identical outputs.

use noise::NoiseFn;

/// Lattice row stride, keeps `(i, j)` and `(i + 57, j - 1)` from hashing alike
/// for nearby cells.
const ROW_STRIDE: f64 = 57.0;

/// Per-seed horizontal offset into the noise plane.
const SEED_OFFSET: f64 = 100.0;

/// How fast the time axis scrolls relative to octave frequency.
const TIME_RATE: f64 = 0.3;

/// Octaves past this add nothing visible at border scale; the sum stops here.
pub const MAX_OCTAVES: u32 = 16;

/// Pseudo-random value in (-1, 1) derived from `n`.
///
/// Uses the truncating remainder, so the sign follows `sin(n * 12.9898)`.
pub fn hash(n: f64) -> f64 {
    ((n * 12.9898).sin() * 43758.5453) % 1.0
}

/// Smoothstep easing `3t^2 - 2t^3`.
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// 2D value noise: hashes at the four surrounding lattice corners,
/// bilinearly blended with smoothstep weights.
///
/// Continuous in both coordinates. The output stays inside the range of
/// [`hash`], i.e. (-1, 1).
pub fn value_noise_2d(x: f64, y: f64) -> f64 {
    let i = x.floor();
    let j = y.floor();
    let fx = x - i;
    let fy = y - j;

    let a = hash(i + j * ROW_STRIDE);
    let b = hash(i + 1.0 + j * ROW_STRIDE);
    let c = hash(i + (j + 1.0) * ROW_STRIDE);
    let d = hash(i + 1.0 + (j + 1.0) * ROW_STRIDE);

    let ux = smoothstep(fx);
    let uy = smoothstep(fy);

    a * (1.0 - ux) * (1.0 - uy) + b * ux * (1.0 - uy) + c * (1.0 - ux) * uy + d * ux * uy
}

/// Stateless [`value_noise_2d`] as a `noise` crate source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueNoise;

impl NoiseFn<f64, 2> for ValueNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        value_noise_2d(point[0], point[1])
    }
}

/// Parameters of a fractal value-noise sum.
///
/// Octave `i` samples [`value_noise_2d`] at `frequency * lacunarity^i` with
/// weight `amplitude * gain^i`. At most [`MAX_OCTAVES`] octaves are summed.
/// The lowest octave is additionally scaled by `flatness`, so `flatness = 0`
/// removes large-scale warping and keeps only the fine jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalNoise {
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub flatness: f64,
}

impl FractalNoise {
    /// Sums all octaves at contour position `x`, animation time `time` and
    /// axis `seed`.
    ///
    /// Distinct seeds shift the sample plane by `seed * 100` so the x and y
    /// displacements are decorrelated.
    pub fn sample(&self, x: f64, time: f64, seed: f64) -> f64 {
        let mut sum = 0.0;
        let mut amplitude = self.amplitude;
        let mut frequency = self.frequency;

        for octave in 0..self.octaves.min(MAX_OCTAVES) {
            let weight = if octave == 0 {
                amplitude * self.flatness
            } else {
                amplitude
            };
            sum += weight
                * value_noise_2d(
                    frequency * x + seed * SEED_OFFSET,
                    time * frequency * TIME_RATE,
                );
            frequency *= self.lacunarity;
            amplitude *= self.gain;
        }

        sum
    }

    /// Binds this sum to one axis seed, producing a `noise` crate source over
    /// `[position, time]`.
    pub fn seeded(self, seed: f64) -> SeededFractal {
        SeededFractal { noise: self, seed }
    }
}

/// A [`FractalNoise`] bound to a fixed axis seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeededFractal {
    noise: FractalNoise,
    seed: f64,
}

impl NoiseFn<f64, 2> for SeededFractal {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.noise.sample(point[0], point[1], self.seed)
    }
}
