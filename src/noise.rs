use crate::rng::hash2;

#[inline]
fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// 2D gradient noise (Perlin-style), roughly in [-1, 1].
#[inline]
pub fn gradient_noise(x: f32, y: f32, seed: u32) -> f32 {
    let (x0, y0) = (x.floor(), y.floor());
    // Lattice indices saturate far from the origin; the fraction stays in [0, 1).
    let ix = x0 as i32;
    let iy = y0 as i32;
    let fx = x - x0;
    let fy = y - y0;
    let sx = smootherstep(fx);
    let sy = smootherstep(fy);

    #[inline]
    fn grad(hash: u32, dx: f32, dy: f32) -> f32 {
        // 16 evenly-spaced unit gradients (every 22.5°).
        match hash & 15 {
            0  =>  dx,
            1  =>  0.924 * dx + 0.383 * dy,
            2  =>  0.707 * (dx + dy),
            3  =>  0.383 * dx + 0.924 * dy,
            4  =>  dy,
            5  => -0.383 * dx + 0.924 * dy,
            6  =>  0.707 * (-dx + dy),
            7  => -0.924 * dx + 0.383 * dy,
            8  => -dx,
            9  => -0.924 * dx - 0.383 * dy,
            10 =>  0.707 * (-dx - dy),
            11 => -0.383 * dx - 0.924 * dy,
            12 => -dy,
            13 =>  0.383 * dx - 0.924 * dy,
            14 =>  0.707 * (dx - dy),
            _  =>  0.924 * dx - 0.383 * dy,
        }
    }

    let v00 = grad(hash2(ix, iy, seed), fx, fy);
    let v10 = grad(hash2(ix.wrapping_add(1), iy, seed), fx - 1.0, fy);
    let v01 = grad(hash2(ix, iy.wrapping_add(1), seed), fx, fy - 1.0);
    let v11 = grad(hash2(ix.wrapping_add(1), iy.wrapping_add(1), seed), fx - 1.0, fy - 1.0);

    let a = lerp(v00, v10, sx);
    let b = lerp(v01, v11, sx);
    // Raw range is ~[-0.7, 0.7]
    lerp(a, b, sy) * 1.414
}

/// Octave settings for [`fbm`].
#[derive(Clone, Copy, Debug)]
pub struct Fractal {
    pub octaves: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f32,
    /// Frequency multiplier per octave.
    pub lacunarity: f32,
}

/// Fractal Brownian motion, normalized by the summed amplitude.
/// Each octave samples its own seed lane and is rotated ~30° to break grid alignment.
/// Zero octaves yields a flat 0. Octaves stop once the sample coordinates or
/// the amplitude overflow `f32`.
pub fn fbm(x: f32, y: f32, seed: u32, fractal: Fractal) -> f32 {
    let mut sum = 0.0f32;
    let mut amp = 1.0f32;
    let mut freq = 1.0f32;
    let mut norm = 0.0f32;
    const COS30: f32 = 0.866025;
    const SIN30: f32 = 0.5;
    let mut px = x;
    let mut py = y;
    for i in 0..fractal.octaves {
        let (sx, sy) = (px * freq, py * freq);
        if !(sx.is_finite() && sy.is_finite() && amp.is_finite()) {
            break;
        }
        sum += gradient_noise(sx, sy, seed.wrapping_add(i)) * amp;
        norm += f32::abs(amp);
        amp *= fractal.persistence;
        freq *= fractal.lacunarity;
        let (rx, ry) = (px * COS30 - py * SIN30, px * SIN30 + py * COS30);
        px = rx;
        py = ry;
    }
    let v = if norm > 0.0 { sum / norm } else { 0.0 };
    if v.is_finite() { v } else { 0.0 }
}
