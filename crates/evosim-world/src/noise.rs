//! Gradient noise for terrain generation.
//!
//! Classic improved-Perlin noise over a fixed 256-entry permutation table
//! (doubled to 512 so corner hashing never wraps). The lattice is 3D; the
//! terrain only needs a 2D field, so the caller passes a per-attribute seed
//! as the third coordinate. Two seeds give two independent fields over the
//! same table.
//!
//! # Determinism
//!
//! [`sample`] is a pure function of its arguments. There is no hidden state
//! and no randomness here; randomness lives in how the seeds are chosen.

/// Ken Perlin's reference permutation.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// The permutation repeated twice.
static DOUBLED: [u8; 512] = double_table();

#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
const fn double_table() -> [u8; 512] {
    let mut out = [0_u8; 512];
    let mut i = 0;
    while i < 512 {
        out[i] = PERMUTATION[i % 256];
        i += 1;
    }
    out
}

/// Table lookup. Callers never exceed 511; out-of-range reads as 0.
fn perm(index: usize) -> usize {
    DOUBLED.get(index).copied().map_or(0, usize::from)
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
fn fade(t: f64) -> f64 {
    t * t * t * t.mul_add(t.mul_add(6.0, -15.0), 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    t.mul_add(b - a, a)
}

/// Dot product of the corner offset with one of twelve edge gradients
/// selected by the low four bits of `hash`.
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

/// Split a coordinate into its wrapped lattice cell and the fractional
/// offset within that cell.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lattice(coord: f64) -> (usize, f64) {
    let floor = coord.floor();
    // Saturating cast, then wrap into the table. NaN lands on cell 0.
    let cell = (floor as i64 & 255) as usize;
    (cell, coord - floor)
}

/// Raw 3D gradient noise, roughly in `[-1, 1]`.
#[allow(
    clippy::similar_names,
    clippy::many_single_char_names,
    clippy::arithmetic_side_effects
)]
pub fn perlin(x: f64, y: f64, z: f64) -> f64 {
    let (xi, xf) = lattice(x);
    let (yi, yf) = lattice(y);
    let (zi, zf) = lattice(z);

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    // xi, yi, zi <= 255, so every nested index stays below 512.
    let a = perm(xi) + yi;
    let b = perm(xi + 1) + yi;
    let aa = perm(a) + zi;
    let ab = perm(a + 1) + zi;
    let ba = perm(b) + zi;
    let bb = perm(b + 1) + zi;

    let aaa = perm(aa);
    let aba = perm(ab);
    let aab = perm(aa + 1);
    let abb = perm(ab + 1);
    let baa = perm(ba);
    let bba = perm(bb);
    let bab = perm(ba + 1);
    let bbb = perm(bb + 1);

    let x1 = lerp(grad(aaa, xf, yf, zf), grad(baa, xf - 1.0, yf, zf), u);
    let x2 = lerp(grad(aba, xf, yf - 1.0, zf), grad(bba, xf - 1.0, yf - 1.0, zf), u);
    let y1 = lerp(x1, x2, v);

    let x1 = lerp(grad(aab, xf, yf, zf - 1.0), grad(bab, xf - 1.0, yf, zf - 1.0), u);
    let x2 = lerp(
        grad(abb, xf, yf - 1.0, zf - 1.0),
        grad(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
        u,
    );
    let y2 = lerp(x1, x2, v);

    lerp(y1, y2, w)
}

/// Sample the noise field at `(x, y)` for the field selected by `seed`.
///
/// Returns a value in `[0, 1]`. Identical arguments always give
/// bit-identical results.
pub fn sample(x: f64, y: f64, seed: f64) -> f64 {
    let value = (perlin(x, y, seed) + 1.0) / 2.0;
    if value.is_nan() { 0.5 } else { value.clamp(0.0, 1.0) }
}
