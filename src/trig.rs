//! Fixed-point trigonometry.
//!
//! Angles are `i32` "trig angles" where one full turn is `TRIG_MAX_ANGLE`
//! (0x10000), so any value can be canonicalized with a mask. Sine and cosine
//! come back scaled so that 1.0 == `TRIG_UNIT`.
//!
//! The lookup is a quarter-wave table (257 entries, 64 trig-angle units
//! apart) with linear interpolation; the other three quadrants are
//! reflections, which keeps `sin(a + half turn) == -sin(a)` exact.

/// One full turn in trig-angle units.
pub const TRIG_MAX_ANGLE: i32 = 0x1_0000;

/// Fixed-point 1.0 for `sin_lookup` / `cos_lookup` results.
pub const TRIG_UNIT: i32 = 0x1_0000;

const QUARTER_TURN: i32 = TRIG_MAX_ANGLE / 4;
const STEP_SHIFT: u32 = 6; // 0x4000 / 256 entries = 64 units per step
const STEP_MASK: i32 = (1 << STEP_SHIFT) - 1;

// round(sin(i / 256 * pi / 2) * 65536), i = 0..=256
const QUARTER_SINE: [i32; 257] = [
    0, 402, 804, 1206, 1608, 2010, 2412, 2814,
    3216, 3617, 4019, 4420, 4821, 5222, 5623, 6023,
    6424, 6824, 7224, 7623, 8022, 8421, 8820, 9218,
    9616, 10014, 10411, 10808, 11204, 11600, 11996, 12391,
    12785, 13180, 13573, 13966, 14359, 14751, 15143, 15534,
    15924, 16314, 16703, 17091, 17479, 17867, 18253, 18639,
    19024, 19409, 19792, 20175, 20557, 20939, 21320, 21699,
    22078, 22457, 22834, 23210, 23586, 23961, 24335, 24708,
    25080, 25451, 25821, 26190, 26558, 26925, 27291, 27656,
    28020, 28383, 28745, 29106, 29466, 29824, 30182, 30538,
    30893, 31248, 31600, 31952, 32303, 32652, 33000, 33347,
    33692, 34037, 34380, 34721, 35062, 35401, 35738, 36075,
    36410, 36744, 37076, 37407, 37736, 38064, 38391, 38716,
    39040, 39362, 39683, 40002, 40320, 40636, 40951, 41264,
    41576, 41886, 42194, 42501, 42806, 43110, 43412, 43713,
    44011, 44308, 44604, 44898, 45190, 45480, 45769, 46056,
    46341, 46624, 46906, 47186, 47464, 47741, 48015, 48288,
    48559, 48828, 49095, 49361, 49624, 49886, 50146, 50404,
    50660, 50914, 51166, 51417, 51665, 51911, 52156, 52398,
    52639, 52878, 53114, 53349, 53581, 53812, 54040, 54267,
    54491, 54714, 54934, 55152, 55368, 55582, 55794, 56004,
    56212, 56418, 56621, 56823, 57022, 57219, 57414, 57607,
    57798, 57986, 58172, 58356, 58538, 58718, 58896, 59071,
    59244, 59415, 59583, 59750, 59914, 60075, 60235, 60392,
    60547, 60700, 60851, 60999, 61145, 61288, 61429, 61568,
    61705, 61839, 61971, 62101, 62228, 62353, 62476, 62596,
    62714, 62830, 62943, 63054, 63162, 63268, 63372, 63473,
    63572, 63668, 63763, 63854, 63944, 64031, 64115, 64197,
    64277, 64354, 64429, 64501, 64571, 64639, 64704, 64766,
    64827, 64884, 64940, 64993, 65043, 65091, 65137, 65180,
    65220, 65259, 65294, 65328, 65358, 65387, 65413, 65436,
    65457, 65476, 65492, 65505, 65516, 65525, 65531, 65535,
    65536,
];

/// Canonical form of a trig angle, in `[0, TRIG_MAX_ANGLE)`.
#[inline]
pub const fn normalize_angle(angle: i32) -> i32 {
    angle & (TRIG_MAX_ANGLE - 1)
}

// Sine over the first quadrant, `x` in [0, QUARTER_TURN].
#[inline]
fn quarter_sine(x: i32) -> i32 {
    let idx = (x >> STEP_SHIFT) as usize;
    let frac = x & STEP_MASK;
    if frac == 0 {
        return QUARTER_SINE[idx];
    }
    let lo = QUARTER_SINE[idx];
    let hi = QUARTER_SINE[idx + 1];
    lo + (((hi - lo) * frac + (1 << (STEP_SHIFT - 1))) >> STEP_SHIFT)
}

/// Fixed-point sine, result in `[-TRIG_UNIT, TRIG_UNIT]`.
pub fn sin_lookup(angle: i32) -> i32 {
    let a = normalize_angle(angle);
    let r = a & (QUARTER_TURN - 1);
    match a / QUARTER_TURN {
        0 => quarter_sine(r),
        1 => quarter_sine(QUARTER_TURN - r),
        2 => -quarter_sine(r),
        _ => -quarter_sine(QUARTER_TURN - r),
    }
}

/// Fixed-point cosine, result in `[-TRIG_UNIT, TRIG_UNIT]`.
#[inline]
pub fn cos_lookup(angle: i32) -> i32 {
    sin_lookup(angle + QUARTER_TURN)
}

/// Fixed-point arctangent: the canonical trig angle `a` whose sine and
/// cosine are in the ratio `s : c`. `(0, 0)` gives 0.
///
/// The first-quadrant angle is found by bisecting the sine table, so
/// `atan2_lookup(sin_lookup(a), cos_lookup(a))` lands within a unit or two
/// of `a`.
pub fn atan2_lookup(s: i32, c: i32) -> i32 {
    if s == 0 && c == 0 {
        return 0;
    }
    let (ay, ax) = (s.unsigned_abs() as i64, c.unsigned_abs() as i64);
    // increasing over the first quadrant, zero at the answer
    let f = |q: i32| {
        quarter_sine(q) as i64 * ax - quarter_sine(QUARTER_TURN - q) as i64 * ay
    };

    let (mut lo, mut hi) = (0, QUARTER_TURN);
    while lo < hi {
        let mid = (lo + hi) / 2;
        if f(mid) >= 0 {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    let q = if lo > 0 && -f(lo - 1) < f(lo) { lo - 1 } else { lo };

    let a = match (s >= 0, c >= 0) {
        (true, true) => q,
        (true, false) => TRIG_MAX_ANGLE / 2 - q,
        (false, false) => TRIG_MAX_ANGLE / 2 + q,
        (false, true) => TRIG_MAX_ANGLE - q,
    };
    normalize_angle(a)
}

/// Degrees to a canonical trig angle, rounded to the nearest unit.
pub fn deg_to_trigangle(degrees: f32) -> i32 {
    let units = libm::roundf(degrees * (TRIG_MAX_ANGLE as f32 / 360.0));
    normalize_angle(units as i32)
}

/// Trig angle back to degrees in `[0, 360)`.
pub fn trigangle_to_deg(angle: i32) -> f32 {
    // scaled by 1000 in an i64 so the division keeps the low bits
    let milli = normalize_angle(angle) as i64 * 360_000 / TRIG_MAX_ANGLE as i64;
    let rem = normalize_angle(angle) as i64 * 360_000 % TRIG_MAX_ANGLE as i64;
    (milli as f32 + rem as f32 / TRIG_MAX_ANGLE as f32) / 1000.0
}

/// `magnitude * ratio / TRIG_UNIT`, rounded half away from zero.
///
/// Symmetric rounding keeps mirrored angles mirrored in pixel space.
#[inline]
pub fn scale_by_ratio(magnitude: i32, ratio: i32) -> i32 {
    let num = magnitude as i64 * ratio as i64;
    let half = (TRIG_UNIT / 2) as i64;
    let q = if num >= 0 {
        (num + half) / TRIG_UNIT as i64
    } else {
        (num - half) / TRIG_UNIT as i64
    };
    q as i32
}
