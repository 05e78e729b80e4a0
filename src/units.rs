//! Length conversions between the units found in WordprocessingML.
//!
//! 1 pt = 20 twips = 12700 EMU, 72 pt = 1 inch. No rounding happens here.

pub const TWIPS_PER_POINT: f32 = 20.0;
pub const EMU_PER_POINT: f32 = 12700.0;
pub const POINTS_PER_INCH: f32 = 72.0;

pub fn twips_to_points(twips: f32) -> f32 {
    twips / TWIPS_PER_POINT
}

pub fn points_to_twips(points: f32) -> f32 {
    points * TWIPS_PER_POINT
}

pub fn emu_to_points(emu: f32) -> f32 {
    emu / EMU_PER_POINT
}

pub fn points_to_emu(points: f32) -> f32 {
    points * EMU_PER_POINT
}

pub fn points_to_inches(points: f32) -> f32 {
    points / POINTS_PER_INCH
}

pub fn inches_to_points(inches: f32) -> f32 {
    inches * POINTS_PER_INCH
}

/// `w:sz` and friends are expressed in half-points.
pub fn half_points_to_points(half_points: f32) -> f32 {
    half_points / 2.0
}
