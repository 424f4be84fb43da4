use glam::Vec2;
use tankbot_shared::*;

/// Normalize an angle in degrees to [0, 360).
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Map an angle in degrees to one of 8 coarse direction buckets.
///
/// Buckets are centered on multiples of 45 degrees, so the boundaries sit at
/// 22.5-degree offsets: bucket 0 covers [-22.5, 22.5), bucket 1 covers
/// [22.5, 67.5), and so on around the circle.
pub fn angle_to_bucket(angle: f32) -> usize {
    let a = normalize_degrees(angle);
    (((a + HALF_SEGMENT) / DEGREES_PER_SEGMENT).floor() as usize) % DIRECTION_BUCKETS
}

/// Squared Euclidean distance. Used for all range comparisons; nothing in the
/// controller needs the actual distance.
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Signed shortest angular difference `target - current` in degrees,
/// result in (-180, 180].
pub fn angle_diff_degrees(target: f32, current: f32) -> f32 {
    let mut d = (target - current).rem_euclid(360.0);
    if d > 180.0 {
        d -= 360.0;
    }
    d
}

/// True when `angle` matches `desired` heading. Host angles move in whole
/// 45-degree steps, so a half-degree tolerance absorbs float noise without
/// ever conflating two headings.
pub fn heading_matches(angle: f32, desired: f32) -> bool {
    angle_diff_degrees(desired, angle).abs() < 0.5
}
