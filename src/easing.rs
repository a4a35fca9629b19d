// Copyright (c) 2026 rezky_nightky

/// Smoothstep approximation of CSS `ease-in-out`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fraction of `total` covered by `elapsed`, clamped to [0, 1].
pub fn progress(elapsed: std::time::Duration, total: std::time::Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}
