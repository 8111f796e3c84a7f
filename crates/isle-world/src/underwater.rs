/// Strength of the underwater overlay for a viewer at `player_y`.
///
/// `fade` is `(start, end)` as offsets from `water_level`, with `start > end`.
/// Above `water_level + start` the result is 0; it rises linearly to 1 at
/// `water_level + end` and stays there below.
pub fn underwater_blend(player_y: f32, water_level: f32, fade: (f32, f32)) -> f32 {
    let (start, end) = fade;
    let top = water_level + start;
    let bottom = water_level + end;
    if player_y >= top {
        return 0.0;
    }
    let v = player_y.clamp(bottom, top);
    1.0 - (v - bottom) / (start - end)
}
