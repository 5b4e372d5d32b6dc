//! Text HUD and top-down map drawn from a simulation snapshot

use std::f32::consts::TAU;

use drive_common::types::forward_axis;
use drive_common::{HeldKeys, Real, Snapshot};
use drive_physics::{ControlConfig, ObstacleField};

pub const MAP_WIDTH: usize = 48;
pub const MAP_HEIGHT: usize = 24;

const LEGEND: [&str; 2] = [
    "W/Up forward  S/Down reverse  A/Left left  D/Right right  Space brake",
    "P pause  R reset  +/- acceleration  Q/Esc quit",
];

/// Everything one HUD frame shows
#[derive(Debug, Clone, Copy)]
pub struct HudView<'a> {
    pub snapshot: &'a Snapshot,
    pub controls: &'a ControlConfig,
    pub keys: HeldKeys,
    pub wheel_angle: Real,
    pub contacts: u64,
}

/// Speed badge, rounded to whole units
pub fn format_speed(speed: Real) -> String {
    format!("{} km/h", speed.round() as i64)
}

/// Add one frame of wheel spin, keeping the angle in [0, 2π)
pub fn advance_wheel(angle: Real, spin: Real) -> Real {
    (angle + spin).rem_euclid(TAU)
}

fn heading_glyph(heading: Real) -> char {
    // screen up is -z
    let forward = forward_axis(heading);
    let (dx, dz) = (forward.x, forward.z);
    if dx.abs() > dz.abs() {
        if dx > 0.0 { '>' } else { '<' }
    } else if dz < 0.0 {
        '^'
    } else {
        'v'
    }
}

fn cell(coord: Real, half_extent: Real, cells: usize) -> usize {
    let t = ((coord + half_extent) / (2.0 * half_extent)).clamp(0.0, 1.0);
    (t * (cells - 1) as Real).round() as usize
}

/// Bordered top-down view of the world, -z at the top
pub fn render_map(snapshot: &Snapshot, obstacles: &ObstacleField, half_extent: Real, width: usize, height: usize) -> Vec<String> {
    let (width, height) = (width.max(2), height.max(2));
    let mut grid = vec![vec![' '; width]; height];
    for obstacle in obstacles.iter() {
        let col = cell(obstacle.center.x, half_extent, width);
        let row = cell(obstacle.center.y, half_extent, height);
        grid[row][col] = 'T';
    }
    let col = cell(snapshot.position[0], half_extent, width);
    let row = cell(snapshot.position[2], half_extent, height);
    grid[row][col] = heading_glyph(snapshot.heading);

    let border = format!("+{}+", "-".repeat(width));
    let mut lines = Vec::with_capacity(height + 2);
    lines.push(border.clone());
    lines.extend(grid.into_iter().map(|row| format!("|{}|", row.into_iter().collect::<String>())));
    lines.push(border);
    lines
}

pub fn render_hud(view: &HudView) -> Vec<String> {
    let s = view.snapshot;
    let title = if s.paused { "Drive  [PAUSED]" } else { "Drive" };
    vec![
        title.to_string(),
        format!("Speed    {}", format_speed(s.speed)),
        format!("Heading  {:>4.0} deg", s.heading.to_degrees().rem_euclid(360.0)),
        format!("Position x {:>7.1}  z {:>7.1}", s.position[0], s.position[2]),
        format!("Wheels   {:>4.0} deg", view.wheel_angle.to_degrees()),
        format!("Accel    {:.0}  max speed {:.0}", view.controls.acceleration, view.controls.max_speed),
        format!("Keys     {}", view.keys),
        format!("Contacts {}", view.contacts),
        String::new(),
        LEGEND[0].to_string(),
        LEGEND[1].to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use drive_common::{LogicalKey, ObstacleLayout};
    use std::f32::consts::FRAC_PI_2;

    fn snapshot() -> Snapshot {
        Snapshot { position: [0.0, 0.5, 0.0], ..Default::default() }
    }

    #[test]
    fn speed_is_rounded() {
        assert_eq!(format_speed(41.6), "42 km/h");
        assert_eq!(format_speed(0.2), "0 km/h");
    }

    #[test]
    fn wheel_angle_wraps() {
        assert_relative_eq!(advance_wheel(TAU - 0.1, 0.3), 0.2, epsilon = 1e-5);
        assert_relative_eq!(advance_wheel(1.0, 0.0), 1.0);
    }

    #[test]
    fn glyph_follows_heading() {
        assert_eq!(heading_glyph(0.0), '^');
        assert_eq!(heading_glyph(FRAC_PI_2), '<');
        assert_eq!(heading_glyph(-FRAC_PI_2), '>');
        assert_eq!(heading_glyph(std::f32::consts::PI), 'v');
    }

    #[test]
    fn paused_badge_only_when_paused() {
        let controls = ControlConfig::default();
        let running = snapshot();
        let paused = Snapshot { paused: true, ..snapshot() };
        let view = HudView { snapshot: &running, controls: &controls, keys: HeldKeys::empty(), wheel_angle: 0.0, contacts: 0 };
        assert!(!render_hud(&view)[0].contains("PAUSED"));
        let view = HudView { snapshot: &paused, ..view };
        assert!(render_hud(&view)[0].contains("PAUSED"));
    }

    #[test]
    fn hud_lists_held_keys() {
        let controls = ControlConfig::default();
        let snap = snapshot();
        let keys = HeldKeys::empty().with(LogicalKey::Forward);
        let view = HudView { snapshot: &snap, controls: &controls, keys, wheel_angle: 0.0, contacts: 3 };
        let lines = render_hud(&view);
        assert!(lines.iter().any(|l| l.contains("forward")));
        assert!(lines.iter().any(|l| l == "Contacts 3"));
    }

    #[test]
    fn map_places_car_and_trees() {
        let layout: ObstacleLayout = "-95,-95; 95,95".parse().unwrap();
        let field = ObstacleField::from_layout(&layout, 3.0).unwrap();
        let lines = render_map(&snapshot(), &field, 95.0, 11, 5);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "+-----------+");
        assert_eq!(lines[1], "|T          |");
        assert_eq!(lines[3], "|     ^     |");
        assert_eq!(lines[5], "|          T|");
    }
}
