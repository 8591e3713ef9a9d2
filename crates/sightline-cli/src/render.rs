//! Console rendering of frames and settings with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use sightline_core::{Entity, Settings, Toggle};
use strum::IntoEnumIterator;

const HEALTH_BAR_WIDTH: usize = 10;

/// Print `text` as whole lines that also render with the terminal in raw mode.
pub fn print_lines(text: &str) {
    print!("{}", terminal_lines(text));
}

fn terminal_lines(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 2);
    for line in text.lines() {
        output.push_str(line);
        output.push_str("\r\n");
    }
    output
}

/// Hot-key menu with the current state of every switch.
pub fn format_menu(settings: &Settings) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{}", "Hot-keys".bold());
    for toggle in Toggle::iter() {
        let _ = writeln!(
            output,
            "  [{}] {:<22} {}",
            toggle.key(),
            toggle.to_string(),
            on_off(settings.is_enabled(toggle))
        );
    }
    let _ = writeln!(
        output,
        "  [+/-] Frame delay       {} ms",
        settings.frame_delay_ms
    );
    let _ = write!(output, "  [Esc/q] Quit");

    output
}

/// One-line confirmation after a hot-key flips a switch.
pub fn format_toggle(toggle: Toggle, settings: &Settings) -> String {
    format!("{}: {}", toggle, on_off(settings.is_enabled(toggle)))
}

/// Text rendering of one frame.
///
/// Only the parts whose switch is on are shown, mirroring what an overlay
/// would draw.
pub fn format_frame(entities: &[Entity], settings: &Settings) -> String {
    let mut output = String::new();

    let _ = write!(output, "{} entities", entities.len().bold());

    for entity in entities {
        let _ = write!(output, "\n  {}", format_team(entity.team));

        if settings.name {
            let _ = write!(output, " {:<16}", entity.name);
        }
        if settings.health_bar {
            let _ = write!(output, " {}", format_health_bar(entity.health));
        }
        if settings.health_text {
            let _ = write!(output, " {:>3} hp", entity.health);
        }
        if settings.box_outline {
            let rect = &entity.rect;
            let _ = write!(
                output,
                " box({:.0},{:.0} {:.0}x{:.0})",
                rect.left,
                rect.top,
                rect.width(),
                rect.height()
            );
        }
        if settings.head_circle {
            let radius = (entity.head_screen.z - entity.head_screen.y) / 2.0;
            let _ = write!(
                output,
                " head({:.0},{:.0} r{:.0})",
                entity.head_screen.x,
                entity.head_screen.y + radius,
                radius
            );
        }
        if settings.skeleton {
            let _ = write!(output, " {} bones", entity.skeleton_lines().len());
        }

        let _ = write!(output, " {}", format!("{:.0}u", entity.distance).dimmed());
    }

    output
}

fn on_off(enabled: bool) -> String {
    if enabled {
        "on".green().to_string()
    } else {
        "off".red().to_string()
    }
}

fn format_team(team: i32) -> String {
    match team {
        2 => "T ".yellow().to_string(),
        3 => "CT".blue().to_string(),
        other => format!("{:<2}", other),
    }
}

fn format_health_bar(health: i32) -> String {
    let filled = (health.clamp(0, 100) as usize * HEALTH_BAR_WIDTH).div_ceil(100);
    let bar = format!(
        "{}{}",
        "■".repeat(filled),
        " ".repeat(HEALTH_BAR_WIDTH - filled)
    );

    match health {
        h if h > 60 => bar.green().to_string(),
        h if h > 30 => bar.yellow().to_string(),
        _ => bar.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::{Bone, Rect, Vector2, Vector3};

    fn entity(name: &str, health: i32) -> Entity {
        Entity {
            pawn: 0x1000,
            health,
            team: 3,
            name: name.to_string(),
            bones: [
                (Bone::Head, Vector2::new(100.0, 50.0)),
                (Bone::Neck, Vector2::new(100.0, 60.0)),
            ]
            .into_iter()
            .collect(),
            head_screen: Vector3::new(100.0, 40.0, 60.0),
            origin_world: Vector3::default(),
            origin_screen: Vector2::new(100.0, 200.0),
            rect: Rect {
                top: 40.0,
                left: 60.0,
                right: 140.0,
                bottom: 200.0,
            },
            distance: 512.4,
        }
    }

    #[test]
    fn test_frame_lists_every_entity() {
        let frame = format_frame(
            &[entity("alpha", 100), entity("bravo", 20)],
            &Settings::default(),
        );

        assert!(frame.contains("alpha"));
        assert!(frame.contains("bravo"));
        assert!(frame.contains("100 hp"));
        assert!(frame.contains(" 20 hp"));
        assert!(frame.contains("box(60,40 80x160)"));
        assert!(frame.contains("head(100,50 r10)"));
        assert!(frame.contains("1 bones"));
        assert!(frame.contains("512u"));
        assert_eq!(frame.lines().count(), 3);
    }

    #[test]
    fn test_frame_respects_switches() {
        let settings = Settings {
            name: false,
            health_text: false,
            box_outline: false,
            ..Default::default()
        };
        let frame = format_frame(&[entity("alpha", 100)], &settings);

        assert!(!frame.contains("alpha"));
        assert!(!frame.contains("hp"));
        assert!(!frame.contains("box("));
        assert!(frame.contains("head("));
    }

    #[test]
    fn test_empty_frame() {
        let frame = format_frame(&[], &Settings::default());
        assert_eq!(frame.lines().count(), 1);
        assert!(frame.contains("entities"));
    }

    #[test]
    fn test_health_bar_width() {
        for health in [0, 1, 35, 99, 100, 250] {
            let filled = (health.clamp(0, 100) as usize * 10).div_ceil(100);
            assert!(format_health_bar(health).contains(&"■".repeat(filled)));
        }
    }

    #[test]
    fn test_menu_lists_toggles() {
        let settings = Settings {
            skeleton: false,
            ..Default::default()
        };
        let menu = format_menu(&settings);

        assert!(menu.contains("[1] Team check"));
        assert!(menu.contains("[7] Name rendering"));
        assert!(menu.contains("15 ms"));
        assert!(format_toggle(Toggle::Skeleton, &settings).starts_with("Skeleton rendering: "));
    }

    #[test]
    fn test_terminal_lines_end_with_carriage_return() {
        assert_eq!(terminal_lines("a\nb"), "a\r\nb\r\n");
        assert_eq!(terminal_lines("already\r\n"), "already\r\n");
        assert_eq!(terminal_lines("\nShutting down..."), "\r\nShutting down...\r\n");
    }
}
