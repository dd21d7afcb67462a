//! Startup banner: "MACRO FORGE" in figlet's standard font with a violet gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Accent violet (#667eea), the info-toast color.
pub(crate) const ACCENT: (u8, u8, u8) = (0x66, 0x7e, 0xea);
/// Deep purple (#764ba2).
const DEEP_PURPLE: (u8, u8, u8) = (0x76, 0x4b, 0xa2);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Color of line `i` out of `total`, running from [`ACCENT`] to [`DEEP_PURPLE`].
fn line_color(i: usize, total: usize) -> Color {
    let t = if total <= 1 {
        1.0
    } else {
        i as f64 / (total - 1) as f64
    };
    let (r, g, b) = lerp_rgb(ACCENT, DEEP_PURPLE, t);
    Color::Rgb { r, g, b }
}

fn print_gradient(out: &mut impl Write, art: &str) {
    let lines: Vec<&str> = art.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let _ = out.execute(SetForegroundColor(line_color(i, lines.len())));
        let _ = out.execute(Print(format!("{}\r\n", line)));
    }
    let _ = out.execute(ResetColor);
}

/// Prints the banner followed by the version and target bot. Falls back to a
/// plain title line if the font cannot be loaded.
pub fn print_welcome(bot_url: &str) {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("MACRO FORGE").map(|fig| fig.to_string()))
        .unwrap_or_else(|| "MACRO FORGE".to_string());
    print_gradient(&mut out, &art);

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: ACCENT.0,
        g: ACCENT.1,
        b: ACCENT.2,
    }));
    let _ = out.execute(Print(format!("v{} · macros for {}\r\n", version, bot_url)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
