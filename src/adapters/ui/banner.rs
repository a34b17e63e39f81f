//! Startup banner: figlet "GEOWATCH" with a sunrise-to-horizon gradient.

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::ExecutableCommand;
use figlet_rs::FIGfont;
use std::io::{stdout, Write};

/// Sunrise orange (#ff8c00), the top of the banner.
const SUNRISE: (u8, u8, u8) = (0xff, 0x8c, 0x00);
/// Horizon blue (#20c4f4), the bottom.
const HORIZON: (u8, u8, u8) = (0x20, 0xc4, 0xf4);

fn blend(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

/// Gradient color at position `t` in [0.0, 1.0], top to bottom.
fn gradient_at(t: f64) -> Color {
    Color::Rgb {
        r: blend(SUNRISE.0, HORIZON.0, t),
        g: blend(SUNRISE.1, HORIZON.1, t),
        b: blend(SUNRISE.2, HORIZON.2, t),
    }
}

/// Prints the GEOWATCH banner and version. Rendering problems are
/// swallowed: the banner is decoration, not a startup dependency.
pub fn print_welcome() {
    let Ok(font) = FIGfont::standard() else { return };
    let Some(figure) = font.convert("GEOWATCH") else {
        return;
    };

    let art = figure.to_string();
    let rows: Vec<&str> = art.lines().collect();
    let span = rows.len().saturating_sub(1).max(1) as f64;

    let mut out = stdout();
    for (row, text) in rows.iter().enumerate() {
        let _ = out.execute(SetForegroundColor(gradient_at(row as f64 / span)));
        let _ = out.execute(Print(format!("{text}\r\n")));
    }
    let _ = out.execute(SetForegroundColor(gradient_at(1.0)));
    let _ = out.execute(Print(format!("v{}\r\n", env!("CARGO_PKG_VERSION"))));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
