//! Startup banner

use console::style;

/// Block glyphs spelling LOCREST, three rows each
const GLYPHS: [[&str; 3]; 7] = [
    ["█   ", "█   ", "█▄▄▄"],
    ["▄▀▀▄", "█  █", "▀▄▄▀"],
    ["▄▀▀▀", "█   ", "▀▄▄▄"],
    ["█▀▀▄", "█▄▄▀", "█  █"],
    ["█▀▀▀", "█▄▄ ", "█▄▄▄"],
    ["▄▀▀▀", " ▀▀▄", "▄▄▄▀"],
    ["▀█▀", " █ ", " █ "],
];

const GRADIENT_START: (u8, u8, u8) = (0x64, 0xC8, 0x00);
const GRADIENT_END: (u8, u8, u8) = (0xC8, 0xC8, 0x00);

/// Banner rows, one string per line
#[must_use]
pub fn banner_lines() -> Vec<String> {
    (0..3)
        .map(|row| {
            GLYPHS
                .iter()
                .map(|glyph| glyph[row])
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}

/// Linear gradient of `count` colors from `start` to `end`
#[must_use]
pub fn gradient(count: usize, start: (u8, u8, u8), end: (u8, u8, u8)) -> Vec<(u8, u8, u8)> {
    if count < 2 {
        return vec![start; count.max(1)];
    }
    let lerp = |a: u8, b: u8, i: usize| -> u8 {
        let (a, b) = (i64::from(a), i64::from(b));
        (a + (b - a) * i as i64 / (count as i64 - 1)) as u8
    };
    (0..count)
        .map(|i| (lerp(start.0, end.0, i), lerp(start.1, end.1, i), lerp(start.2, end.2, i)))
        .collect()
}

/// Nearest xterm-256 color cube index for an RGB triple
#[must_use]
pub fn ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    let level = |c: u8| (u16::from(c) * 5 + 127) / 255;
    (16 + 36 * level(r) + 6 * level(g) + level(b)) as u8
}

/// Print the gradient banner and tagline
pub fn print_banner() {
    let lines = banner_lines();
    let colors = gradient(lines.len(), GRADIENT_START, GRADIENT_END);
    println!();
    for (line, color) in lines.iter().zip(colors) {
        println!("  {}", style(line).color256(ansi256(color)));
    }
    println!(
        "\n{}\n",
        style("Community tool for extracting and reinserting dialogues/text from Unreal Engine locres files.")
            .green()
    );
}
