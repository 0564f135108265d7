use std::fmt::{self, Write};

use super::{Dot, VisualBadge};

/// Horizontal padding of the content column.
const PAD_X: f32 = 6.35;
/// Largest name size; long names shrink to fit the column.
const NAME_MAX_SIZE: f32 = 14.8;
/// Rough advance of a heavy sans-serif glyph relative to its size.
const GLYPH_ADVANCE: f32 = 0.62;

impl VisualBadge {
    /// Serialize the badge into a standalone SVG document in millimetre user
    /// units (`viewBox="0 0 104 129"`).
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096);
        // `write!` into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    /// Stream the SVG document into `out`.
    pub fn write_svg<W: Write>(&self, out: &mut W) -> fmt::Result {
        let w = self.width_mm;
        let h = self.height_mm;
        let cx = w / 2.0;
        let [from, via, to] = self.theme.stops;

        write!(
            out,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"##
        )?;
        write!(
            out,
            r##"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{from}"/><stop offset="0.5" stop-color="{via}"/><stop offset="1" stop-color="{to}"/></linearGradient></defs>"##
        )?;
        write!(out, r##"<rect width="{w}" height="{h}" fill="url(#bg)"/>"##)?;

        // Watermark
        write!(
            out,
            r##"<text x="{cx}" y="{}" font-family="sans-serif" font-weight="900" font-size="47.6" fill="#ffffff" fill-opacity="0.1" text-anchor="middle">{}</text>"##,
            h + 4.0,
            escape(self.group.code())
        )?;

        // Border overlay
        write!(
            out,
            r##"<rect x="0.8" y="0.8" width="{}" height="{}" fill="none" stroke="#ffffff" stroke-opacity="0.1" stroke-width="1.6"/>"##,
            w - 1.6,
            h - 1.6
        )?;

        // Icon box
        let box_size = 14.8;
        let box_x = cx - box_size / 2.0;
        let box_y = 12.7;
        write!(
            out,
            r##"<rect x="{box_x}" y="{box_y}" width="{box_size}" height="{box_size}" rx="4.2" fill="#ffffff" fill-opacity="0.1" stroke="#ffffff" stroke-opacity="0.3" stroke-width="0.26"/>"##
        )?;
        let icon_scale = 7.4 / 24.0;
        write!(
            out,
            r##"<path transform="translate({} {}) scale({icon_scale})" d="{}" fill="none" stroke="#ffffff" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"##,
            cx - 3.7,
            box_y + box_size / 2.0 - 3.7,
            self.icon.path()
        )?;

        // Group title
        write!(
            out,
            r##"<text x="{cx}" y="32" font-family="sans-serif" font-weight="700" font-size="2.6" letter-spacing="0.8" fill="#ffffff" fill-opacity="0.9" text-anchor="middle">{}</text>"##,
            escape(self.group_title)
        )?;

        // Name
        write!(
            out,
            r##"<text x="{cx}" y="48" font-family="sans-serif" font-weight="900" font-size="{:.2}" fill="#ffffff" text-anchor="middle">{}</text>"##,
            name_size(&self.name, w - 2.0 * PAD_X),
            escape(&self.name)
        )?;

        // Code and its title
        let code_line = if self.code_title.is_empty() {
            self.code.clone()
        } else {
            format!("{}  |  {}", self.code, self.code_title)
        };
        write!(
            out,
            r##"<text x="{cx}" y="58" font-family="sans-serif" font-weight="700" font-size="5" fill="#ffffff" fill-opacity="0.95" text-anchor="middle">{}</text>"##,
            escape(&code_line)
        )?;

        // Interest card
        let card_w = (w - 2.0 * PAD_X) * 0.9;
        let card_x = cx - card_w / 2.0;
        write!(
            out,
            r##"<rect x="{card_x}" y="66" width="{card_w}" height="26" rx="3.2" fill="#ffffff" fill-opacity="0.1" stroke="#ffffff" stroke-opacity="0.2" stroke-width="0.26"/>"##
        )?;
        write!(
            out,
            r##"<text x="{cx}" y="73" font-family="sans-serif" font-weight="600" font-size="2.4" letter-spacing="0.6" fill="#ffffff" fill-opacity="0.7" text-anchor="middle">MY TOP INTEREST</text>"##
        )?;
        write!(
            out,
            r##"<text x="{cx}" y="84" font-family="sans-serif" font-weight="700" font-size="6.4" fill="#ffffff" text-anchor="middle">{}</text>"##,
            escape(&self.interest)
        )?;

        // Preference dots
        let gap = 4.2;
        let first_x = cx - gap * (self.dots.len() as f32 - 1.0) / 2.0;
        write!(
            out,
            r##"<rect x="{}" y="104.5" width="{}" height="7" rx="3.5" fill="#000000" fill-opacity="0.1"/>"##,
            first_x - 3.5,
            gap * (self.dots.len() as f32 - 1.0) + 7.0
        )?;
        for (i, dot) in self.dots.iter().enumerate() {
            let (radius, opacity) = match dot {
                Dot::Filled => (1.15, 1.0),
                Dot::Empty => (0.95, 0.2),
            };
            write!(
                out,
                r##"<circle cx="{}" cy="108" r="{radius}" fill="#ffffff" fill-opacity="{opacity}"/>"##,
                first_x + gap * i as f32
            )?;
        }

        // Footer
        write!(
            out,
            r##"<text x="{cx}" y="120" font-family="sans-serif" font-weight="700" font-size="2.6" letter-spacing="0.65" fill="#ffffff" fill-opacity="0.5" text-anchor="middle">{}</text>"##,
            escape(&self.footer)
        )?;

        out.write_str("</svg>")
    }
}

fn name_size(name: &str, available: f32) -> f32 {
    let chars = name.chars().count().max(1) as f32;
    (available / (chars * GLYPH_ADVANCE)).min(NAME_MAX_SIZE)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
