//! SVG bar chart of residue counts.
//!
//! Bars follow the order of the series (first occurrence in the sequence),
//! one per code, scaled against the largest count.

use std::io::{self, Write};

use crate::report::ChartSeries;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
/// Number of labelled ticks on the y axis (excluding 0).
const Y_TICKS: usize = 5;

/// Escapes text for use in SVG content and attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Picks a tick step so that about `Y_TICKS` whole-number ticks cover `max`.
fn tick_step(max: usize) -> usize {
    max.div_ceil(Y_TICKS).max(1)
}

/// Writes `series` as a standalone SVG document.
pub fn write_bar_chart<W: Write>(writer: &mut W, series: &ChartSeries) -> io::Result<()> {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    let step = tick_step(series.max_count());
    let y_max = (step * Y_TICKS) as f64;
    let slot = if series.points.is_empty() {
        plot_w
    } else {
        plot_w / series.points.len() as f64
    };
    let bar_w = slot * 0.8;

    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH,
        h = HEIGHT
    )?;
    writeln!(writer, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        writer,
        r#"<text x="{:.1}" y="{:.1}" font-size="18" text-anchor="middle">{}</text>"#,
        WIDTH / 2.0,
        MARGIN_TOP / 2.0,
        escape(&series.title)
    )?;

    // Y axis ticks and grid
    for i in 0..=Y_TICKS {
        let value = step * i;
        let y = baseline - plot_h * value as f64 / y_max;
        writeln!(
            writer,
            r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#dddddd"/>"##,
            MARGIN_LEFT,
            MARGIN_LEFT + plot_w,
        )?;
        writeln!(
            writer,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0,
            value
        )?;
    }

    for (i, point) in series.points.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
        let h = plot_h * point.count as f64 / y_max;
        writeln!(
            writer,
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#1f77b4"><title>{}: {}</title></rect>"##,
            x,
            baseline - h,
            bar_w,
            h,
            escape(&point.code.to_string()),
            point.count
        )?;
        writeln!(
            writer,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">{}</text>"#,
            x + bar_w / 2.0,
            baseline + 18.0,
            escape(&point.code.to_string())
        )?;
    }

    // Axes and labels
    writeln!(
        writer,
        r#"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = baseline
    )?;
    writeln!(
        writer,
        r#"<line x1="{:.1}" y1="{b:.1}" x2="{:.1}" y2="{b:.1}" stroke="black"/>"#,
        MARGIN_LEFT,
        MARGIN_LEFT + plot_w,
        b = baseline
    )?;
    writeln!(
        writer,
        r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">{}</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 20.0,
        escape(&series.x_label)
    )?;
    writeln!(
        writer,
        r#"<text x="20" y="{y:.1}" font-size="14" text-anchor="middle" transform="rotate(-90 20 {y:.1})">{}</text>"#,
        escape(&series.y_label),
        y = MARGIN_TOP + plot_h / 2.0
    )?;
    writeln!(writer, "</svg>")
}
