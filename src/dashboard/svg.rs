//! Dashboard charts drawn with `plotters` into in-memory SVG strings.
//!
//! The user's input is always drawn last, as a black cross.

use std::f64::consts::PI;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::dashboard::charts::{BoxSeries, ChartData, ComparisonChart, Marker, MarkerX, ScatterSeries};
use crate::dashboard::stats::extent;
use crate::model::schema::{StressLevel, display_name};
use crate::pipeline::factors::Factor;

const CHART_SIZE: (u32, u32) = (560, 340);
const GAUGE_SIZE: (u32, u32) = (300, 200);
const FACTOR_SIZE: (u32, u32) = (460, 220);

const CAPTION_FONT: (&str, u32) = ("sans-serif", 16);
const SERIES_COLORS: [RGBColor; 4] = [
    RGBColor(0x63, 0x6e, 0xfa),
    RGBColor(0xef, 0x55, 0x3b),
    RGBColor(0x00, 0xcc, 0x96),
    RGBColor(0xab, 0x63, 0xfa),
];
const TRACK_COLOR: RGBColor = RGBColor(0xe5, 0xe5, 0xe5);
const BOX_WIDTH: u32 = 18;
const BOX_SPACING: i32 = 26;

#[derive(Debug, thiserror::Error)]
#[error("chart rendering failed: {0}")]
pub struct RenderError(String);

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(value: DrawingAreaErrorKind<E>) -> Self {
        RenderError(value.to_string())
    }
}

/// CSS colour of a stress level, shared by the page badge and the charts.
pub fn level_color(level: StressLevel) -> &'static str {
    match level {
        StressLevel::Low => "#00cc96",
        StressLevel::Medium => "#636efa",
        StressLevel::High => "#ef553b",
    }
}

pub fn level_rgb(level: StressLevel) -> RGBColor {
    match level {
        StressLevel::Low => RGBColor(0x00, 0xcc, 0x96),
        StressLevel::Medium => RGBColor(0x63, 0x6e, 0xfa),
        StressLevel::High => RGBColor(0xef, 0x55, 0x3b),
    }
}

fn marker_style() -> ShapeStyle {
    BLACK.stroke_width(3)
}

/// Signed impact with three decimals; a negative zero prints as `+0.000`.
pub fn format_impact(impact: f64) -> String {
    format!("{:+.3}", impact + 0.0)
}

/// Widens `(lo, hi)` by 8% on both sides, or by one unit when the range is empty.
fn pad_range((lo, hi): (f64, f64)) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        let pad = (hi - lo) * 0.08;
        (lo - pad, hi + pad)
    }
}

fn segment_label<T>(value: &SegmentValue<&T>, name: impl Fn(&T) -> String) -> String {
    match value {
        SegmentValue::Exact(v) | SegmentValue::CenterOf(v) => name(v),
        SegmentValue::Last => String::new(),
    }
}

/// Pixel offset of box series `i` of `n` inside its category.
fn series_offset(i: usize, n: usize) -> i32 {
    (2 * i as i32 - (n as i32 - 1)) * BOX_SPACING / 2
}

fn with_svg<F>(size: (u32, u32), draw: F) -> Result<String, RenderError>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<(), RenderError>,
{
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    Ok(buf)
}

pub fn render_comparison(chart: &ComparisonChart, markers: &[Marker]) -> Result<String, RenderError> {
    match &chart.data {
        ChartData::Histogram { counts } => render_histogram(chart, counts, markers),
        ChartData::Boxes { series } => render_boxes(chart, series, markers),
        ChartData::Scatter { series } => render_scatter(chart, series, markers),
    }
}

fn render_histogram(
    chart: &ComparisonChart,
    counts: &[(StressLevel, usize)],
    markers: &[Marker],
) -> Result<String, RenderError> {
    let levels: Vec<StressLevel> = counts.iter().map(|(l, _)| *l).collect();
    let max = counts.iter().map(|(_, c)| *c as u32).max().unwrap_or(0).max(1);

    with_svg(CHART_SIZE, |root| {
        let mut ctx = ChartBuilder::on(root)
            .caption(chart.title, CAPTION_FONT)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(levels[..].into_segmented(), 0u32..max + max / 8 + 1)?;
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|v| segment_label(v, |l: &StressLevel| l.code().to_string()))
            .draw()?;

        for (level, &(_, count)) in levels.iter().zip(counts) {
            let color = level_rgb(*level);
            ctx.draw_series(
                Histogram::vertical(&ctx)
                    .style(color.filled())
                    .margin(12)
                    .data([(level, count as u32)]),
            )?
            .label(level.dataset_label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        for m in markers {
            let MarkerX::Level(level) = m.x else {
                continue;
            };
            let Some(key) = levels.iter().find(|l| **l == level) else {
                continue;
            };
            ctx.draw_series(std::iter::once(
                EmptyElement::at((SegmentValue::CenterOf(key), m.y.max(0.0) as u32))
                    + Cross::new((0, 0), 7, marker_style()),
            ))?
            .label(m.name.as_str())
            .legend(|(x, y)| Cross::new((x + 5, y), 5, marker_style()));
        }

        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    })
}

fn render_boxes(
    chart: &ComparisonChart,
    series: &[BoxSeries],
    markers: &[Marker],
) -> Result<String, RenderError> {
    let levels: Vec<StressLevel> = StressLevel::ALL
        .iter()
        .copied()
        .filter(|l| series.iter().any(|s| s.groups.iter().any(|g| g.level == *l)))
        .collect();
    let values: Vec<f64> = series
        .iter()
        .flat_map(|s| s.groups.iter())
        .flat_map(|g| {
            g.quartiles
                .values()
                .into_iter()
                .map(f64::from)
                .chain(g.outliers.iter().copied())
        })
        .chain(markers.iter().map(|m| m.y))
        .collect();
    let (lo, hi) = pad_range(extent(&values).unwrap_or((0.0, 1.0)));
    let single = series.len() == 1;

    with_svg(CHART_SIZE, |root| {
        let mut ctx = ChartBuilder::on(root)
            .caption(chart.title, CAPTION_FONT)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(levels[..].into_segmented(), lo as f32..hi as f32)?;
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|v| {
                segment_label(v, |l: &StressLevel| l.dataset_label().to_string())
            })
            .draw()?;

        for (i, s) in series.iter().enumerate() {
            let offset = series_offset(i, series.len());
            let series_color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let mut boxes = Vec::new();
            let mut dots = Vec::new();
            for g in &s.groups {
                let Some(key) = levels.iter().find(|l| **l == g.level) else {
                    continue;
                };
                let color = if single { level_rgb(g.level) } else { series_color };
                boxes.push(
                    Boxplot::new_vertical(SegmentValue::CenterOf(key), &g.quartiles)
                        .width(BOX_WIDTH)
                        .whisker_width(0.5)
                        .style(color.stroke_width(2))
                        .offset(offset),
                );
                for &o in &g.outliers {
                    dots.push(
                        EmptyElement::at((SegmentValue::CenterOf(key), o as f32))
                            + Circle::new((offset, 0), 2, color.filled()),
                    );
                }
            }
            let anno = ctx.draw_series(boxes)?;
            if !single {
                anno.label(display_name(&s.name)).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], series_color.filled())
                });
            }
            ctx.draw_series(dots)?;
        }

        for m in markers {
            let MarkerX::Level(level) = m.x else {
                continue;
            };
            let Some(key) = levels.iter().find(|l| **l == level) else {
                continue;
            };
            let dx = m.series.map_or(0, |i| series_offset(i, series.len()));
            ctx.draw_series(std::iter::once(
                EmptyElement::at((SegmentValue::CenterOf(key), m.y as f32))
                    + Cross::new((dx, 0), 6, marker_style()),
            ))?
            .label(m.name.as_str())
            .legend(|(x, y)| Cross::new((x + 5, y), 5, marker_style()));
        }

        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    })
}

fn render_scatter(
    chart: &ComparisonChart,
    series: &[ScatterSeries],
    markers: &[Marker],
) -> Result<String, RenderError> {
    let xs: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .chain(markers.iter().filter_map(|m| match m.x {
            MarkerX::Value(v) => Some(v),
            MarkerX::Level(_) => None,
        }))
        .collect();
    let ys: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .chain(markers.iter().map(|m| m.y))
        .collect();
    let (xlo, xhi) = pad_range(extent(&xs).unwrap_or((0.0, 1.0)));
    let (ylo, yhi) = pad_range(extent(&ys).unwrap_or((0.0, 1.0)));

    with_svg(CHART_SIZE, |root| {
        let mut ctx = ChartBuilder::on(root)
            .caption(chart.title, CAPTION_FONT)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(xlo..xhi, ylo..yhi)?;
        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()?;

        for s in series {
            let color = level_rgb(s.level);
            ctx.draw_series(
                s.points
                    .iter()
                    .map(|&p| Circle::new(p, 3, color.mix(0.55).filled())),
            )?
            .label(s.level.dataset_label())
            .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));

            if let (Some(trend), Some((lo, hi))) = (s.trend, extent(s.points.iter().map(|p| &p.0))) {
                ctx.draw_series(LineSeries::new(
                    [(lo, trend.at(lo)), (hi, trend.at(hi))],
                    color.stroke_width(2),
                ))?;
            }
        }

        for m in markers {
            let MarkerX::Value(x) = m.x else {
                continue;
            };
            ctx.draw_series(std::iter::once(Cross::new((x, m.y), 7, marker_style())))?
                .label(m.name.as_str())
                .legend(|(x, y)| Cross::new((x + 5, y), 5, marker_style()));
        }

        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    })
}

/// Ring segment between `from` and `to` percent, 0% on the left and 100% on the right.
fn gauge_band(from: f64, to: f64) -> Vec<(f64, f64)> {
    const STEPS: usize = 48;
    const INNER: f64 = 0.68;
    let angle = |pct: f64| PI * (1.0 - pct / 100.0);
    let arc: Vec<f64> = (0..=STEPS)
        .map(|i| angle(from + (to - from) * i as f64 / STEPS as f64))
        .collect();
    arc.iter()
        .map(|a| (a.cos(), a.sin()))
        .chain(arc.iter().rev().map(|a| (INNER * a.cos(), INNER * a.sin())))
        .collect()
}

/// Half-ring gauge for a 0-100 confidence score.
pub fn render_gauge(score: f64, color: RGBColor) -> Result<String, RenderError> {
    let s = score.clamp(0.0, 100.0);
    with_svg(GAUGE_SIZE, |root| {
        let mut ctx = ChartBuilder::on(root)
            .caption("Confidence", CAPTION_FONT)
            .margin(8)
            .build_cartesian_2d(-1.3f64..1.3f64, -0.25f64..1.1f64)?;

        ctx.draw_series(std::iter::once(Polygon::new(
            gauge_band(0.0, 100.0),
            TRACK_COLOR.filled(),
        )))?;
        if s > 0.0 {
            ctx.draw_series(std::iter::once(Polygon::new(gauge_band(0.0, s), color.filled())))?;
        }
        ctx.draw_series([
            Text::new(format!("{s:.2}%"), (-0.38, 0.35), ("sans-serif", 26)),
            Text::new("0".to_string(), (-0.9, -0.05), ("sans-serif", 12)),
            Text::new("100".to_string(), (0.75, -0.05), ("sans-serif", 12)),
        ])?;
        Ok(())
    })
}

/// Horizontal bars by absolute impact, strongest on top. Red pushes towards high
/// stress, green away from it.
pub fn render_factor_bars(factors: &[Factor]) -> Result<String, RenderError> {
    // segmented axes run bottom to top
    let labels: Vec<String> = factors
        .iter()
        .rev()
        .map(|f| format!("{} ({})", display_name(&f.name), format_impact(f.impact)))
        .collect();
    let max = factors.iter().map(|f| f.impact.abs()).fold(0.0, f64::max);

    with_svg(FACTOR_SIZE, |root| {
        if factors.is_empty() {
            root.draw(&Text::new(
                "Top contributing factors: not available",
                (20, 40),
                ("sans-serif", 14),
            ))?;
            return Ok(());
        }

        let mut ctx = ChartBuilder::on(root)
            .caption("Top Contributing Factors", CAPTION_FONT)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(190)
            .build_cartesian_2d(0.0..max.max(f64::EPSILON) * 1.1, labels[..].into_segmented())?;
        ctx.configure_mesh()
            .disable_y_mesh()
            .x_desc("|impact|")
            .y_label_formatter(&|v| segment_label(v, |l: &String| l.clone()))
            .draw()?;

        for (label, f) in labels.iter().zip(factors.iter().rev()) {
            let color = if f.impact >= 0.0 {
                level_rgb(StressLevel::High)
            } else {
                level_rgb(StressLevel::Low)
            };
            ctx.draw_series(
                Histogram::horizontal(&ctx)
                    .style(color.filled())
                    .margin(8)
                    .data([(label, f.impact.abs())]),
            )?;
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/dashboard/svg.rs"]
mod tests;
