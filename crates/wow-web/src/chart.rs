//! Chart rendering seam
//!
//! Pages hand plain geometry to a [`ChartRenderer`] found in context, so the charting
//! backend can be swapped without touching the derivations. [`CssChartRenderer`]
//! draws with CSS bars and inline SVG.

use leptos::prelude::*;
use std::f64::consts::PI;
use std::sync::Arc;

/// Default donut radius in SVG units
pub const DONUT_RADIUS: f64 = 45.0;

/// One labelled bar, `width` in percent of the widest bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value_label: String,
    pub width: f64,
}

/// Stroke geometry for a donut ring showing a single percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Donut {
    pub radius: f64,
    pub circumference: f64,
    pub dash_offset: f64,
}

/// Renders chart geometry into views
pub trait ChartRenderer: Send + Sync {
    fn bars(&self, bars: Vec<Bar>) -> AnyView;
    fn sparkline(&self, points: Vec<(f64, f64)>) -> AnyView;
    fn donut(&self, donut: Donut, label: String) -> AnyView;
}

/// Renderer provided through context
pub type SharedRenderer = Arc<dyn ChartRenderer>;

// =============================================================================
// Geometry
// =============================================================================

/// Width of each value in percent of the largest value
pub fn bar_widths(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v / max * 100.0).clamp(0.0, 100.0)).collect()
}

pub fn bars(labels_and_values: &[(String, f64, String)]) -> Vec<Bar> {
    let values: Vec<f64> = labels_and_values.iter().map(|(_, v, _)| *v).collect();
    labels_and_values
        .iter()
        .zip(bar_widths(&values))
        .map(|((label, _, value_label), width)| Bar {
            label: label.clone(),
            value_label: value_label.clone(),
            width,
        })
        .collect()
}

/// Points in a 100×100 box, x spread evenly, y inverted so larger values sit higher
///
/// A flat series is drawn through the middle.
pub fn sparkline_points(values: &[f64]) -> Vec<(f64, f64)> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let span = max - min;
    let steps = values.len().saturating_sub(1);

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if steps == 0 { 50.0 } else { i as f64 / steps as f64 * 100.0 };
            let y = if span > 0.0 { 100.0 - (v - min) / span * 100.0 } else { 50.0 };
            (x, y)
        })
        .collect()
}

/// SVG `points` attribute for a polyline
pub fn polyline(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Donut stroke for `percent` (clamped to 0-100)
pub fn donut(percent: f64, radius: f64) -> Donut {
    let circumference = 2.0 * PI * radius;
    let filled = percent.clamp(0.0, 100.0) / 100.0;
    Donut {
        radius,
        circumference,
        dash_offset: circumference - filled * circumference,
    }
}

// =============================================================================
// Default renderer
// =============================================================================

pub struct CssChartRenderer;

impl ChartRenderer for CssChartRenderer {
    fn bars(&self, bars: Vec<Bar>) -> AnyView {
        view! {
            <div class="space-y-2">
                {bars.into_iter().map(|bar| view! {
                    <div>
                        <div class="flex justify-between text-sm">
                            <span>{bar.label}</span>
                            <span class="font-medium">{bar.value_label}</span>
                        </div>
                        <div class="h-2 bg-[var(--rule)]">
                            <div class="h-full bg-[var(--ink)]" style=format!("width: {:.1}%", bar.width)></div>
                        </div>
                    </div>
                }).collect_view()}
            </div>
        }
        .into_any()
    }

    fn sparkline(&self, points: Vec<(f64, f64)>) -> AnyView {
        let line = polyline(&points);
        let area = format!("0,100 {line} 100,100");
        view! {
            <svg class="w-full h-8" viewBox="0 0 100 100" preserveAspectRatio="none">
                <polyline fill="none" stroke="currentColor" stroke-width="3" points=line />
                <polyline fill="rgba(99, 102, 241, 0.1)" stroke="none" points=area />
            </svg>
        }
        .into_any()
    }

    fn donut(&self, donut: Donut, label: String) -> AnyView {
        let size = donut.radius * 2.0 + 6.0;
        let center = size / 2.0;
        view! {
            <div class="inline-flex flex-col items-center">
                <svg width=size.to_string() height=size.to_string() class="-rotate-90">
                    <circle
                        cx=center.to_string()
                        cy=center.to_string()
                        r=donut.radius.to_string()
                        fill="none"
                        stroke="var(--rule)"
                        stroke-width="6"
                    />
                    <circle
                        cx=center.to_string()
                        cy=center.to_string()
                        r=donut.radius.to_string()
                        fill="none"
                        stroke="currentColor"
                        stroke-width="6"
                        stroke-dasharray=format!("{:.2}", donut.circumference)
                        stroke-dashoffset=format!("{:.2}", donut.dash_offset)
                    />
                </svg>
                <span class="text-sm">{label}</span>
            </div>
        }
        .into_any()
    }
}

/// Renderer from context, falling back to the CSS renderer
pub fn use_renderer() -> SharedRenderer {
    use_context::<SharedRenderer>().unwrap_or_else(|| Arc::new(CssChartRenderer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_widths_relative_to_max() {
        assert_eq!(bar_widths(&[50.0, 100.0, 25.0]), vec![50.0, 100.0, 25.0]);
        assert_eq!(bar_widths(&[3_900_000.0, 1_950_000.0]), vec![100.0, 50.0]);
    }

    #[test]
    fn test_bar_widths_all_zero() {
        assert_eq!(bar_widths(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(bar_widths(&[]).is_empty());
    }

    #[test]
    fn test_sparkline_points() {
        let points = sparkline_points(&[10.0, 20.0, 15.0]);
        assert_eq!(points, vec![(0.0, 100.0), (50.0, 0.0), (100.0, 50.0)]);
    }

    #[test]
    fn test_sparkline_flat_and_single() {
        assert_eq!(sparkline_points(&[5.0, 5.0]), vec![(0.0, 50.0), (100.0, 50.0)]);
        assert_eq!(sparkline_points(&[5.0]), vec![(50.0, 50.0)]);
        assert!(sparkline_points(&[]).is_empty());
    }

    #[test]
    fn test_polyline() {
        assert_eq!(polyline(&[(0.0, 100.0), (50.0, 0.0)]), "0.00,100.00 50.00,0.00");
    }

    #[test]
    fn test_donut_offsets() {
        let full = donut(100.0, DONUT_RADIUS);
        assert_eq!(full.dash_offset, 0.0);
        let empty = donut(0.0, DONUT_RADIUS);
        assert_eq!(empty.dash_offset, empty.circumference);
        let over = donut(140.0, DONUT_RADIUS);
        assert_eq!(over.dash_offset, 0.0);
        let half = donut(50.0, DONUT_RADIUS);
        assert!((half.dash_offset - half.circumference / 2.0).abs() < 1e-9);
    }
}
