//! Visualization module: cross-section and trend charts as inline SVG.
//!
//! Produces a self-contained HTML fragment (no scripts) for:
//! - Histogram: one bar per country, height = summed value
//! - Scatter: one point per observation, radius scaled by value
//! - Trend: one line with markers per country, x = year
//!
//! Empty results and incomplete selections never produce an empty chart;
//! they come back as a `Notice` carrying the user-facing message.
//!
//! Non-finite values (`inf` in the source file) are left out of every chart.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as FmtWrite};

use crate::element::Element;
use crate::error::ExplorerError;
use crate::locale::Locale;
use crate::query::{sort_by_year, ObservationTable};
use crate::reshape::{to_observations, Observation};

const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

const Y_TICKS: usize = 5;

// ── Config ──────────────────────────────────────────────────────────────────

/// Chart selection and canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Cross-section only: draw the per-country histogram.
    pub histogram: bool,
    /// Cross-section only: draw the scatter plot.
    pub scatter: bool,
    pub width_px: u32,
    pub height_px: u32,
    /// Language of titles and notices.
    pub locale: Locale,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            histogram: true,
            scatter: false,
            width_px: 800,
            height_px: 420,
            locale: Locale::English,
        }
    }
}

// ── Outcome ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoDataForYear,
    NoDataForCombination,
    NoChartSelected,
    NoCountrySelected,
}

impl Notice {
    pub fn message(self) -> &'static str {
        self.message_in(Locale::English)
    }

    pub fn message_in(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, Notice::NoDataForYear) => "No data for this year and variable.",
            (Locale::English, Notice::NoDataForCombination) => "No data for this combination.",
            (Locale::English, Notice::NoChartSelected) => "Select at least one chart type.",
            (Locale::English, Notice::NoCountrySelected) => "Select at least one country.",
            (Locale::Spanish, Notice::NoDataForYear) => "No hay datos para este año y variable.",
            (Locale::Spanish, Notice::NoDataForCombination) => {
                "No hay datos para esta combinación."
            }
            (Locale::Spanish, Notice::NoChartSelected) => "Selecciona al menos un tipo de gráfico.",
            (Locale::Spanish, Notice::NoCountrySelected) => "Selecciona al menos un país.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Chart(String),
    Notice(Notice),
}

impl Rendered {
    /// HTML for embedding; notices become a plain message block in `locale`.
    pub fn into_html(self, locale: Locale) -> String {
        match self {
            Rendered::Chart(html) => html,
            Rendered::Notice(notice) => format!(
                r#"<div class="agri-notice" style="font-family:sans-serif; padding:8px; color:#856404; background:#fff3cd; border:1px solid #ffeeba; border-radius:4px;">{}</div>"#,
                escape_html(notice.message_in(locale))
            ),
        }
    }
}

// ── Titles ──────────────────────────────────────────────────────────────────

pub fn cross_section_title(element: Element, year: i32, locale: Locale) -> String {
    let description = locale.description(element);
    let (label, unit) = (element.label(), element.unit());
    match locale {
        Locale::English => format!("{description} ({label}) in {year} [{unit}]"),
        Locale::Spanish => format!("{description} ({label}) en {year} [{unit}]"),
    }
}

pub fn trend_title(crop: &str, element: Element, locale: Locale) -> String {
    let description = locale.description(element);
    let unit = element.unit();
    match locale {
        Locale::English => format!("{description} of {crop} [{unit}]"),
        Locale::Spanish => format!("{description} de {crop} [{unit}]"),
    }
}

// ── Entry points ────────────────────────────────────────────────────────────

/// Query one year/element and draw the selected cross-section charts.
pub fn render_cross_section(
    table: &ObservationTable,
    year: i32,
    element: Element,
    options: &ChartOptions,
) -> Result<Rendered, ExplorerError> {
    let rows = finite(to_observations(&table.cross_section(year, element)?)?);
    if rows.is_empty() {
        return Ok(Rendered::Notice(Notice::NoDataForYear));
    }
    if !options.histogram && !options.scatter {
        return Ok(Rendered::Notice(Notice::NoChartSelected));
    }

    let locale = options.locale;
    let base = cross_section_title(element, year, locale);
    let colors = color_map(&rows);

    let mut html = String::from(r#"<div class="agri-chart">"#);
    if options.histogram {
        let title = format!("{} - {base}", locale.histogram_prefix());
        html.push_str(&histogram_svg(&title, &rows, &colors, options));
    }
    if options.scatter {
        let title = format!("{} - {base}", locale.scatter_prefix());
        html.push_str(&scatter_svg(&title, &rows, &colors, options));
    }
    html.push_str(&legend_html(&colors));
    html.push_str("</div>");
    Ok(Rendered::Chart(html))
}

/// Query one crop/element for the given countries and draw the time series.
pub fn render_trend(
    table: &ObservationTable,
    countries: &[String],
    crop: &str,
    element: Element,
    options: &ChartOptions,
) -> Result<Rendered, ExplorerError> {
    if countries.is_empty() {
        return Ok(Rendered::Notice(Notice::NoCountrySelected));
    }
    let df = sort_by_year(&table.trend(countries, crop, element)?)?;
    let rows = finite(to_observations(&df)?);
    if rows.is_empty() {
        return Ok(Rendered::Notice(Notice::NoDataForCombination));
    }

    let colors = color_map(&rows);
    let title = trend_title(crop, element, options.locale);
    let mut html = String::from(r#"<div class="agri-chart">"#);
    html.push_str(&line_svg(&title, &rows, &colors, options));
    html.push_str(&legend_html(&colors));
    html.push_str("</div>");
    Ok(Rendered::Chart(html))
}

// ── Layout ──────────────────────────────────────────────────────────────────

struct Frame {
    width: f64,
    height: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    /// `lo`/`hi` that are not finite (empty folds, overflowing sums) fall
    /// back to a 0..1 axis.
    fn new(options: &ChartOptions, lo: f64, hi: f64) -> Self {
        let lo = if lo.is_finite() { lo } else { 0.0 };
        let hi = if hi.is_finite() { hi } else { lo.max(0.0) };
        let y_min = lo.min(0.0);
        let y_max = if hi > y_min { hi } else { y_min + 1.0 };
        Self {
            width: f64::from(options.width_px),
            height: f64::from(options.height_px),
            left: 70.0,
            right: 20.0,
            top: 40.0,
            bottom: 90.0,
            y_min,
            y_max,
        }
    }

    fn plot_width(&self) -> f64 {
        (self.width - self.left - self.right).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height - self.top - self.bottom).max(1.0)
    }

    fn y(&self, value: f64) -> f64 {
        let frac = (value - self.y_min) / (self.y_max - self.y_min);
        self.top + self.plot_height() * (1.0 - frac)
    }

    /// Center of the `index`-th of `count` equal bands.
    fn band_center(&self, index: usize, count: usize) -> f64 {
        let band = self.plot_width() / count.max(1) as f64;
        self.left + band * (index as f64 + 0.5)
    }

    fn band_width(&self, count: usize) -> f64 {
        self.plot_width() / count.max(1) as f64
    }

    fn baseline(&self) -> f64 {
        self.y(0.0_f64.max(self.y_min))
    }
}

fn open_svg(out: &mut String, frame: &Frame, title: &str) {
    write!(
        out,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="font-family:sans-serif; background:#fff;">
<text x="{cx}" y="22" text-anchor="middle" font-size="15" fill="#212529">{title}</text>
"##,
        w = frame.width,
        h = frame.height,
        cx = frame.width / 2.0,
        title = escape_html(title),
    )
    .unwrap();

    // y axis with gridlines
    for i in 0..=Y_TICKS {
        let value = frame.y_min + (frame.y_max - frame.y_min) * i as f64 / Y_TICKS as f64;
        let y = frame.y(value);
        write!(
            out,
            r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="#e9ecef"/>
<text x="{lx:.1}" y="{ty:.1}" text-anchor="end" font-size="10" fill="#868e96">{label}</text>
"##,
            x1 = frame.left,
            x2 = frame.left + frame.plot_width(),
            lx = frame.left - 6.0,
            ty = y + 3.0,
            label = format_tick(value),
        )
        .unwrap();
    }
    write!(
        out,
        r##"<line x1="{x:.1}" y1="{top:.1}" x2="{x:.1}" y2="{bottom:.1}" stroke="#adb5bd"/>
<line x1="{x:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="#adb5bd"/>
"##,
        x = frame.left,
        top = frame.top,
        bottom = frame.top + frame.plot_height(),
        right = frame.left + frame.plot_width(),
    )
    .unwrap();
}

fn category_labels(out: &mut String, frame: &Frame, labels: &[&str]) {
    let y = frame.top + frame.plot_height() + 12.0;
    for (i, label) in labels.iter().enumerate() {
        let x = frame.band_center(i, labels.len());
        write!(
            out,
            r##"<text x="{x:.1}" y="{y:.1}" text-anchor="end" font-size="10" fill="#495057" transform="rotate(-45 {x:.1} {y:.1})">{label}</text>
"##,
            label = escape_html(label),
        )
        .unwrap();
    }
}

// ── Charts ──────────────────────────────────────────────────────────────────

fn histogram_svg(
    title: &str,
    rows: &[Observation],
    colors: &BTreeMap<&str, &'static str>,
    options: &ChartOptions,
) -> String {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for o in rows {
        *totals.entry(o.country.as_str()).or_insert(0.0) += o.value;
    }
    totals.retain(|_, total| total.is_finite());
    let lo = totals.values().copied().fold(f64::INFINITY, f64::min);
    let hi = totals.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let frame = Frame::new(options, lo, hi);
    let unit = rows.first().map(Observation::unit).unwrap_or("");

    let mut out = String::new();
    open_svg(&mut out, &frame, title);

    let count = totals.len();
    let bar = frame.band_width(count) * 0.8;
    for (i, (country, total)) in totals.iter().enumerate() {
        let y = frame.y(*total);
        let base = frame.baseline();
        write!(
            out,
            r##"<rect class="bar" x="{x:.1}" y="{top:.1}" width="{bar:.1}" height="{h:.1}" fill="{color}"><title>{name}: {value} {unit}</title></rect>
"##,
            x = frame.band_center(i, count) - bar / 2.0,
            top = y.min(base),
            h = (base - y).abs(),
            color = colors.get(country).copied().unwrap_or(PALETTE[0]),
            name = escape_html(country),
            value = format_value(*total),
            unit = escape_html(unit),
        )
        .unwrap();
    }

    let labels: Vec<&str> = totals.keys().copied().collect();
    category_labels(&mut out, &frame, &labels);
    out.push_str("</svg>\n");
    out
}

fn scatter_svg(
    title: &str,
    rows: &[Observation],
    colors: &BTreeMap<&str, &'static str>,
    options: &ChartOptions,
) -> String {
    let lo = rows.iter().map(|o| o.value).fold(f64::INFINITY, f64::min);
    let hi = rows.iter().map(|o| o.value).fold(f64::NEG_INFINITY, f64::max);
    let frame = Frame::new(options, lo, hi);
    let labels: Vec<&str> = colors.keys().copied().collect();
    let max_abs = rows.iter().map(|o| o.value.abs()).fold(0.0, f64::max);

    let mut out = String::new();
    open_svg(&mut out, &frame, title);

    for o in rows {
        let index = labels
            .iter()
            .position(|c| *c == o.country.as_str())
            .unwrap_or(0);
        let radius = if max_abs > 0.0 {
            3.0 + 17.0 * (o.value.abs() / max_abs).sqrt()
        } else {
            3.0
        };
        write!(
            out,
            r##"<circle class="point" cx="{cx:.1}" cy="{cy:.1}" r="{radius:.1}" fill="{color}" fill-opacity="0.7"><title>{name}: {value} {unit}</title></circle>
"##,
            cx = frame.band_center(index, labels.len()),
            cy = frame.y(o.value),
            color = colors.get(o.country.as_str()).copied().unwrap_or(PALETTE[0]),
            name = escape_html(&o.country),
            value = format_value(o.value),
            unit = escape_html(o.unit()),
        )
        .unwrap();
    }

    category_labels(&mut out, &frame, &labels);
    out.push_str("</svg>\n");
    out
}

/// Rows must already be ordered by year within each country.
fn line_svg(
    title: &str,
    rows: &[Observation],
    colors: &BTreeMap<&str, &'static str>,
    options: &ChartOptions,
) -> String {
    let lo = rows.iter().map(|o| o.value).fold(f64::INFINITY, f64::min);
    let hi = rows.iter().map(|o| o.value).fold(f64::NEG_INFINITY, f64::max);
    let frame = Frame::new(options, lo, hi);
    let first_year = rows.iter().map(|o| o.year).min().unwrap_or(0);
    let last_year = rows.iter().map(|o| o.year).max().unwrap_or(first_year);
    let span = (last_year - first_year) as f64;
    let x_of = |year: i32| {
        if span > 0.0 {
            frame.left + frame.plot_width() * f64::from(year - first_year) / span
        } else {
            frame.left + frame.plot_width() / 2.0
        }
    };

    let mut series: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for o in rows {
        series.entry(o.country.as_str()).or_default().push(o);
    }

    let mut out = String::new();
    open_svg(&mut out, &frame, title);

    for (country, points) in &series {
        let color = colors.get(country).copied().unwrap_or(PALETTE[0]);
        let path: Vec<String> = points
            .iter()
            .map(|o| format!("{:.1},{:.1}", x_of(o.year), frame.y(o.value)))
            .collect();
        write!(
            out,
            r##"<polyline class="series" points="{points}" fill="none" stroke="{color}" stroke-width="2"><title>{name}</title></polyline>
"##,
            points = path.join(" "),
            name = escape_html(country),
        )
        .unwrap();
        for o in points {
            write!(
                out,
                r##"<circle class="marker" cx="{cx:.1}" cy="{cy:.1}" r="3.5" fill="{color}"><title>{name} {year}: {value} {unit}</title></circle>
"##,
                cx = x_of(o.year),
                cy = frame.y(o.value),
                name = escape_html(country),
                year = o.year,
                value = format_value(o.value),
                unit = escape_html(o.unit()),
            )
            .unwrap();
        }
    }

    // year labels, at most ~10
    let bottom = frame.top + frame.plot_height() + 16.0;
    let step = ((last_year - first_year) / 10).max(1);
    let mut year = first_year;
    while year <= last_year {
        write!(
            out,
            r##"<text x="{x:.1}" y="{bottom:.1}" text-anchor="middle" font-size="10" fill="#495057">{year}</text>
"##,
            x = x_of(year),
        )
        .unwrap();
        year += step;
    }

    out.push_str("</svg>\n");
    out
}

fn legend_html(colors: &BTreeMap<&str, &'static str>) -> String {
    let mut out = String::from(
        r#"<div class="agri-legend" style="font-family:sans-serif; font-size:12px; display:flex; flex-wrap:wrap; gap:10px; padding:4px 8px;">"#,
    );
    for (country, color) in colors {
        write!(
            out,
            r#"<span><span style="display:inline-block; width:10px; height:10px; background:{color}; margin-right:4px;"></span>{}</span>"#,
            escape_html(country)
        )
        .unwrap();
    }
    out.push_str("</div>");
    out
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn finite(mut rows: Vec<Observation>) -> Vec<Observation> {
    rows.retain(|o| o.value.is_finite());
    rows
}

/// Stable color per country, by sorted position.
fn color_map(rows: &[Observation]) -> BTreeMap<&str, &'static str> {
    let countries: BTreeSet<&str> = rows.iter().map(|o| o.country.as_str()).collect();
    countries
        .into_iter()
        .enumerate()
        .map(|(i, c)| (c, PALETTE[i % PALETTE.len()]))
        .collect()
}

fn format_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}G", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{:.1}", value)
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;
    use crate::config::ReshapeConfig;

    fn table() -> ObservationTable {
        let raw = df!(
            "Area" => ["Costa Rica", "Honduras", "Costa Rica", "A<B & C"],
            "Item" => ["Coffee", "Coffee", "Coffee", "Coffee"],
            "Element" => ["Production", "Production", "Yield", "Production"],
            "Y2019" => [Some("100"), Some("300"), Some("7"), None],
            "Y2020" => [Some("110.5"), None, Some("8"), Some("5")],
        )
        .unwrap();
        ObservationTable::from_raw(&raw, &ReshapeConfig::default()).unwrap()
    }

    fn chart(rendered: Rendered) -> String {
        match rendered {
            Rendered::Chart(html) => html,
            Rendered::Notice(n) => panic!("expected chart, got notice: {n}"),
        }
    }

    #[test]
    fn titles() {
        assert_eq!(
            cross_section_title(Element::Production, 2020, Locale::English),
            "Total produced (Production) in 2020 [Tonnes]"
        );
        assert_eq!(
            trend_title("Coffee", Element::Yield, Locale::English),
            "Production to area ratio of Coffee [Hg/ha]"
        );
    }

    #[test]
    fn spanish_titles() {
        assert_eq!(
            cross_section_title(Element::AreaHarvested, 2020, Locale::Spanish),
            "Área utilizada para cosecha (Area harvested) en 2020 [ha]"
        );
        assert_eq!(
            trend_title("Café", Element::Production, Locale::Spanish),
            "Total producido de Café [Tonnes]"
        );
    }

    #[test]
    fn spanish_charts_and_notices() {
        let options = ChartOptions {
            scatter: true,
            locale: Locale::Spanish,
            ..ChartOptions::default()
        };
        let html = chart(render_cross_section(&table(), 2019, Element::Production, &options).unwrap());
        assert!(html.contains("Histograma - Total producido (Production) en 2019 [Tonnes]"));
        assert!(html.contains("Dispersión - Total producido (Production) en 2019 [Tonnes]"));

        let html = render_cross_section(&table(), 1990, Element::Production, &options)
            .unwrap()
            .into_html(options.locale);
        assert!(html.contains("No hay datos para este año y variable."));

        let html = render_trend(&table(), &[], "Coffee", Element::Production, &options)
            .unwrap()
            .into_html(options.locale);
        assert!(html.contains("Selecciona al menos un país."));
    }

    #[test]
    fn cross_section_without_data_is_notice() {
        let r = render_cross_section(&table(), 1990, Element::Production, &ChartOptions::default())
            .unwrap();
        assert_eq!(r, Rendered::Notice(Notice::NoDataForYear));
    }

    #[test]
    fn no_data_takes_precedence_over_chart_selection() {
        let options = ChartOptions {
            histogram: false,
            scatter: false,
            ..ChartOptions::default()
        };
        let r = render_cross_section(&table(), 1990, Element::Production, &options).unwrap();
        assert_eq!(r, Rendered::Notice(Notice::NoDataForYear));

        let r = render_cross_section(&table(), 2019, Element::Production, &options).unwrap();
        assert_eq!(r, Rendered::Notice(Notice::NoChartSelected));
    }

    #[test]
    fn histogram_has_bar_per_country() {
        let html = chart(
            render_cross_section(&table(), 2020, Element::Production, &ChartOptions::default())
                .unwrap(),
        );
        assert_eq!(html.matches(r#"class="bar""#).count(), 2);
        assert!(html.contains("Histogram - Total produced (Production) in 2020 [Tonnes]"));
        assert!(!html.contains(r#"class="point""#));
    }

    #[test]
    fn scatter_has_point_per_row() {
        let options = ChartOptions {
            histogram: false,
            scatter: true,
            ..ChartOptions::default()
        };
        let html = chart(render_cross_section(&table(), 2019, Element::Production, &options).unwrap());
        assert_eq!(html.matches(r#"class="point""#).count(), 2);
        assert!(html.contains("Scatter - "));
    }

    #[test]
    fn names_are_escaped() {
        let html = chart(
            render_cross_section(&table(), 2020, Element::Production, &ChartOptions::default())
                .unwrap(),
        );
        assert!(html.contains("A&lt;B &amp; C"));
        assert!(!html.contains("A<B"));
    }

    #[test]
    fn trend_requires_a_country() {
        let r = render_trend(&table(), &[], "Coffee", Element::Production, &ChartOptions::default())
            .unwrap();
        assert_eq!(r, Rendered::Notice(Notice::NoCountrySelected));
    }

    #[test]
    fn trend_without_data_is_notice() {
        let r = render_trend(
            &table(),
            &["Honduras".to_string()],
            "Bananas",
            Element::Production,
            &ChartOptions::default(),
        )
        .unwrap();
        assert_eq!(r, Rendered::Notice(Notice::NoDataForCombination));
    }

    #[test]
    fn trend_draws_line_per_country() {
        let countries = vec!["Costa Rica".to_string(), "Honduras".to_string()];
        let html = chart(
            render_trend(&table(), &countries, "Coffee", Element::Production, &ChartOptions::default())
                .unwrap(),
        );
        assert_eq!(html.matches(r#"class="series""#).count(), 2);
        assert_eq!(html.matches(r#"class="marker""#).count(), 3);
        assert!(html.contains("Total produced of Coffee [Tonnes]"));
    }

    #[test]
    fn notice_html_carries_message() {
        let html = Rendered::Notice(Notice::NoChartSelected).into_html(Locale::English);
        assert!(html.contains("Select at least one chart type."));
        let html = Rendered::Notice(Notice::NoChartSelected).into_html(Locale::Spanish);
        assert!(html.contains("Selecciona al menos un tipo de gráfico."));
    }

    #[test]
    fn frame_handles_flat_data() {
        let frame = Frame::new(&ChartOptions::default(), 0.0, 0.0);
        assert!(frame.y_max > frame.y_min);
        assert!(frame.y(0.0).is_finite());
    }

    #[test]
    fn frame_ignores_non_finite_bounds() {
        let frame = Frame::new(&ChartOptions::default(), f64::NEG_INFINITY, f64::INFINITY);
        assert!(frame.y_min.is_finite() && frame.y_max.is_finite());
        assert!(frame.y_max > frame.y_min);

        let frame = Frame::new(&ChartOptions::default(), f64::INFINITY, f64::NEG_INFINITY);
        assert!(frame.y(0.0).is_finite());
    }

    fn table_with_infinity() -> ObservationTable {
        let raw = df!(
            "Area" => ["Chile", "Peru", "Chile"],
            "Item" => ["Maize", "Maize", "Maize"],
            "Element" => ["Production", "Production", "Production"],
            "Y2019" => ["inf", "250", "-inf"],
            "Y2020" => ["10", "inf", "12"],
        )
        .unwrap();
        ObservationTable::from_raw(&raw, &ReshapeConfig::default()).unwrap()
    }

    #[test]
    fn infinite_values_are_not_drawn() {
        let table = table_with_infinity();
        let options = ChartOptions {
            scatter: true,
            ..ChartOptions::default()
        };
        let html = chart(render_cross_section(&table, 2019, Element::Production, &options).unwrap());
        assert!(!html.contains("NaN"));
        assert!(!html.contains("inf"));
        assert_eq!(html.matches(r#"class="bar""#).count(), 1);
        assert_eq!(html.matches(r#"class="point""#).count(), 1);

        let countries = vec!["Chile".to_string(), "Peru".to_string()];
        let html = chart(
            render_trend(&table, &countries, "Maize", Element::Production, &ChartOptions::default())
                .unwrap(),
        );
        assert!(!html.contains("NaN"));
        assert!(!html.contains("inf"));
        assert_eq!(html.matches(r#"class="marker""#).count(), 3);
    }

    #[test]
    fn only_infinite_values_is_no_data() {
        let raw = df!(
            "Area" => ["Chile"],
            "Item" => ["Maize"],
            "Element" => ["Yield"],
            "Y2019" => ["inf"],
        )
        .unwrap();
        let table = ObservationTable::from_raw(&raw, &ReshapeConfig::default()).unwrap();
        let r = render_cross_section(&table, 2019, Element::Yield, &ChartOptions::default()).unwrap();
        assert_eq!(r, Rendered::Notice(Notice::NoDataForYear));
    }
}
