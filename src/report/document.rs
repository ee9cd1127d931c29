//! HTML document reporter.
//!
//! Renders a self-contained report file: summary table, verdict,
//! suitability, inline SVG charts, and the history trend panel. The
//! template is embedded and filled by placeholder replacement.

use std::path::Path;

use super::{fmt_opt, ReportContext, ReportError};
use crate::history::HistoryRow;
use crate::i18n::{verdict_msg, Lang, Msg};
use crate::score::{Verdict, BASE};

const REPORT_TEMPLATE: &str = include_str!("templates/report.html");

/// Host line colors, cycled in host order.
const CHART_COLORS: &[&str] = &[
    "#4363d8", "#f58231", "#3cb44b", "#e6194b", "#911eb4", "#46b8c9", "#6b7f93",
];

const MEAN_COLOR: &str = "#4363d8";
const JITTER_COLOR: &str = "#f58231";
const LOSS_COLOR: &str = "#e6194b";
const SCORE_COLOR: &str = "#911eb4";

/// Render the report and write it to `path`.
pub fn write_report(
    path: &Path,
    ctx: &ReportContext,
    history: &[HistoryRow],
) -> Result<(), ReportError> {
    std::fs::write(path, render(ctx, history))?;
    tracing::info!("report written to {}", path.display());
    Ok(())
}

/// Render the full report document as a string.
pub fn render(ctx: &ReportContext, history: &[HistoryRow]) -> String {
    let lang = ctx.lang;
    let year = ctx.timestamp.get(..4).unwrap_or("");

    REPORT_TEMPLATE
        .replace("{{lang}}", lang_code(lang))
        .replace("{{title}}", lang.text(Msg::ReportTitle))
        .replace("{{app_title}}", lang.text(Msg::AppTitle))
        .replace("{{generated_label}}", lang.text(Msg::GeneratedAt))
        .replace("{{timestamp}}", &escape(ctx.timestamp))
        .replace("{{run_id}}", &escape(ctx.run_id))
        .replace("{{summary_heading}}", lang.text(Msg::Summary))
        .replace("{{summary_table}}", &summary_table_html(ctx))
        .replace("{{score_label}}", lang.text(Msg::OverallScore))
        .replace(
            "{{score_value}}",
            &format!("{:.1} / {:.0}", ctx.result.score, ctx.result.scale_max),
        )
        .replace("{{verdict_label}}", lang.text(Msg::VerdictLabel))
        .replace("{{verdict_tone}}", verdict_tone(ctx.result.verdict))
        .replace("{{verdict_text}}", lang.text(verdict_msg(ctx.result.verdict)))
        .replace("{{suitability_block}}", &suitability_block(ctx))
        .replace("{{interpret_title}}", lang.text(Msg::InterpretTitle))
        .replace("{{interpret_loss}}", lang.text(Msg::InterpretLoss))
        .replace("{{interpret_latency}}", lang.text(Msg::InterpretLatency))
        .replace("{{interpret_jitter}}", lang.text(Msg::InterpretJitter))
        .replace("{{chart_comparative_title}}", lang.text(Msg::ChartComparative))
        .replace("{{svg_comparative}}", &svg_comparative(ctx))
        .replace(
            "{{chart_comparative_caption}}",
            lang.text(Msg::ChartComparativeCaption),
        )
        .replace("{{chart_bars_title}}", lang.text(Msg::ChartBars))
        .replace("{{svg_bars}}", &svg_bars(ctx))
        .replace("{{chart_bars_caption}}", lang.text(Msg::ChartBarsCaption))
        .replace("{{history_title}}", lang.text(Msg::HistoryTitle))
        .replace("{{history_block}}", &history_block(lang, history))
        .replace("{{method_title}}", lang.text(Msg::Method))
        .replace("{{method_text}}", lang.text(Msg::MethodText))
        .replace("{{stability_text}}", lang.text(Msg::StabilityText))
        .replace(
            "{{footnote}}",
            &lang.text(Msg::Footnote).replace("{year}", year),
        )
        .replace("{{data_json}}", &data_json(ctx))
}

/// Machine-readable appendix: the same value records the renderers
/// consume, embedded for anything that wants to post-process a report.
fn data_json(ctx: &ReportContext) -> String {
    let value = serde_json::json!({
        "run_id": ctx.run_id,
        "timestamp": ctx.timestamp,
        "hosts": ctx
            .hosts
            .iter()
            .map(|h| serde_json::json!({ "name": h.host.name, "summary": h.summary }))
            .collect::<Vec<_>>(),
        "overall": ctx.overall,
        "score": ctx.result,
        "suitability": ctx.suitability,
    });
    serde_json::to_string(&value)
        .unwrap_or_else(|_| "{}".to_string())
        // keep the blob safe inside the <script> element
        .replace("</", "<\\/")
}

fn lang_code(lang: Lang) -> &'static str {
    match lang {
        Lang::Pt => "pt",
        Lang::En => "en",
    }
}

fn verdict_tone(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Stable | Verdict::Excellent => "good",
        Verdict::MinorOscillation | Verdict::Good | Verdict::Fair => "warn",
        Verdict::Unstable | Verdict::Poor | Verdict::VeryPoor => "bad",
    }
}

/// Minimal HTML escaping for interpolated text.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn summary_table_html(ctx: &ReportContext) -> String {
    let lang = ctx.lang;
    let mut html = String::from("<table>\n<tr>");
    for header in [
        Msg::Host,
        Msg::Sent,
        Msg::Loss,
        Msg::Mean,
        Msg::P95,
        Msg::Min,
        Msg::Max,
        Msg::Jitter,
    ] {
        html.push_str(&format!("<th>{}</th>", lang.text(header)));
    }
    html.push_str("</tr>\n");

    for report in ctx.hosts {
        let m = &report.summary;
        let loss_class = if m.loss_pct > BASE.loss_ok { " class=\"alert\"" } else { "" };
        let mean_class = match m.mean {
            Some(mean) if mean > ctx.ping_alert => " class=\"alert\"",
            _ => "",
        };
        let jitter_class = match m.jitter {
            Some(j) if j > BASE.jitter_ok => " class=\"alert\"",
            _ => "",
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td{}>{:.2}</td><td{}>{}</td><td>{}</td><td>{}</td><td>{}</td><td{}>{}</td></tr>\n",
            escape(&report.host.name),
            m.sent,
            loss_class,
            m.loss_pct,
            mean_class,
            fmt_opt(m.mean),
            fmt_opt(m.p95),
            fmt_opt(m.min),
            fmt_opt(m.max),
            jitter_class,
            fmt_opt(m.jitter),
        ));
    }
    html.push_str("</table>");
    html
}

fn suitability_block(ctx: &ReportContext) -> String {
    let Some(suit) = &ctx.suitability else {
        return String::new();
    };
    let lang = ctx.lang;
    let mut html = format!("<h2>{}</h2>\n<ul class=\"suitability\">\n", lang.text(Msg::Suitability));
    for (label, ok) in [
        (Msg::Streaming, suit.streaming),
        (Msg::VideoCall, suit.video_call),
        (Msg::Gaming, suit.gaming),
    ] {
        let (class, text) = if ok {
            ("ok", lang.text(Msg::Suitable))
        } else {
            ("no", lang.text(Msg::NotRecommended))
        };
        html.push_str(&format!(
            "<li>{}: <span class=\"{}\">{}</span></li>\n",
            lang.text(label),
            class,
            text
        ));
    }
    html.push_str("</ul>");
    html
}

// --- Charts ---

const CHART_W: f64 = 760.0;
const CHART_H: f64 = 340.0;
const MARGIN_L: f64 = 48.0;
const MARGIN_R: f64 = 12.0;
const MARGIN_T: f64 = 16.0;
const MARGIN_B: f64 = 34.0;

/// Latency-over-time chart: one line per host, gaps where probes timed
/// out, a dashed line at each host's mean.
fn svg_comparative(ctx: &ReportContext) -> String {
    let plot_w = CHART_W - MARGIN_L - MARGIN_R;
    let plot_h = CHART_H - MARGIN_T - MARGIN_B;

    let ticks = ctx.hosts.iter().map(|h| h.series.len()).max().unwrap_or(0);
    let max_rtt = ctx
        .hosts
        .iter()
        .flat_map(|h| h.series.rtts())
        .fold(1.0_f64, f64::max);

    let x = |i: usize| MARGIN_L + i as f64 * plot_w / (ticks.saturating_sub(1).max(1)) as f64;
    let y = |v: f64| MARGIN_T + plot_h - (v / max_rtt) * plot_h;

    let mut svg = svg_open();
    svg.push_str(&axes(max_rtt, ctx.lang));

    // x-axis span in wall-clock seconds
    let span_secs = ticks.saturating_sub(1) as f64 * ctx.interval_secs;
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" text-anchor=\"end\">{span_secs:.0}s</text>\n",
        CHART_W - MARGIN_R,
        CHART_H - MARGIN_B + 12.0,
    ));

    for (i, report) in ctx.hosts.iter().enumerate() {
        let color = CHART_COLORS[i % CHART_COLORS.len()];

        // break the line at timeouts instead of interpolating across them
        let mut segment: Vec<(f64, f64)> = Vec::new();
        let flush = |segment: &mut Vec<(f64, f64)>, svg: &mut String| {
            match segment.as_slice() {
                [] => {}
                [(px, py)] => svg.push_str(&format!(
                    "<circle cx=\"{px:.1}\" cy=\"{py:.1}\" r=\"2\" fill=\"{color}\"/>\n"
                )),
                points => {
                    let joined: Vec<String> = points
                        .iter()
                        .map(|(px, py)| format!("{px:.1},{py:.1}"))
                        .collect();
                    svg.push_str(&format!(
                        "<polyline fill=\"none\" stroke=\"{color}\" stroke-width=\"1.5\" points=\"{}\"/>\n",
                        joined.join(" ")
                    ));
                }
            }
            segment.clear();
        };
        for (tick, sample) in report.series.samples().iter().enumerate() {
            match sample.rtt() {
                Some(ms) => segment.push((x(tick), y(ms))),
                None => flush(&mut segment, &mut svg),
            }
        }
        flush(&mut segment, &mut svg);

        if let Some(mean) = report.summary.mean {
            svg.push_str(&format!(
                "<line x1=\"{MARGIN_L}\" y1=\"{0:.1}\" x2=\"{1:.1}\" y2=\"{0:.1}\" stroke=\"{color}\" stroke-width=\"1\" stroke-dasharray=\"5,4\" opacity=\"0.7\"/>\n",
                y(mean),
                CHART_W - MARGIN_R,
            ));
        }

        // legend entry
        let ly = MARGIN_T + 6.0 + i as f64 * 15.0;
        svg.push_str(&format!(
            "<rect x=\"{0:.1}\" y=\"{1:.1}\" width=\"10\" height=\"10\" fill=\"{color}\"/>\
             <text x=\"{2:.1}\" y=\"{3:.1}\" font-size=\"11\">{4}</text>\n",
            MARGIN_L + 8.0,
            ly - 8.0,
            MARGIN_L + 22.0,
            ly + 1.0,
            escape(&report.host.name),
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Per-host bars for mean / jitter / loss, the report's quick comparison.
fn svg_bars(ctx: &ReportContext) -> String {
    let label_w = 180.0;
    let bar_h = 13.0;
    let group_h = 3.0 * (bar_h + 3.0) + 14.0;
    let height = MARGIN_T + ctx.hosts.len() as f64 * group_h + 24.0;
    let plot_w = CHART_W - label_w - MARGIN_R - 60.0;

    let max_value = ctx
        .hosts
        .iter()
        .flat_map(|h| {
            [
                h.summary.mean.unwrap_or(0.0),
                h.summary.jitter.unwrap_or(0.0),
                h.summary.loss_pct,
            ]
        })
        .fold(1.0_f64, f64::max);

    let mut svg = format!(
        "<svg viewBox=\"0 0 {CHART_W} {height:.0}\" width=\"{CHART_W}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );

    for (i, report) in ctx.hosts.iter().enumerate() {
        let top = MARGIN_T + i as f64 * group_h;
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" font-weight=\"bold\" text-anchor=\"end\">{}</text>\n",
            label_w - 8.0,
            top + bar_h,
            escape(&report.host.name),
        ));

        let bars = [
            (report.summary.mean, MEAN_COLOR),
            (report.summary.jitter, JITTER_COLOR),
            (Some(report.summary.loss_pct), LOSS_COLOR),
        ];
        for (row, (value, color)) in bars.into_iter().enumerate() {
            let by = top + row as f64 * (bar_h + 3.0);
            let width = value.unwrap_or(0.0).max(0.0) / max_value * plot_w;
            svg.push_str(&format!(
                "<rect x=\"{label_w}\" y=\"{by:.1}\" width=\"{width:.1}\" height=\"{bar_h}\" fill=\"{color}\"/>\
                 <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\">{}</text>\n",
                label_w + width + 5.0,
                by + bar_h - 3.0,
                fmt_opt(value),
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Trend panel over past runs' OVERALL rows: mean/jitter/loss on the left
/// scale, the score dashed on its own scale.
fn svg_history(rows: &[HistoryRow]) -> Option<String> {
    if rows.len() < 2 {
        return None;
    }
    let rows = &rows[rows.len().saturating_sub(50)..];

    let plot_w = CHART_W - MARGIN_L - MARGIN_R;
    let plot_h = CHART_H - MARGIN_T - MARGIN_B;

    let left_max = rows
        .iter()
        .flat_map(|r| [r.mean_ms.unwrap_or(0.0), r.jitter_ms.unwrap_or(0.0), r.loss_pct])
        .fold(1.0_f64, f64::max);
    let score_max = rows
        .iter()
        .filter_map(|r| r.overall_score)
        .fold(1.0_f64, f64::max);

    let x = |i: usize| MARGIN_L + i as f64 * plot_w / (rows.len() - 1) as f64;
    let y_left = |v: f64| MARGIN_T + plot_h - (v / left_max) * plot_h;
    let y_score = |v: f64| MARGIN_T + plot_h - (v / score_max) * plot_h;

    let mean_points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.mean_ms.map(|v| (x(i), y_left(v))))
        .collect();
    let jitter_points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.jitter_ms.map(|v| (x(i), y_left(v))))
        .collect();
    let loss_points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (x(i), y_left(r.loss_pct)))
        .collect();
    let score_points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.overall_score.map(|v| (x(i), y_score(v))))
        .collect();

    let mut svg = svg_open();
    svg.push_str(&polyline(&mean_points, MEAN_COLOR, ""));
    svg.push_str(&polyline(&jitter_points, JITTER_COLOR, ""));
    svg.push_str(&polyline(&loss_points, LOSS_COLOR, ""));
    svg.push_str(&polyline(
        &score_points,
        SCORE_COLOR,
        " stroke-dasharray=\"5,4\"",
    ));

    svg.push_str("</svg>");
    Some(svg)
}

/// One chart line; fewer than two points renders nothing.
fn polyline(points: &[(f64, f64)], color: &str, dash: &str) -> String {
    if points.len() < 2 {
        return String::new();
    }
    let joined: Vec<String> = points
        .iter()
        .map(|(px, py)| format!("{px:.1},{py:.1}"))
        .collect();
    format!(
        "<polyline fill=\"none\" stroke=\"{color}\" stroke-width=\"1.5\"{dash} points=\"{}\"/>\n",
        joined.join(" ")
    )
}

fn history_block(lang: Lang, rows: &[HistoryRow]) -> String {
    match svg_history(rows) {
        Some(svg) => format!(
            "<figure>\n{svg}\n<figcaption>{}</figcaption>\n</figure>",
            lang.text(Msg::HistoryCaption)
        ),
        None => format!("<p class=\"note\">{}</p>", lang.text(Msg::HistoryEmpty)),
    }
}

fn svg_open() -> String {
    format!(
        "<svg viewBox=\"0 0 {CHART_W} {CHART_H}\" width=\"{CHART_W}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    )
}

fn axes(max_y: f64, lang: Lang) -> String {
    let bottom = CHART_H - MARGIN_B;
    format!(
        "<line x1=\"{MARGIN_L}\" y1=\"{MARGIN_T}\" x2=\"{MARGIN_L}\" y2=\"{bottom}\" stroke=\"#8795a5\"/>\
         <line x1=\"{MARGIN_L}\" y1=\"{bottom}\" x2=\"{0}\" y2=\"{bottom}\" stroke=\"#8795a5\"/>\
         <text x=\"{1}\" y=\"{2}\" font-size=\"10\" text-anchor=\"end\">{max_y:.0}</text>\
         <text x=\"{1}\" y=\"{bottom}\" font-size=\"10\" text-anchor=\"end\">0</text>\
         <text x=\"{3}\" y=\"{4}\" font-size=\"11\" text-anchor=\"middle\">{5}</text>\n",
        CHART_W - MARGIN_R,
        MARGIN_L - 6.0,
        MARGIN_T + 4.0,
        MARGIN_L + (CHART_W - MARGIN_L - MARGIN_R) / 2.0,
        CHART_H - 8.0,
        lang.text(Msg::TimeAxis),
    )
}
