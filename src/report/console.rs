//! Console reporter: summary table, score and suitability lines.

use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;

use super::{fmt_opt, ReportContext};
use crate::i18n::{verdict_msg, Msg};
use crate::score::{Verdict, BASE};

/// Print the end-of-run summary to stdout.
pub fn print_summary(ctx: &ReportContext) {
    let lang = ctx.lang;

    println!();
    println!("{}", style(lang.text(Msg::Summary)).bold().underlined());
    println!("{}", summary_table(ctx));

    let score_line = format!(
        "{}: {:.1} / {:.0}",
        lang.text(Msg::OverallScore),
        ctx.result.score,
        ctx.result.scale_max
    );
    println!("{}", style(score_line).bold());

    let verdict_text = lang.text(verdict_msg(ctx.result.verdict));
    let styled_verdict = match verdict_color(ctx.result.verdict) {
        Tone::Good => style(verdict_text).green(),
        Tone::Warn => style(verdict_text).yellow(),
        Tone::Bad => style(verdict_text).red(),
    };
    println!("{}: {}", lang.text(Msg::VerdictLabel), styled_verdict);

    if let Some(suit) = &ctx.suitability {
        println!();
        println!("{}", style(lang.text(Msg::Suitability)).bold());
        for (label, ok) in [
            (Msg::Streaming, suit.streaming),
            (Msg::VideoCall, suit.video_call),
            (Msg::Gaming, suit.gaming),
        ] {
            let flag = if ok {
                style(lang.text(Msg::Suitable)).green()
            } else {
                style(lang.text(Msg::NotRecommended)).yellow()
            };
            println!("  {}: {}", lang.text(label), flag);
        }
    }
    println!();
}

/// Build the per-host summary table. Cells breaching the alert thresholds
/// turn red, the way the original report highlighted them.
pub fn summary_table(ctx: &ReportContext) -> Table {
    let lang = ctx.lang;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        lang.text(Msg::Host),
        lang.text(Msg::Sent),
        lang.text(Msg::Loss),
        lang.text(Msg::Mean),
        lang.text(Msg::P95),
        lang.text(Msg::Min),
        lang.text(Msg::Max),
        lang.text(Msg::Jitter),
    ]);

    for report in ctx.hosts {
        let m = &report.summary;
        let loss_cell = if m.loss_pct > BASE.loss_ok {
            Cell::new(format!("{:.2}", m.loss_pct)).fg(Color::Red)
        } else {
            Cell::new(format!("{:.2}", m.loss_pct))
        };
        let mean_cell = match m.mean {
            Some(mean) if mean > ctx.ping_alert => Cell::new(format!("{mean:.2}")).fg(Color::Red),
            other => Cell::new(fmt_opt(other)),
        };
        let jitter_cell = match m.jitter {
            Some(j) if j > BASE.jitter_ok => Cell::new(format!("{j:.2}")).fg(Color::Red),
            other => Cell::new(fmt_opt(other)),
        };

        table.add_row(vec![
            Cell::new(&report.host.name),
            Cell::new(m.sent),
            loss_cell,
            mean_cell,
            Cell::new(fmt_opt(m.p95)),
            Cell::new(fmt_opt(m.min)),
            Cell::new(fmt_opt(m.max)),
            jitter_cell,
        ]);
    }

    table
}

enum Tone {
    Good,
    Warn,
    Bad,
}

fn verdict_color(verdict: Verdict) -> Tone {
    match verdict {
        Verdict::Stable | Verdict::Excellent => Tone::Good,
        Verdict::MinorOscillation | Verdict::Good | Verdict::Fair => Tone::Warn,
        Verdict::Unstable | Verdict::Poor | Verdict::VeryPoor => Tone::Bad,
    }
}
