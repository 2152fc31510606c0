// src/render.rs
//! Server-side HTML for the dashboard: one card per item, three lanes, filter
//! form and metric cards. All loader-provided text goes through `html_escape`.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::filter::{FilterCriteria, Selector, DAY_WINDOWS};
use crate::model::{NewsItem, SopStage, StrategicFocus};
use crate::summary::{DashboardView, SourceOption};
use crate::timefmt::format_card_date;

/// Keyword chips shown per card.
pub const MAX_KEYWORD_CHIPS: usize = 4;

pub const EMPTY_LANE_TEXT: &str = "No records match the current filters.";

const TITLE: &str = "Biosimilar News Monitor";
const SUBTITLE: &str = "Aggregated statements and press releases from leading biosimilar sponsors, \
filtered for meaningful updates and mapped to SOP follow-up lanes.";

/// CSS class for the focus badge; anything without a dedicated style is neutral.
pub fn focus_badge_class(focus: StrategicFocus) -> &'static str {
    match focus {
        StrategicFocus::Regulatory => "badge regulatory",
        StrategicFocus::Commercial => "badge commercial",
        StrategicFocus::Clinical => "badge clinical",
        StrategicFocus::Manufacturing => "badge manufacturing",
        StrategicFocus::Partnerships => "badge partnerships",
        _ => "badge neutral",
    }
}

pub fn news_card(item: &NewsItem) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("<article class=\"news-card\">\n");

    let _ = write!(
        out,
        "  <div class=\"news-card__meta\">\n    \
         <span class=\"badge stage stage-{}\">{}</span>\n    \
         <span class=\"{}\">{}</span>\n    \
         <span class=\"news-card__date\">{}</span>\n  </div>\n",
        item.sop_stage.slug(),
        item.sop_stage,
        focus_badge_class(item.focus),
        item.focus,
        text(&format_card_date(&item.published_at)),
    );

    let _ = write!(
        out,
        "  <h3 class=\"news-card__title\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></h3>\n",
        attr(&item.url),
        text(&item.title),
    );
    let _ = writeln!(out, "  <p class=\"news-card__summary\">{}</p>", text(&item.summary));

    out.push_str("  <div class=\"news-card__footer\">\n    <div class=\"news-card__keywords\">");
    for kw in item.keywords.iter().take(MAX_KEYWORD_CHIPS) {
        let _ = write!(out, "<span class=\"keyword-chip\">{}</span>", text(kw));
    }
    out.push_str("</div>\n");

    let _ = write!(
        out,
        "    <div class=\"news-card__source\"><span>{}</span><span class=\"confidence\">Confidence: {}</span></div>\n    \
         <p class=\"news-card__action\">{}</p>\n  </div>\n",
        text(&item.source_name),
        item.confidence,
        text(&item.follow_up_action),
    );

    out.push_str("</article>\n");
    out
}

fn selected(on: bool) -> &'static str {
    if on {
        " selected"
    } else {
        ""
    }
}

fn filter_form(criteria: &FilterCriteria, sources: &[SourceOption]) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str("<section class=\"filters\">\n<form method=\"get\" action=\"/\">\n");

    let _ = write!(
        out,
        "  <div class=\"filters__search\">\n    <label for=\"search\">Search intel</label>\n    \
         <input id=\"search\" name=\"q\" placeholder=\"Search by drug, company, or keyword\" value=\"{}\">\n  </div>\n",
        attr(&criteria.search),
    );

    out.push_str("  <div class=\"filters__row\">\n");

    out.push_str("    <div><label for=\"stage\">SOP lane</label><select id=\"stage\" name=\"stage\" onchange=\"this.form.submit()\">");
    let _ = write!(
        out,
        "<option value=\"All\"{}>All</option>",
        selected(criteria.stage == Selector::All)
    );
    for stage in SopStage::ALL {
        let _ = write!(
            out,
            "<option value=\"{stage}\"{}>{stage}</option>",
            selected(criteria.stage == Selector::Only(stage))
        );
    }
    out.push_str("</select></div>\n");

    out.push_str("    <div><label for=\"focus\">Focus</label><select id=\"focus\" name=\"focus\" onchange=\"this.form.submit()\">");
    let _ = write!(
        out,
        "<option value=\"All\"{}>All</option>",
        selected(criteria.focus == Selector::All)
    );
    for focus in StrategicFocus::ALL {
        let _ = write!(
            out,
            "<option value=\"{focus}\"{}>{focus}</option>",
            selected(criteria.focus == Selector::Only(focus))
        );
    }
    out.push_str("</select></div>\n");

    out.push_str("    <div><label for=\"days\">Recency</label><select id=\"days\" name=\"days\" onchange=\"this.form.submit()\">");
    for days in DAY_WINDOWS {
        let _ = write!(
            out,
            "<option value=\"{days}\"{}>Last {days} days</option>",
            selected(criteria.window_days == days)
        );
    }
    out.push_str("</select></div>\n");

    let current = criteria.primary_source();
    out.push_str("    <div><label for=\"source\">Source</label><select id=\"source\" name=\"source\" onchange=\"this.form.submit()\">");
    let _ = write!(
        out,
        "<option value=\"all\"{}>All sources</option>",
        selected(current.is_none())
    );
    for opt in sources {
        let _ = write!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            attr(&opt.id),
            selected(current == Some(opt.id.as_str())),
            text(&opt.label)
        );
    }
    out.push_str("</select></div>\n");

    out.push_str("    <div><button type=\"submit\">Apply</button></div>\n  </div>\n</form>\n</section>\n");
    out
}

fn metric_card(out: &mut String, label: &str, value: &str, mono: bool) {
    let class = if mono {
        "metric-card__value mono"
    } else {
        "metric-card__value"
    };
    let _ = write!(
        out,
        "  <div class=\"metric-card\"><span class=\"metric-card__label\">{label}</span><strong class=\"{class}\">{}</strong></div>\n",
        text(value)
    );
}

fn lane(out: &mut String, stage: SopStage, items: &[&NewsItem]) {
    let _ = write!(
        out,
        "  <div class=\"lane lane-{}\">\n    <header class=\"lane__header\"><h2>{stage}</h2><span>{} items</span></header>\n    <div class=\"lane__content\">\n",
        stage.slug(),
        items.len()
    );
    if items.is_empty() {
        let _ = writeln!(out, "      <p class=\"lane__empty\">{EMPTY_LANE_TEXT}</p>");
    } else {
        for item in items {
            out.push_str(&news_card(item));
        }
    }
    out.push_str("    </div>\n  </div>\n");
}

fn page(body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{TITLE}</title>\n<link rel=\"stylesheet\" href=\"/static/dashboard.css\">\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Full dashboard page for one computed view.
pub fn dashboard_page(view: &DashboardView<'_>) -> String {
    let mut body = String::with_capacity(16 * 1024);
    body.push_str("<main class=\"dashboard\">\n");

    let _ = write!(
        body,
        "<header class=\"dashboard__header\">\n  <div><h1>{TITLE}</h1><p class=\"dashboard__subtitle\">{SUBTITLE}</p></div>\n  \
         <div class=\"dashboard__meta\"><span class=\"meta-chip\">Sources: {}</span><span class=\"meta-chip\">Coverage window: {} days</span></div>\n</header>\n",
        view.sources.len(),
        view.criteria.window_days,
    );

    body.push_str(&filter_form(&view.criteria, &view.sources));

    body.push_str("<section class=\"metrics\">\n");
    metric_card(&mut body, "Qualified updates", &view.metrics.total.to_string(), false);
    for stage in SopStage::ALL {
        metric_card(
            &mut body,
            stage.as_str(),
            &view.metrics.per_stage.get(stage).to_string(),
            true,
        );
    }
    metric_card(&mut body, "Latest update", &view.metrics.newest, false);
    body.push_str("</section>\n");

    body.push_str("<section class=\"lanes\">\n");
    for stage in SopStage::ALL {
        lane(&mut body, stage, view.lanes.lane(stage));
    }
    body.push_str("</section>\n</main>\n");

    page(&body)
}

/// Page shown while the collection could not be loaded.
pub fn unavailable_page(reason: &str) -> String {
    let body = format!(
        "<main class=\"dashboard\">\n<header class=\"dashboard__header\"><div><h1>{TITLE}</h1></div></header>\n\
         <section class=\"unavailable\"><h2>News data is currently unavailable</h2><p>{}</p></section>\n</main>\n",
        text(reason)
    );
    page(&body)
}
