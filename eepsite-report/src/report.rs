use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use num_format::{Locale, ToFormattedString};

use crate::analytics::Statistics;

const STYLE: &str = "\
        body {
            background-color: #1e1e1e;
            color: #c7c7c7;
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
        }
        h1 {
            color: #f0f0f0;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #3a3a3a;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #333;
            color: #fff;
        }
        tr:nth-child(even) {
            background-color: #2a2a2a;
        }";

/// Render the statistics summary as one self-contained HTML document. Pure
/// formatting; every value shown comes from the summary.
pub fn render(stats: &Statistics) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>Log Analysis Report</title>\n\
         <style>\n{STYLE}\n</style>\n\
         </head>\n\
         <body>\n\
         <h1>Log Analysis Report</h1>\n"
    );

    let _ = write!(
        html,
        "<h2>Total .html Requests (Total Page Loads)</h2>\n<p>{}</p>\n",
        stats.total_html_requests.to_formatted_string(&Locale::en)
    );

    let _ = write!(
        html,
        "<h2>Average Page Loads Per Month (Last 56 Months)</h2>\n<p>{:.2}</p>\n",
        stats.average_monthly_loads
    );

    html.push_str("<h2>Monthly Page Loads (Last 56 Months)</h2>\n");
    push_table(
        &mut html,
        ("Month", "Request Count"),
        stats
            .monthly_requests
            .iter()
            .map(|(month, count)| (month.to_string(), *count)),
    );

    html.push_str("<h2>Most Popular Time of Day</h2>\n");
    match stats.most_popular_hour {
        Some(hour) => {
            let _ = write!(html, "<p>{hour}:00</p>\n");
        }
        None => html.push_str("<p>n/a</p>\n"),
    }

    html.push_str("<h2>Top 50 Visiting Routers</h2>\n");
    push_table(
        &mut html,
        ("Router", "Request Count"),
        stats
            .top_routers
            .iter()
            .map(|(router, count)| (router.to_string(), *count)),
    );

    html.push_str("<h2>Top 50 Most Requested Pages</h2>\n");
    push_table(
        &mut html,
        ("Page", "Request Count"),
        stats
            .top_pages
            .iter()
            .map(|(page, count)| (page.to_string(), *count)),
    );

    let _ = write!(
        html,
        "<p style=\"text-align: right; font-size: small;\">Last Updated: {}</p>\n\
         </body>\n\
         </html>\n",
        escape_html(&stats.generated_at)
    );
    html
}

/// Write the rendered report to `path`, replacing any existing file.
pub fn write_report(stats: &Statistics, path: &Path) -> Result<()> {
    fs::write(path, render(stats)).with_context(|| format!("writing {}", path.display()))
}

fn push_table(
    html: &mut String,
    (key_header, count_header): (&str, &str),
    rows: impl Iterator<Item = (String, u64)>,
) {
    let _ = write!(
        html,
        "<table>\n<thead>\n<tr><th>{key_header}</th><th>{count_header}</th></tr>\n</thead>\n<tbody>\n"
    );
    for (key, count) in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&key),
            count.to_formatted_string(&Locale::en)
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

// Log text ends up inside markup; routers and request lines are
// visitor-controlled.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
