//! Printable HTML report body.

use chrono::{DateTime, Utc};

use crate::records::Record;

const STYLE: &str = r#"
        body { font-family: Arial, Helvetica, sans-serif; margin: 2cm; color: #333; }
        .header { text-align: center; border-bottom: 3px solid #002F6C; padding-bottom: 1rem; margin-bottom: 2rem; }
        .classification { background-color: #5C8F5C; color: white; padding: 0.5rem; text-align: center; font-weight: bold; margin-bottom: 1rem; }
        h1 { color: #002F6C; font-size: 1.8rem; }
        h2 { color: #002F6C; font-size: 1.3rem; border-bottom: 2px solid #E5E5E5; padding-bottom: 0.3rem; margin-top: 2rem; }
        .metadata { display: grid; grid-template-columns: 150px 1fr; gap: 0.5rem; margin-bottom: 1rem; }
        .label { font-weight: bold; }
        .section { margin-bottom: 2rem; }
        .footer { margin-top: 3rem; padding-top: 1rem; border-top: 2px solid #E5E5E5; font-size: 0.9rem; text-align: center; }
"#;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn section(out: &mut String, title: &str, body: &str, preformatted: bool) {
    let tag = if preformatted { "pre" } else { "p" };
    out.push_str(&format!(
        "    <div class=\"section\">\n        <h2>{}</h2>\n        <{tag}>{}</{tag}>\n    </div>\n",
        title,
        escape_html(body),
    ));
}

fn metadata(out: &mut String, title: &str, rows: &[(&str, String)]) {
    out.push_str(&format!(
        "    <div class=\"section\">\n        <h2>{}</h2>\n        <div class=\"metadata\">\n",
        title
    ));
    for (label, value) in rows {
        out.push_str(&format!(
            "            <div class=\"label\">{}:</div>\n            <div>{}</div>\n",
            label,
            escape_html(value)
        ));
    }
    out.push_str("        </div>\n    </div>\n");
}

/// Render the full report document
pub fn render_html(record: &Record, generated_at: DateTime<Utc>) -> String {
    let classification = escape_html(record.classification.as_str());
    let operation_name = escape_html(&record.operation_name);

    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n");
    out.push_str(&format!(
        "    <title>After Action Report - {}</title>\n    <style>{}</style>\n</head>\n<body>\n",
        operation_name, STYLE
    ));
    out.push_str(&format!(
        "    <div class=\"classification\">{}</div>\n",
        classification
    ));
    out.push_str(&format!(
        "    <div class=\"header\">\n        <h1>AFTER ACTION REPORT</h1>\n        <h2>{}</h2>\n        <p><strong>AAR ID:</strong> {}</p>\n    </div>\n",
        operation_name,
        escape_html(&record.id)
    ));

    metadata(
        &mut out,
        "Identification",
        &[
            ("DTG", record.dtg.clone()),
            ("Unit", record.unit_designation.clone()),
            ("Mission Type", record.mission_type.clone()),
            ("Location", record.location.clone()),
            (
                "Duration",
                format!("{} to {}", record.duration_start, record.duration_end),
            ),
            ("Personnel", record.personnel_count.to_string()),
        ],
    );

    section(&mut out, "Executive Summary", &record.executive_summary, false);
    section(&mut out, "Key Events", &record.key_events, true);
    section(&mut out, "What Went Well", &record.what_went_well, false);
    section(&mut out, "Needs Improvement", &record.needs_improvement, false);
    section(&mut out, "Lessons Learned", &record.lessons_learned, false);
    section(&mut out, "Recommendations", &record.recommendations, false);
    if !record.commanders_assessment.is_empty() {
        section(
            &mut out,
            "Commander's Assessment",
            &record.commanders_assessment,
            false,
        );
    }

    metadata(
        &mut out,
        "Administrative",
        &[
            ("Prepared By", record.prepared_by.clone()),
            ("Reviewed By", record.reviewed_by.clone()),
            ("Status", record.status.to_string()),
        ],
    );

    out.push_str(&format!(
        "    <div class=\"footer\">\n        <div class=\"classification\">{}</div>\n        <p>Distribution: Authorized to U.S. Government Agencies Only</p>\n        <p>Generated: {}</p>\n    </div>\n</body>\n</html>\n",
        classification,
        generated_at.format("%d %b %Y %H:%M UTC")
    ));

    out
}
