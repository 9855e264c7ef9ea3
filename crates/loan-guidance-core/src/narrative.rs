//! Narrative loan guidance rendered as HTML, and its plain-text rendering.

use crate::format::{format_currency, format_percentage};
use crate::risk::{DtiCategory, RiskLevel};
use crate::types::{Money, Percent};

/// Figures the narrative is written from.
#[derive(Debug, Clone)]
pub struct NarrativeContext<'a> {
    pub overall_risk: RiskLevel,
    pub dti_after_loan: Percent,
    pub dti_category: DtiCategory,
    pub recommendations: &'a [String],
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub term_years: u32,
    pub extra_payment: Money,
    pub interest_saved: Money,
    pub months_saved: u32,
}

pub fn render_html(ctx: &NarrativeContext<'_>) -> String {
    let mut html = String::new();

    html.push_str("<h3>Loan Assessment</h3>\n");
    html.push_str(&format!(
        "<p>Based on your financial profile, this loan represents a {} risk. \
         Your debt-to-income ratio is {}, which is considered {}.</p>\n",
        ctx.overall_risk,
        format_percentage(ctx.dti_after_loan),
        ctx.dti_category
    ));

    html.push_str("<h3>Recommendations</h3>\n<ul>\n");
    for rec in ctx.recommendations {
        html.push_str(&format!("<li>{}</li>\n", escape(rec)));
    }
    html.push_str("</ul>\n");

    html.push_str("<h3>Long-term Outlook</h3>\n");
    let outlook = if ctx.extra_payment.is_zero() {
        format!(
            "With a monthly payment of {}, you'll pay a total of {} in interest over the {} year term. \
             Adding an extra payment each month would reduce both the interest and the time to payoff.",
            format_currency(ctx.monthly_payment),
            format_currency(ctx.total_interest),
            ctx.term_years
        )
    } else {
        format!(
            "With a monthly payment of {}, the {} year term carries {} in interest. \
             Your extra payment of {} per month saves {} in interest and clears the loan {} months early.",
            format_currency(ctx.monthly_payment),
            ctx.term_years,
            format_currency(ctx.total_interest),
            format_currency(ctx.extra_payment),
            format_currency(ctx.interest_saved),
            ctx.months_saved
        )
    };
    html.push_str(&format!("<p>{outlook}</p>\n"));

    html
}

/// Flatten narrative HTML into readable text.
///
/// Headings become `** heading **`, paragraphs are followed by a blank line,
/// list items become `- item`, `<br>` becomes a newline and every other tag
/// is dropped. Entities are decoded after tags are removed, so escaped markup
/// survives as literal text.
pub fn sanitize_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            // Unterminated tag: keep the remainder verbatim
            text.push_str(&rest[open..]);
            rest = "";
            break;
        };
        text.push_str(tag_replacement(&after[..close]));
        rest = &after[close + 1..];
    }
    text.push_str(rest);

    let decoded = decode_entities(&text);
    collapse_blank_lines(&decoded)
}

fn tag_replacement(tag: &str) -> &'static str {
    let tag = tag.trim();
    let closing = tag.starts_with('/');
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    match (name.as_str(), closing) {
        ("h1" | "h2" | "h3" | "h4" | "h5" | "h6", false) => "** ",
        ("h1" | "h2" | "h3" | "h4" | "h5" | "h6", true) => " **\n",
        ("p", true) => "\n\n",
        ("li", false) => "- ",
        ("li", true) => "\n",
        ("br", _) => "\n",
        _ => "",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Trim each line and squeeze runs of blank lines down to one.
fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push(line);
    }
    out.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn context(recs: &[String]) -> NarrativeContext<'_> {
        NarrativeContext {
            overall_risk: RiskLevel::LowModerate,
            dti_after_loan: dec!(31.4),
            dti_category: DtiCategory::Good,
            recommendations: recs,
            monthly_payment: dec!(1798.65),
            total_interest: dec!(347515.44),
            term_years: 30,
            extra_payment: Decimal::ZERO,
            interest_saved: Decimal::ZERO,
            months_saved: 0,
        }
    }

    #[test]
    fn test_render_sections() {
        let recs = vec!["Keep it up.".to_string()];
        let html = render_html(&context(&recs));
        assert!(html.contains("represents a low moderate risk"));
        assert!(html.contains("31.40%, which is considered good"));
        assert!(html.contains("<li>Keep it up.</li>"));
        assert!(html.contains("$1,798.65"));
        assert!(html.contains("$347,515.44"));
    }

    #[test]
    fn test_render_with_extra_payment() {
        let recs = vec![];
        let mut ctx = context(&recs);
        ctx.extra_payment = dec!(500);
        ctx.interest_saved = dec!(160295.67);
        ctx.months_saved = 148;
        let html = render_html(&ctx);
        assert!(html.contains("extra payment of $500.00 per month saves $160,295.67"));
        assert!(html.contains("148 months early"));
    }

    #[test]
    fn test_sanitize_rendered_narrative() {
        let recs = vec!["Reduce debt.".to_string(), "Save more.".to_string()];
        let text = sanitize_html(&render_html(&context(&recs)));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "** Loan Assessment **");
        assert!(lines.contains(&"** Recommendations **"));
        assert!(lines.contains(&"- Reduce debt."));
        assert!(lines.contains(&"- Save more."));
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn test_sanitize_tags_and_entities() {
        assert_eq!(sanitize_html("<p>a &amp; b</p>"), "a & b");
        assert_eq!(sanitize_html("one<br/>two"), "one\ntwo");
        assert_eq!(sanitize_html("<b>bold</b> &lt;i&gt;"), "bold <i>");
        assert_eq!(sanitize_html(""), "");
    }

    #[test]
    fn test_escaped_markup_survives_as_text() {
        // Tags are stripped before entities are decoded. Decoding first would
        // turn `&lt;script&gt;` into a tag and silently drop it.
        assert_eq!(
            sanitize_html("<li>&lt;script&gt;alert(1)&lt;/script&gt;</li>"),
            "- <script>alert(1)</script>"
        );
        let recs = vec!["Keep DTI < 36% & build savings".to_string()];
        let text = sanitize_html(&render_html(&context(&recs)));
        assert!(text.contains("- Keep DTI < 36% & build savings"));
    }

    #[test]
    fn test_sanitize_unterminated_tag() {
        assert_eq!(sanitize_html("price < 5"), "price < 5");
    }
}
