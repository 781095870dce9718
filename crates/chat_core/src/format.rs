//! Bot text formatting: line breaks, bold spans and numbered-list bullets.
use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Markup inserted for every line break in bot text.
pub const LINE_BREAK: &str = "<br>";
/// Markup that replaces a numeric list prefix at the start of a line.
pub const BULLET: &str = "<br>• ";

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r\n|\n|\r").expect("line break pattern"))
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern"))
}

fn list_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A line starts at the beginning of the text or right after a break.
    RE.get_or_init(|| Regex::new(r"(^|<br>)\d+\.\s").expect("list prefix pattern"))
}

/// Escapes the five HTML-special characters.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Turns raw bot text into an HTML fragment.
///
/// Stages run in a fixed order, each on the output of the previous one:
/// 1. every line break becomes [`LINE_BREAK`];
/// 2. every `**X**` span (non-greedy) becomes `<strong>X</strong>`;
/// 3. every `<digits>. ` prefix at a line start becomes [`BULLET`].
///
/// When `escape` is set the raw text is HTML-escaped first, so only the
/// markup produced here is interpreted.
pub fn format_bot_text(text: &str, escape: bool) -> String {
    let source = if escape {
        escape_html(text)
    } else {
        Cow::Borrowed(text)
    };
    let with_breaks = line_break_re().replace_all(&source, LINE_BREAK);
    let with_bold = bold_re().replace_all(&with_breaks, "<strong>$1</strong>");
    list_prefix_re()
        .replace_all(&with_bold, format!("${{1}}{BULLET}").as_str())
        .into_owned()
}

/// User text is never formatted, only optionally escaped.
pub fn format_user_text(text: &str, escape: bool) -> String {
    if escape {
        escape_html(text).into_owned()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_html, format_bot_text, format_user_text};

    #[test]
    fn newlines_become_breaks() {
        let html = format_bot_text("one\ntwo\r\nthree\rfour", true);
        assert_eq!(html, "one<br>two<br>three<br>four");
        assert!(!html.contains('\n'));
        assert!(!html.contains('\r'));
    }

    #[test]
    fn bold_spans_are_wrapped_non_greedy() {
        assert_eq!(
            format_bot_text("**a** and **b**", true),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn unmatched_asterisks_are_left_alone() {
        assert_eq!(format_bot_text("2 * 3 = 6", true), "2 * 3 = 6");
        assert_eq!(format_bot_text("**open only", true), "**open only");
        assert_eq!(
            format_bot_text("***x**", true),
            "<strong>*x</strong>"
        );
    }

    #[test]
    fn numbered_line_becomes_bullet() {
        assert_eq!(format_bot_text("3. Buy milk", true), "<br>• Buy milk");
    }

    #[test]
    fn number_in_middle_of_line_is_kept() {
        assert_eq!(format_bot_text("foo 3. bar", true), "foo 3. bar");
    }

    #[test]
    fn numbered_items_after_breaks_are_bulleted() {
        assert_eq!(
            format_bot_text("Steps:\n1. wash\n12. dry", true),
            "Steps:<br><br>• wash<br><br>• dry"
        );
    }

    #[test]
    fn reply_with_bold_and_list() {
        assert_eq!(
            format_bot_text("Hi **there**!\n2. second item", true),
            "Hi <strong>there</strong>!<br><br>• second item"
        );
    }

    #[test]
    fn escaping_neutralises_raw_markup() {
        assert_eq!(
            format_bot_text("<b>x</b>\n1. y", true),
            "&lt;b&gt;x&lt;/b&gt;<br><br>• y"
        );
        // A literal break tag in the text is not a line start once escaped.
        assert_eq!(format_bot_text("<br>1. y", true), "&lt;br&gt;1. y");
    }

    #[test]
    fn trusted_mode_passes_markup_through() {
        assert_eq!(format_bot_text("<i>x</i>", false), "<i>x</i>");
        assert_eq!(format_user_text("<i>x</i>", false), "<i>x</i>");
    }

    #[test]
    fn user_text_is_not_formatted() {
        assert_eq!(format_user_text("**a**\n1. b", true), "**a**\n1. b");
        assert_eq!(format_user_text("a & b", true), "a &amp; b");
    }

    #[test]
    fn escape_covers_quotes() {
        assert_eq!(escape_html(r#"'x' "y""#), "&#39;x&#39; &quot;y&quot;");
    }
}
