//! 标记清理 - 把推送文本中嵌入的 HTML 转为纯展示文本
//!
//! 发送方可能在标题、正文、摘要里带 `<b>`、`<i>`、`<br>` 之类的标签以及
//! HTML 实体。通知里不能出现原始标签：
//! - 换行类标签（`<br>`、`</p>`、`</div>`、`</li>`）转为换行
//! - 其余标签直接去掉，保留标签内文本
//! - 注释、声明、`<script>`/`<style>` 内容丢弃
//!
//! 解析交给 html5ever（经 `scraper`），属性里带 `>`、大写实体等情况都按浏览器规则处理。

use scraper::{ElementRef, Html, Node};

/// 清理 HTML 标记，返回纯文本
pub fn from_html(raw: &str) -> String {
    if !raw.contains('<') && !raw.contains('&') {
        return raw.trim().to_string();
    }

    let fragment = Html::parse_fragment(raw);
    let mut text = String::with_capacity(raw.len());
    collect_text(fragment.root_element(), &mut text);

    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                // &nbsp; 按普通空格显示
                out.extend(text.chars().map(|c| if c == '\u{a0}' { ' ' } else { c }));
            }
            Node::Element(el) => match el.name() {
                "br" => out.push('\n'),
                "script" | "style" => {}
                name => {
                    if let Some(child) = ElementRef::wrap(child) {
                        collect_text(child, out);
                    }
                    if matches!(name, "p" | "div" | "li") {
                        out.push('\n');
                    }
                }
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(from_html("How are you"), "How are you");
        assert_eq!(from_html("  padded  "), "padded");
    }

    #[test]
    fn test_formatting_tags_removed() {
        assert_eq!(from_html("<b>bold</b> and <i>italic</i>"), "bold and italic");
        assert_eq!(
            from_html(r#"see <a href="https://x.io">this</a>"#),
            "see this"
        );
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        assert_eq!(from_html(r#"see <a title="a>b" href="x">link</a>"#), "see link");
        assert_eq!(from_html(r#"<span data-x='1 > 0'>ok</span>"#), "ok");
    }

    #[test]
    fn test_declarations_removed() {
        assert_eq!(from_html("<!DOCTYPE html><b>x</b>"), "x");
        assert_eq!(from_html(r#"<?xml version="1.0"?><i>y</i>"#), "y");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(from_html("one<br>two<BR/>three<br />four"), "one\ntwo\nthree\nfour");
        assert_eq!(from_html("<p>first</p><p>second</p>"), "first\nsecond");
        assert_eq!(from_html("<ul><li>a</li><li>b</li></ul>"), "a\nb");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(from_html("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(from_html("Tom &AMP; Jerry"), "Tom & Jerry");
        assert_eq!(from_html("it&#39;s"), "it's");
        assert_eq!(from_html("&#x1F600;"), "😀");
        assert_eq!(from_html("a&nbsp;b"), "a b");
        assert_eq!(from_html("&eacute;t&eacute;"), "été");
    }

    #[test]
    fn test_escaped_tags_stay_as_text() {
        assert_eq!(from_html("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(from_html("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn test_comparison_text_kept() {
        assert_eq!(from_html("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }

    #[test]
    fn test_no_raw_tags_left() {
        let cleaned = from_html(
            "<div><span style=\"color:red\">alert</span><!-- hidden --><script>x()</script></div>",
        );
        assert_eq!(cleaned, "alert");
        assert!(!cleaned.contains('<'));
    }
}
