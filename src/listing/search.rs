//! Translation between the search box text and filter pairs.
//!
//! Plain words search both the name and the description of a certificate.
//! Words written as `#(tag)` search tags. Text filters come first in the
//! result, followed by tag filters, each in input order.

use tracing::trace;

use super::query::{Filter, FilterField};

const TAG_OPEN: &str = "#(";
const TAG_CLOSE: char = ')';

/// Parses search box text into filter pairs.
///
/// ```
/// use certlist::listing::{parse_search, Filter, FilterField};
///
/// assert_eq!(
///     parse_search("shoes #(sale)"),
///     vec![
///         Filter::new(FilterField::Name, "shoes"),
///         Filter::new(FilterField::Description, "shoes"),
///         Filter::new(FilterField::Tag, "sale"),
///     ]
/// );
/// ```
#[must_use]
pub fn parse_search(text: &str) -> Vec<Filter> {
    let mut text_filters = Vec::new();
    let mut tag_filters = Vec::new();

    for token in text.split_whitespace() {
        match tag_term(token) {
            Some(tag) if tag.is_empty() => {}
            Some(tag) => tag_filters.push(Filter::new(FilterField::Tag, tag)),
            None => {
                text_filters.push(Filter::new(FilterField::Name, token));
                text_filters.push(Filter::new(FilterField::Description, token));
            }
        }
    }

    text_filters.extend(tag_filters);
    text_filters
}

/// Renders filter pairs back into search box text.
///
/// A description term that repeats the name term before it is written
/// once, so `parse_search` and `render_search_text` agree on text the user
/// typed.
#[must_use]
pub fn render_search_text(filters: &[Filter]) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut previous_name: Option<&str> = None;

    for filter in filters {
        match filter.field {
            FilterField::Name => {
                words.push(filter.term.clone());
                previous_name = Some(filter.term.as_str());
            }
            FilterField::Description => {
                if previous_name != Some(filter.term.as_str()) {
                    words.push(filter.term.clone());
                }
                previous_name = None;
            }
            FilterField::Tag if is_tag_word(&filter.term) => {
                words.push(format!("{TAG_OPEN}{}{TAG_CLOSE}", filter.term));
                previous_name = None;
            }
            FilterField::Tag => {
                trace!(term = %filter.term, "tag cannot be typed as #(tag); leaving it out");
                previous_name = None;
            }
        }
    }

    words.join(" ")
}

/// Returns the tag inside a `#(word)` token, or `None` for plain words.
fn tag_term(token: &str) -> Option<&str> {
    let inner = token.strip_prefix(TAG_OPEN)?.strip_suffix(TAG_CLOSE)?;
    (inner.is_empty() || is_tag_word(inner)).then_some(inner)
}

/// Tags typed in the search box are ASCII letters, digits and `_`.
fn is_tag_word(term: &str) -> bool {
    !term.is_empty() && term.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn words_and_tags_are_grouped() {
        assert_eq!(
            parse_search("#(sale) red #(gift) shoes"),
            vec![
                Filter::new(FilterField::Name, "red"),
                Filter::new(FilterField::Description, "red"),
                Filter::new(FilterField::Name, "shoes"),
                Filter::new(FilterField::Description, "shoes"),
                Filter::new(FilterField::Tag, "sale"),
                Filter::new(FilterField::Tag, "gift"),
            ]
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("#()")]
    fn blank_input_yields_no_filters(#[case] text: &str) {
        assert!(parse_search(text).is_empty());
    }

    #[rstest]
    #[case("#(two-words)")]
    #[case("#sale")]
    #[case("#(sale")]
    #[case("#(café)")]
    fn malformed_tag_tokens_are_plain_words(#[case] token: &str) {
        assert_eq!(
            parse_search(token),
            vec![
                Filter::new(FilterField::Name, token),
                Filter::new(FilterField::Description, token),
            ]
        );
    }

    #[rstest]
    #[case("shoes #(sale)")]
    #[case("red shoes")]
    #[case("#(gift) #(sale)")]
    fn rendering_restores_typed_text(#[case] text: &str) {
        assert_eq!(render_search_text(&parse_search(text)), text);
    }

    #[test]
    fn tags_that_cannot_be_typed_are_left_out() {
        let filters = [
            Filter::new(FilterField::Tag, "gift card"),
            Filter::new(FilterField::Tag, "sale"),
        ];
        let rendered = render_search_text(&filters);

        assert_eq!(rendered, "#(sale)");
        assert_eq!(parse_search(&rendered), vec![Filter::new(FilterField::Tag, "sale")]);
    }

    #[test]
    fn lone_description_filter_is_rendered() {
        let filters = [Filter::new(FilterField::Description, "warm")];
        assert_eq!(render_search_text(&filters), "warm");
    }
}
