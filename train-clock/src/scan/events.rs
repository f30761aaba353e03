//! Flatten an HTML document into open-tag and text events.
//!
//! Events come straight from the tokenizer, in source order. No tree is
//! built, so nothing is reparented and no implied elements are added: a
//! stray cell written directly inside `<table>` is reported where it appears.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, StartTag, Tag, Token, TokenSink, TokenSinkResult, Tokenizer,
};

/// One step through a document, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// An element was opened. Close tags are not reported.
    OpenTag(String),
    /// A run of character data.
    Text(String),
}

/// Collects events, merging adjacent character tokens into one run.
#[derive(Default)]
struct EventSink {
    events: RefCell<Vec<PageEvent>>,
    text: RefCell<String>,
}

impl EventSink {
    fn flush_text(&self) {
        let mut text = self.text.borrow_mut();
        if !text.is_empty() {
            self.events
                .borrow_mut()
                .push(PageEvent::Text(std::mem::take(&mut *text)));
        }
    }

    fn start_tag(&self, tag: &Tag) -> TokenSinkResult<()> {
        self.flush_text();
        let name = tag.name.to_string();

        // Element content the tokenizer must not read as markup.
        let raw = match name.as_str() {
            "script" => Some(RawKind::ScriptData),
            "style" => Some(RawKind::Rawtext),
            "title" | "textarea" => Some(RawKind::Rcdata),
            _ => None,
        };

        self.events.borrow_mut().push(PageEvent::OpenTag(name));
        match raw {
            Some(kind) if !tag.self_closing => TokenSinkResult::RawData(kind),
            _ => TokenSinkResult::Continue,
        }
    }

    fn into_events(self) -> Vec<PageEvent> {
        self.flush_text();
        self.events.into_inner()
    }
}

impl TokenSink for EventSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(chars) => self.text.borrow_mut().push_str(&chars),
            Token::NullCharacterToken => self.text.borrow_mut().push('\0'),
            Token::TagToken(tag) if tag.kind == StartTag => return self.start_tag(&tag),
            Token::ParseError(_) => {}
            // End tags, comments and doctypes only split text runs.
            _ => self.flush_text(),
        }
        TokenSinkResult::Continue
    }
}

/// Tokenize `html` and list its start tags and text runs in source order.
///
/// Tag names are lowercase and entities are decoded. Comments, doctypes
/// and end tags are dropped, but they still separate text runs.
pub fn page_events(html: &str) -> Vec<PageEvent> {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(EventSink::default(), Default::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.into_events()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(name: &str) -> PageEvent {
        PageEvent::OpenTag(name.to_string())
    }

    fn text(s: &str) -> PageEvent {
        PageEvent::Text(s.to_string())
    }

    fn texts(events: &[PageEvent]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|e| match e {
                PageEvent::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn elements_then_text_in_order() {
        let events = page_events("<html><body><b><font>Shibuya</font></b></body></html>");
        assert_eq!(
            events,
            vec![
                open("html"),
                open("body"),
                open("b"),
                open("font"),
                text("Shibuya"),
            ]
        );
    }

    #[test]
    fn void_elements_are_reported() {
        let events = page_events("<p>a<img src=x>b</p>");
        assert_eq!(events, vec![open("p"), text("a"), open("img"), text("b")]);
    }

    #[test]
    fn tag_names_are_lowercased() {
        let events = page_events("<TD><FONT>7:14am</FONT></TD>");
        assert_eq!(events, vec![open("td"), open("font"), text("7:14am")]);
    }

    #[test]
    fn entities_are_decoded_into_one_run() {
        let events = page_events("<p>A&amp;B</p>");
        assert_eq!(events, vec![open("p"), text("A&B")]);
    }

    #[test]
    fn comments_are_dropped() {
        let events = page_events("<p><!-- hidden -->shown</p>");
        assert_eq!(events, vec![open("p"), text("shown")]);
    }

    #[test]
    fn end_tags_split_text() {
        let events = page_events("<p>a</p>b");
        assert_eq!(texts(&events), vec!["a", "b"]);
    }

    #[test]
    fn no_implied_elements() {
        let events = page_events("<table><tr><td>x</td></tr></table>");
        assert_eq!(events, vec![open("table"), open("tr"), open("td"), text("x")]);
    }

    #[test]
    fn misnested_formatting_is_not_reopened() {
        let events = page_events("<p><b>x</p>y");
        assert_eq!(events, vec![open("p"), open("b"), text("x"), text("y")]);
    }

    #[test]
    fn text_inside_table_keeps_its_place() {
        let events = page_events(
            "<table><tr><td>A</td></tr><b><font>B</font></b><tr><td>C</td></tr></table>",
        );
        assert_eq!(texts(&events), vec!["A", "B", "C"]);
    }

    #[test]
    fn script_body_is_text() {
        let events = page_events("<script>if (a<b) { x = '<font>'; }</script><font>7:14am</font>");
        assert_eq!(
            events,
            vec![
                open("script"),
                text("if (a<b) { x = '<font>'; }"),
                open("font"),
                text("7:14am"),
            ]
        );
    }
}
