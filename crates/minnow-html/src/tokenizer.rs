//! HTML tokenizer.
//!
//! A compact state machine loosely shaped after
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization),
//! collapsed to the states this engine actually needs. Comments and
//! doctypes are consumed and dropped; `<script>`/`<style>` bodies are
//! skipped as raw text; newlines and tabs in character data become
//! spaces so the layout engine's space-splitting sees them.

use minnow_common::warn_once;
use minnow_dom::AttributesMap;
use strum_macros::Display;

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An opening tag, e.g. `<p class="intro">`.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Attribute list; values are unescaped strings.
        attrs: AttributesMap,
        /// Whether the tag ended with `/>`.
        self_closing: bool,
    },
    /// A closing tag, e.g. `</p>`.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },
    /// A run of character data with entities decoded.
    Text(String),
}

/// Tokenizer states; each corresponds loosely to a § 13.2.5 state.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
enum State {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    BeforeAttributeValue,
    AttributeValueQuoted,
    AttributeValueUnquoted,
    SelfClosingStartTag,
    Comment,
    CommentEndDash,
    CommentEnd,
    BogusComment,
    RawText,
}

/// Elements whose content is skipped rather than tokenized.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// The HTML tokenizer.
pub struct Tokenizer {
    input: Vec<char>,
    pos: usize,
    state: State,
    tokens: Vec<Token>,
    text_buffer: String,
    tag_name: String,
    attr_name: String,
    attr_value: String,
    attrs: AttributesMap,
    is_end_tag: bool,
    self_closing: bool,
    quote: char,
    raw_text_tag: String,
}

impl Tokenizer {
    /// Create a tokenizer over `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Tokenizer {
            input: input.chars().collect(),
            pos: 0,
            state: State::Data,
            tokens: Vec::new(),
            text_buffer: String::new(),
            tag_name: String::new(),
            attr_name: String::new(),
            attr_value: String::new(),
            attrs: AttributesMap::new(),
            is_end_tag: false,
            self_closing: false,
            quote: '"',
            raw_text_tag: String::new(),
        }
    }

    /// Run the tokenizer to end of input and return the token stream.
    #[must_use]
    pub fn run(mut self) -> Vec<Token> {
        while self.pos < self.input.len() {
            let ch = self.input[self.pos];
            self.pos += 1;
            self.step(ch);
        }

        if self.state != State::Data {
            warn_once("html", &format!("input ended inside {} state", self.state));
        }
        self.flush_text();
        self.tokens
    }

    #[allow(clippy::too_many_lines)]
    fn step(&mut self, ch: char) {
        match self.state {
            State::Data => match ch {
                '<' => {
                    self.flush_text();
                    self.state = State::TagOpen;
                }
                '\n' | '\t' | '\r' => self.text_buffer.push(' '),
                _ => self.text_buffer.push(ch),
            },

            State::TagOpen => match ch {
                '/' => self.state = State::EndTagOpen,
                '!' => {
                    // <!-- comment --> or <!doctype ...>; both are dropped.
                    if self.peek_matches("--") {
                        self.pos += 2;
                        self.state = State::Comment;
                    } else {
                        self.state = State::BogusComment;
                    }
                }
                c if c.is_ascii_alphabetic() => {
                    self.begin_tag(false, c);
                    self.state = State::TagName;
                }
                _ => {
                    warn_once("html", "'<' not followed by a tag name, treated as text");
                    self.text_buffer.push('<');
                    self.pos -= 1;
                    self.state = State::Data;
                }
            },

            State::EndTagOpen => match ch {
                c if c.is_ascii_alphabetic() => {
                    self.begin_tag(true, c);
                    self.state = State::TagName;
                }
                '>' => {
                    warn_once("html", "empty end tag '</>' ignored");
                    self.state = State::Data;
                }
                _ => self.state = State::BogusComment,
            },

            State::TagName => match ch {
                c if c.is_ascii_whitespace() => self.state = State::BeforeAttributeName,
                '/' => self.state = State::SelfClosingStartTag,
                '>' => self.emit_tag(),
                c => self.tag_name.push(c.to_ascii_lowercase()),
            },

            State::BeforeAttributeName => match ch {
                c if c.is_ascii_whitespace() => {}
                '/' => self.state = State::SelfClosingStartTag,
                '>' => self.emit_tag(),
                c => {
                    self.attr_name = c.to_ascii_lowercase().to_string();
                    self.attr_value.clear();
                    self.state = State::AttributeName;
                }
            },

            State::AttributeName => match ch {
                '=' => self.state = State::BeforeAttributeValue,
                c if c.is_ascii_whitespace() => {
                    self.commit_attr();
                    self.state = State::BeforeAttributeName;
                }
                '/' => {
                    self.commit_attr();
                    self.state = State::SelfClosingStartTag;
                }
                '>' => {
                    self.commit_attr();
                    self.emit_tag();
                }
                c => self.attr_name.push(c.to_ascii_lowercase()),
            },

            State::BeforeAttributeValue => match ch {
                c if c.is_ascii_whitespace() => {}
                '"' | '\'' => {
                    self.quote = ch;
                    self.state = State::AttributeValueQuoted;
                }
                '>' => {
                    warn_once("html", "attribute with '=' but no value");
                    self.commit_attr();
                    self.emit_tag();
                }
                c => {
                    self.attr_value.push(c);
                    self.state = State::AttributeValueUnquoted;
                }
            },

            State::AttributeValueQuoted => {
                if ch == self.quote {
                    self.commit_attr();
                    self.state = State::BeforeAttributeName;
                } else {
                    self.attr_value.push(ch);
                }
            }

            State::AttributeValueUnquoted => match ch {
                c if c.is_ascii_whitespace() => {
                    self.commit_attr();
                    self.state = State::BeforeAttributeName;
                }
                '>' => {
                    self.commit_attr();
                    self.emit_tag();
                }
                c => self.attr_value.push(c),
            },

            State::SelfClosingStartTag => match ch {
                '>' => {
                    self.self_closing = true;
                    self.emit_tag();
                }
                _ => {
                    warn_once("html", "'/' inside a tag not followed by '>'");
                    self.pos -= 1;
                    self.state = State::BeforeAttributeName;
                }
            },

            State::Comment => {
                if ch == '-' {
                    self.state = State::CommentEndDash;
                }
            }
            State::CommentEndDash => {
                self.state = if ch == '-' {
                    State::CommentEnd
                } else {
                    State::Comment
                };
            }
            State::CommentEnd => match ch {
                '>' => self.state = State::Data,
                '-' => {}
                _ => self.state = State::Comment,
            },

            State::BogusComment => {
                if ch == '>' {
                    self.state = State::Data;
                }
            }

            State::RawText => {
                // Content is skipped entirely; only the matching end tag
                // gets out.
                let end_tag = format!("/{}", self.raw_text_tag);
                if ch == '<' && self.peek_matches_ignore_case(&end_tag) {
                    self.pos += end_tag.len();
                    while self.pos < self.input.len() && self.input[self.pos] != '>' {
                        self.pos += 1;
                    }
                    self.pos += 1;
                    self.tokens.push(Token::EndTag {
                        name: self.raw_text_tag.clone(),
                    });
                    self.state = State::Data;
                }
            }
        }
    }

    fn begin_tag(&mut self, is_end_tag: bool, first: char) {
        self.is_end_tag = is_end_tag;
        self.tag_name = first.to_ascii_lowercase().to_string();
        self.attrs = AttributesMap::new();
        self.self_closing = false;
    }

    fn commit_attr(&mut self) {
        if self.attr_name.is_empty() {
            return;
        }
        let name = std::mem::take(&mut self.attr_name);
        let value = std::mem::take(&mut self.attr_value);
        // First occurrence wins, like the real parser.
        self.attrs.entry(name).or_insert(value);
    }

    fn emit_tag(&mut self) {
        let name = std::mem::take(&mut self.tag_name);

        if self.is_end_tag {
            self.tokens.push(Token::EndTag { name });
            self.state = State::Data;
            return;
        }

        let enters_raw_text = !self.self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str());
        self.tokens.push(Token::StartTag {
            name: name.clone(),
            attrs: std::mem::take(&mut self.attrs),
            self_closing: self.self_closing,
        });

        if enters_raw_text {
            self.raw_text_tag = name;
            self.state = State::RawText;
        } else {
            self.state = State::Data;
        }
    }

    fn flush_text(&mut self) {
        if self.text_buffer.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.text_buffer);
        self.tokens.push(Token::Text(decode_entities(&raw)));
    }

    /// Whether the input at the current position starts with `needle`.
    fn peek_matches(&self, needle: &str) -> bool {
        self.input[self.pos..]
            .iter()
            .zip(needle.chars())
            .filter(|(a, b)| **a == *b)
            .count()
            == needle.chars().count()
    }

    fn peek_matches_ignore_case(&self, needle: &str) -> bool {
        self.input[self.pos..]
            .iter()
            .zip(needle.chars())
            .filter(|(a, b)| a.eq_ignore_ascii_case(b))
            .count()
            == needle.chars().count()
    }
}

/// Decode the character references the engine cares about.
///
/// Named: `&amp;` `&lt;` `&gt;` `&quot;` `&apos;` `&nbsp;` (a real
/// non-breaking space, which the layout engine treats as a word
/// character). Numeric: `&#NNN;` and `&#xHH;`. Anything else is left
/// literal with a warning.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let Some(semi) = rest[1..].find(';').map(|i| i + 1) else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };

        let entity = &rest[1..semi];
        match decode_one_entity(entity) {
            Some(ch) => out.push(ch),
            None => {
                warn_once("html", &format!("unknown character reference '&{entity};'"));
                out.push('&');
                rest = &rest[1..];
                continue;
            }
        }
        rest = &rest[semi + 1..];
    }

    out.push_str(rest);
    out
}

fn decode_one_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00a0}'),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or(entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(html: &str) -> Vec<Token> {
        Tokenizer::new(html).run()
    }

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(tokens("hello world"), [Token::Text("hello world".into())]);
    }

    #[test]
    fn tags_surround_text() {
        let toks = tokens("<p>hi</p>");
        assert_eq!(toks.len(), 3);
        assert!(matches!(&toks[0], Token::StartTag { name, .. } if name == "p"));
        assert_eq!(toks[1], Token::Text("hi".into()));
        assert_eq!(toks[2], Token::EndTag { name: "p".into() });
    }

    #[test]
    fn tag_names_are_lowercased() {
        let toks = tokens("<DIV></DiV>");
        assert!(matches!(&toks[0], Token::StartTag { name, .. } if name == "div"));
        assert_eq!(toks[1], Token::EndTag { name: "div".into() });
    }

    #[test]
    fn attributes_are_collected() {
        let toks = tokens(r#"<a href="x.html" id=main disabled>"#);
        let Token::StartTag { attrs, .. } = &toks[0] else {
            panic!("expected a start tag");
        };
        assert_eq!(attrs.get("href").map(String::as_str), Some("x.html"));
        assert_eq!(attrs.get("id").map(String::as_str), Some("main"));
        assert_eq!(attrs.get("disabled").map(String::as_str), Some(""));
    }

    #[test]
    fn self_closing_tag_is_flagged() {
        let toks = tokens("<br/>");
        assert!(matches!(
            &toks[0],
            Token::StartTag {
                self_closing: true,
                ..
            }
        ));
    }

    #[test]
    fn comments_and_doctype_are_dropped() {
        assert_eq!(
            tokens("<!doctype html>a<!-- ignore -- -->b"),
            [Token::Text("a".into()), Token::Text("b".into())]
        );
    }

    #[test]
    fn script_content_is_skipped() {
        let toks = tokens("<script>if (1 < 2) { x('</div>'); }</script>tail");
        assert!(matches!(&toks[0], Token::StartTag { name, .. } if name == "script"));
        assert_eq!(toks[1], Token::EndTag {
            name: "script".into()
        });
        assert_eq!(toks[2], Token::Text("tail".into()));
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            tokens("&lt;x&gt; &amp; y&#33;"),
            [Token::Text("<x> & y!".into())]
        );
    }

    #[test]
    fn nbsp_becomes_non_breaking_space() {
        assert_eq!(tokens("a&nbsp;b"), [Token::Text("a\u{00a0}b".into())]);
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(tokens("a\nb\tc"), [Token::Text("a b c".into())]);
    }

    #[test]
    fn stray_less_than_is_text() {
        // The '<' forces a text flush before the tokenizer discovers it
        // is not a tag, so the run comes back as two text tokens.
        assert_eq!(
            tokens("1 < 2"),
            [Token::Text("1 ".into()), Token::Text("< 2".into())]
        );
    }
}
