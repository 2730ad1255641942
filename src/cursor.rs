use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+").unwrap());

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A position-tracking matcher over an immutable signature string.
///
/// All probes anchor at the current byte position and advance on success.
/// `matches` and `skip_word` record one prior `(position, last_match)` pair,
/// so exactly one `backout` can undo the most recent of them. Grammar rules
/// that need deeper lookahead snapshot `pos()` themselves and restore it on
/// failure (see `DefinitionParser::attempt`).
#[derive(Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    end: usize,
    last_match: Option<&'a str>,
    saved: (usize, Option<&'a str>),
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Cursor {
            text,
            pos: 0,
            end: text.len(),
            last_match: None,
            saved: (0, None),
        }
    }

    /// Probes `re` at the current position. The pattern must be anchored
    /// with `^`; on success the cursor advances past the match and the
    /// matched text becomes available through `matched_text`.
    pub fn matches(&mut self, re: &Regex) -> bool {
        match re.find(&self.text[self.pos..]) {
            Some(m) => {
                debug_assert_eq!(m.start(), 0, "cursor probes must be anchored");
                self.saved = (self.pos, self.last_match);
                self.last_match = Some(&self.text[self.pos..self.pos + m.end()]);
                self.pos += m.end();
                true
            }
            None => false,
        }
    }

    /// Undoes the single most recent successful `matches`/`skip_word`.
    pub fn backout(&mut self) {
        let (pos, last_match) = self.saved;
        self.pos = pos;
        self.last_match = last_match;
    }

    /// Text of the most recent successful probe.
    pub fn matched_text(&self) -> &'a str {
        self.last_match.unwrap_or("")
    }

    /// Skips an exact literal, with no word-boundary requirement.
    pub fn skip_string(&mut self, literal: &str) -> bool {
        if self.text[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Skips a keyword; must not partially match inside a longer identifier
    /// on either side.
    pub fn skip_word(&mut self, word: &str) -> bool {
        let rest = &self.text[self.pos..];
        if !rest.starts_with(word) {
            return false;
        }
        if let Some(prev) = self.text[..self.pos].chars().next_back() {
            if is_word_char(prev) {
                return false;
            }
        }
        if let Some(next) = rest[word.len()..].chars().next() {
            if is_word_char(next) {
                return false;
            }
        }
        self.saved = (self.pos, self.last_match);
        self.last_match = Some(&rest[..word.len()]);
        self.pos += word.len();
        true
    }

    pub fn skip_ws(&mut self) -> bool {
        self.matches(&WHITESPACE_RE)
    }

    pub fn skip_word_and_ws(&mut self, word: &str) -> bool {
        if self.skip_word(word) {
            self.skip_ws();
            true
        } else {
            false
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.end
    }

    /// The character at the current position, or `None` at end of input.
    pub fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Advances past the current character.
    pub fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            self.pos += c.len_utf8();
        }
    }

    /// Consumes everything up to the end of input; used for verbatim capture
    /// of initializers and defaults.
    pub fn read_rest(&mut self) -> &'a str {
        let rest = &self.text[self.pos..];
        self.pos = self.end;
        rest
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        debug_assert!(pos <= self.end);
        self.pos = pos;
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn remainder(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static IDENT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap());

    #[test]
    fn test_match_advances_and_records() {
        let mut c = Cursor::new("foo bar");
        assert!(c.matches(&IDENT_RE));
        assert_eq!(c.matched_text(), "foo");
        assert_eq!(c.pos(), 3);
    }

    #[test]
    fn test_single_level_backout() {
        let mut c = Cursor::new("foo bar");
        assert!(c.matches(&IDENT_RE));
        c.skip_ws();
        assert!(c.matches(&IDENT_RE));
        assert_eq!(c.matched_text(), "bar");
        c.backout();
        assert_eq!(c.pos(), 4);
        assert!(c.matches(&IDENT_RE));
        assert_eq!(c.matched_text(), "bar");
    }

    #[test]
    fn test_skip_word_requires_boundary() {
        let mut c = Cursor::new("constant");
        assert!(!c.skip_word("const"));
        assert!(c.skip_word("constant"));
        assert!(c.at_end());
    }

    #[test]
    fn test_skip_string_is_not_boundary_checked() {
        let mut c = Cursor::new("::foo");
        assert!(c.skip_string("::"));
        assert_eq!(c.pos(), 2);
        assert!(!c.skip_string("::"));
    }

    #[test]
    fn test_read_rest() {
        let mut c = Cursor::new("a = b + c");
        c.advance();
        c.skip_ws();
        assert!(c.skip_string("="));
        c.skip_ws();
        assert_eq!(c.read_rest(), "b + c");
        assert!(c.at_end());
        assert_eq!(c.current_char(), None);
    }
}
