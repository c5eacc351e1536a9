//! Restricted interpreter for the embedded schedule block.
//!
//! The upstream page defines its schedule with plain `var name = <literal>;`
//! statements. Running that text through a script engine would mean executing
//! third-party code, so this module parses it instead: a small recursive
//! descent over literals, collections, and references to previously bound
//! names. Function calls, operators, and control flow are not part of the
//! grammar and fail the parse outright — there is never a partial result.
//!
//! The grammar is tolerant of formatting drift the third party controls
//! (single vs. double quotes, trailing commas, comments, whitespace) while
//! staying strict about anything that would require evaluation.

use crate::error::ScrapeError;

/// Top-level names the schedule block is expected to bind.
pub const EXPECTED_BINDINGS: [&str; 3] = ["times", "movies", "days"];

/// A parsed value from the embedded schedule data.
///
/// Object entries preserve insertion order; keys are unique within one
/// object.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Vec<EmbeddedValue>),
    Object(Vec<(String, EmbeddedValue)>),
}

impl EmbeddedValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[EmbeddedValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&[(String, EmbeddedValue)]> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` in an object value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EmbeddedValue> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// The top-level bindings produced by [`interpret`], in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<(String, EmbeddedValue)>,
}

impl Bindings {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EmbeddedValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EmbeddedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rebinding an existing name replaces its value, as assignment would.
    fn insert(&mut self, name: String, value: EmbeddedValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }
}

/// Parses a schedule block into its top-level bindings.
///
/// # Errors
///
/// Returns [`ScrapeError::Syntax`] on any construct outside the restricted
/// grammar, including references to names not yet bound.
pub fn interpret(block: &str) -> Result<Bindings, ScrapeError> {
    let mut parser = Parser {
        src: block,
        pos: 0,
        bindings: Bindings::default(),
    };
    parser.run()?;
    Ok(parser.bindings)
}

/// Verifies that every name in [`EXPECTED_BINDINGS`] was bound.
///
/// # Errors
///
/// Returns [`ScrapeError::MissingBinding`] naming the first absent binding.
/// This is deliberately distinct from [`ScrapeError::Syntax`]: the block was
/// well-formed, it just did not define what the pipeline needs.
pub fn expect_schedule_bindings(bindings: &Bindings) -> Result<(), ScrapeError> {
    for name in EXPECTED_BINDINGS {
        if bindings.get(name).is_none() {
            return Err(ScrapeError::MissingBinding {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

struct Parser<'a> {
    src: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    bindings: Bindings,
}

impl Parser<'_> {
    fn run(&mut self) -> Result<(), ScrapeError> {
        loop {
            self.skip_trivia()?;
            if self.at_end() {
                return Ok(());
            }
            if self.eat(';') {
                continue;
            }
            self.parse_declaration()?;
        }
    }

    /// `var|let|const <ident> = <value> (, <ident> = <value>)* ;`
    fn parse_declaration(&mut self) -> Result<(), ScrapeError> {
        let keyword_at = self.pos;
        let keyword = self.parse_ident()?;
        if !matches!(keyword.as_str(), "var" | "let" | "const") {
            return Err(self.err_at(
                keyword_at,
                format!("expected a variable declaration, found `{keyword}`"),
            ));
        }
        loop {
            self.skip_trivia()?;
            let name = self.parse_ident()?;
            self.skip_trivia()?;
            self.expect_char('=')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            self.bindings.insert(name, value);
            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            // The final statement may omit its semicolon.
            if self.at_end() {
                return Ok(());
            }
            self.expect_char(';')?;
            return Ok(());
        }
    }

    fn parse_value(&mut self) -> Result<EmbeddedValue, ScrapeError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                Ok(EmbeddedValue::Str(self.parse_string_body(q)?))
            }
            Some('[') => self.parse_array(),
            Some('{') => self.parse_object(),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            Some(c) if is_ident_start(c) => {
                let at = self.pos;
                let ident = self.parse_ident()?;
                match ident.as_str() {
                    "true" => Ok(EmbeddedValue::Bool(true)),
                    "false" => Ok(EmbeddedValue::Bool(false)),
                    "null" | "undefined" => Ok(EmbeddedValue::Null),
                    _ => self.bindings.get(&ident).cloned().ok_or_else(|| {
                        self.err_at(at, format!("reference to undefined name `{ident}`"))
                    }),
                }
            }
            Some(c) => Err(self.err(format!("unexpected character `{c}` where a value begins"))),
            None => Err(self.err("unexpected end of input where a value begins")),
        }
    }

    fn parse_array(&mut self) -> Result<EmbeddedValue, ScrapeError> {
        self.expect_char('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat(']') {
                return Ok(EmbeddedValue::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            self.expect_char(']')?;
            return Ok(EmbeddedValue::Array(items));
        }
    }

    fn parse_object(&mut self) -> Result<EmbeddedValue, ScrapeError> {
        self.expect_char('{')?;
        let mut entries: Vec<(String, EmbeddedValue)> = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat('}') {
                return Ok(EmbeddedValue::Object(entries));
            }
            let key_at = self.pos;
            let key = match self.peek() {
                Some(q @ ('"' | '\'')) => {
                    self.bump();
                    self.parse_string_body(q)?
                }
                Some(c) if is_ident_start(c) => self.parse_ident()?,
                _ => return Err(self.err("expected an object key")),
            };
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(self.err_at(key_at, format!("duplicate object key `{key}`")));
            }
            self.skip_trivia()?;
            self.expect_char(':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            entries.push((key, value));
            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            self.expect_char('}')?;
            return Ok(EmbeddedValue::Object(entries));
        }
    }

    fn parse_number(&mut self) -> Result<EmbeddedValue, ScrapeError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }

        // Hex literals: 0x1F and friends.
        if self.rest().starts_with("0x") || self.rest().starts_with("0X") {
            self.bump();
            self.bump();
            let digits_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.bump();
            }
            if self.pos == digits_start {
                return Err(self.err_at(start, "malformed hex literal"));
            }
            let magnitude = i64::from_str_radix(&self.src[digits_start..self.pos], 16)
                .map_err(|e| self.err_at(start, format!("malformed hex literal: {e}")))?;
            #[allow(clippy::cast_precision_loss)]
            let mut value = magnitude as f64;
            if self.src[start..].starts_with('-') {
                value = -value;
            }
            return Ok(EmbeddedValue::Number(value));
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.eat('.') {
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('-' | '+')) {
                self.bump();
            }
            let exp_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
            if self.pos == exp_start {
                return Err(self.err_at(start, "malformed number: empty exponent"));
            }
        }

        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map(EmbeddedValue::Number)
            .map_err(|_| self.err_at(start, format!("malformed number `{text}`")))
    }

    /// Reads a string body after the opening quote, through the matching
    /// closing quote. Handles the usual escape sequences; an unknown escape
    /// yields the escaped character itself.
    fn parse_string_body(&mut self, quote: char) -> Result<String, ScrapeError> {
        let start = self.pos;
        let mut out = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.err_at(start, "unterminated string literal"));
            };
            self.bump();
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let Some(esc) = self.peek() else {
                return Err(self.err_at(start, "unterminated string literal"));
            };
            self.bump();
            match esc {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'b' => out.push('\u{0008}'),
                'f' => out.push('\u{000C}'),
                'v' => out.push('\u{000B}'),
                '0' => out.push('\0'),
                'x' => {
                    let code = self.parse_hex_digits(2)?;
                    let c = char::from_u32(code)
                        .ok_or_else(|| self.err("invalid \\x escape"))?;
                    out.push(c);
                }
                'u' => out.push(self.parse_unicode_escape()?),
                // Escaped line break: the literal continues on the next line.
                '\n' => {}
                '\r' => {
                    self.eat('\n');
                }
                other => out.push(other),
            }
        }
    }

    /// `\uXXXX`, with surrogate pairs combined into one scalar value.
    fn parse_unicode_escape(&mut self) -> Result<char, ScrapeError> {
        let at = self.pos;
        let high = self.parse_hex_digits(4)?;
        if (0xDC00..=0xDFFF).contains(&high) {
            return Err(self.err_at(at, "unpaired low surrogate in \\u escape"));
        }
        if (0xD800..=0xDBFF).contains(&high) {
            if !(self.eat('\\') && self.eat('u')) {
                return Err(self.err_at(at, "unpaired high surrogate in \\u escape"));
            }
            let low = self.parse_hex_digits(4)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.err_at(at, "invalid low surrogate in \\u escape"));
            }
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code).ok_or_else(|| self.err_at(at, "invalid \\u escape"));
        }
        char::from_u32(high).ok_or_else(|| self.err_at(at, "invalid \\u escape"))
    }

    fn parse_hex_digits(&mut self, count: usize) -> Result<u32, ScrapeError> {
        let start = self.pos;
        for _ in 0..count {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => self.bump(),
                _ => return Err(self.err_at(start, format!("expected {count} hex digits"))),
            }
        }
        u32::from_str_radix(&self.src[start..self.pos], 16)
            .map_err(|e| self.err_at(start, format!("invalid hex escape: {e}")))
    }

    fn parse_ident(&mut self) -> Result<String, ScrapeError> {
        match self.peek() {
            Some(c) if is_ident_start(c) => {}
            Some(c) => return Err(self.err(format!("expected an identifier, found `{c}`"))),
            None => return Err(self.err("expected an identifier, found end of input")),
        }
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            self.bump();
        }
        Ok(self.src[start..self.pos].to_owned())
    }

    /// Skips whitespace and `//` / `/* */` comments.
    fn skip_trivia(&mut self) -> Result<(), ScrapeError> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.bump();
            }
            if self.rest().starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.bump();
                }
            } else if self.rest().starts_with("/*") {
                let at = self.pos;
                match self.rest().find("*/") {
                    Some(end) => self.pos += end + 2,
                    None => return Err(self.err_at(at, "unterminated block comment")),
                }
            } else {
                return Ok(());
            }
        }
    }

    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ScrapeError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.err(format!("expected `{expected}`, found `{c}`"))),
            None => Err(self.err(format!("expected `{expected}`, found end of input"))),
        }
    }

    fn err(&self, reason: impl Into<String>) -> ScrapeError {
        self.err_at(self.pos, reason)
    }

    fn err_at(&self, offset: usize, reason: impl Into<String>) -> ScrapeError {
        ScrapeError::Syntax {
            offset,
            reason: reason.into(),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
#[path = "interpret_test.rs"]
mod tests;
