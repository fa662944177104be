//! Strict decoder for text-encoded numeric lists such as `"[10, 20.5, 30]"`.
//!
//! Grammar: `ws '[' ws (number (ws ',' ws number)*)? ws ']' ws`, where a number
//! is a non-negative decimal with optional fraction and exponent (a leading `+`
//! is allowed). Anything else (`-`, `inf`, `nan`, trailing commas, nesting,
//! identifiers) is rejected.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at offset {offset}")]
pub struct SequenceError {
    pub offset: usize,
    pub message: String,
}

impl SequenceError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat(&mut self, want: u8) -> bool {
        if self.peek() == Some(want) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn unexpected(&self, expected: &str) -> SequenceError {
        match self.text[self.pos..].chars().next() {
            Some(c) => SequenceError::new(self.pos, format!("expected {}, found {:?}", expected, c)),
            None => SequenceError::new(self.pos, format!("expected {}, found end of input", expected)),
        }
    }

    fn number(&mut self) -> Result<f64, SequenceError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            return Err(SequenceError::new(start, "negative values are not allowed"));
        }
        self.eat(b'+');
        let int_digits = self.digits();
        let frac_digits = if self.eat(b'.') { self.digits() } else { 0 };
        if int_digits + frac_digits == 0 {
            self.pos = start;
            return Err(self.unexpected("a number"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if !self.eat(b'+') {
                self.eat(b'-');
            }
            if self.digits() == 0 {
                return Err(self.unexpected("exponent digits"));
            }
        }
        let literal = &self.text[start..self.pos];
        let value: f64 = literal
            .parse()
            .map_err(|_| SequenceError::new(start, format!("invalid number {:?}", literal)))?;
        if !value.is_finite() {
            return Err(SequenceError::new(start, format!("number out of range {:?}", literal)));
        }
        Ok(value)
    }
}

/// Decode a bracketed, comma-separated list of numbers.
pub fn parse_sequence(text: &str) -> Result<Vec<f64>, SequenceError> {
    let mut cur = Cursor { text, pos: 0 };
    let mut values = Vec::new();

    cur.skip_ws();
    if !cur.eat(b'[') {
        return Err(cur.unexpected("'['"));
    }
    cur.skip_ws();
    if !cur.eat(b']') {
        loop {
            cur.skip_ws();
            values.push(cur.number()?);
            cur.skip_ws();
            match cur.peek() {
                Some(b',') => {
                    cur.bump();
                }
                Some(b']') => {
                    cur.bump();
                    break;
                }
                _ => return Err(cur.unexpected("',' or ']'")),
            }
        }
    }
    cur.skip_ws();
    if cur.pos != text.len() {
        return Err(cur.unexpected("end of input"));
    }
    Ok(values)
}
