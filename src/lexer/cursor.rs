//! Character cursor for input navigation

use crate::error::Position;

/// Cursor over UTF-8 text that moves one character at a time
/// while tracking line, column and byte offset
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Create cursor at the start of `input`
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Get current character without consuming
    pub fn current(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Advance cursor by one character
    pub fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skip whitespace
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume character if it matches
    pub fn consume(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `expected` if the remaining input starts with it
    pub fn eat(&mut self, expected: &str) -> bool {
        if !self.starts_with(expected) {
            return false;
        }
        for _ in expected.chars() {
            self.advance();
        }
        true
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Get current position
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column, self.pos)
    }

    /// Check if at end of input
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining text
    pub fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Get the full input
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Get current byte offset
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Get text from `start` up to the current position
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.input.get(start..self.pos).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic() {
        let mut cursor = Cursor::new("hello");
        assert_eq!(cursor.current(), Some('h'));
        cursor.advance();
        assert_eq!(cursor.current(), Some('e'));
    }

    #[test]
    fn test_cursor_multibyte() {
        let mut cursor = Cursor::new("é<");
        cursor.advance();
        assert_eq!(cursor.current(), Some('<'));
        assert_eq!(cursor.position(), Position::new(1, 2, 2));
    }

    #[test]
    fn test_cursor_whitespace() {
        let mut cursor = Cursor::new("  \t\nhello");
        cursor.skip_whitespace();
        assert_eq!(cursor.current(), Some('h'));
        assert_eq!(cursor.position().line, 2);
        assert_eq!(cursor.position().column, 1);
    }

    #[test]
    fn test_cursor_consume_and_eat() {
        let mut cursor = Cursor::new("abc-->");
        assert!(cursor.consume('a'));
        assert!(!cursor.consume('z'));
        assert!(!cursor.eat("-->"));
        cursor.advance();
        cursor.advance();
        assert!(cursor.eat("-->"));
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_cursor_eof() {
        let cursor = Cursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_cursor_slice() {
        let mut cursor = Cursor::new("hello world");
        let start = cursor.pos();
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), "hel");
    }
}
