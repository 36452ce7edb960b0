use crate::error::ParseError;

/// A read position in a token slice.
///
/// Cursors are `Copy` values: a sub-parser takes one by value and hands back
/// the cursor after the tokens it consumed, so nested parsers never share
/// mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor<'a> {
    tokens: &'a [&'a str],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [&'a str]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Index of the current token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The current token, or `None` past the end.
    pub fn current_token(&self) -> Option<&'a str> {
        self.tokens.get(self.position).copied()
    }

    /// The cursor one token further on.
    pub fn next_token(self) -> Self {
        Self {
            tokens: self.tokens,
            position: self.position + 1,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Consume the current token, failing if input has run out.
    pub fn take(self, expected: &'static str) -> Result<(&'a str, Self), ParseError> {
        match self.current_token() {
            Some(token) => Ok((token, self.next_token())),
            None => Err(ParseError::UnexpectedEnd {
                position: self.position,
                expected,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_tokens_in_order() {
        let tokens = ["v", "3", "r"];
        let cursor = Cursor::new(&tokens);
        assert_eq!(cursor.current_token(), Some("v"));

        let (first, cursor) = cursor.take("protocol").unwrap();
        let (second, cursor) = cursor.take("resource").unwrap();
        assert_eq!((first, second), ("v", "3"));
        assert_eq!(cursor.position(), 2);
        assert!(!cursor.is_at_end());
        assert!(cursor.next_token().is_at_end());
    }

    #[test]
    fn take_past_end_reports_position() {
        let tokens = ["n"];
        let cursor = Cursor::new(&tokens).next_token();
        let err = cursor.take("resource code").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEnd {
                position: 1,
                expected: "resource code"
            }
        );
        assert_eq!(err.token(), None);
    }

    #[test]
    fn cursors_are_independent_values() {
        let tokens = ["a", "b"];
        let start = Cursor::new(&tokens);
        let advanced = start.next_token();
        assert_eq!(start.current_token(), Some("a"));
        assert_eq!(advanced.current_token(), Some("b"));
    }
}
