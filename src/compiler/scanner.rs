use crate::compiler::token::{Operator, Symbol, Token};
use crate::foundation::error::{AnimExprError, AnimExprResult};

/// Lazy tokenizer over expression source.
///
/// Tokens are produced one at a time by [`Scanner::get_token`]; the only way back is
/// [`Scanner::rewind`], which restarts from the first byte.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    /// 1-based line of the read position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset of the read position.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
        self.line = 1;
    }

    /// Next token, or `None` at end of input. Comments and whitespace are skipped.
    pub fn get_token(&mut self) -> AnimExprResult<Option<Token>> {
        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else {
                return Ok(None);
            };

            if c == b'/' {
                match self.peek_at(1) {
                    Some(b'/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some(b'*') => {
                        self.skip_block_comment()?;
                        continue;
                    }
                    _ => {}
                }
            }

            let token = self.scan(c)?;
            tracing::trace!(line = self.line, token = %token, "scanned");
            return Ok(Some(token));
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + n).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        if c == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
        Some(c)
    }

    fn bump_if(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.bump();
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.bump() {
            if c == b'\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) -> AnimExprResult<()> {
        let start = self.pos;
        let start_line = self.line;
        self.pos += 2;
        loop {
            match self.bump() {
                Some(b'*') if self.peek() == Some(b'/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
                None => {
                    return Err(AnimExprError::lex(
                        start_line,
                        start,
                        "unterminated block comment",
                    ));
                }
            }
        }
    }

    fn scan(&mut self, c: u8) -> AnimExprResult<Token> {
        if c.is_ascii_alphabetic() || c == b'$' || c == b'_' {
            return Ok(self.scan_word());
        }
        if c.is_ascii_digit() {
            return self.scan_number();
        }

        let start = self.pos;
        self.bump();
        let token = match c {
            b'+' => Token::Operator(Operator::Plus),
            b'-' => Token::Operator(Operator::Minus),
            b'*' => Token::Operator(Operator::Star),
            b'/' => Token::Operator(Operator::Slash),
            b'&' => {
                self.bump_if(b'&');
                Token::Operator(Operator::And)
            }
            b'|' => {
                self.bump_if(b'|');
                Token::Operator(Operator::Or)
            }
            b'=' => {
                self.bump_if(b'=');
                Token::Operator(Operator::Equal)
            }
            b'!' => {
                if self.bump_if(b'=') {
                    Token::Operator(Operator::NotEqual)
                } else {
                    Token::Operator(Operator::Not)
                }
            }
            b'<' => {
                if self.bump_if(b'=') {
                    Token::Operator(Operator::LessEqual)
                } else {
                    Token::Operator(Operator::Less)
                }
            }
            b'>' => {
                if self.bump_if(b'=') {
                    Token::Operator(Operator::GreaterEqual)
                } else {
                    Token::Operator(Operator::Greater)
                }
            }
            b'(' => Token::Symbol(Symbol::LParen),
            b')' => Token::Symbol(Symbol::RParen),
            b'{' => Token::Symbol(Symbol::LBrace),
            b'}' => Token::Symbol(Symbol::RBrace),
            b'.' => Token::Symbol(Symbol::Dot),
            b';' => Token::Symbol(Symbol::Semicolon),
            b',' => Token::Symbol(Symbol::Comma),
            b'?' => Token::Symbol(Symbol::Question),
            b':' => Token::Symbol(Symbol::Colon),
            _ => {
                // Step over the whole code point so the next call starts on a boundary.
                let ch = self.src[start..].chars().next().unwrap_or('\u{fffd}');
                self.pos = start + ch.len_utf8();
                return Err(AnimExprError::lex(
                    self.line,
                    start,
                    format!("unknown character '{ch}'"),
                ));
            }
        };
        Ok(token)
    }

    fn scan_word(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'$' || c == b'_')
        {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "if" => Token::Symbol(Symbol::If),
            "true" => Token::Number(1.0),
            "false" => Token::Number(0.0),
            word => Token::Identifier(word.to_owned()),
        }
    }

    fn scan_number(&mut self) -> AnimExprResult<Token> {
        let start = self.pos;
        let line = self.line;

        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.bump();
            }
            let digits = &self.src[digits_start..self.pos];
            let v = u32::from_str_radix(digits, 16).map_err(|_| {
                AnimExprError::lex(
                    line,
                    start,
                    format!("invalid hex number '{}'", &self.src[start..self.pos]),
                )
            })?;
            return Ok(Token::Number(f64::from(v)));
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        if self.bump_if(b'.') {
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.bump();
            }
        }
        let text = &self.src[start..self.pos];
        self.bump_if(b'f');

        let v: f64 = text
            .parse()
            .map_err(|_| AnimExprError::lex(line, start, format!("invalid number '{text}'")))?;
        Ok(Token::Number(v))
    }
}

impl Iterator for Scanner<'_> {
    type Item = AnimExprResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.get_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Scanner::new(src).collect::<AnimExprResult<Vec<_>>>().unwrap()
    }

    #[test]
    fn scans_float_with_suffix() {
        assert_eq!(tokens("1.3f"), vec![Token::Number(1.3)]);
        assert_eq!(
            tokens("1.3f 3.4f"),
            vec![Token::Number(1.3), Token::Number(3.4)]
        );
        assert_eq!(tokens("42"), vec![Token::Number(42.0)]);
        assert_eq!(tokens("0.25"), vec![Token::Number(0.25)]);
    }

    #[test]
    fn scans_hex() {
        assert_eq!(tokens("0xff"), vec![Token::Number(255.0)]);
        assert_eq!(tokens("0X10"), vec![Token::Number(16.0)]);
    }

    #[test]
    fn empty_hex_is_an_error() {
        let err = Scanner::new("0x").get_token().unwrap_err();
        assert!(matches!(err, AnimExprError::Lex { offset: 0, .. }));
    }

    #[test]
    fn scans_identifiers_and_keywords() {
        assert_eq!(
            tokens("GameObject $tmp _a1 if true false"),
            vec![
                Token::Identifier("GameObject".to_owned()),
                Token::Identifier("$tmp".to_owned()),
                Token::Identifier("_a1".to_owned()),
                Token::Symbol(Symbol::If),
                Token::Number(1.0),
                Token::Number(0.0),
            ]
        );
    }

    #[test]
    fn comments_are_transparent() {
        assert_eq!(
            tokens("// GameObject\nUnityEngine"),
            vec![Token::Identifier("UnityEngine".to_owned())]
        );
        assert_eq!(
            tokens("a /* b * c */ d"),
            vec![
                Token::Identifier("a".to_owned()),
                Token::Identifier("d".to_owned()),
            ]
        );
        assert_eq!(tokens("// only a comment"), vec![]);
    }

    #[test]
    fn unterminated_block_comment_fails() {
        let err = Scanner::new("a /* b").nth(1).unwrap().unwrap_err();
        assert!(matches!(err, AnimExprError::Lex { offset: 2, .. }));
    }

    #[test]
    fn two_char_operators_use_lookahead() {
        assert_eq!(tokens("<="), vec![Token::Operator(Operator::LessEqual)]);
        assert_eq!(tokens(">="), vec![Token::Operator(Operator::GreaterEqual)]);
        assert_eq!(
            tokens("< ="),
            vec![
                Token::Operator(Operator::Less),
                Token::Operator(Operator::Equal),
            ]
        );
        assert_eq!(
            tokens("&& & || | == = != !"),
            vec![
                Token::Operator(Operator::And),
                Token::Operator(Operator::And),
                Token::Operator(Operator::Or),
                Token::Operator(Operator::Or),
                Token::Operator(Operator::Equal),
                Token::Operator(Operator::Equal),
                Token::Operator(Operator::NotEqual),
                Token::Operator(Operator::Not),
            ]
        );
    }

    #[test]
    fn symbols() {
        assert_eq!(
            tokens("(){}.;,?:"),
            vec![
                Token::Symbol(Symbol::LParen),
                Token::Symbol(Symbol::RParen),
                Token::Symbol(Symbol::LBrace),
                Token::Symbol(Symbol::RBrace),
                Token::Symbol(Symbol::Dot),
                Token::Symbol(Symbol::Semicolon),
                Token::Symbol(Symbol::Comma),
                Token::Symbol(Symbol::Question),
                Token::Symbol(Symbol::Colon),
            ]
        );
    }

    #[test]
    fn unknown_character_reports_position() {
        let mut s = Scanner::new("a\n  #");
        assert!(s.get_token().unwrap().is_some());
        match s.get_token().unwrap_err() {
            AnimExprError::Lex { line, offset, .. } => {
                assert_eq!(line, 2);
                assert_eq!(offset, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(s.get_token().unwrap(), None);
    }

    #[test]
    fn rewind_restarts_line_count() {
        let mut s = Scanner::new("a\nb\nc");
        while s.get_token().unwrap().is_some() {}
        assert_eq!(s.line(), 3);
        assert_eq!(s.offset(), 5);
        s.rewind();
        assert_eq!(s.line(), 1);
        assert_eq!(s.offset(), 0);
        assert_eq!(s.get_token().unwrap(), Some(Token::Identifier("a".to_owned())));
    }
}
