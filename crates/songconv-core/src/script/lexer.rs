use super::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Name(String),
    Keyword(Keyword),
    Number(f64),
    /// String contents between the delimiters, escapes left as written.
    Str(String),
    Symbol(&'static str),
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    Goto,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "and" => Self::And,
            "break" => Self::Break,
            "do" => Self::Do,
            "else" => Self::Else,
            "elseif" => Self::Elseif,
            "end" => Self::End,
            "false" => Self::False,
            "for" => Self::For,
            "function" => Self::Function,
            "goto" => Self::Goto,
            "if" => Self::If,
            "in" => Self::In,
            "local" => Self::Local,
            "nil" => Self::Nil,
            "not" => Self::Not,
            "or" => Self::Or,
            "repeat" => Self::Repeat,
            "return" => Self::Return,
            "then" => Self::Then,
            "true" => Self::True,
            "until" => Self::Until,
            "while" => Self::While,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

// Longest symbols first so that `...` wins over `..` and `.`.
const SYMBOLS: [&str; 33] = [
    "...", "==", "~=", "<=", ">=", "//", "::", "<<", ">>", "..", "+", "-", "*", "/", "%", "^",
    "#", "&", "~", "|", "<", ">", "=", "(", ")", "{", "}", "[", "]", ";", ":", ",", ".",
];

pub(crate) struct Lexer<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            src: text.as_bytes(),
            text,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let line = self.line;
            let column = self.column();
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(Spanned {
                token,
                line,
                column,
            });
            if done {
                return Ok(tokens);
            }
        }
    }

    fn column(&self) -> usize {
        self.pos - self.line_start + 1
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.line, self.column(), message)
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        // A UTF-8 byte order mark may survive decoding of hand-edited files.
        if self.pos == 0 && self.text.starts_with('\u{feff}') {
            self.pos = '\u{feff}'.len_utf8();
            self.line_start = self.pos;
        }
        // Shebang line.
        if self.pos == 0 && self.text.starts_with("#!") {
            while let Some(c) = self.peek() {
                if c == b'\n' {
                    break;
                }
                self.bump();
            }
        }
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    if let Some(level) = self.long_bracket_level() {
                        self.read_long_bracket(level)?;
                    } else {
                        while let Some(c) = self.peek() {
                            if c == b'\n' {
                                break;
                            }
                            self.bump();
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// If positioned at `[`, `[=`, `[==`... followed by `[`, return the level.
    fn long_bracket_level(&self) -> Option<usize> {
        if self.peek() != Some(b'[') {
            return None;
        }
        let mut level = 0;
        while self.peek_at(1 + level) == Some(b'=') {
            level += 1;
        }
        (self.peek_at(1 + level) == Some(b'[')).then_some(level)
    }

    /// Consume a long bracket of the given level and return its body.
    fn read_long_bracket(&mut self, level: usize) -> Result<String, ParseError> {
        let (line, column) = (self.line, self.column());
        for _ in 0..level + 2 {
            self.bump();
        }
        // A newline right after the opening bracket is not part of the body.
        if self.peek() == Some(b'\r') {
            self.bump();
        }
        if self.peek() == Some(b'\n') {
            self.bump();
        }
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::new(line, column, "unfinished long string"));
                }
                Some(b']') => {
                    let closes = (0..level).all(|i| self.peek_at(1 + i) == Some(b'='))
                        && self.peek_at(1 + level) == Some(b']');
                    if closes {
                        let body = self.text[start..self.pos].to_string();
                        for _ in 0..level + 2 {
                            self.bump();
                        }
                        return Ok(body);
                    }
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let Some(c) = self.peek() else {
            return Ok(Token::Eof);
        };

        if c.is_ascii_alphabetic() || c == b'_' {
            return Ok(self.read_word());
        }
        if c.is_ascii_digit() || (c == b'.' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit()))
        {
            return self.read_number();
        }
        if c == b'"' || c == b'\'' {
            return self.read_quoted(c);
        }
        if let Some(level) = self.long_bracket_level() {
            return self.read_long_bracket(level).map(Token::Str);
        }

        let rest = &self.text[self.pos..];
        for symbol in SYMBOLS {
            if rest.starts_with(symbol) {
                self.pos += symbol.len();
                return Ok(Token::Symbol(symbol));
            }
        }

        let ch = rest.chars().next().unwrap_or('?');
        Err(self.error(format!("unexpected character '{}'", ch)))
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.pos += 1;
        }
        let word = &self.text[start..self.pos];
        match Keyword::from_word(word) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Name(word.to_string()),
        }
    }

    fn read_number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let is_hex = self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X'));
        if is_hex {
            self.pos += 2;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            let digits = &self.text[start + 2..self.pos];
            return u64::from_str_radix(digits, 16)
                .map(|n| Token::Number(n as f64))
                .map_err(|_| self.error(format!("malformed number '{}'", &self.text[start..self.pos])));
        }

        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == b'.')
        {
            self.pos += 1;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let literal = &self.text[start..self.pos];
        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| self.error(format!("malformed number '{}'", literal)))
    }

    fn read_quoted(&mut self, quote: u8) -> Result<Token, ParseError> {
        let (line, column) = (self.line, self.column());
        self.bump();
        let start = self.pos;
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(ParseError::new(line, column, "unfinished string"));
                }
                Some(b'\\') => {
                    self.bump();
                    self.bump();
                }
                Some(c) if c == quote => {
                    let body = self.text[start..self.pos].to_string();
                    self.bump();
                    return Ok(Token::Str(body));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }
}
