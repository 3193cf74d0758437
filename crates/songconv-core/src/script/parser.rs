use std::collections::BTreeMap;

use tracing::debug;

use super::ParseError;
use super::lexer::{Keyword, Lexer, Spanned, Token};
use super::value::{DottedReference, ScriptValue, number_key};

/// Parse a source file into its root mapping of top-level assignments.
pub fn parse(source: &str) -> Result<ScriptValue, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser {
        tokens,
        pos: 0,
        depth: 0,
    }
    .parse_chunk()
}

/// Result of parsing one expression.
struct Expr {
    value: ScriptValue,
    /// The expression is a bare numeric literal, so unary minus folds into it.
    numeric_literal: bool,
    /// The expression ends with a call, which makes it a valid statement.
    is_call: bool,
}

impl Expr {
    fn plain(value: ScriptValue) -> Self {
        Self {
            value,
            numeric_literal: false,
            is_call: false,
        }
    }
}

const UNARY_PRIORITY: u8 = 12;

/// Nesting limit for expressions and table constructors.
const MAX_SYNTAX_DEPTH: usize = 200;

/// Left and right binding priority of a binary operator.
fn binary_priority(token: &Token) -> Option<(u8, u8)> {
    Some(match token {
        Token::Keyword(Keyword::Or) => (1, 1),
        Token::Keyword(Keyword::And) => (2, 2),
        Token::Symbol("<" | ">" | "<=" | ">=" | "~=" | "==") => (3, 3),
        Token::Symbol("|") => (4, 4),
        Token::Symbol("~") => (5, 5),
        Token::Symbol("&") => (6, 6),
        Token::Symbol("<<" | ">>") => (7, 7),
        Token::Symbol("..") => (9, 8),
        Token::Symbol("+" | "-") => (10, 10),
        Token::Symbol("*" | "/" | "//" | "%") => (11, 11),
        Token::Symbol("^") => (14, 13),
        _ => return None,
    })
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    /// Current expression nesting level.
    depth: usize,
}

impl Parser {
    fn current(&self) -> &Spanned {
        // The token list always ends with Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.current().token
    }

    fn peek_next(&self) -> &Token {
        let idx = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[idx].token
    }

    fn advance(&mut self) -> Token {
        let token = self.current().token.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let current = self.current();
        ParseError::new(
            current.line,
            current.column,
            format!("{} near {}", message.into(), describe(&current.token)),
        )
    }

    fn check(&self, symbol: &str) -> bool {
        matches!(self.peek(), Token::Symbol(s) if *s == symbol)
    }

    fn eat(&mut self, symbol: &str) -> bool {
        if self.check(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, symbol: &str) -> Result<(), ParseError> {
        if self.eat(symbol) {
            Ok(())
        } else {
            Err(self.error(format!("'{}' expected", symbol)))
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Token::Name(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("<name> expected")),
        }
    }

    fn parse_chunk(mut self) -> Result<ScriptValue, ParseError> {
        let mut root = BTreeMap::new();
        while *self.peek() != Token::Eof {
            self.parse_statement(&mut root)?;
        }
        Ok(ScriptValue::Mapping(root))
    }

    fn parse_statement(
        &mut self,
        root: &mut BTreeMap<String, ScriptValue>,
    ) -> Result<(), ParseError> {
        match self.peek().clone() {
            Token::Symbol(";") => {
                self.advance();
            }
            Token::Symbol("::") => {
                self.advance();
                self.expect_name()?;
                self.expect("::")?;
            }
            Token::Keyword(Keyword::Break) => {
                self.advance();
            }
            Token::Keyword(Keyword::Goto) => {
                self.advance();
                self.expect_name()?;
            }
            Token::Keyword(Keyword::Return) => {
                self.advance();
                if !self.at_block_end() && !self.check(";") {
                    self.parse_expression_list()?;
                }
                self.eat(";");
            }
            Token::Keyword(Keyword::Local) => {
                self.advance();
                if matches!(self.peek(), Token::Keyword(Keyword::Function)) {
                    self.skip_block()?;
                } else {
                    self.parse_local(root)?;
                }
            }
            Token::Keyword(
                Keyword::Function
                | Keyword::Do
                | Keyword::If
                | Keyword::While
                | Keyword::For
                | Keyword::Repeat,
            ) => {
                debug!("Skipping control statement at line {}", self.current().line);
                self.skip_block()?;
            }
            Token::Name(_) | Token::Symbol("(") => self.parse_expression_statement(root)?,
            _ => return Err(self.error("unexpected symbol")),
        }
        Ok(())
    }

    fn at_block_end(&self) -> bool {
        matches!(
            self.peek(),
            Token::Eof
                | Token::Keyword(Keyword::End | Keyword::Else | Keyword::Elseif | Keyword::Until)
        )
    }

    fn parse_local(&mut self, root: &mut BTreeMap<String, ScriptValue>) -> Result<(), ParseError> {
        let mut names = vec![self.expect_name()?];
        self.skip_attribute()?;
        while self.eat(",") {
            names.push(self.expect_name()?);
            self.skip_attribute()?;
        }
        if self.eat("=") {
            let values = self.parse_expression_list()?;
            for (name, value) in names.into_iter().zip(values) {
                root.insert(name, value);
            }
        }
        Ok(())
    }

    /// Lua 5.4 `<const>` / `<close>` attributes.
    fn skip_attribute(&mut self) -> Result<(), ParseError> {
        if self.eat("<") {
            self.expect_name()?;
            self.expect(">")?;
        }
        Ok(())
    }

    fn parse_expression_statement(
        &mut self,
        root: &mut BTreeMap<String, ScriptValue>,
    ) -> Result<(), ParseError> {
        let first = self.parse_suffixed()?;
        if self.check("=") || self.check(",") {
            let mut targets = vec![first];
            while self.eat(",") {
                targets.push(self.parse_suffixed()?);
            }
            self.expect("=")?;
            let values = self.parse_expression_list()?;
            for (target, value) in targets.into_iter().zip(values) {
                // Only plain identifiers become root keys; `a.b = x` has no root slot.
                if let ScriptValue::Reference(r) = target.value
                    && r.members.is_empty()
                {
                    root.insert(r.base, value);
                }
            }
            return Ok(());
        }
        if first.is_call {
            // Calls cannot be evaluated statically.
            return Ok(());
        }
        Err(self.error("syntax error"))
    }

    fn parse_expression_list(&mut self) -> Result<Vec<ScriptValue>, ParseError> {
        let mut values = vec![self.parse_expression()?];
        while self.eat(",") {
            values.push(self.parse_expression()?);
        }
        Ok(values)
    }

    fn parse_expression(&mut self) -> Result<ScriptValue, ParseError> {
        Ok(self.parse_subexpression(0)?.value)
    }

    fn parse_subexpression(&mut self, limit: u8) -> Result<Expr, ParseError> {
        if self.depth >= MAX_SYNTAX_DEPTH {
            return Err(self.error("chunk has too many syntax levels"));
        }
        self.depth += 1;
        let expr = self.parse_operators(limit);
        self.depth -= 1;
        expr
    }

    fn parse_operators(&mut self, limit: u8) -> Result<Expr, ParseError> {
        let mut left = match self.peek() {
            Token::Keyword(Keyword::Not) | Token::Symbol("#" | "~") => {
                self.advance();
                self.parse_subexpression(UNARY_PRIORITY)?;
                Expr::plain(ScriptValue::Opaque("UnaryExpression"))
            }
            Token::Symbol("-") => {
                self.advance();
                let operand = self.parse_subexpression(UNARY_PRIORITY)?;
                match operand.value {
                    ScriptValue::Number(n) if operand.numeric_literal => {
                        Expr::plain(ScriptValue::Number(-n))
                    }
                    _ => Expr::plain(ScriptValue::Opaque("UnaryExpression")),
                }
            }
            _ => self.parse_simple()?,
        };

        while let Some((left_priority, right_priority)) = binary_priority(self.peek()) {
            if left_priority <= limit {
                break;
            }
            let logical = matches!(self.peek(), Token::Keyword(Keyword::And | Keyword::Or));
            self.advance();
            self.parse_subexpression(right_priority)?;
            left = Expr::plain(ScriptValue::Opaque(if logical {
                "LogicalExpression"
            } else {
                "BinaryExpression"
            }));
        }
        Ok(left)
    }

    fn parse_simple(&mut self) -> Result<Expr, ParseError> {
        let value = match self.peek().clone() {
            Token::Number(n) => {
                self.advance();
                return Ok(Expr {
                    value: ScriptValue::Number(n),
                    numeric_literal: true,
                    is_call: false,
                });
            }
            Token::Str(s) => {
                self.advance();
                ScriptValue::String(s)
            }
            Token::Keyword(Keyword::Nil) => {
                self.advance();
                ScriptValue::Nil
            }
            Token::Keyword(Keyword::True) => {
                self.advance();
                ScriptValue::Bool(true)
            }
            Token::Keyword(Keyword::False) => {
                self.advance();
                ScriptValue::Bool(false)
            }
            Token::Symbol("...") => {
                self.advance();
                ScriptValue::Opaque("VarargLiteral")
            }
            Token::Symbol("{") => self.parse_table()?,
            Token::Keyword(Keyword::Function) => {
                self.skip_block()?;
                ScriptValue::Opaque("FunctionDeclaration")
            }
            _ => return self.parse_suffixed(),
        };
        Ok(Expr::plain(value))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::Name(name) => {
                self.advance();
                Ok(Expr::plain(ScriptValue::Reference(DottedReference::new(
                    name,
                ))))
            }
            Token::Symbol("(") => {
                self.advance();
                let inner = self.parse_subexpression(0)?;
                self.expect(")")?;
                Ok(Expr {
                    is_call: false,
                    ..inner
                })
            }
            _ => Err(self.error("unexpected symbol")),
        }
    }

    fn parse_suffixed(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek().clone() {
                Token::Symbol(".") => {
                    self.advance();
                    let member = self.expect_name()?;
                    let value = match expr.value {
                        ScriptValue::Reference(r) => ScriptValue::Reference(r.member(member)),
                        _ => ScriptValue::Opaque("MemberExpression"),
                    };
                    expr = Expr::plain(value);
                }
                Token::Symbol("[") => {
                    self.advance();
                    self.parse_expression()?;
                    self.expect("]")?;
                    expr = Expr::plain(ScriptValue::Opaque("IndexExpression"));
                }
                Token::Symbol(":") => {
                    self.advance();
                    self.expect_name()?;
                    self.parse_call_arguments()?;
                    expr = call();
                }
                Token::Symbol("(" | "{") | Token::Str(_) => {
                    self.parse_call_arguments()?;
                    expr = call();
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_call_arguments(&mut self) -> Result<(), ParseError> {
        match self.peek().clone() {
            Token::Str(_) => {
                self.advance();
            }
            Token::Symbol("{") => {
                self.parse_table()?;
            }
            Token::Symbol("(") => {
                self.advance();
                if !self.check(")") {
                    self.parse_expression_list()?;
                }
                self.expect(")")?;
            }
            _ => return Err(self.error("function arguments expected")),
        }
        Ok(())
    }

    fn parse_table(&mut self) -> Result<ScriptValue, ParseError> {
        self.expect("{")?;
        let mut fields: Vec<(Option<String>, ScriptValue)> = Vec::new();
        while !self.check("}") {
            let field = if self.check("[") {
                self.advance();
                let key = self.parse_subexpression(0)?;
                self.expect("]")?;
                self.expect("=")?;
                (Some(key_name(&key.value)), self.parse_expression()?)
            } else if matches!(self.peek(), Token::Name(_))
                && matches!(self.peek_next(), Token::Symbol("="))
            {
                let key = self.expect_name()?;
                self.advance();
                (Some(key), self.parse_expression()?)
            } else {
                (None, self.parse_expression()?)
            };
            fields.push(field);
            if !self.eat(",") && !self.eat(";") {
                break;
            }
        }
        self.expect("}")?;

        if fields.is_empty() {
            return Ok(ScriptValue::Mapping(BTreeMap::new()));
        }
        if fields.iter().all(|(key, _)| key.is_none()) {
            return Ok(ScriptValue::Sequence(
                fields.into_iter().map(|(_, value)| value).collect(),
            ));
        }
        // Mixed tables key positional entries by their field index.
        let map = fields
            .into_iter()
            .enumerate()
            .map(|(index, (key, value))| (key.unwrap_or_else(|| index.to_string()), value))
            .collect();
        Ok(ScriptValue::Mapping(map))
    }

    /// Skip a construct that needs `end` (or `until`) without evaluating it.
    fn skip_block(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            let spanned = self.current().clone();
            match spanned.token {
                Token::Eof => {
                    return Err(ParseError::new(
                        spanned.line,
                        spanned.column,
                        "'end' expected near <eof>",
                    ));
                }
                Token::Keyword(Keyword::Function | Keyword::Do | Keyword::If | Keyword::Repeat) => {
                    depth += 1;
                    self.advance();
                }
                Token::Keyword(Keyword::End) => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Token::Keyword(Keyword::Until) => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                    if depth == 0 {
                        self.parse_expression()?;
                        return Ok(());
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}

fn call() -> Expr {
    Expr {
        value: ScriptValue::Nil,
        numeric_literal: false,
        is_call: true,
    }
}

fn key_name(key: &ScriptValue) -> String {
    match key {
        ScriptValue::String(s) => s.clone(),
        ScriptValue::Number(n) => number_key(*n),
        ScriptValue::Reference(r) if r.members.is_empty() => r.base.clone(),
        _ => "unknown".to_string(),
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Name(name) => format!("'{}'", name),
        Token::Keyword(keyword) => format!("'{:?}'", keyword).to_lowercase(),
        Token::Number(n) => format!("'{}'", n),
        Token::Str(s) => format!("'\"{}\"'", s),
        Token::Symbol(s) => format!("'{}'", s),
        Token::Eof => "<eof>".to_string(),
    }
}
