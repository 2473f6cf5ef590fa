//! Minimal `CREATE TABLE` tokenizer.
//!
//! Only enough of SQLite's lexical grammar is handled to split a table body
//! into column definitions: quoted identifiers (`"x"`, `` `x` ``, `[x]`),
//! string literals, comments and parentheses. A column counts as
//! auto-increment only when the `AUTOINCREMENT` keyword appears inside that
//! column's own definition.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Bare word: keyword, identifier or number.
    Word(String),
    /// Quoted identifier with quotes removed.
    Quoted(String),
    /// String literal; contents are irrelevant here.
    Literal,
    LParen,
    RParen,
    Comma,
    Other,
}

fn tokenize(sql: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ',' => tokens.push(Token::Comma),
            '\'' => {
                read_quoted(&mut chars, '\'');
                tokens.push(Token::Literal);
            }
            '"' | '`' => tokens.push(Token::Quoted(read_quoted(&mut chars, c))),
            '[' => {
                let ident: String = chars.by_ref().take_while(|&ch| ch != ']').collect();
                tokens.push(Token::Quoted(ident));
            }
            '-' if chars.peek() == Some(&'-') => {
                for ch in chars.by_ref() {
                    if ch == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for ch in chars.by_ref() {
                    if prev == '*' && ch == '/' {
                        break;
                    }
                    prev = ch;
                }
            }
            c if is_word_char(c) => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
            _ => tokens.push(Token::Other),
        }
    }

    tokens
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || !c.is_ascii()
}

/// Read up to the closing quote; a doubled quote is an escaped quote.
fn read_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> String {
    let mut out = String::new();
    while let Some(ch) = chars.next() {
        if ch == quote {
            if chars.peek() == Some(&quote) {
                out.push(quote);
                chars.next();
            } else {
                break;
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Split the outermost parenthesized body into comma-separated definitions.
fn definitions(tokens: &[Token]) -> Vec<&[Token]> {
    let Some(open) = tokens.iter().position(|t| *t == Token::LParen) else {
        return Vec::new();
    };

    let mut defs = Vec::new();
    let mut depth = 0usize;
    let mut start = open + 1;

    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    defs.push(&tokens[start..idx]);
                    break;
                }
            }
            Token::Comma if depth == 1 => {
                defs.push(&tokens[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    defs
}

/// Names of columns declared with `AUTOINCREMENT`.
pub fn autoincrement_columns(create_sql: &str) -> Vec<String> {
    let tokens = tokenize(create_sql);
    definitions(&tokens)
        .into_iter()
        .filter_map(|def| {
            let name = match def.first()? {
                Token::Word(w) | Token::Quoted(w) => w.clone(),
                _ => return None,
            };
            let auto = def[1..]
                .iter()
                .any(|t| matches!(t, Token::Word(w) if w.eq_ignore_ascii_case("AUTOINCREMENT")));
            auto.then_some(name)
        })
        .collect()
}

/// Check whether `column` is declared `AUTOINCREMENT` in `create_sql`.
pub fn is_autoincrement(create_sql: &str, column: &str) -> bool {
    autoincrement_columns(create_sql)
        .iter()
        .any(|name| name.eq_ignore_ascii_case(column))
}
