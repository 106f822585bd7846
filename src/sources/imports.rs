//! Imports-only scanning of Go source files.
//!
//! Reads the package clause and the import declarations that follow it, then
//! stops at the first other top-level declaration. Function bodies are never
//! tokenized.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\A(?:(?P<space>\s+)|(?P<comment>//[^\n]*|/\*(?s:.*?)\*/)|(?P<ident>[\p{L}_][\p{L}\p{N}_]*)|(?P<string>"(?:[^"\\\n]|\\.)*"|`[^`]*`)|(?P<punct>[();.]))"#,
    )
    .expect("import token pattern is valid")
});

/// A source file whose header could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ImportScanError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Str(&'a str),
    Punct(char),
    /// Anything the header grammar does not know about.
    Other(char),
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Scanner {
            src: src.strip_prefix('\u{feff}').unwrap_or(src),
            pos: 0,
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> ImportScanError {
        ImportScanError {
            line: self.line,
            message: message.into(),
        }
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.src[self.pos..self.pos + len];
        self.line += consumed.matches('\n').count();
        self.pos += len;
    }

    /// Next significant token; whitespace and comments are skipped.
    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let src = self.src;
            let rest = &src[self.pos..];
            if rest.is_empty() {
                return None;
            }

            let Some(caps) = TOKEN.captures(rest) else {
                let c = rest.chars().next()?;
                self.advance(c.len_utf8());
                return Some(Token::Other(c));
            };
            let len = caps.get(0).map_or(0, |m| m.end());

            let token = if caps.name("space").is_some() || caps.name("comment").is_some() {
                None
            } else if let Some(m) = caps.name("ident") {
                Some(Token::Ident(m.as_str()))
            } else if let Some(m) = caps.name("string") {
                Some(Token::Str(m.as_str()))
            } else {
                caps.name("punct")
                    .and_then(|m| m.as_str().chars().next())
                    .map(Token::Punct)
            };

            self.advance(len);
            if token.is_some() {
                return token;
            }
        }
    }

    /// Next token that is not a bare `;`.
    fn next_decl(&mut self) -> Option<Token<'a>> {
        loop {
            match self.next() {
                Some(Token::Punct(';')) => continue,
                other => return other,
            }
        }
    }
}

/// Collect the raw import path literals of a Go source file, quotes included,
/// in declaration order.
pub fn scan_imports(src: &str) -> Result<Vec<String>, ImportScanError> {
    let mut scanner = Scanner::new(src);
    let mut imports = Vec::new();

    match scanner.next() {
        Some(Token::Ident("package")) => {}
        _ => return Err(scanner.error("expected `package` clause")),
    }
    match scanner.next() {
        Some(Token::Ident(_)) => {}
        _ => return Err(scanner.error("expected package name")),
    }

    while let Some(Token::Ident("import")) = scanner.next_decl() {
        match scanner.next() {
            Some(Token::Punct('(')) => loop {
                match scanner.next() {
                    Some(Token::Punct(')')) => break,
                    Some(Token::Punct(';')) => continue,
                    Some(Token::Str(path)) => imports.push(path.to_string()),
                    Some(Token::Ident(_)) | Some(Token::Punct('.')) => {
                        imports.push(expect_path(&mut scanner)?);
                    }
                    None => return Err(scanner.error("unterminated import block")),
                    Some(_) => return Err(scanner.error("expected import path")),
                }
            },
            Some(Token::Str(path)) => imports.push(path.to_string()),
            Some(Token::Ident(_)) | Some(Token::Punct('.')) => {
                imports.push(expect_path(&mut scanner)?);
            }
            _ => return Err(scanner.error("expected import path")),
        }
    }

    Ok(imports)
}

fn expect_path(scanner: &mut Scanner<'_>) -> Result<String, ImportScanError> {
    match scanner.next() {
        Some(Token::Str(path)) => Ok(path.to_string()),
        _ => Err(scanner.error("expected import path after name")),
    }
}
