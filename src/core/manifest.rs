//! `go.work` and `go.mod` parsing.
//!
//! Only the directives the dependency graph consumes are interpreted:
//! `use` in the workspace manifest, and `module`, `require` and `replace` in
//! module manifests. Other known directives are accepted and skipped; unknown
//! ones are rejected the way the Go tool rejects them.

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Workspace manifest file name.
pub const WORKSPACE_MANIFEST: &str = "go.work";

/// Module manifest file name.
pub const MODULE_MANIFEST: &str = "go.mod";

/// A manifest that could not be parsed.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("{file}:{line}: {message}")]
#[diagnostic(
    code(depgraph::manifest::parse),
    help("Run `go mod tidy` or fix the directive by hand")
)]
pub struct ManifestParseError {
    pub file: String,
    pub line: usize,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

/// A `require` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Require {
    pub path: String,
    pub version: String,
}

/// A `replace` entry. `new_path` is either a module path or a directory
/// relative to the declaring module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    pub old_path: String,
    pub old_version: Option<String>,
    pub new_path: String,
    pub new_version: Option<String>,
}

/// Parsed `go.mod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModFile {
    /// Canonical module path from the `module` directive.
    pub module: String,
    pub go_version: Option<String>,
    pub requires: Vec<Require>,
    pub replaces: Vec<Replace>,
}

/// Parsed `go.work`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkFile {
    pub go_version: Option<String>,
    /// Member directories in declaration order, as written.
    pub uses: Vec<String>,
}

impl ModFile {
    /// Parse module manifest text. `name` is used in error messages.
    pub fn parse(name: &str, text: &str) -> Result<Self, ManifestParseError> {
        let parser = Parser::new(name, text);

        let mut module: Option<String> = None;
        let mut go_version = None;
        let mut requires = Vec::new();
        let mut replaces = Vec::new();

        for entry in parser.entries()? {
            match entry.verb.as_str() {
                "module" => {
                    if module.is_some() {
                        return Err(parser.entry_error(&entry, "repeated module statement"));
                    }
                    let path = parser.single_arg(&entry, "usage: module module/path")?;
                    if path.is_empty() {
                        return Err(parser.entry_error(&entry, "empty module path"));
                    }
                    module = Some(path);
                }
                "go" => {
                    go_version = Some(parser.single_arg(&entry, "usage: go 1.23")?);
                }
                "require" => {
                    if entry.args.len() != 2 {
                        return Err(
                            parser.entry_error(&entry, "usage: require module/path v1.2.3")
                        );
                    }
                    requires.push(Require {
                        path: entry.args[0].text.clone(),
                        version: entry.args[1].text.clone(),
                    });
                }
                "replace" => replaces.push(parser.replace(&entry)?),
                "exclude" | "retract" | "toolchain" | "godebug" | "tool" | "ignore" => {}
                other => {
                    return Err(
                        parser.entry_error(&entry, &format!("unknown directive: {}", other))
                    );
                }
            }
        }

        let module = module.ok_or_else(|| parser.error(0, 0, "no module directive found"))?;

        Ok(ModFile {
            module,
            go_version,
            requires,
            replaces,
        })
    }
}

impl WorkFile {
    /// Parse workspace manifest text. `name` is used in error messages.
    pub fn parse(name: &str, text: &str) -> Result<Self, ManifestParseError> {
        let parser = Parser::new(name, text);

        let mut go_version = None;
        let mut uses = Vec::new();

        for entry in parser.entries()? {
            match entry.verb.as_str() {
                "go" => go_version = Some(parser.single_arg(&entry, "usage: go 1.23")?),
                "use" => uses.push(parser.single_arg(&entry, "usage: use local/dir")?),
                "toolchain" | "godebug" | "replace" => {}
                other => {
                    return Err(
                        parser.entry_error(&entry, &format!("unknown directive: {}", other))
                    );
                }
            }
        }

        Ok(WorkFile { go_version, uses })
    }
}

#[derive(Debug, Clone)]
struct Token {
    text: String,
    offset: usize,
    len: usize,
    quoted: bool,
}

impl Token {
    fn is(&self, punct: &str) -> bool {
        !self.quoted && self.text == punct
    }

    fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// One directive, either on its own line or as a line inside a block.
#[derive(Debug)]
struct Entry {
    verb: String,
    args: Vec<Token>,
    offset: usize,
    len: usize,
}

struct Parser<'a> {
    name: &'a str,
    text: &'a str,
}

impl<'a> Parser<'a> {
    fn new(name: &'a str, text: &'a str) -> Self {
        Parser { name, text }
    }

    fn error(&self, offset: usize, len: usize, message: &str) -> ManifestParseError {
        ManifestParseError {
            file: self.name.to_string(),
            line: self.text[..offset.min(self.text.len())].matches('\n').count() + 1,
            message: message.to_string(),
            src: NamedSource::new(self.name, self.text.to_string()),
            span: SourceSpan::from((offset, len)),
        }
    }

    fn entry_error(&self, entry: &Entry, message: &str) -> ManifestParseError {
        self.error(entry.offset, entry.len, message)
    }

    fn single_arg(&self, entry: &Entry, usage: &str) -> Result<String, ManifestParseError> {
        match entry.args.as_slice() {
            [arg] => Ok(arg.text.clone()),
            _ => Err(self.entry_error(entry, usage)),
        }
    }

    fn replace(&self, entry: &Entry) -> Result<Replace, ManifestParseError> {
        const USAGE: &str =
            "usage: replace module/path [v1.2.3] => other/module v1.4\n\t or replace module/path [v1.2.3] => ../local/directory";

        let arrow = entry
            .args
            .iter()
            .position(|t| t.is("=>"))
            .ok_or_else(|| self.entry_error(entry, USAGE))?;
        let (old, new) = (&entry.args[..arrow], &entry.args[arrow + 1..]);

        match (old, new) {
            ([old_path, old_version @ ..], [new_path, new_version @ ..])
                if old_version.len() <= 1 && new_version.len() <= 1 =>
            {
                Ok(Replace {
                    old_path: old_path.text.clone(),
                    old_version: old_version.first().map(|t| t.text.clone()),
                    new_path: new_path.text.clone(),
                    new_version: new_version.first().map(|t| t.text.clone()),
                })
            }
            _ => Err(self.entry_error(entry, USAGE)),
        }
    }

    /// Split the manifest into directives, expanding `verb ( ... )` blocks.
    fn entries(&self) -> Result<Vec<Entry>, ManifestParseError> {
        let mut entries = Vec::new();
        let mut block: Option<Token> = None;
        let mut offset = 0;

        for line in self.text.split_inclusive('\n') {
            let base = offset;
            offset += line.len();

            let tokens = self.lex_line(line, base)?;
            if tokens.is_empty() {
                continue;
            }

            if let Some(open) = &block {
                if tokens.len() == 1 && tokens[0].is(")") {
                    block = None;
                    continue;
                }
                if let Some(paren) = tokens.iter().find(|t| t.is("(") || t.is(")")) {
                    return Err(self.error(paren.offset, paren.len, "unexpected parenthesis in block"));
                }
                let start = tokens[0].offset;
                entries.push(Self::entry(open.text.clone(), start, tokens));
                continue;
            }

            let head = &tokens[0];
            if head.quoted || head.is("(") || head.is(")") {
                return Err(self.error(head.offset, head.len, "expected directive"));
            }

            let opens_block = tokens.len() == 2 && tokens[1].is("(");
            let empty_block = tokens.len() == 3 && tokens[1].is("(") && tokens[2].is(")");
            if opens_block {
                block = Some(tokens[0].clone());
                continue;
            }
            if empty_block {
                continue;
            }

            let mut args = tokens;
            let verb = args.remove(0);
            entries.push(Self::entry(verb.text, verb.offset, args));
        }

        if let Some(open) = block {
            return Err(self.error(
                open.offset,
                open.len,
                &format!("unterminated {} block", open.text),
            ));
        }

        Ok(entries)
    }

    fn entry(verb: String, start: usize, args: Vec<Token>) -> Entry {
        let end = args.last().map_or(start + verb.len(), Token::end);
        Entry {
            verb,
            args,
            offset: start,
            len: end - start,
        }
    }

    fn lex_line(&self, line: &str, base: usize) -> Result<Vec<Token>, ManifestParseError> {
        let mut tokens = Vec::new();
        let mut chars = line.char_indices().peekable();

        while let Some(&(start, c)) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }
            if line[start..].starts_with("//") {
                break;
            }

            match c {
                '(' | ')' => {
                    chars.next();
                    tokens.push(Token {
                        text: c.to_string(),
                        offset: base + start,
                        len: 1,
                        quoted: false,
                    });
                }
                '"' | '`' => {
                    chars.next();
                    let mut value = String::new();
                    let mut closed = None;
                    while let Some((i, ch)) = chars.next() {
                        if ch == c {
                            closed = Some(i);
                            break;
                        }
                        if ch == '\n' {
                            break;
                        }
                        if ch == '\\' && c == '"' {
                            if let Some((_, escaped)) = chars.next() {
                                value.push(escaped);
                            }
                            continue;
                        }
                        value.push(ch);
                    }
                    let end = closed.ok_or_else(|| {
                        self.error(
                            base + start,
                            line.trim_end().len() - start,
                            "unterminated quoted string",
                        )
                    })?;
                    tokens.push(Token {
                        text: value,
                        offset: base + start,
                        len: end + 1 - start,
                        quoted: true,
                    });
                }
                _ => {
                    let mut end = line.len();
                    while let Some(&(i, ch)) = chars.peek() {
                        if ch.is_whitespace()
                            || matches!(ch, '(' | ')' | '"' | '`')
                            || line[i..].starts_with("//")
                        {
                            end = i;
                            break;
                        }
                        chars.next();
                    }
                    tokens.push(Token {
                        text: line[start..end].to_string(),
                        offset: base + start,
                        len: end - start,
                        quoted: false,
                    });
                }
            }
        }

        Ok(tokens)
    }
}
