//! Scans JavaScript/TypeScript source just deeply enough to find tagged
//! GraphQL templates without being fooled by strings, comments, regular
//! expressions, or other template literals.

use crate::script::ScriptParseError;

type Result<T> = std::result::Result<T, ScriptParseError>;

/// Keywords after which a `/` starts a regular expression rather than a
/// division.
const KEYWORDS_BEFORE_EXPRESSION: [&str; 14] = [
    "await", "case", "delete", "do", "else", "in", "instanceof", "new", "of",
    "return", "throw", "typeof", "void", "yield",
];

/// A tagged GraphQL template found by the [`ScriptScanner`].
#[derive(Clone, Debug, PartialEq)]
pub(super) struct TemplateMatch {
    /// Byte offset of the tag identifier.
    pub start: usize,
    /// Byte offset just past the closing backtick.
    pub end: usize,
    pub body_start: usize,
    pub body_end: usize,
    pub callee: Option<String>,
}

/// The significant tokens the scanner remembers to disambiguate `/` and to
/// recognize the call a template is passed to.
#[derive(Clone, Debug, PartialEq)]
enum SignificantToken {
    Ident(String),
    Literal,
    /// A postfix `++` or `--`, which ends an operand.
    PostfixUpdate,
    Punct(u8),
}

pub(super) struct ScriptScanner<'src> {
    source: &'src str,
    bytes: &'src [u8],
    graphql_tag: &'src str,
    pos: usize,
    /// The last two significant tokens, most recent last.
    recent: [Option<SignificantToken>; 2],
    matches: Vec<TemplateMatch>,
}

impl<'src> ScriptScanner<'src> {
    pub fn new(source: &'src str, graphql_tag: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            graphql_tag,
            pos: 0,
            recent: [None, None],
            matches: vec![],
        }
    }

    /// Scans the entire source and returns every tagged GraphQL template in
    /// source order.
    pub fn scan(mut self) -> Result<Vec<TemplateMatch>> {
        self.scan_code(false)?;
        Ok(self.matches)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn push_token(&mut self, token: SignificantToken) {
        self.recent.swap(0, 1);
        self.recent[1] = Some(token);
    }

    fn regex_allowed(&self) -> bool {
        match &self.recent[1] {
            None => true,
            Some(SignificantToken::Literal | SignificantToken::PostfixUpdate) => false,
            Some(SignificantToken::Punct(b')' | b']' | b'}')) => false,
            Some(SignificantToken::Punct(_)) => true,
            Some(SignificantToken::Ident(ident)) =>
                KEYWORDS_BEFORE_EXPRESSION.contains(&ident.as_str()),
        }
    }

    fn ends_operand(&self) -> bool {
        match &self.recent[1] {
            None => false,
            Some(SignificantToken::Literal | SignificantToken::PostfixUpdate) => true,
            Some(SignificantToken::Punct(byte)) => matches!(byte, b')' | b']' | b'}'),
            Some(SignificantToken::Ident(ident)) =>
                !KEYWORDS_BEFORE_EXPRESSION.contains(&ident.as_str()),
        }
    }

    /// Scans code until EOF, or until the `}` closing a template substitution
    /// when `in_substitution` is set.
    fn scan_code(&mut self, in_substitution: bool) -> Result<()> {
        let substitution_start = self.pos;
        let mut brace_depth: usize = 0;

        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,

                b'/' if self.peek_at(1) == Some(b'/') => self.skip_line_comment(),

                b'/' if self.peek_at(1) == Some(b'*') => self.skip_block_comment()?,

                b'/' if self.regex_allowed() => {
                    self.skip_regex()?;
                    self.push_token(SignificantToken::Literal);
                },

                b'\'' | b'"' => {
                    self.skip_string(byte)?;
                    self.push_token(SignificantToken::Literal);
                },

                b'`' => {
                    self.skip_template()?;
                    self.push_token(SignificantToken::Literal);
                },

                b'0'..=b'9' => {
                    while let Some(b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'.') = self.peek() {
                        self.pos += 1;
                    }
                    self.push_token(SignificantToken::Literal);
                },

                b'{' => {
                    brace_depth += 1;
                    self.pos += 1;
                    self.push_token(SignificantToken::Punct(byte));
                },

                b'}' => {
                    self.pos += 1;
                    if brace_depth == 0 && in_substitution {
                        return Ok(());
                    }
                    brace_depth = brace_depth.saturating_sub(1);
                    self.push_token(SignificantToken::Punct(byte));
                },

                byte if is_ident_start(byte) => self.scan_ident()?,

                b'+' | b'-' if self.peek_at(1) == Some(byte) => {
                    self.pos += 2;
                    if self.ends_operand() {
                        self.push_token(SignificantToken::PostfixUpdate);
                    } else {
                        self.push_token(SignificantToken::Punct(byte));
                    }
                },

                _ => {
                    self.pos += 1;
                    self.push_token(SignificantToken::Punct(byte));
                },
            }
        }

        if in_substitution {
            return Err(ScriptParseError::UnterminatedTemplate {
                offset: substitution_start,
            });
        }
        Ok(())
    }

    fn scan_ident(&mut self) -> Result<()> {
        let start = self.pos;
        while let Some(byte) = self.peek() && is_ident_continue(byte) {
            self.pos += 1;
        }
        let ident = &self.source[start..self.pos];

        if ident == self.graphql_tag
            && let Some(backtick_pos) = self.next_backtick_after_whitespace() {
            let callee = match &self.recent {
                [Some(SignificantToken::Ident(callee)), Some(SignificantToken::Punct(b'('))] =>
                    Some(callee.to_string()),
                _ => None,
            };
            self.pos = backtick_pos;
            self.scan_graphql_template(start, callee)?;
            self.push_token(SignificantToken::Literal);
            return Ok(());
        }

        self.push_token(SignificantToken::Ident(ident.to_string()));
        Ok(())
    }

    fn next_backtick_after_whitespace(&self) -> Option<usize> {
        let mut pos = self.pos;
        while let Some(byte) = self.bytes.get(pos) {
            match byte {
                b' ' | b'\t' | b'\n' | b'\r' => pos += 1,
                b'`' => return Some(pos),
                _ => return None,
            }
        }
        None
    }

    fn scan_graphql_template(
        &mut self,
        tag_start: usize,
        callee: Option<String>,
    ) -> Result<()> {
        // Skip the opening backtick.
        self.pos += 1;
        let body_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(ScriptParseError::UnterminatedTemplate {
                    offset: tag_start,
                }),
                Some(b'\\') => self.pos = (self.pos + 2).min(self.bytes.len()),
                Some(b'$') if self.peek_at(1) == Some(b'{') => {
                    return Err(ScriptParseError::GraphQLTemplateSubstitution {
                        offset: tag_start,
                        tag: self.graphql_tag.to_string(),
                    });
                },
                Some(b'`') => {
                    let body_end = self.pos;
                    self.pos += 1;
                    self.matches.push(TemplateMatch {
                        start: tag_start,
                        end: self.pos,
                        body_start,
                        body_end,
                        callee,
                    });
                    return Ok(());
                },
                Some(_) => self.pos += 1,
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 2;
        match self.source[self.pos..].find("*/") {
            Some(idx) => {
                self.pos += idx + 2;
                Ok(())
            },
            None => Err(ScriptParseError::UnterminatedComment { offset: start }),
        }
    }

    fn skip_line_comment(&mut self) {
        match self.source[self.pos..].find('\n') {
            Some(idx) => self.pos += idx + 1,
            None => self.pos = self.bytes.len(),
        }
    }

    fn skip_regex(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(ScriptParseError::UnterminatedRegex { offset: start });
                },
                Some(b'\\') => self.pos += 2,
                Some(b'[') => {
                    in_class = true;
                    self.pos += 1;
                },
                Some(b']') => {
                    in_class = false;
                    self.pos += 1;
                },
                Some(b'/') if !in_class => {
                    self.pos += 1;
                    break;
                },
                Some(_) => self.pos += 1,
            }
        }
        // Flags
        while let Some(byte) = self.peek() && is_ident_continue(byte) {
            self.pos += 1;
        }
        Ok(())
    }

    fn skip_string(&mut self, quote: u8) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(ScriptParseError::UnterminatedString { offset: start });
                },
                Some(b'\\') => self.pos += 2,
                Some(byte) if byte == quote => {
                    self.pos += 1;
                    return Ok(());
                },
                Some(_) => self.pos += 1,
            }
        }
    }

    fn skip_template(&mut self) -> Result<()> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None => return Err(ScriptParseError::UnterminatedTemplate { offset: start }),
                Some(b'\\') => self.pos += 2,
                Some(b'`') => {
                    self.pos += 1;
                    return Ok(());
                },
                Some(b'$') if self.peek_at(1) == Some(b'{') => {
                    self.pos += 2;
                    self.scan_code(true)?;
                },
                Some(_) => self.pos += 1,
            }
        }
    }
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$' || byte >= 0x80
}

fn is_ident_continue(byte: u8) -> bool {
    is_ident_start(byte) || byte.is_ascii_digit()
}
