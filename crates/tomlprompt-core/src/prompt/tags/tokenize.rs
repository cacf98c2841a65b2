//! Tokenization of inline `<name:args>` tags
//!
//! Provides single-pass tokenization using a small state machine. Tags do
//! not nest: `name` holds no `:`, `<` or `>`, `args` holds no `>`, and both
//! must be non-empty. Only the known kinds may carry `<` in their `args`; for
//! any other name a `<` starts a new tag.

/// Classified tag
///
/// Tags that do not fit the shape of a known kind become `Literal` and are
/// left in the text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<'a> {
    /// `<lora:name:strength>`
    Lora { name: &'a str, strength: &'a str },

    /// `<if:cond1,cond2:then:else>`
    If {
        conditions: Vec<&'a str>,
        then_line: &'a str,
        else_line: &'a str,
    },

    /// `<if_not:cond1,cond2:then:else>`
    IfNot {
        conditions: Vec<&'a str>,
        then_line: &'a str,
        else_line: &'a str,
    },

    /// `<raw:text>`
    Raw(&'a str),

    /// `<!:text>`
    Negative(&'a str),

    /// Any other `<name:args>`
    Literal { name: &'a str, args: &'a str },
}

impl<'a> Tag<'a> {
    /// Classify a tag from its name and argument text
    pub fn classify(name: &'a str, args: &'a str) -> Self {
        let literal = Tag::Literal { name, args };
        match name {
            "lora" => parse_lora(args).unwrap_or(literal),
            "if" => parse_conditional(args)
                .map(|(conditions, then_line, else_line)| Tag::If {
                    conditions,
                    then_line,
                    else_line,
                })
                .unwrap_or(literal),
            "if_not" => parse_conditional(args)
                .map(|(conditions, then_line, else_line)| Tag::IfNot {
                    conditions,
                    then_line,
                    else_line,
                })
                .unwrap_or(literal),
            "raw" => Tag::Raw(args),
            "!" => Tag::Negative(args),
            _ => literal,
        }
    }
}

/// Names classified into a kind other than `Literal`
const KNOWN_NAMES: [&str; 5] = ["lora", "if", "if_not", "raw", "!"];

/// `name:strength`; the strength is checked later, when it is used
fn parse_lora(args: &str) -> Option<Tag<'_>> {
    let (name, strength) = args.split_once(':')?;
    if name.is_empty() || strength.is_empty() || strength.contains(':') {
        return None;
    }
    Some(Tag::Lora { name, strength })
}

/// Whether a LoRA strength has the digits-and-dots form
pub fn is_numeric_strength(strength: &str) -> bool {
    !strength.is_empty() && strength.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

/// `conds:then:else`; `else` keeps any further colons
fn parse_conditional(args: &str) -> Option<(Vec<&str>, &str, &str)> {
    let mut parts = args.splitn(3, ':');
    let conditions = parts.next()?;
    let then_line = parts.next()?;
    let else_line = parts.next()?;
    if conditions.is_empty() {
        return None;
    }
    Some((conditions.split(',').map(str::trim).collect(), then_line, else_line))
}

/// A single tag with its position in the scanned text
#[derive(Debug, Clone, PartialEq)]
pub struct TagToken<'a> {
    pub tag: Tag<'a>,
    /// Byte position of `<`
    pub start: usize,
    /// Total length in bytes including `<` and `>`
    pub length: usize,
}

impl TagToken<'_> {
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Tokenization state machine
///
/// ```text
/// Normal ──<──> InName ──:──> InArgs ──>──> [Yield Tag] → Normal
///                 │ <: restart    │ <: restart (unknown name only)
///                 │ >: → Normal
/// ```
///
/// Empty names or args fall back to `Normal` without yielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InName { start: usize },
    InArgs { start: usize, colon: usize },
}

/// Iterator over the tags of a text, left to right, non-overlapping
pub struct TagStream<'a> {
    text: &'a str,
    pos: usize,
    state: ScanState,
}

impl<'a> TagStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            state: ScanState::Normal,
        }
    }

    fn process_normal(&mut self, byte: u8) {
        if byte == b'<' {
            self.state = ScanState::InName { start: self.pos };
        }
    }

    fn process_in_name(&mut self, byte: u8, start: usize) {
        match byte {
            b'<' => self.state = ScanState::InName { start: self.pos },
            b'>' => self.state = ScanState::Normal,
            b':' if self.pos > start + 1 => {
                self.state = ScanState::InArgs {
                    start,
                    colon: self.pos,
                }
            }
            b':' => self.state = ScanState::Normal,
            _ => {}
        }
    }

    fn process_in_args(&mut self, byte: u8, start: usize, colon: usize) -> Option<TagToken<'a>> {
        match byte {
            b'<' if !KNOWN_NAMES.contains(&&self.text[start + 1..colon]) => {
                self.state = ScanState::InName { start: self.pos };
                return None;
            }
            b'>' => {}
            _ => return None,
        }

        self.state = ScanState::Normal;
        if self.pos == colon + 1 {
            return None;
        }

        let name = &self.text[start + 1..colon];
        let args = &self.text[colon + 1..self.pos];
        Some(TagToken {
            tag: Tag::classify(name, args),
            start,
            length: self.pos + 1 - start,
        })
    }
}

impl<'a> Iterator for TagStream<'a> {
    type Item = TagToken<'a>;

    fn next(&mut self) -> Option<TagToken<'a>> {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let byte = bytes[self.pos];
            let token = match self.state {
                ScanState::Normal => {
                    self.process_normal(byte);
                    None
                }
                ScanState::InName { start } => {
                    self.process_in_name(byte, start);
                    None
                }
                ScanState::InArgs { start, colon } => self.process_in_args(byte, start, colon),
            };
            self.pos += 1;

            if token.is_some() {
                return token;
            }
        }
        None
    }
}

/// The tag spanning all of `text`, if `text` is exactly one tag
pub fn single_tag(text: &str) -> Option<Tag<'_>> {
    let token = TagStream::new(text).next()?;
    (token.start == 0 && token.end() == text.len()).then_some(token.tag)
}
