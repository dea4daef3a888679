// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-pass pattern compiler.
//!
//! The scanner walks the pattern one `char` at a time with a single state
//! variable and emits positional matchers into a [`Conjunction`] as each
//! segment completes. Positions in errors are character indexes.

use super::conjunction::Conjunction;
use super::element::{ElementMatcher, Key};
use super::error::{CompileError, PatternError};
use super::positional::PositionalMatcher;
use crate::expr::Expr;
use crate::types::TypeRegistry;

/// Output of a successful compile.
#[derive(Debug)]
pub(crate) struct Compiled {
    pub conjunction: Conjunction,
    pub left_anchored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first segment.
    Start,
    /// Between tokens.
    Normal,
    /// Inside `# ...`.
    Comment,
    /// After one `*`.
    IndeterminateGlob,
    /// After `**`.
    GreedyGlob,
    /// After one or two `.` following an identifier.
    IndeterminatePeriod,
    /// After a subtype test.
    Ellipsis,
    Identifier,
    /// Inside `[...]`.
    Reference,
    /// Inside `(...)`.
    PropertyBlock,
    /// After `$`.
    End,
}

/// What the current segment holds so far. Qualifiers must follow this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Empty,
    Glob,
    Test,
    Property,
    Reference,
}

pub(crate) fn compile(pattern: &str, registry: &TypeRegistry) -> Result<Compiled, PatternError> {
    let mut compiler = Compiler::new(pattern, registry);
    for (pos, c) in pattern.chars().enumerate() {
        compiler.step(pos, c)?;
    }
    compiler.finish(pattern.chars().count())?;
    tracing::debug!(
        "compiled {:?} into {} matchers",
        pattern,
        compiler.conjunction.len()
    );
    Ok(Compiled {
        conjunction: compiler.conjunction,
        left_anchored: compiler.left_anchored,
    })
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct Compiler<'a> {
    pattern: &'a str,
    registry: &'a TypeRegistry,
    state: State,
    /// State a comment returns to.
    resume: State,
    buffer: String,
    /// Position of the first buffered character.
    token_start: usize,
    periods: usize,
    depth: i64,
    greedy: bool,
    left_anchored: bool,
    segment: Segment,
    conjunction: Conjunction,
}

impl<'a> Compiler<'a> {
    fn new(pattern: &'a str, registry: &'a TypeRegistry) -> Self {
        Self {
            pattern,
            registry,
            state: State::Start,
            resume: State::Start,
            buffer: String::new(),
            token_start: 0,
            periods: 0,
            depth: 0,
            greedy: false,
            left_anchored: false,
            segment: Segment::Empty,
            conjunction: Conjunction::new(),
        }
    }

    fn error(&self, position: usize, message: impl Into<String>) -> PatternError {
        PatternError::Syntax(CompileError {
            message: message.into(),
            position,
            pattern: self.pattern.to_string(),
        })
    }

    fn unexpected(&self, position: usize, c: char) -> PatternError {
        self.error(position, format!("unexpected character '{c}'"))
    }

    fn step(&mut self, pos: usize, c: char) -> Result<(), PatternError> {
        match self.state {
            State::Start => self.start(pos, c),
            State::Normal | State::Ellipsis => self.normal(pos, c),
            State::Comment => {
                if c == '\n' || c == '\r' {
                    self.state = self.resume;
                }
                Ok(())
            }
            State::IndeterminateGlob => self.indeterminate_glob(pos, c),
            State::GreedyGlob => match c {
                c if c.is_whitespace() => Ok(()),
                '/' => self.slash(pos),
                '#' => self.comment(),
                c => Err(self.unexpected(pos, c)),
            },
            State::IndeterminatePeriod => self.indeterminate_period(pos, c),
            State::Identifier => self.identifier(pos, c),
            State::Reference => {
                if c == ']' {
                    self.close_reference(pos)
                } else {
                    self.buffer.push(c);
                    Ok(())
                }
            }
            State::PropertyBlock => {
                if c == ')' {
                    self.close_property_block()
                } else {
                    self.buffer.push(c);
                    Ok(())
                }
            }
            State::End => match c {
                c if c.is_whitespace() => Ok(()),
                '#' => self.comment(),
                c => Err(self.error(pos, format!("unexpected character '{c}' after `$`"))),
            },
        }
    }

    fn start(&mut self, pos: usize, c: char) -> Result<(), PatternError> {
        match c {
            c if c.is_whitespace() => Ok(()),
            '^' if !self.left_anchored => {
                self.left_anchored = true;
                Ok(())
            }
            '/' => {
                self.left_anchored = true;
                self.state = State::Normal;
                Ok(())
            }
            '#' => self.comment(),
            '*' => {
                self.token_start = pos;
                self.state = State::IndeterminateGlob;
                Ok(())
            }
            c if is_ident_start(c) => {
                self.begin_identifier(pos, c);
                Ok(())
            }
            c => Err(self.unexpected(pos, c)),
        }
    }

    fn normal(&mut self, pos: usize, c: char) -> Result<(), PatternError> {
        match c {
            c if c.is_whitespace() => Ok(()),
            '/' => self.slash(pos),
            '#' => self.comment(),
            '*' | '(' | '[' | '$' => self.qualify(pos, c),
            c if is_ident_start(c) => {
                if self.segment != Segment::Empty {
                    return Err(self.error(pos, "expected `/` before the next segment"));
                }
                self.begin_identifier(pos, c);
                Ok(())
            }
            c => Err(self.unexpected(pos, c)),
        }
    }

    /// Handles `*`, `(`, `[` and `$` against the current segment.
    fn qualify(&mut self, pos: usize, c: char) -> Result<(), PatternError> {
        let allowed = match c {
            '*' => self.segment == Segment::Empty,
            '(' => self.segment == Segment::Test,
            '[' => matches!(self.segment, Segment::Test | Segment::Property),
            _ => matches!(
                self.segment,
                Segment::Test | Segment::Property | Segment::Reference
            ),
        };
        if !allowed {
            return Err(match self.segment {
                _ if c == '*' => self.error(pos, "expected `/` before the next segment"),
                Segment::Empty => self.error(pos, format!("'{c}' needs a type test before it")),
                Segment::Glob => self.error(pos, format!("a wildcard cannot take '{c}'")),
                _ => self.error(pos, format!("'{c}' is out of order in this segment")),
            });
        }
        match c {
            '*' => {
                self.token_start = pos;
                self.state = State::IndeterminateGlob;
            }
            '(' => {
                self.buffer.clear();
                self.token_start = pos + 1;
                self.state = State::PropertyBlock;
            }
            '[' => {
                self.buffer.clear();
                self.token_start = pos + 1;
                self.state = State::Reference;
            }
            _ => self.anchor_end(),
        }
        Ok(())
    }

    fn comment(&mut self) -> Result<(), PatternError> {
        self.resume = match self.state {
            State::Start | State::GreedyGlob | State::End => self.state,
            _ => State::Normal,
        };
        self.state = State::Comment;
        Ok(())
    }

    fn slash(&mut self, pos: usize) -> Result<(), PatternError> {
        if self.segment == Segment::Empty {
            return Err(self.error(pos, "empty segment before `/`"));
        }
        if self.greedy {
            self.depth -= 1;
        } else {
            self.depth += 1;
        }
        self.segment = Segment::Empty;
        self.state = State::Normal;
        Ok(())
    }

    fn begin_identifier(&mut self, pos: usize, c: char) {
        self.buffer.clear();
        self.buffer.push(c);
        self.token_start = pos;
        self.state = State::Identifier;
    }

    fn identifier(&mut self, pos: usize, c: char) -> Result<(), PatternError> {
        match c {
            c if is_ident_part(c) => {
                self.buffer.push(c);
                Ok(())
            }
            '.' => {
                self.periods = 1;
                self.state = State::IndeterminatePeriod;
                Ok(())
            }
            '\u{2026}' => self.emit_subtype(),
            c if c.is_whitespace() => {
                self.emit_type_name();
                self.state = State::Normal;
                Ok(())
            }
            '/' | '(' | '[' | '$' | '#' => {
                self.emit_type_name();
                self.state = State::Normal;
                self.normal(pos, c)
            }
            c => Err(self.unexpected(pos, c)),
        }
    }

    fn indeterminate_period(&mut self, pos: usize, c: char) -> Result<(), PatternError> {
        match c {
            '.' => {
                self.periods += 1;
                if self.periods == 3 {
                    self.periods = 0;
                    self.emit_subtype()?;
                }
                Ok(())
            }
            c if is_ident_start(c) && self.periods == 1 => {
                self.buffer.push('.');
                self.buffer.push(c);
                self.state = State::Identifier;
                Ok(())
            }
            _ => Err(self.error(pos, "incomplete ellipsis")),
        }
    }

    fn indeterminate_glob(&mut self, pos: usize, c: char) -> Result<(), PatternError> {
        match c {
            '*' => {
                if self.greedy {
                    return Err(self.error(pos, "`**` may appear only once"));
                }
                tracing::trace!("greedy wildcard at depth {}", self.depth);
                self.greedy = true;
                self.depth = 0;
                self.segment = Segment::Glob;
                self.state = State::GreedyGlob;
                Ok(())
            }
            c if c.is_whitespace() => {
                self.emit_glob();
                self.state = State::Normal;
                Ok(())
            }
            '/' | '#' => {
                self.emit_glob();
                self.state = State::Normal;
                self.normal(pos, c)
            }
            c => Err(self.unexpected(pos, c)),
        }
    }

    fn close_property_block(&mut self) -> Result<(), PatternError> {
        let source = std::mem::take(&mut self.buffer);
        let expr = Expr::parse(&source).map_err(|e| {
            let offset = source
                .char_indices()
                .take_while(|(i, _)| *i < e.position)
                .count();
            self.error(
                self.token_start + offset,
                format!("invalid property block: {}", e.message),
            )
        })?;
        self.add(ElementMatcher::Expression { source, expr });
        self.segment = Segment::Property;
        self.state = State::Normal;
        Ok(())
    }

    fn close_reference(&mut self, pos: usize) -> Result<(), PatternError> {
        let Some(key) = Key::parse(&self.buffer) else {
            return Err(self.error(pos, "empty reference"));
        };
        self.buffer.clear();
        self.add(ElementMatcher::Capture(key));
        self.segment = Segment::Reference;
        self.state = State::Normal;
        Ok(())
    }

    /// Re-adds the last matcher with the end-of-chain constraint.
    fn anchor_end(&mut self) {
        if let Some(last) = self.conjunction.pop() {
            self.conjunction.add(last.terminal());
        }
        self.state = State::End;
    }

    fn emit_type_name(&mut self) {
        let name = std::mem::take(&mut self.buffer);
        self.add(ElementMatcher::TypeName(name));
        self.segment = Segment::Test;
    }

    fn emit_subtype(&mut self) -> Result<(), PatternError> {
        let name = std::mem::take(&mut self.buffer);
        if !self.registry.is_known(&name) {
            return Err(PatternError::UnknownType {
                name,
                position: self.token_start,
                pattern: self.pattern.to_string(),
            });
        }
        self.add(ElementMatcher::Subtype(name));
        self.segment = Segment::Test;
        self.state = State::Ellipsis;
        Ok(())
    }

    fn emit_glob(&mut self) {
        self.add(ElementMatcher::Subtype(self.registry.root().to_string()));
        self.segment = Segment::Glob;
    }

    fn add(&mut self, element: ElementMatcher) {
        tracing::trace!("matcher {} at depth {}", element, self.depth);
        self.conjunction
            .add(PositionalMatcher::new(self.depth, element));
    }

    fn finish(&mut self, len: usize) -> Result<(), PatternError> {
        let state = match self.state {
            State::Comment => self.resume,
            state => state,
        };
        match state {
            State::Identifier => self.emit_type_name(),
            State::IndeterminateGlob => self.emit_glob(),
            State::IndeterminatePeriod => return Err(self.error(len, "incomplete ellipsis")),
            State::PropertyBlock => {
                return Err(self.error(self.token_start - 1, "unterminated property block"));
            }
            State::Reference => {
                return Err(self.error(self.token_start - 1, "unterminated reference"));
            }
            State::Normal if self.segment == Segment::Empty => {
                return Err(self.error(len, "expected a type test after `/`"));
            }
            State::Start
            | State::Normal
            | State::Comment
            | State::GreedyGlob
            | State::Ellipsis
            | State::End => {}
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
