//! Compiled text templates
//!
//! A deliberately small template language for the built-in emitters:
//!
//! - `{{name}}` substitutes a value
//! - `{{#name}}...{{/name}}` repeats the body once per item of a list
//! - `{{?name}}...{{/name}}` renders the body when the value is truthy
//! - `{{^name}}...{{/name}}` renders the body when the value is falsy
//!
//! A block tag alone on its line removes the whole line from the output, so
//! templates can be laid out like the code they produce. Names inside a
//! section resolve against the current item first, then the enclosing
//! contexts.

use crate::error::{CodegenError, CodegenResult};
use std::collections::HashMap;

/// A value bound in a render [`Context`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Flag(bool),
    List(Vec<Context>),
}

impl Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Text(s) => !s.is_empty(),
            Value::Flag(b) => *b,
            Value::List(items) => !items.is_empty(),
        }
    }
}

/// Named values a template renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), Value::Text(value.into()));
        self
    }

    pub fn flag(mut self, key: &str, value: bool) -> Self {
        self.values.insert(key.to_string(), Value::Flag(value));
        self
    }

    pub fn list(mut self, key: &str, items: Vec<Context>) -> Self {
        self.values.insert(key.to_string(), Value::List(items));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Section,
    If,
    Unless,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Var(String),
    Open(BlockKind, String),
    Close(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Var(String),
    Block {
        kind: BlockKind,
        name: String,
        body: Vec<Segment>,
    },
}

/// A template compiled once and rendered many times
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Compile `source`
    ///
    /// # Errors
    ///
    /// [`CodegenError::TemplateCompile`] for unclosed tags, mismatched or
    /// unclosed blocks, and invalid names.
    pub fn compile(name: &str, source: &str) -> CodegenResult<Self> {
        let tokens = tokenize(name, source)?;
        let segments = build_tree(name, tokens)?;
        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    /// Render with `context`
    ///
    /// # Errors
    ///
    /// [`CodegenError::TemplateRender`] when a referenced name is not bound,
    /// or a section is bound to something other than a list.
    pub fn render(&self, context: &Context) -> CodegenResult<String> {
        let mut out = String::new();
        let mut scopes = vec![context];
        self.render_segments(&self.segments, &mut scopes, &mut out)?;
        Ok(out)
    }

    fn render_segments<'c>(
        &self,
        segments: &[Segment],
        scopes: &mut Vec<&'c Context>,
        out: &mut String,
    ) -> CodegenResult<()> {
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(name) => match self.lookup(scopes, name)? {
                    Value::Text(text) => out.push_str(text),
                    Value::Flag(flag) => out.push_str(if *flag { "true" } else { "false" }),
                    Value::List(_) => {
                        return Err(self.render_error(format!("`{}` is a list", name)));
                    }
                },
                Segment::Block { kind, name, body } => {
                    let value = self.lookup(scopes, name)?;
                    match kind {
                        BlockKind::Section => {
                            let Value::List(items) = value else {
                                return Err(
                                    self.render_error(format!("`{}` is not a list", name))
                                );
                            };
                            for item in items {
                                scopes.push(item);
                                let result = self.render_segments(body, scopes, out);
                                scopes.pop();
                                result?;
                            }
                        }
                        BlockKind::If if value.is_truthy() => {
                            self.render_segments(body, scopes, out)?
                        }
                        BlockKind::Unless if !value.is_truthy() => {
                            self.render_segments(body, scopes, out)?
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn lookup<'c>(&self, scopes: &[&'c Context], name: &str) -> CodegenResult<&'c Value> {
        scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .ok_or_else(|| self.render_error(format!("`{}` is not bound", name)))
    }

    fn render_error(&self, message: String) -> CodegenError {
        CodegenError::TemplateRender {
            template: self.name.clone(),
            message,
        }
    }
}

fn compile_error(template: &str, message: impl Into<String>) -> CodegenError {
    CodegenError::TemplateCompile {
        template: template.to_string(),
        message: message.into(),
    }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t' || c == '\r')
}

fn tokenize(template: &str, source: &str) -> CodegenResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = source;
    // A tag has been emitted since the last newline
    let mut line_dirty = false;

    while let Some(start) = rest.find("{{") {
        text.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| compile_error(template, "unclosed `{{`"))?;
        let tag = parse_tag(template, after[..end].trim())?;
        rest = &after[end + 2..];

        let mut standalone = false;
        if !matches!(tag, Token::Var(_)) {
            let before_blank = match text.rfind('\n') {
                Some(i) => is_blank(&text[i + 1..]),
                None => !line_dirty && is_blank(&text),
            };
            let line_end = rest.find('\n');
            let after_blank = is_blank(&rest[..line_end.unwrap_or(rest.len())]);
            if before_blank && after_blank {
                standalone = true;
                let line_start = text.rfind('\n').map(|i| i + 1).unwrap_or(0);
                text.truncate(line_start);
                rest = match line_end {
                    Some(i) => &rest[i + 1..],
                    None => "",
                };
            }
        }

        if text.contains('\n') {
            line_dirty = false;
        }
        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut text)));
        }
        tokens.push(tag);
        if !standalone {
            line_dirty = true;
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    Ok(tokens)
}

fn parse_tag(template: &str, tag: &str) -> CodegenResult<Token> {
    let (kind, name) = match tag.chars().next() {
        Some('#') => (Some(BlockKind::Section), &tag[1..]),
        Some('?') => (Some(BlockKind::If), &tag[1..]),
        Some('^') => (Some(BlockKind::Unless), &tag[1..]),
        Some('/') => (None, &tag[1..]),
        _ => return valid_name(template, tag).map(|n| Token::Var(n.to_string())),
    };
    let name = valid_name(template, name.trim())?.to_string();
    Ok(match kind {
        Some(kind) => Token::Open(kind, name),
        None => Token::Close(name),
    })
}

fn valid_name<'a>(template: &str, name: &'a str) -> CodegenResult<&'a str> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(compile_error(template, format!("invalid tag name `{}`", name)))
    }
}

fn build_tree(template: &str, tokens: Vec<Token>) -> CodegenResult<Vec<Segment>> {
    let mut stack: Vec<(BlockKind, String, Vec<Segment>)> = Vec::new();
    let mut current: Vec<Segment> = Vec::new();

    for token in tokens {
        match token {
            Token::Text(text) => current.push(Segment::Text(text)),
            Token::Var(name) => current.push(Segment::Var(name)),
            Token::Open(kind, name) => stack.push((kind, name, std::mem::take(&mut current))),
            Token::Close(name) => {
                let (kind, open, parent) = stack.pop().ok_or_else(|| {
                    compile_error(template, format!("`{{{{/{}}}}}` without open block", name))
                })?;
                if open != name {
                    return Err(compile_error(
                        template,
                        format!("`{}` closed by `{}`", open, name),
                    ));
                }
                let body = std::mem::replace(&mut current, parent);
                current.push(Segment::Block {
                    kind,
                    name: open,
                    body,
                });
            }
        }
    }

    if let Some((_, open, _)) = stack.pop() {
        return Err(compile_error(template, format!("`{}` is never closed", open)));
    }
    Ok(current)
}
