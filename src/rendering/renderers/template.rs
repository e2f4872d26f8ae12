//! Label templates for user-defined renderers.
//!
//! Syntax: literal text, `{value}`, `{type}`, `{length}`, `{field:NAME}`.
//! `{{` and `}}` produce literal braces.

use crate::config::theme_keys;
use crate::rendering::text_renderer::ValueTextRenderer;
use crate::rendering::types::ValueDescriptor;

use super::{RenderOptions, render_inline};

/// Errors produced while parsing a label template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unterminated placeholder starting at offset {0}")]
    Unterminated(usize),
    #[error("unmatched '}}' at offset {0}")]
    UnmatchedBrace(usize),
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),
    #[error("empty field name in placeholder")]
    EmptyFieldName,
}

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Value,
    TypeName,
    Length,
    Field(String),
}

/// A parsed label template. Equality is by source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTemplate {
    source: String,
    parts: Vec<TemplatePart>,
}

impl LabelTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed {
                        return Err(TemplateError::Unterminated(offset));
                    }
                    if !literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(parse_placeholder(&name)?);
                }
                '}' => return Err(TemplateError::UnmatchedBrace(offset)),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn render(
        &self,
        value: &ValueDescriptor,
        out: &mut ValueTextRenderer<'_>,
        options: &RenderOptions,
    ) {
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.render_value(text),
                TemplatePart::Value => render_inline(value, out, options),
                TemplatePart::TypeName => out.render_comment(&value.display_type_name()),
                TemplatePart::Length => match value.length() {
                    Some(n) => out.render_raw_value(&n.to_string(), theme_keys::NUMBER),
                    None => out.render_comment("?"),
                },
                TemplatePart::Field(name) => match value.field(name) {
                    Some(field) => render_inline(field, out, options),
                    None => out.render_raw_value("null", theme_keys::KEYWORD),
                },
            }
        }
    }
}

fn parse_placeholder(name: &str) -> Result<TemplatePart, TemplateError> {
    let name = name.trim();
    match name {
        "value" => Ok(TemplatePart::Value),
        "type" => Ok(TemplatePart::TypeName),
        "length" => Ok(TemplatePart::Length),
        _ => match name.strip_prefix("field:") {
            Some(field) if field.trim().is_empty() => Err(TemplateError::EmptyFieldName),
            Some(field) => Ok(TemplatePart::Field(field.trim().to_string())),
            None => Err(TemplateError::UnknownPlaceholder(name.to_string())),
        },
    }
}
