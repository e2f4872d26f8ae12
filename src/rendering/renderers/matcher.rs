//! User-defined renderers: a type pattern plus a label template.

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::config::Element;
use crate::rendering::codec::{CodecError, RENDERER_ELEMENT};
use crate::rendering::text_renderer::ValueTextRenderer;
use crate::rendering::traits::{USER_PROVIDER, ValueRenderer};
use crate::rendering::types::ValueDescriptor;

use super::RenderOptions;
use super::template::{LabelTemplate, TemplateError};

/// Record `kind` attribute for matcher renderers.
pub const MATCHER_KIND: &str = "matcher";

/// How a [`TypePattern`] interprets its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Type name must equal the pattern.
    Exact,
    /// `*` matches any run of characters, `?` a single one.
    Glob,
    /// Regular expression that must match the whole type name.
    Regex,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Exact => "exact",
            PatternKind::Glob => "glob",
            PatternKind::Regex => "regex",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(PatternKind::Exact),
            "glob" => Ok(PatternKind::Glob),
            "regex" => Ok(PatternKind::Regex),
            other => Err(format!("unknown pattern kind '{other}'")),
        }
    }
}

/// Predicate over type names.
#[derive(Debug, Clone)]
pub struct TypePattern {
    kind: PatternKind,
    source: String,
    compiled: Option<Regex>,
}

impl TypePattern {
    pub fn new(kind: PatternKind, source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let compiled = match kind {
            PatternKind::Exact => None,
            PatternKind::Glob => Some(Regex::new(&glob_to_regex(&source))?),
            PatternKind::Regex => Some(Regex::new(&format!("^(?:{source})$"))?),
        };
        Ok(Self {
            kind,
            source,
            compiled,
        })
    }

    pub fn exact(type_name: impl Into<String>) -> Self {
        Self {
            kind: PatternKind::Exact,
            source: type_name.into(),
            compiled: None,
        }
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, type_name: &str) -> bool {
        match &self.compiled {
            Some(re) => re.is_match(type_name),
            None => self.source == type_name,
        }
    }
}

impl PartialEq for TypePattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.source == other.source
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');
    for c in glob.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');
    out
}

/// A renderer configured by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherRenderer {
    name: String,
    provider: String,
    pattern: TypePattern,
    template: LabelTemplate,
    string_max_length: Option<usize>,
}

impl MatcherRenderer {
    pub fn new(name: impl Into<String>, pattern: TypePattern, template: LabelTemplate) -> Self {
        Self {
            name: name.into(),
            provider: USER_PROVIDER.to_string(),
            pattern,
            template,
            string_max_length: RenderOptions::default().string_max_length,
        }
    }

    /// Shorthand for an exact-type renderer.
    pub fn exact(
        name: impl Into<String>,
        type_name: impl Into<String>,
        template: &str,
    ) -> Result<Self, TemplateError> {
        Ok(Self::new(
            name,
            TypePattern::exact(type_name),
            LabelTemplate::parse(template)?,
        ))
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_string_max_length(mut self, max_length: Option<usize>) -> Self {
        self.string_max_length = max_length;
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_pattern(&mut self, pattern: TypePattern) {
        self.pattern = pattern;
    }

    pub fn set_template(&mut self, template: LabelTemplate) {
        self.template = template;
    }

    pub fn pattern(&self) -> &TypePattern {
        &self.pattern
    }

    pub fn template(&self) -> &LabelTemplate {
        &self.template
    }

    pub fn string_max_length(&self) -> Option<usize> {
        self.string_max_length
    }

    /// Decode a `renderer` record written by [`ValueRenderer::write_record`].
    pub fn read_record(element: &Element) -> Result<Self, CodecError> {
        let required = |attribute: &'static str| {
            element
                .attribute(attribute)
                .ok_or_else(|| CodecError::MissingAttribute {
                    element: RENDERER_ELEMENT,
                    attribute,
                })
        };

        let name = required("name")?;
        let kind_str = required("pattern-kind")?;
        let kind = kind_str
            .parse::<PatternKind>()
            .map_err(|_| CodecError::InvalidAttribute {
                attribute: "pattern-kind",
                value: kind_str.to_string(),
            })?;
        let pattern = TypePattern::new(kind, required("pattern")?)?;
        let template = LabelTemplate::parse(required("template")?)?;
        let string_max_length = match element.attribute("max-length") {
            None => None,
            Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
                CodecError::InvalidAttribute {
                    attribute: "max-length",
                    value: raw.to_string(),
                }
            })?),
        };
        let provider = element.attribute("provider").unwrap_or(USER_PROVIDER);

        Ok(Self {
            name: name.to_string(),
            provider: provider.to_string(),
            pattern,
            template,
            string_max_length,
        })
    }
}

impl ValueRenderer for MatcherRenderer {
    fn name(&self) -> &str {
        &self.name
    }

    fn provider_id(&self) -> &str {
        &self.provider
    }

    fn matches(&self, type_name: &str) -> bool {
        self.pattern.matches(type_name)
    }

    fn render(&self, value: &ValueDescriptor, out: &mut ValueTextRenderer<'_>) {
        let options = RenderOptions {
            string_max_length: self.string_max_length,
            ..RenderOptions::default()
        };
        self.template.render(value, out, &options);
    }

    fn clone_renderer(&self) -> Box<dyn ValueRenderer> {
        Box::new(self.clone())
    }

    fn eq_renderer(&self, other: &dyn ValueRenderer) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o == self)
    }

    fn write_record(&self) -> Result<Element, CodecError> {
        let mut element = Element::new(RENDERER_ELEMENT)
            .with_attribute("kind", MATCHER_KIND)
            .with_attribute("name", &self.name)
            .with_attribute("provider", &self.provider)
            .with_attribute("pattern-kind", self.pattern.kind().as_str())
            .with_attribute("pattern", self.pattern.source())
            .with_attribute("template", self.template.source());
        if let Some(max) = self.string_max_length {
            element.set_attribute("max-length", max.to_string());
        }
        Ok(element)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
