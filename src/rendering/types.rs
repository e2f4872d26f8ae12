//! Core data types for value rendering.

use std::borrow::Cow;

use crate::config::TextAttributes;

/// JVM scalar type keywords.
const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// A runtime value captured from the debuggee, ready to be rendered.
///
/// Immutable once captured. Renderers only borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDescriptor {
    /// Runtime type name, either in display form (`int[]`, `java.util.List`)
    /// or JVM signature form (`[I`, `Ljava/lang/String;`).
    pub type_name: String,
    /// The captured value.
    pub payload: ValuePayload,
}

/// Captured value contents.
#[derive(Debug, Clone, PartialEq)]
pub enum ValuePayload {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Array(Vec<ValueDescriptor>),
    Object { id: u64, fields: Vec<Field> },
}

/// A named object field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: ValueDescriptor,
}

impl Field {
    pub fn new(name: impl Into<String>, value: ValueDescriptor) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl ValueDescriptor {
    pub fn new(type_name: impl Into<String>, payload: ValuePayload) -> Self {
        Self {
            type_name: type_name.into(),
            payload,
        }
    }

    pub fn null(type_name: impl Into<String>) -> Self {
        Self::new(type_name, ValuePayload::Null)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new("boolean", ValuePayload::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        Self::new("int", ValuePayload::Int(value))
    }

    pub fn long(value: i64) -> Self {
        Self::new("long", ValuePayload::Int(value))
    }

    pub fn double(value: f64) -> Self {
        Self::new("double", ValuePayload::Float(value))
    }

    pub fn char(value: char) -> Self {
        Self::new("char", ValuePayload::Char(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new("java.lang.String", ValuePayload::Str(value.into()))
    }

    /// An array whose type name is `element_type[]`.
    pub fn array(element_type: &str, items: Vec<ValueDescriptor>) -> Self {
        Self::new(format!("{element_type}[]"), ValuePayload::Array(items))
    }

    pub fn object(type_name: impl Into<String>, id: u64, fields: Vec<Field>) -> Self {
        Self::new(type_name, ValuePayload::Object { id, fields })
    }

    /// Shape of this value's declared type.
    pub fn shape(&self) -> TypeShape {
        TypeShape::of(&self.type_name)
    }

    /// Look up an object field by name.
    pub fn field(&self, name: &str) -> Option<&ValueDescriptor> {
        match &self.payload {
            ValuePayload::Object { fields, .. } => {
                fields.iter().find(|f| f.name == name).map(|f| &f.value)
            }
            _ => None,
        }
    }

    /// Element count for arrays, character count for strings.
    pub fn length(&self) -> Option<usize> {
        match &self.payload {
            ValuePayload::Array(items) => Some(items.len()),
            ValuePayload::Str(s) => Some(s.chars().count()),
            _ => None,
        }
    }

    /// Type name in display form.
    pub fn display_type_name(&self) -> Cow<'_, str> {
        display_type_name(&self.type_name)
    }

    /// Unqualified type name without generic arguments, e.g. `List` for
    /// `java.util.List<String>`.
    pub fn short_type_name(&self) -> String {
        let display = self.display_type_name();
        let base = display.split('<').next().unwrap_or_default();
        base.rsplit(['.', '$'])
            .next()
            .unwrap_or(base)
            .to_string()
    }
}

/// Coarse classification of a runtime type, used by the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    Array,
    Primitive,
    Class,
}

impl TypeShape {
    /// Classify a type name. Arrays end in `[]` or use the `[` signature
    /// prefix; primitives are the JVM scalar keywords or signature letters.
    pub fn of(type_name: &str) -> Self {
        let t = type_name.trim();
        if t.ends_with("[]") || t.starts_with('[') {
            TypeShape::Array
        } else if PRIMITIVE_TYPES.contains(&t) || primitive_for_signature(t).is_some() {
            TypeShape::Primitive
        } else {
            TypeShape::Class
        }
    }
}

fn primitive_for_signature(sig: &str) -> Option<&'static str> {
    Some(match sig {
        "Z" => "boolean",
        "B" => "byte",
        "C" => "char",
        "S" => "short",
        "I" => "int",
        "J" => "long",
        "F" => "float",
        "D" => "double",
        _ => return None,
    })
}

/// Convert a JVM signature (`[I`, `Ljava/lang/String;`, `J`) to display
/// form (`int[]`, `java.lang.String`, `long`). Display-form names are
/// returned unchanged.
pub fn display_type_name(type_name: &str) -> Cow<'_, str> {
    let t = type_name.trim();
    if let Some(element) = t.strip_prefix('[') {
        return Cow::Owned(format!("{}[]", display_type_name(element)));
    }
    if let Some(name) = primitive_for_signature(t) {
        return Cow::Borrowed(name);
    }
    if let Some(class) = t.strip_prefix('L').and_then(|s| s.strip_suffix(';')) {
        return Cow::Owned(class.replace('/', "."));
    }
    Cow::Borrowed(t)
}

/// Style classification of an emitted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// Plain text.
    Regular,
    /// Attributes resolved from a theme key.
    Themed,
    /// String quotes and string contents.
    String,
    /// Gray comments and type hints.
    Comment,
    /// Separators, escapes and markers.
    SpecialSymbol,
}

/// Presentation of one segment: its classification plus resolved attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStyle {
    pub kind: StyleKind,
    pub attributes: TextAttributes,
}

impl SegmentStyle {
    pub const REGULAR: SegmentStyle = SegmentStyle {
        kind: StyleKind::Regular,
        attributes: TextAttributes::REGULAR,
    };

    pub const COMMENT: SegmentStyle = SegmentStyle {
        kind: StyleKind::Comment,
        attributes: TextAttributes::GRAY,
    };

    pub const SPECIAL_SYMBOL: SegmentStyle = SegmentStyle {
        kind: StyleKind::SpecialSymbol,
        attributes: TextAttributes::REGULAR,
    };

    pub const fn new(kind: StyleKind, attributes: TextAttributes) -> Self {
        Self { kind, attributes }
    }
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub style: SegmentStyle,
}

impl StyledSegment {
    pub fn new(text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn kind(&self) -> StyleKind {
        self.style.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_classification() {
        assert_eq!(TypeShape::of("int[]"), TypeShape::Array);
        assert_eq!(TypeShape::of("java.lang.String[][]"), TypeShape::Array);
        assert_eq!(TypeShape::of("[I"), TypeShape::Array);
        assert_eq!(TypeShape::of("int"), TypeShape::Primitive);
        assert_eq!(TypeShape::of("J"), TypeShape::Primitive);
        assert_eq!(TypeShape::of("java.lang.Integer"), TypeShape::Class);
        assert_eq!(TypeShape::of("Ljava/lang/String;"), TypeShape::Class);
        assert_eq!(TypeShape::of("Integer"), TypeShape::Class);
    }

    #[test]
    fn test_display_type_name() {
        assert_eq!(display_type_name("[I"), "int[]");
        assert_eq!(display_type_name("[[Ljava/lang/String;"), "java.lang.String[][]");
        assert_eq!(display_type_name("Z"), "boolean");
        assert_eq!(display_type_name("java.util.Map"), "java.util.Map");
    }

    #[test]
    fn test_short_type_name() {
        let v = ValueDescriptor::null("java.util.List<java.lang.String>");
        assert_eq!(v.short_type_name(), "List");
        let v = ValueDescriptor::null("Lcom/example/Outer$Inner;");
        assert_eq!(v.short_type_name(), "Inner");
        let v = ValueDescriptor::null("Point");
        assert_eq!(v.short_type_name(), "Point");
    }

    #[test]
    fn test_field_and_length_helpers() {
        let point = ValueDescriptor::object(
            "Point",
            7,
            vec![
                Field::new("x", ValueDescriptor::int(1)),
                Field::new("y", ValueDescriptor::int(2)),
            ],
        );
        assert_eq!(point.field("y"), Some(&ValueDescriptor::int(2)));
        assert!(point.field("z").is_none());
        assert!(point.length().is_none());

        assert_eq!(ValueDescriptor::string("héllo").length(), Some(5));
        let arr = ValueDescriptor::array("int", vec![ValueDescriptor::int(1)]);
        assert_eq!(arr.type_name, "int[]");
        assert_eq!(arr.length(), Some(1));
    }
}
