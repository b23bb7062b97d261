//! Type references, annotations and modifiers
//!
//! These are the leaf values of a declaration tree. Type references and
//! annotations serialize as their source text (`Map<String, List<Foo>>[]`,
//! `Value("${port}")`) so snapshot files stay readable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnwireError;

/// A reference to a type as written in source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    pub name: String,
    pub arguments: Vec<TypeRef>,
    pub array_dimensions: usize,
}

impl TypeRef {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            array_dimensions: 0,
        }
    }

    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            arguments,
            array_dimensions: 0,
        }
    }

    pub fn with_array_dimensions(mut self, dimensions: usize) -> Self {
        self.array_dimensions = dimensions;
        self
    }

    /// The type name without type arguments
    pub fn raw_name(&self) -> &str {
        &self.name
    }

    /// The component type of an array, or the type itself
    pub fn element(&self) -> TypeRef {
        Self {
            name: self.name.clone(),
            arguments: self.arguments.clone(),
            array_dimensions: 0,
        }
    }

    /// The last segment of the (possibly qualified) name
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn is_qualified(&self) -> bool {
        self.name.contains('.')
    }

    /// Same arguments and dimensions, different name
    pub fn renamed(&self, name: impl Into<String>) -> TypeRef {
        Self {
            name: name.into(),
            arguments: self.arguments.clone(),
            array_dimensions: self.array_dimensions,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            write!(f, "<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument}")?;
            }
            write!(f, ">")?;
        }
        for _ in 0..self.array_dimensions {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = UnwireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeParser {
            chars: s.chars().collect(),
            pos: 0,
        };
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos != parser.chars.len() {
            return Err(invalid_type(s));
        }
        Ok(parsed)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = UnwireError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

fn invalid_type(text: &str) -> UnwireError {
    UnwireError::ConfigurationError {
        message: format!("Invalid type reference '{text}'"),
    }
}

struct TypeParser {
    chars: Vec<char>,
    pos: usize,
}

impl TypeParser {
    fn skip_whitespace(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn parse_type(&mut self) -> Result<TypeRef, UnwireError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '<' | '>' | ',' | '[' | ']') {
                break;
            }
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        let name = name.trim().to_string();
        let text: String = self.chars.iter().collect();
        if name.is_empty() {
            return Err(invalid_type(&text));
        }

        let mut arguments = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                arguments.push(self.parse_type()?);
                self.skip_whitespace();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(invalid_type(&text)),
                }
            }
        }

        let mut array_dimensions = 0;
        loop {
            self.skip_whitespace();
            if self.peek() == Some('[') && self.chars.get(self.pos + 1) == Some(&']') {
                self.pos += 2;
                array_dimensions += 1;
            } else {
                break;
            }
        }

        Ok(TypeRef {
            name,
            arguments,
            array_dimensions,
        })
    }
}

/// The last dot-separated segment of a name
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// The package part of a fully-qualified name, empty for the default package
pub fn package_of(fqn: &str) -> &str {
    fqn.rsplit_once('.').map(|(package, _)| package).unwrap_or("")
}

/// `package.name`, or just `name` in the default package
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

/// An annotation such as `@Autowired` or `@Value("${port}")`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Annotation {
    pub name: String,
    pub arguments: Option<String>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }

    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Whether this annotation names the same marker, qualified or not
    pub fn matches(&self, marker: &str) -> bool {
        self.simple_name() == simple_name(marker)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arguments {
            Some(arguments) => write!(f, "{}({})", self.name, arguments),
            None => write!(f, "{}", self.name),
        }
    }
}

impl TryFrom<String> for Annotation {
    type Error = UnwireError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let text = value.trim().trim_start_matches('@');
        if text.is_empty() {
            return Err(UnwireError::ConfigurationError {
                message: "Empty annotation".to_string(),
            });
        }
        match text.split_once('(') {
            Some((name, rest)) => {
                let arguments = rest.strip_suffix(')').ok_or_else(|| {
                    UnwireError::ConfigurationError {
                        message: format!("Unbalanced annotation arguments in '{value}'"),
                    }
                })?;
                Ok(Self {
                    name: name.trim().to_string(),
                    arguments: Some(arguments.to_string()),
                })
            }
            None => Ok(Self::new(text)),
        }
    }
}

impl From<Annotation> for String {
    fn from(value: Annotation) -> Self {
        value.to_string()
    }
}

/// Declaration and member modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Synchronized,
    Volatile,
    Transient,
    Default,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Synchronized => "synchronized",
            Modifier::Volatile => "volatile",
            Modifier::Transient => "transient",
            Modifier::Default => "default",
        };
        write!(f, "{keyword}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_nested_generic_array() {
        let ty: TypeRef = "java.util.Map<String, List<com.app.Foo>>[][]".parse().unwrap();

        assert_eq!(ty.name, "java.util.Map");
        assert_eq!(ty.arguments.len(), 2);
        assert_eq!(ty.arguments[1].arguments[0].name, "com.app.Foo");
        assert_eq!(ty.array_dimensions, 2);
        assert_eq!(ty.to_string(), "java.util.Map<String, List<com.app.Foo>>[][]");
    }

    #[test]
    fn test_element_strips_array_dimensions() {
        let ty: TypeRef = "Foo[]".parse().unwrap();
        assert_eq!(ty.element(), TypeRef::simple("Foo"));
        assert_eq!(ty.simple_name(), "Foo");
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        assert!("List<Foo".parse::<TypeRef>().is_err());
        assert!("".parse::<TypeRef>().is_err());
        assert!("Foo>".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_annotation_round_trip_through_text() {
        let annotation = Annotation::try_from("@Value(\"${port}\")".to_string()).unwrap();
        assert_eq!(annotation.name, "Value");
        assert_eq!(annotation.arguments.as_deref(), Some("\"${port}\""));
        assert_eq!(annotation.to_string(), "Value(\"${port}\")");
    }

    #[test]
    fn test_annotation_matches_qualified_marker() {
        let annotation = Annotation::new("Lazy");
        assert!(annotation.matches("org.springframework.context.annotation.Lazy"));
        assert!(!annotation.matches("Autowired"));

        let qualified = Annotation::new("javax.inject.Inject");
        assert!(qualified.matches("Inject"));
    }

    #[test]
    fn test_package_of() {
        assert_eq!(package_of("com.app.Foo"), "com.app");
        assert_eq!(package_of("Foo"), "");
    }
}
