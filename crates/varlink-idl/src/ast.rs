//! Structured form of a parsed interface description.

/// A parsed interface: its name, attached documentation, and members in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Reverse-domain interface name, e.g. `org.varlink.service`.
    pub name: String,
    /// `#` comment lines immediately preceding the `interface` keyword.
    pub doc: Vec<String>,
    pub members: Vec<Member>,
}

impl Interface {
    /// Looks up a method by its unqualified name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.members.iter().find_map(|member| match member {
            Member::Method(method) if method.name == name => Some(method),
            _ => None,
        })
    }

    /// Iterates the unqualified names of all declared methods.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(|member| match member {
            Member::Method(method) => Some(method.name.as_str()),
            _ => None,
        })
    }
}

/// One interface member in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Alias(TypeAlias),
    Method(Method),
    Error(ErrorDef),
}

/// A named type definition (`type Name (...)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    pub name: String,
    pub doc: Vec<String>,
    /// Always a struct or enum type.
    pub ty: Type,
}

/// A method definition (`method Name(in) -> (out)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub doc: Vec<String>,
    pub input: Vec<Field>,
    pub output: Vec<Field>,
}

/// An error definition (`error Name (fields)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDef {
    pub name: String,
    pub doc: Vec<String>,
    pub fields: Vec<Field>,
}

/// A named, typed field inside a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

/// A varlink type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    Int,
    Float,
    String,
    Object,
    /// `?T` — the value may be null.
    Optional(Box<Type>),
    /// `[]T` — an array of `T`.
    Array(Box<Type>),
    /// Reference to a named type declared in the same interface.
    Ref(String),
    /// Anonymous struct literal `(name: type, ...)`.
    Struct(Vec<Field>),
    /// Enum literal `(one, two, three)`.
    Enum(Vec<String>),
}
