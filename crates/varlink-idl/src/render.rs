//! Renders an [`Interface`] back into description text.
//!
//! Output follows the conventional layout: attached comments first, a blank
//! line between members, and member bodies broken one field per line when
//! the single-line form would overrun the wrap width. Color markers, when a
//! palette is given, wrap the four token classes (keywords, named-type
//! references, member names, built-in types); measurement for wrapping
//! always uses the plain text so markers never affect layout.

use std::fmt::Write as _;

use crate::ast::{ErrorDef, Field, Interface, Member, Method, Type, TypeAlias};

/// Spaces added per nesting level when a body is broken across lines.
const INDENT_STEP: usize = 2;

/// An opening/closing marker pair wrapped around one token class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerPair {
    pub open: &'static str,
    pub close: &'static str,
}

impl MarkerPair {
    /// Builds a marker pair from explicit open/close strings.
    #[must_use]
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }
}

/// Marker pairs for the four token classes the renderer distinguishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    /// `interface`, `type`, `method`, `error`.
    pub keyword: MarkerPair,
    /// References to named types (`ModuleInfo`).
    pub type_name: MarkerPair,
    /// The interface name and member definition names.
    pub member_name: MarkerPair,
    /// `bool`, `int`, `float`, `string`, `object`.
    pub builtin: MarkerPair,
}

/// Rendering controls: base indent, wrap width, optional palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces prepended to every emitted line.
    pub indent: usize,
    /// Column budget used to decide when member bodies break across lines.
    /// Zero disables wrapping.
    pub width: usize,
    /// Marker pairs; `None` renders plain text.
    pub palette: Option<Palette>,
}

impl RenderOptions {
    /// Plain text at the conventional 72-column wrap width.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            indent: 0,
            width: 72,
            palette: None,
        }
    }

    /// Colored output at the conventional 72-column wrap width.
    #[must_use]
    pub const fn with_palette(palette: Palette) -> Self {
        Self {
            indent: 0,
            width: 72,
            palette: Some(palette),
        }
    }
}

/// Renders `interface` as description text ending in a newline.
#[must_use]
pub fn render(interface: &Interface, options: &RenderOptions) -> String {
    let mut renderer = Renderer {
        options,
        out: String::new(),
    };
    renderer.interface(interface);
    renderer.out
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    out: String,
}

impl Renderer<'_> {
    fn interface(&mut self, interface: &Interface) {
        self.doc(&interface.doc);
        self.pad(0);
        self.marked(|p| p.keyword, "interface");
        self.out.push(' ');
        self.marked(|p| p.member_name, &interface.name);
        self.out.push('\n');

        for member in &interface.members {
            self.out.push('\n');
            match member {
                Member::Alias(alias) => self.alias(alias),
                Member::Method(method) => self.method(method),
                Member::Error(error) => self.error_def(error),
            }
        }
    }

    fn alias(&mut self, alias: &TypeAlias) {
        self.doc(&alias.doc);
        let plain = format!(
            "type {} {}",
            alias.name,
            plain_type(&alias.ty)
        );
        let multiline = self.overflows(&plain);
        self.pad(0);
        self.marked(|p| p.keyword, "type");
        self.out.push(' ');
        self.marked(|p| p.member_name, &alias.name);
        self.out.push(' ');
        self.body_of_type(&alias.ty, multiline);
        self.out.push('\n');
    }

    fn method(&mut self, method: &Method) {
        self.doc(&method.doc);
        let plain = format!(
            "method {}{} -> {}",
            method.name,
            plain_struct(&method.input),
            plain_struct(&method.output)
        );
        let multiline = self.overflows(&plain);
        self.pad(0);
        self.marked(|p| p.keyword, "method");
        self.out.push(' ');
        self.marked(|p| p.member_name, &method.name);
        self.fields(&method.input, multiline);
        self.out.push_str(" -> ");
        self.fields(&method.output, multiline);
        self.out.push('\n');
    }

    fn error_def(&mut self, error: &ErrorDef) {
        self.doc(&error.doc);
        let plain = format!("error {} {}", error.name, plain_struct(&error.fields));
        let multiline = self.overflows(&plain);
        self.pad(0);
        self.marked(|p| p.keyword, "error");
        self.out.push(' ');
        self.marked(|p| p.member_name, &error.name);
        self.out.push(' ');
        self.fields(&error.fields, multiline);
        self.out.push('\n');
    }

    /// Emits the body of a type alias, which is always a struct or enum.
    fn body_of_type(&mut self, ty: &Type, multiline: bool) {
        match ty {
            Type::Struct(fields) => self.fields(fields, multiline),
            Type::Enum(variants) => self.variants(variants, multiline),
            other => self.ty(other),
        }
    }

    fn fields(&mut self, fields: &[Field], multiline: bool) {
        self.out.push('(');
        if fields.is_empty() {
            self.out.push(')');
            return;
        }
        if multiline && fields.len() >= 2 {
            for (index, field) in fields.iter().enumerate() {
                self.out.push('\n');
                self.pad(1);
                self.field(field);
                if index + 1 < fields.len() {
                    self.out.push(',');
                }
            }
            self.out.push('\n');
            self.pad(0);
        } else {
            for (index, field) in fields.iter().enumerate() {
                if index > 0 {
                    self.out.push_str(", ");
                }
                self.field(field);
            }
        }
        self.out.push(')');
    }

    fn variants(&mut self, variants: &[String], multiline: bool) {
        self.out.push('(');
        if multiline && variants.len() >= 2 {
            for (index, variant) in variants.iter().enumerate() {
                self.out.push('\n');
                self.pad(1);
                self.out.push_str(variant);
                if index + 1 < variants.len() {
                    self.out.push(',');
                }
            }
            self.out.push('\n');
            self.pad(0);
        } else {
            for (index, variant) in variants.iter().enumerate() {
                if index > 0 {
                    self.out.push_str(", ");
                }
                self.out.push_str(variant);
            }
        }
        self.out.push(')');
    }

    fn field(&mut self, field: &Field) {
        self.out.push_str(&field.name);
        self.out.push_str(": ");
        self.ty(&field.ty);
    }

    /// Emits a type expression inline; nested bodies never wrap.
    fn ty(&mut self, ty: &Type) {
        match ty {
            Type::Bool => self.marked(|p| p.builtin, "bool"),
            Type::Int => self.marked(|p| p.builtin, "int"),
            Type::Float => self.marked(|p| p.builtin, "float"),
            Type::String => self.marked(|p| p.builtin, "string"),
            Type::Object => self.marked(|p| p.builtin, "object"),
            Type::Optional(inner) => {
                self.out.push('?');
                self.ty(inner);
            }
            Type::Array(inner) => {
                self.out.push_str("[]");
                self.ty(inner);
            }
            Type::Ref(name) => self.marked(|p| p.type_name, name),
            Type::Struct(fields) => self.fields(fields, false),
            Type::Enum(variants) => self.variants(variants, false),
        }
    }

    fn doc(&mut self, doc: &[String]) {
        for line in doc {
            self.pad(0);
            if line.is_empty() {
                self.out.push('#');
            } else {
                let _ = write!(self.out, "# {line}");
            }
            self.out.push('\n');
        }
    }

    fn marked(&mut self, select: fn(&Palette) -> MarkerPair, text: &str) {
        let pair = self.options.palette.as_ref().map(select).unwrap_or_default();
        self.out.push_str(pair.open);
        self.out.push_str(text);
        self.out.push_str(pair.close);
    }

    fn pad(&mut self, level: usize) {
        let spaces = self.options.indent + level * INDENT_STEP;
        for _ in 0..spaces {
            self.out.push(' ');
        }
    }

    fn overflows(&self, plain: &str) -> bool {
        self.options.width > 0 && self.options.indent + plain.chars().count() > self.options.width
    }
}

fn plain_struct(fields: &[Field]) -> String {
    let mut out = String::from("(");
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&field.name);
        out.push_str(": ");
        out.push_str(&plain_type(&field.ty));
    }
    out.push(')');
    out
}

fn plain_type(ty: &Type) -> String {
    match ty {
        Type::Bool => String::from("bool"),
        Type::Int => String::from("int"),
        Type::Float => String::from("float"),
        Type::String => String::from("string"),
        Type::Object => String::from("object"),
        Type::Optional(inner) => format!("?{}", plain_type(inner)),
        Type::Array(inner) => format!("[]{}", plain_type(inner)),
        Type::Ref(name) => name.clone(),
        Type::Struct(fields) => plain_struct(fields),
        Type::Enum(variants) => format!("({})", variants.join(", ")),
    }
}
