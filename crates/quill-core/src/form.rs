//! Syntax forms handed to the compiler by the reader.
//!
//! The reader and the persistent collections it builds are outside this
//! crate; [`Form`] is the owned, immutable view the compiler works on. Every
//! form carries a [`Span`] and an optional type-hint tag (`^long x`).

use std::fmt;

use ordered_float::OrderedFloat;

use crate::Span;

/// A possibly namespace-qualified symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Namespace part (`quill.core` in `quill.core/map`), if any.
    pub ns: Option<String>,
    /// Name part.
    pub name: String,
}

impl Symbol {
    /// An unqualified symbol.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            ns: None,
            name: name.into(),
        }
    }

    /// A namespace-qualified symbol.
    pub fn qualified(ns: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ns: Some(ns.into()),
            name: name.into(),
        }
    }

    /// Whether the symbol carries a namespace part.
    pub fn is_qualified(&self) -> bool {
        self.ns.is_some()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ns {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A self-evaluating literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Nil,
    Bool(bool),
    Long(i64),
    Double(OrderedFloat<f64>),
    Char(char),
    Str(String),
    Keyword(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => f.write_str("nil"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Long(n) => write!(f, "{}", n),
            Literal::Double(d) => write!(f, "{}", d),
            Literal::Char(c) => write!(f, "\\{}", c),
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::Keyword(k) => write!(f, ":{}", k),
        }
    }
}

/// The shape of a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormKind {
    Literal(Literal),
    Symbol(Symbol),
    List(Vec<Form>),
    Vector(Vec<Form>),
}

/// A syntax form with its source location and type-hint tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Form {
    pub kind: FormKind,
    /// `^Tag` metadata, naming a host type or primitive kind.
    pub tag: Option<Symbol>,
    pub span: Span,
}

impl Form {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            tag: None,
            span: Span::default(),
        }
    }

    pub fn symbol(name: &str) -> Self {
        Self::new(FormKind::Symbol(Symbol::simple(name)))
    }

    pub fn qualified_symbol(ns: &str, name: &str) -> Self {
        Self::new(FormKind::Symbol(Symbol::qualified(ns, name)))
    }

    pub fn list(items: Vec<Form>) -> Self {
        Self::new(FormKind::List(items))
    }

    pub fn vector(items: Vec<Form>) -> Self {
        Self::new(FormKind::Vector(items))
    }

    pub fn literal(lit: Literal) -> Self {
        Self::new(FormKind::Literal(lit))
    }

    pub fn long(n: i64) -> Self {
        Self::literal(Literal::Long(n))
    }

    pub fn double(d: f64) -> Self {
        Self::literal(Literal::Double(OrderedFloat(d)))
    }

    pub fn string(s: &str) -> Self {
        Self::literal(Literal::Str(s.to_string()))
    }

    pub fn nil() -> Self {
        Self::literal(Literal::Nil)
    }

    /// Attach a `^tag` type hint.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(Symbol::simple(tag));
        self
    }

    /// Attach a source location.
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match &self.kind {
            FormKind::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Form]> {
        match &self.kind {
            FormKind::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[Form]> {
        match &self.kind {
            FormKind::Vector(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is the unqualified symbol `name`.
    pub fn is_symbol_named(&self, name: &str) -> bool {
        self.as_symbol()
            .is_some_and(|sym| !sym.is_qualified() && sym.name == name)
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "^{} ", tag)?;
        }
        match &self.kind {
            FormKind::Literal(lit) => write!(f, "{}", lit),
            FormKind::Symbol(sym) => write!(f, "{}", sym),
            FormKind::List(items) => {
                f.write_str("(")?;
                write_seq(f, items)?;
                f.write_str(")")
            }
            FormKind::Vector(items) => {
                f.write_str("[")?;
                write_seq(f, items)?;
                f.write_str("]")
            }
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Form]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
