//! The source-text backend's output model.
//!
//! The code backend emits an ordered sequence of typed statements plus a
//! list of private member declarations for views bound to fields instead
//! of locals. Statements render to source lines through `Display`; the
//! external code-file writer owns everything beyond that (file headers,
//! class wrapper, formatting).

use std::fmt;

use graft_core::{NodeId, Rect};
use smallvec::SmallVec;

/// A value appearing on the right-hand side of an emitted statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted and escaped string literal.
    Str(String),
    Number(f64),
    Bool(bool),
    /// Enum-style keyword, rendered with a leading dot (`.rounded`).
    Keyword(String),
    /// Verbatim expression, e.g. a localization call.
    Raw(String),
}

impl Value {
    pub fn keyword(k: impl Into<String>) -> Self {
        Value::Keyword(k.into())
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{}\"", escape(s)),
            Value::Number(n) => write_number(f, *n),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Keyword(k) => write!(f, ".{k}"),
            Value::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Layout anchor of a constraint statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Leading,
    Trailing,
    Top,
    Bottom,
    Width,
    Height,
    CenterX,
    CenterY,
}

impl Anchor {
    pub fn name(&self) -> &'static str {
        match self {
            Anchor::Leading => "leadingAnchor",
            Anchor::Trailing => "trailingAnchor",
            Anchor::Top => "topAnchor",
            Anchor::Bottom => "bottomAnchor",
            Anchor::Width => "widthAnchor",
            Anchor::Height => "heightAnchor",
            Anchor::CenterX => "centerXAnchor",
            Anchor::CenterY => "centerYAnchor",
        }
    }

    /// Dimension anchors constrain to a constant, not to a peer anchor.
    pub fn is_dimension(&self) -> bool {
        matches!(self, Anchor::Width | Anchor::Height)
    }
}

/// A peer anchor a constraint is relative to.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorRef {
    pub target: String,
    pub anchor: Anchor,
}

/// One emitted source statement, in output order.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration / member assignment with constructor call.
    Construct { binding: String, class: String, declared: bool },
    /// Property assignment.
    Assign { target: String, property: String, value: Value },
    /// Method invocation.
    Invoke { target: String, method: String, args: SmallVec<[Value; 2]> },
    /// Child attachment call.
    AddChild { parent: String, child: String },
    /// Absolute frame assignment.
    SetFrame { target: String, frame: Rect, alignment_rect: bool },
    /// Edge/dimension constraint activation.
    Constraint {
        target: String,
        anchor: Anchor,
        reference: Option<AnchorRef>,
        constant: f64,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Construct { binding, class, declared } => {
                if *declared {
                    write!(f, "let {binding} = {class}()")
                } else {
                    write!(f, "{binding} = {class}()")
                }
            }
            Statement::Assign { target, property, value } => {
                write!(f, "{target}.{property} = {value}")
            }
            Statement::Invoke { target, method, args } => {
                write!(f, "{target}.{method}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Statement::AddChild { parent, child } => {
                write!(f, "{parent}.addSubview({child})")
            }
            Statement::SetFrame { target, frame, alignment_rect } => {
                write!(f, "{target}.frame = ")?;
                if *alignment_rect {
                    write!(f, "{target}.alignmentRect(for: ")?;
                }
                write!(f, "Rect(x: ")?;
                write_number(f, frame.x)?;
                write!(f, ", y: ")?;
                write_number(f, frame.y)?;
                write!(f, ", width: ")?;
                write_number(f, frame.width)?;
                write!(f, ", height: ")?;
                write_number(f, frame.height)?;
                f.write_str(")")?;
                if *alignment_rect {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Statement::Constraint { target, anchor, reference, constant } => {
                write!(f, "{target}.{}.constraint(", anchor.name())?;
                match reference {
                    Some(reference) => {
                        write!(f, "equalTo: {}.{}, constant: ", reference.target, reference.anchor.name())?;
                        write_number(f, *constant)?;
                    }
                    None => {
                        write!(f, "equalToConstant: ")?;
                        write_number(f, *constant)?;
                    }
                }
                f.write_str(").isActive = true")
            }
        }
    }
}

/// A private member declaration accumulated for views that were not
/// inline-constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: String,
    pub class: String,
}

impl fmt::Display for MemberDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var {}: {}", self.name, self.class)
    }
}

/// Artifact of converting one node in the code backend: the symbolic name
/// the node's statements are bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeArtifact {
    pub node: NodeId,
    pub binding: String,
    pub class: String,
    /// Bound to a private member rather than a local.
    pub is_member: bool,
}

/// Author-assigned code name: the first double-quoted run inside a node
/// name (`radio "nothingRadio"` binds to `nothingRadio`).
pub fn custom_name(node_name: &str) -> Option<&str> {
    let start = node_name.find('"')?;
    let rest = &node_name[start + 1..];
    let end = rest.find('"')?;
    let name = &rest[..end];
    (!name.is_empty()).then_some(name)
}

/// Render a statement list to source text, one statement per line.
pub fn render_statements(statements: &[Statement]) -> String {
    let mut out = String::new();
    for statement in statements {
        out.push_str(&statement.to_string());
        out.push('\n');
    }
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}
