//! XML Helper
//!
//! Node types and a serializing visitor for building catalog markup.
//! Attributes keep their declaration order: this is a closed round-trip
//! format, not a generic document tree.

/// Visitor trait for XML nodes
pub trait IVisitor {
    fn visit_tag(&mut self, tag: &Tag) -> String;
    fn visit_text(&mut self, text: &Text) -> String;
    fn visit_declaration(&mut self, decl: &Declaration) -> String;
    fn visit_doctype(&mut self, doctype: &Doctype) -> String;
}

struct Visitor;

impl IVisitor for Visitor {
    fn visit_tag(&mut self, tag: &Tag) -> String {
        let str_attrs = serialize_attributes(&tag.attrs);

        if tag.children.is_empty() {
            return format!("<{}{}/>", tag.name, str_attrs);
        }

        let str_children: Vec<String> = tag.children.iter().map(|node| node.visit(self)).collect();

        format!(
            "<{}{}>{}</{}>",
            tag.name,
            str_attrs,
            str_children.join(""),
            tag.name
        )
    }

    fn visit_text(&mut self, text: &Text) -> String {
        text.value.clone()
    }

    fn visit_declaration(&mut self, decl: &Declaration) -> String {
        format!("<?xml{}?>", serialize_attributes(&decl.attrs))
    }

    fn visit_doctype(&mut self, doctype: &Doctype) -> String {
        format!("<!DOCTYPE {}>", doctype.root_tag)
    }
}

fn serialize_attributes(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, value))
        .collect()
}

/// Serialize XML nodes to string
pub fn serialize(nodes: &[Box<dyn Node>]) -> String {
    let mut visitor = Visitor;
    nodes
        .iter()
        .map(|node| node.visit(&mut visitor))
        .collect::<Vec<_>>()
        .join("")
}

/// Base trait for all XML nodes
pub trait Node {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String;
}

/// XML Declaration node
pub struct Declaration {
    pub attrs: Vec<(String, String)>,
}

impl Declaration {
    pub fn new(unescaped_attrs: &[(&str, &str)]) -> Self {
        Declaration {
            attrs: unescaped_attrs
                .iter()
                .map(|(name, value)| (name.to_string(), escape_attr(value)))
                .collect(),
        }
    }
}

impl Node for Declaration {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_declaration(self)
    }
}

/// XML Doctype node
pub struct Doctype {
    pub root_tag: String,
}

impl Doctype {
    pub fn new(root_tag: impl Into<String>) -> Self {
        Doctype {
            root_tag: root_tag.into(),
        }
    }
}

impl Node for Doctype {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_doctype(self)
    }
}

/// XML Tag node
pub struct Tag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Box<dyn Node>>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, unescaped_value: &str) -> Self {
        self.attrs
            .push((name.to_string(), escape_attr(unescaped_value)));
        self
    }

    pub fn child(mut self, node: impl Node + 'static) -> Self {
        self.children.push(Box::new(node));
        self
    }

    pub fn push(&mut self, node: impl Node + 'static) {
        self.children.push(Box::new(node));
    }
}

impl Node for Tag {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_tag(self)
    }
}

/// XML Text node
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(unescaped_value: &str) -> Self {
        Text {
            value: escape_text(unescaped_value),
        }
    }
}

impl Node for Text {
    fn visit(&self, visitor: &mut dyn IVisitor) -> String {
        visitor.visit_text(self)
    }
}

/// Carriage return with indentation (for formatting)
pub struct CR {
    value: String,
}

impl CR {
    pub fn new(ws: usize) -> Self {
        CR {
            value: format!("\n{}", " ".repeat(ws)),
        }
    }
}

impl Node for CR {
    fn visit(&self, _visitor: &mut dyn IVisitor) -> String {
        self.value.clone()
    }
}

/// Escape text content. The reader accepts all five standard entities; the
/// writer only produces the three that are ambiguous in text, keeping
/// pretty-printed catalogs byte-stable through a parse/serialize cycle.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value (attribute values are double-quoted).
pub fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
