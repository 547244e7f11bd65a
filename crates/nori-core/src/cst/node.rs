//! Owned node model for the JSONC concrete syntax tree
//!
//! Every node carries the trivia (whitespace and comments) that surrounded it
//! in the source, so that an unmodified tree prints back byte-for-byte. The
//! tree is strictly owned: containers own their children, properties own
//! their key and value, and nothing holds an upward pointer.

/// A single piece of trivia: a raw whitespace run or one comment.
#[derive(Debug, Clone, PartialEq)]
pub enum Trivia {
    /// Raw run of space/tab/CR/LF characters, exactly as written
    Whitespace(String),
    /// A line or block comment
    Comment(Comment),
}

impl Trivia {
    /// The exact source text of this trivia piece
    pub fn raw_text(&self) -> &str {
        match self {
            Trivia::Whitespace(raw) => raw,
            Trivia::Comment(comment) => &comment.raw,
        }
    }

    /// Check if this is a comment
    pub fn is_comment(&self) -> bool {
        matches!(self, Trivia::Comment(_))
    }

    /// Check if this is whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Trivia::Whitespace(_))
    }
}

/// A preserved comment
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Line (`//`) or block (`/* */`)
    pub kind: CommentKind,
    /// Source text including delimiters
    pub raw: String,
    /// Trimmed inner text, without delimiters
    pub text: String,
}

/// The two comment forms the grammar admits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// A tree node: a kind tag plus the trivia on either side of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Trivia rendered before the node's own text
    pub leading: Vec<Trivia>,
    /// Trivia rendered after the node's own text (and after its separator
    /// comma, for properties and elements)
    pub trailing: Vec<Trivia>,
}

/// The closed set of node kinds.
///
/// The well-formedness constraints (object children are properties, array
/// children are elements, property keys are strings) are deliberately not
/// encoded in the types; the stringifier checks them so that hand-built
/// synthetic trees fail loudly instead of printing garbage.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Ordered property list; document order is significant
    Object { properties: Vec<Node> },
    /// Ordered element list
    Array { elements: Vec<Node> },
    /// `key: value` pair inside an object
    Property { key: Box<Node>, value: Box<Node> },
    /// One value inside an array
    Element { value: Box<Node> },
    /// Raw slice between the quotes; escape sequences are kept undecoded
    String { value: String },
    /// Parsed value and the exact literal text it came from
    Number { value: f64, raw: String },
    Bool { value: bool },
    Null,
}

impl Node {
    /// Create a node with no trivia on either side
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            leading: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Lower-case name of this node's kind, for error messages
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Object { .. } => "object",
            NodeKind::Array { .. } => "array",
            NodeKind::Property { .. } => "property",
            NodeKind::Element { .. } => "element",
            NodeKind::String { .. } => "string",
            NodeKind::Number { .. } => "number",
            NodeKind::Bool { .. } => "boolean",
            NodeKind::Null => "null",
        }
    }

    /// Properties of an object node
    pub fn object_properties(&self) -> Option<&Vec<Node>> {
        match &self.kind {
            NodeKind::Object { properties } => Some(properties),
            _ => None,
        }
    }

    /// Mutable properties of an object node
    pub fn object_properties_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::Object { properties } => Some(properties),
            _ => None,
        }
    }

    /// Elements of an array node
    pub fn array_elements(&self) -> Option<&Vec<Node>> {
        match &self.kind {
            NodeKind::Array { elements } => Some(elements),
            _ => None,
        }
    }

    /// Mutable elements of an array node
    pub fn array_elements_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.kind {
            NodeKind::Array { elements } => Some(elements),
            _ => None,
        }
    }

    /// Key and value of a property node
    pub fn property_parts(&self) -> Option<(&Node, &Node)> {
        match &self.kind {
            NodeKind::Property { key, value } => Some((key, value)),
            _ => None,
        }
    }

    /// Key text of a property node whose key is a string node
    pub fn property_key_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Property { key, .. } => match &key.kind {
                NodeKind::String { value } => Some(value),
                _ => None,
            },
            _ => None,
        }
    }

    /// Value of a property node
    pub fn property_value(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Property { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Mutable value of a property node
    pub fn property_value_mut(&mut self) -> Option<&mut Node> {
        match &mut self.kind {
            NodeKind::Property { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Value of an element node
    pub fn element_value(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Element { value } => Some(value),
            _ => None,
        }
    }

    /// Mutable value of an element node
    pub fn element_value_mut(&mut self) -> Option<&mut Node> {
        match &mut self.kind {
            NodeKind::Element { value } => Some(value),
            _ => None,
        }
    }
}

/// Depth-first visitor over a tree.
///
/// The callback receives each node, its parent (`None` for the root) and its
/// depth, with a node visited before its children. Objects descend into
/// their properties, arrays into their elements, properties into key then
/// value, elements into their value. Trivia is not visited.
pub fn walk<'a, F>(node: &'a Node, f: &mut F)
where
    F: FnMut(&'a Node, Option<&'a Node>, usize),
{
    walk_inner(node, None, 0, f);
}

fn walk_inner<'a, F>(node: &'a Node, parent: Option<&'a Node>, depth: usize, f: &mut F)
where
    F: FnMut(&'a Node, Option<&'a Node>, usize),
{
    f(node, parent, depth);
    match &node.kind {
        NodeKind::Object { properties } => {
            for property in properties {
                walk_inner(property, Some(node), depth + 1, f);
            }
        }
        NodeKind::Array { elements } => {
            for element in elements {
                walk_inner(element, Some(node), depth + 1, f);
            }
        }
        NodeKind::Property { key, value } => {
            walk_inner(key, Some(node), depth + 1, f);
            walk_inner(value, Some(node), depth + 1, f);
        }
        NodeKind::Element { value } => {
            walk_inner(value, Some(node), depth + 1, f);
        }
        _ => {}
    }
}
