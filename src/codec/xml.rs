use quick_xml::Reader;
use quick_xml::events::Event;

use crate::codec::Format;
use crate::error::FormError;
use crate::model::{Field, FieldType, FormDefinition};

// ============================================================================
// Markup encoding
// ============================================================================

/// Encode a definition as XML.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <form>
///   <formTitle>Contact</formTitle>
///   <fields>
///     <field>
///       <name>Email</name>
///       <type>String</type>
///       <mandatory>true</mandatory>
///       <options></options>
///     </field>
///   </fields>
/// </form>
/// ```
pub fn encode(defn: &FormDefinition) -> String {
    let mut fields = String::new();
    for field in &defn.fields {
        fields.push_str(&format!(
            "    <field>\n      <name>{name}</name>\n      <type>{kind}</type>\n      <mandatory>{mandatory}</mandatory>\n      <options>{options}</options>\n    </field>\n",
            name = escape_xml(&field.name),
            kind = field.field_type.as_str(),
            mandatory = field.mandatory,
            options = escape_xml(&field.options),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<form>\n  <formTitle>{title}</formTitle>\n  <fields>\n{fields}  </fields>\n</form>\n",
        title = escape_xml(&defn.form_title),
        fields = fields,
    )
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode XML produced by [`encode`] (or written by hand in the same shape).
///
/// `formTitle` is the first descendant with that tag; fields are every
/// `field` element in document order. Within a field, `name`, `type` and
/// `mandatory` are required and `options` defaults to empty.
pub fn decode(text: &str) -> Result<FormDefinition, FormError> {
    let root = parse_tree(text)?;
    if root.tag != "form" {
        return Err(FormError::parse(
            Format::Xml,
            format!("expected root element <form>, found <{}>", root.tag),
        ));
    }

    let form_title = root
        .first_descendant("formTitle")
        .ok_or_else(|| missing("formTitle", "form"))?
        .text_content();

    let mut fields = Vec::new();
    for (index, node) in root.descendants("field").into_iter().enumerate() {
        fields.push(decode_field(node, index)?);
    }

    Ok(FormDefinition { form_title, fields })
}

fn decode_field(node: &Element, index: usize) -> Result<Field, FormError> {
    let context = format!("field {}", index);
    let required = |tag: &str| {
        node.first_descendant(tag)
            .map(Element::text_content)
            .ok_or_else(|| missing(tag, &context))
    };

    let name = required("name")?;

    let type_text = required("type")?;
    let field_type: FieldType = type_text
        .trim()
        .parse()
        .map_err(|e: String| FormError::parse(Format::Xml, format!("{}: {}", context, e)))?;

    let mandatory = match required("mandatory")?.trim() {
        "true" => true,
        "false" => false,
        other => {
            return Err(FormError::parse(
                Format::Xml,
                format!("{}: mandatory must be 'true' or 'false', found '{}'", context, other),
            ));
        }
    };

    let options = node
        .first_descendant("options")
        .map(Element::text_content)
        .unwrap_or_default();

    Ok(Field {
        name,
        field_type,
        mandatory,
        options,
    })
}

fn missing(tag: &str, context: &str) -> FormError {
    FormError::parse(Format::Xml, format!("missing <{}> in {}", tag, context))
}

/// Minimal element tree; enough for tag-name lookups and text content.
#[derive(Debug, Default)]
struct Element {
    tag: String,
    children: Vec<Node>,
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    fn new(tag: String) -> Self {
        Self {
            tag,
            children: Vec::new(),
        }
    }

    /// Concatenated text of all descendants, in document order.
    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    fn first_descendant(&self, tag: &str) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(e) = child {
                if e.tag == tag {
                    return Some(e);
                }
                if let Some(found) = e.first_descendant(tag) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn descendants(&self, tag: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(tag, &mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(e) = child {
                if e.tag == tag {
                    out.push(e);
                }
                e.collect_descendants(tag, out);
            }
        }
    }
}

fn parse_tree(text: &str) -> Result<Element, FormError> {
    let mut reader = Reader::from_str(text);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            FormError::parse(
                Format::Xml,
                format!("at byte {}: {}", reader.buffer_position(), e),
            )
        })?;

        match event {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if stack.is_empty() && root.is_some() {
                    return Err(FormError::parse(Format::Xml, "multiple root elements"));
                }
                stack.push(Element::new(tag));
            }
            Event::Empty(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                attach(&mut stack, &mut root, Element::new(tag))?;
            }
            Event::End(_) => {
                // quick-xml already rejects mismatched end tags
                if let Some(done) = stack.pop() {
                    attach(&mut stack, &mut root, done)?;
                }
            }
            Event::Text(ref t) => {
                let text = t.unescape().map_err(|e| {
                    FormError::parse(
                        Format::Xml,
                        format!("at byte {}: {}", reader.buffer_position(), e),
                    )
                })?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(ref c) => {
                let text = String::from_utf8_lossy(c).into_owned();
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FormError::parse(
            Format::Xml,
            format!("unexpected end of document inside <{}>", open.tag),
        ));
    }
    root.ok_or_else(|| FormError::parse(Format::Xml, "document has no root element"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), FormError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(FormError::parse(Format::Xml, "multiple root elements")),
    }
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), FormError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Text(text.to_string()));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(FormError::parse(
            Format::Xml,
            "text content outside the root element",
        )),
    }
}
