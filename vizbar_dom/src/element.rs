// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element nodes and attribute values.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Vec2;
use peniko::Color;
use smallvec::SmallVec;

/// Stable identity of an element inside a [`Document`](crate::Document).
///
/// Ids are never reused within a document, so a stale id held by a caller can be detected with
/// [`Document::contains`](crate::Document::contains).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Element tag names understood by the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// An HTML block container; the document root and chart hosts use this.
    Div,
    /// An SVG root surface.
    Svg,
    /// An SVG group.
    G,
    /// An SVG rectangle.
    Rect,
    /// An SVG line segment.
    Line,
    /// An SVG path.
    Path,
    /// An SVG text node.
    Text,
}

impl Tag {
    /// Returns the markup name of this tag.
    pub fn name(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Svg => "svg",
            Self::G => "g",
            Self::Rect => "rect",
            Self::Line => "line",
            Self::Path => "path",
            Self::Text => "text",
        }
    }

    /// Looks up a tag by its markup name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "div" => Self::Div,
            "svg" => Self::Svg,
            "g" => Self::G,
            "rect" => Self::Rect,
            "line" => Self::Line,
            "path" => Self::Path,
            "text" => Self::Text,
            _ => return None,
        })
    }
}

/// A typed attribute or style value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// A plain number (`x`, `width`, `opacity`, ...).
    Number(f64),
    /// Free-form text (`d`, `dy`, `text-anchor`, ...).
    Text(String),
    /// A `translate(x,y)` transform.
    Translate(Vec2),
    /// A solid paint, written as `#rrggbb` (with a separate opacity when translucent).
    Paint(Color),
}

impl AttrValue {
    /// Returns the numeric payload, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the translation payload, if this is a translate transform.
    pub fn as_translate(&self) -> Option<Vec2> {
        match self {
            Self::Translate(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Translate(v) => write!(f, "translate({},{})", v.x, v.y),
            Self::Paint(color) => {
                let rgba = color.to_rgba8();
                write!(f, "#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
            }
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec2> for AttrValue {
    fn from(value: Vec2) -> Self {
        Self::Translate(value)
    }
}

impl From<Color> for AttrValue {
    fn from(value: Color) -> Self {
        Self::Paint(value)
    }
}

/// A node in the retained tree.
///
/// Structural fields (`parent`, `children`) are owned by the [`Document`](crate::Document);
/// everything else can be edited through [`Document::element_mut`](crate::Document::element_mut).
/// Setters return `&mut Self` so edits chain the way selection calls do in script land.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) tag: Tag,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    classes: SmallVec<[String; 2]>,
    attrs: BTreeMap<&'static str, AttrValue>,
    styles: BTreeMap<&'static str, AttrValue>,
    text: Option<String>,
    key: Option<String>,
}

impl Element {
    pub(crate) fn new(id: ElementId, tag: Tag, parent: Option<ElementId>) -> Self {
        Self {
            id,
            tag,
            parent,
            children: Vec::new(),
            classes: SmallVec::new(),
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: None,
            key: None,
        }
    }

    /// This element's id.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// This element's tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The parent element, or `None` for the document root.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child ids in document order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Adds or removes every whitespace-separated class in `names`.
    ///
    /// `classed("x-axis-group axis", true)` adds both classes.
    pub fn classed(&mut self, names: &str, on: bool) -> &mut Self {
        for name in names.split_whitespace() {
            let pos = self.classes.iter().position(|c| c == name);
            match (pos, on) {
                (None, true) => self.classes.push(name.into()),
                (Some(i), false) => {
                    self.classes.remove(i);
                }
                _ => {}
            }
        }
        self
    }

    /// Returns `true` if the element carries `name` in its class list.
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    /// The class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Sets an attribute.
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(name, value.into());
        self
    }

    /// Returns an attribute value.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Convenience for numeric attributes.
    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(AttrValue::as_f64)
    }

    /// Iterates attributes in name order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'static str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (*k, v))
    }

    /// Sets an inline style property.
    pub fn set_style(&mut self, name: &'static str, value: impl Into<AttrValue>) -> &mut Self {
        self.styles.insert(name, value.into());
        self
    }

    /// Returns an inline style property.
    pub fn style(&self, name: &str) -> Option<&AttrValue> {
        self.styles.get(name)
    }

    /// Iterates inline styles in name order.
    pub fn styles(&self) -> impl Iterator<Item = (&'static str, &AttrValue)> {
        self.styles.iter().map(|(k, v)| (*k, v))
    }

    /// Replaces the text content.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Binds a join key to this element.
    ///
    /// Keys are what [`join_by_key`](crate::join_by_key) matches data against on the next join.
    pub fn bind_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = Some(key.into());
        self
    }

    /// The bound join key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}
