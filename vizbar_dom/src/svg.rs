// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup output.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write;

use crate::{AttrValue, Document, DomError, ElementId, Tag};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

impl Document {
    /// Serializes `id` and its subtree as markup.
    ///
    /// `svg` elements get the SVG namespace. Attributes and styles are written in name order so
    /// output is stable across runs.
    pub fn to_svg_string(&self, id: ElementId) -> Result<String, DomError> {
        let mut out = String::new();
        self.write_element(&mut out, id, 0)?;
        Ok(out)
    }

    fn write_element(&self, out: &mut String, id: ElementId, depth: usize) -> Result<(), DomError> {
        let el = self.element(id)?;
        let name = el.tag().name();
        indent(out, depth);
        out.push('<');
        out.push_str(name);
        if el.tag() == Tag::Svg {
            write_attr(out, "xmlns", SVG_NS);
        }
        if !el.classes().is_empty() {
            write_attr(out, "class", &el.classes().join(" "));
        }
        for (attr, value) in el.attrs() {
            write_value_attr(out, attr, value);
        }

        let mut style = String::new();
        for (prop, value) in el.styles() {
            if !style.is_empty() {
                style.push_str("; ");
            }
            let _ = write!(style, "{prop}: {value}");
        }
        if !style.is_empty() {
            write_attr(out, "style", &style);
        }

        if el.children().is_empty() && el.text().is_none() {
            out.push_str("/>\n");
            return Ok(());
        }
        out.push('>');
        if let Some(text) = el.text() {
            out.push_str(&escape_xml(text));
        }
        if !el.children().is_empty() {
            out.push('\n');
            for child in el.children() {
                self.write_element(out, *child, depth + 1)?;
            }
            indent(out, depth);
        }
        out.push_str("</");
        out.push_str(name);
        out.push_str(">\n");
        Ok(())
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, r#" {name}="{}""#, escape_xml(value));
}

fn write_value_attr(out: &mut String, name: &str, value: &AttrValue) {
    let mut text = String::new();
    let _ = write!(text, "{value}");
    write_attr(out, name, &text);
    if let AttrValue::Paint(color) = value {
        let rgba = color.to_rgba8();
        if rgba.a != 255 {
            let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
        }
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Vec2;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn writes_nested_markup_with_classes_attrs_and_styles() {
        let mut doc = Document::new();
        let svg = doc.append(doc.root(), Tag::Svg).unwrap();
        doc.element_mut(svg)
            .unwrap()
            .classed("bar-chart", true)
            .set_attr("width", 1020.0);
        let g = doc.append(svg, Tag::G).unwrap();
        doc.element_mut(g)
            .unwrap()
            .set_attr("transform", Vec2::new(40.0, 20.0));
        let rect = doc.append(g, Tag::Rect).unwrap();
        doc.element_mut(rect)
            .unwrap()
            .classed("bar", true)
            .set_attr("fill", css::STEEL_BLUE)
            .set_style("opacity", 0.0);
        let text = doc.append(g, Tag::Text).unwrap();
        doc.element_mut(text).unwrap().set_text("A & <B>");

        let out = doc.to_svg_string(svg).unwrap();
        assert_eq!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"bar-chart\" width=\"1020\">\n\
             \x20 <g transform=\"translate(40,20)\">\n\
             \x20   <rect class=\"bar\" fill=\"#4682b4\" style=\"opacity: 0\"/>\n\
             \x20   <text>A &amp; &lt;B&gt;</text>\n\
             \x20 </g>\n\
             </svg>\n"
        );
    }

    #[test]
    fn translucent_paint_gets_an_opacity_attribute() {
        let mut doc = Document::new();
        let rect = doc.append(doc.root(), Tag::Rect).unwrap();
        doc.element_mut(rect)
            .unwrap()
            .set_attr("fill", css::STEEL_BLUE.with_alpha(0.5));
        let out = doc.to_svg_string(rect).unwrap();
        assert!(out.contains(r##"fill="#4682b4""##), "{out}");
        assert!(out.contains("fill-opacity=\"0.50"), "{out}");
    }
}
