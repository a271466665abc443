// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Write as _;

use peniko::Color;
use peniko::color::palette::css;
use vizbar_dom::AttrValue;

const BAR_FILL: Color = css::STEEL_BLUE;
const BAR_HOVER: Color = css::BROWN;
const AXIS_STROKE: Color = css::BLACK;

fn hex(color: Color) -> String {
    AttrValue::from(color).to_string()
}

fn stylesheet() -> String {
    let mut css = String::new();
    let _ = writeln!(css, ".bar {{ fill: {}; }}", hex(BAR_FILL));
    let _ = writeln!(css, ".bar:hover {{ fill: {}; }}", hex(BAR_HOVER));
    let _ = writeln!(
        css,
        ".axis path, .axis line {{ fill: none; stroke: {}; shape-rendering: crispEdges; }}",
        hex(AXIS_STROKE)
    );
    css.push_str(".axis text { font: 10px sans-serif; }\n");
    css
}

/// Wraps serialized chart markup in a standalone page.
pub(crate) fn render_page(title: &str, body: &str) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{title}</title>");
    out.push_str("<style>\n");
    out.push_str(&stylesheet());
    out.push_str("</style>\n</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{title}</h1>");
    out.push_str(body);
    out.push_str("</body>\n</html>\n");
    out
}
