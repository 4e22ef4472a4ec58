//! SVG export of a rendered container

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::render::scene::{Anchor, Container, Mark, Shape};

fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

fn style_attrs(mark: &Mark, offset: f64) -> String {
    let style = &mark.style;
    let mut attrs = String::new();
    let _ = write!(attrs, r#" class="{}""#, mark.class);
    match style.fill {
        Some(fill) => {
            let _ = write!(attrs, r#" fill="{fill}""#);
        }
        None if !matches!(mark.shape, Shape::Text { .. }) => attrs.push_str(r#" fill="none""#),
        None => {}
    }
    if let Some(stroke) = style.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{stroke}" stroke-width="{}""#,
            fmt_num(style.stroke_width)
        );
    }
    if style.opacity < 1.0 {
        let _ = write!(attrs, r#" opacity="{}""#, fmt_num(style.opacity));
    }
    if let Some(dash) = style.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{dash}""#);
    }
    if style.bold {
        attrs.push_str(r#" font-weight="bold""#);
    }
    if offset != 0.0 {
        let _ = write!(attrs, r#" transform="translate(0,{})""#, fmt_num(offset));
    }
    attrs
}

fn write_mark(out: &mut String, mark: &Mark, offset: f64) {
    let attrs = style_attrs(mark, offset);
    let body = match &mark.shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{attrs}"#,
            fmt_num(*x),
            fmt_num(*y),
            fmt_num(*width),
            fmt_num(*height)
        ),
        Shape::Line { x1, y1, x2, y2 } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{attrs}"#,
            fmt_num(*x1),
            fmt_num(*y1),
            fmt_num(*x2),
            fmt_num(*y2)
        ),
        Shape::Circle { cx, cy, r } => format!(
            r#"<circle cx="{}" cy="{}" r="{}"{attrs}"#,
            fmt_num(*cx),
            fmt_num(*cy),
            fmt_num(*r)
        ),
        Shape::Path { points } => {
            let d: Vec<String> = points
                .iter()
                .enumerate()
                .map(|(i, (x, y))| {
                    format!("{}{},{}", if i == 0 { "M" } else { "L" }, fmt_num(*x), fmt_num(*y))
                })
                .collect();
            format!(r#"<path d="{}"{attrs}"#, d.join(" "))
        }
        Shape::Text {
            x,
            y,
            text,
            anchor,
            size,
        } => {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" text-anchor="{anchor}" font-size="{}"{attrs}>{}"#,
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*size),
                encode_text(text)
            );
            if let Some(tip) = &mark.tooltip {
                let _ = write!(out, "<title>{}</title>", encode_text(tip));
            }
            out.push_str("</text>\n");
            return;
        }
    };

    out.push_str(&body);
    match &mark.tooltip {
        Some(tip) => {
            let _ = writeln!(out, "><title>{}</title></{}>", encode_text(tip), tag(&mark.shape));
        }
        None => out.push_str("/>\n"),
    }
}

fn tag(shape: &Shape) -> &'static str {
    match shape {
        Shape::Rect { .. } => "rect",
        Shape::Line { .. } => "line",
        Shape::Circle { .. } => "circle",
        Shape::Path { .. } => "path",
        Shape::Text { .. } => "text",
    }
}

/// Serialize the container's marks as a standalone SVG document
pub fn to_svg(container: &Container) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}" width="{}" height="{}" viewBox="0 0 {} {}" font-family="sans-serif">"#,
        encode_double_quoted_attribute(container.id()),
        fmt_num(container.width()),
        fmt_num(container.height()),
        fmt_num(container.width()),
        fmt_num(container.height())
    );
    for mark in container.marks() {
        let offset = mark.group.map(|g| container.offset_of(g)).unwrap_or(0.0);
        write_mark(&mut out, mark, offset);
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::rgb;

    #[test]
    fn test_svg_escapes_text_and_tooltips() {
        let mut container = Container::new("flow", 200.0, 100.0);
        container.push(Mark::text("title", 100.0, 20.0, "Gold & <Silver>").bold());
        container.push(
            Mark::rect("node", 10.0, 10.0, 15.0, 40.5)
                .fill(rgb(0x1f77b4))
                .tooltip("USA\nTotal: 5"),
        );
        let svg = to_svg(&container);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Gold &amp; &lt;Silver&gt;"));
        assert!(svg.contains(
            r##"<rect x="10" y="10" width="15" height="40.5" class="node" fill="#1f77b4"><title>USA"##
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_dragged_group_is_translated() {
        let mut container = Container::new("flow", 200.0, 100.0);
        container.push(Mark::rect("node", 0.0, 0.0, 10.0, 10.0).group(0));
        container.drag(0, 12.0);
        assert!(to_svg(&container).contains(r#"transform="translate(0,12)""#));
    }
}
