use std::fmt::Write as _;

use crate::config::CanvasSettings;
use crate::element::{Element, ElementKind, color_hex};
use crate::scene::Scene;

/// Emitted once, before any element block
const HELPERS: &str = "// Helper functions
function fitTextToWidth(ctx, text, maxWidth, minSize, fontFamily, maxSize) {
    let size = maxSize;
    do {
        ctx.font = size + 'px ' + fontFamily;
        size--;
    } while (ctx.measureText(text).width > maxWidth && size > minSize);
    return size + 1;
}

function wrapText(ctx, text, x, y, maxWidth, lineHeight) {
    const words = text.split(' ');
    let line = '';
    let currentY = y;
    
    for (let n = 0; n < words.length; n++) {
        const testLine = line + words[n] + ' ';
        const metrics = ctx.measureText(testLine);
        const testWidth = metrics.width;
        
        if (testWidth > maxWidth && n > 0) {
            ctx.fillText(line, x, currentY);
            line = words[n] + ' ';
            currentY += lineHeight;
        } else {
            line = testLine;
        }
    }
    ctx.fillText(line, x, currentY);
}

";

/// Canvas 2D script that redraws the visible part of `scene`.
///
/// One block per visible element, in paint order, each headed by the
/// element's name. Images cannot be embedded, so their block is a
/// commented-out template.
pub fn generate_code(scene: &Scene, canvas: &CanvasSettings) -> String {
    let mut code = String::new();
    let (w, h) = (canvas.width, canvas.height);

    let _ = writeln!(code, "// Canvas drawing code ({w}x{h})");
    code.push_str("const canvas = document.getElementById('canvas');\n");
    code.push_str("const ctx = canvas.getContext('2d');\n");
    let _ = writeln!(code, "canvas.width = {w};");
    let _ = writeln!(code, "canvas.height = {h};\n");

    code.push_str("// Set background color\n");
    let _ = writeln!(code, "ctx.fillStyle = '{}';", color_hex(canvas.background));
    code.push_str("ctx.fillRect(0, 0, canvas.width, canvas.height);\n\n");

    code.push_str(HELPERS);

    for (index, element) in scene.elements().iter().enumerate() {
        if element.visible {
            element_block(&mut code, index, element);
        }
    }
    code
}

fn element_block(code: &mut String, index: usize, element: &Element) {
    let _ = writeln!(code, "// {}", element.name);
    let (x, y) = (num(element.position.x), num(element.position.y));

    match &element.kind {
        ElementKind::Text(text) => {
            let _ = writeln!(
                code,
                "ctx.font = '{} {}px {}';",
                text.weight.as_css(),
                num(text.font_size),
                quoted(&text.font_family)
            );
            let _ = writeln!(code, "ctx.fillStyle = '{}';", color_hex(text.color));
            let _ = writeln!(code, "ctx.textAlign = '{}';", text.align.as_str());
            let _ = writeln!(
                code,
                "wrapText(ctx, '{}', {x}, {y}, {}, {});\n",
                quoted(&text.content),
                num(text.width),
                num(text.line_advance())
            );
        }
        ElementKind::Line(line) => {
            code.push_str("ctx.beginPath();\n");
            let _ = writeln!(code, "ctx.moveTo({x}, {y});");
            let _ = writeln!(code, "ctx.lineTo({}, {});", num(line.end.x), num(line.end.y));
            let _ = writeln!(code, "ctx.strokeStyle = '{}';", color_hex(line.stroke_color));
            let _ = writeln!(code, "ctx.lineWidth = {};", num(line.stroke_width));
            code.push_str("ctx.stroke();\n\n");
        }
        ElementKind::Rectangle(rect) => {
            let (w, h) = (num(rect.width), num(rect.height));
            if rect.filled {
                let _ = writeln!(code, "ctx.fillStyle = '{}';", color_hex(rect.fill_color));
                let _ = writeln!(code, "ctx.fillRect({x}, {y}, {w}, {h});");
            }
            let _ = writeln!(code, "ctx.strokeStyle = '{}';", color_hex(rect.stroke_color));
            let _ = writeln!(code, "ctx.lineWidth = {};", num(rect.stroke_width));
            let _ = writeln!(code, "ctx.strokeRect({x}, {y}, {w}, {h});\n");
        }
        ElementKind::Circle(circle) => {
            code.push_str("ctx.beginPath();\n");
            let _ = writeln!(code, "ctx.arc({x}, {y}, {}, 0, 2 * Math.PI);", num(circle.radius));
            if circle.filled {
                let _ = writeln!(code, "ctx.fillStyle = '{}';", color_hex(circle.fill_color));
                code.push_str("ctx.fill();\n");
            }
            let _ = writeln!(code, "ctx.strokeStyle = '{}';", color_hex(circle.stroke_color));
            let _ = writeln!(code, "ctx.lineWidth = {};", num(circle.stroke_width));
            code.push_str("ctx.stroke();\n\n");
        }
        ElementKind::Image(image) => {
            let (w, h) = (num(image.width), num(image.height));
            code.push_str("// Note: Image element requires the image to be loaded first\n");
            let _ = writeln!(code, "// const img{index} = new Image();");
            let _ = writeln!(code, "// img{index}.onload = function() {{");
            let _ = writeln!(code, "//     ctx.drawImage(img{index}, {x}, {y}, {w}, {h});");
            code.push_str("// };\n");
            let _ = writeln!(code, "// img{index}.src = 'path/to/your/image';\n");
        }
    }
}

/// Number literal with at most three decimals and no trailing zeros
fn num(value: f32) -> String {
    let rounded = (value as f64 * 1000.0).round() / 1000.0;
    // avoid "-0"
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}

/// Contents of a single-quoted string literal
fn quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_plain_literals() {
        assert_eq!(num(50.0), "50");
        assert_eq!(num(18.0 * 1.4), "25.2");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(12.5), "12.5");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(quoted(r"it's a\b"), r"it\'s a\\b");
        assert_eq!(quoted("two\nlines"), r"two\nlines");
    }
}
