//! Request text for both phases.

use super::markup::MARKUP_OPEN;
use super::sections::{BODY_MARKER, HEAD_MARKER, LEGS_MARKER};
use super::types::GenerationResult;
use crate::input::params::{BRUSH_THICKNESS, ERASER_THICKNESS, SHAPE_SIZE};

/// Width and height of the body fragment requested in phase 1.
pub const BODY_SIZE: (u32, u32) = (300, 220);
/// Width and height of the complete figure requested in phase 2.
pub const FIGURE_SIZE: (u32, u32) = (400, 600);

fn svg_open(size: (u32, u32)) -> String {
    format!(
        "{MARKUP_OPEN} width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
        size.0, size.1
    )
}

/// Prompt asking for head instructions, a body fragment and leg instructions.
pub fn phase1_prompt() -> String {
    let (brush, eraser, shape) = (BRUSH_THICKNESS, ERASER_THICKNESS, SHAPE_SIZE);
    let (body_width, body_height) = BODY_SIZE;
    let body_open = svg_open(BODY_SIZE);
    format!(
        r#"You are setting up a collaborative drawing exercise. The person drawing has LIMITED TOOLS:
- Basic brush ({}-{}px thickness)
- Eraser ({}-{}px thickness)
- Color picker (any color)
- 3 simple shapes: Circle, Square, Triangle ({}-{}px size)

Write REALISTIC character instructions that work with these tools and lead to something comparable to your own SVG.
Be SPECIFIC about colors taken from the artwork (hex codes such as #FF5733) so they can be picked exactly.

Based on this artwork, provide:
1. {HEAD_MARKER} head shape, eyes, nose, mouth and hair, each with a specific color.
2. {BODY_MARKER} a body SVG ({body_width}px x {body_height}px) using the SAME colors named in the instructions.
3. {LEGS_MARKER} basic geometric legs with specific colors from the artwork's palette.

Keep it fair: any color you ask for must be the exact color used in your SVG.

Format EXACTLY like this:
{HEAD_MARKER}
[character instructions with specific colors]

{BODY_MARKER}
{body_open}
[simple SVG using the same colors]
</svg>

{LEGS_MARKER}
[shape-based leg instructions with specific colors]"#,
        brush.min, brush.max, eraser.min, eraser.max, shape.min, shape.max,
    )
}

/// Prompt asking the model to draw the full figure from its own instructions.
///
/// Head, legs and body are embedded verbatim.
pub fn phase2_prompt(generation: &GenerationResult) -> String {
    let figure_open = svg_open(FIGURE_SIZE);
    format!(
        r#"CREATIVE TASK: Create an SVG character drawing, do not describe the image.

You previously gave these instructions for a collaborative drawing exercise:

HEAD INSTRUCTIONS: {head}

LEG INSTRUCTIONS: {legs}

BODY SVG: {body}

Combine head, body and legs into one complete character, following your instructions literally and reusing the body design and colors.

OUTPUT REQUIREMENTS:
- Respond with ONLY SVG code
- Start with {figure_open}
- End with </svg>
- No text before or after the SVG"#,
        head = generation.head_text,
        legs = generation.legs_text,
        body = generation.body_markup,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::sections;

    #[test]
    fn phase1_lists_tool_ranges_and_format() {
        let prompt = phase1_prompt();
        assert!(prompt.contains("(1-15px thickness)"));
        assert!(prompt.contains("(5-30px thickness)"));
        assert!(prompt.contains("(20-100px size)"));
        assert!(prompt.contains("<svg width=\"300\" height=\"220\""));
        // The format template itself must satisfy the section layout.
        assert!(sections::split_sections(&prompt[prompt.find("Format").unwrap()..]).is_ok());
    }

    #[test]
    fn phase2_embeds_results_verbatim() {
        let generation = GenerationResult::structured(
            "Draw a circle (#FFDBAC)",
            "<svg><rect fill=\"#123456\"/></svg>",
            "Two black lines",
            "",
        );
        let prompt = phase2_prompt(&generation);
        assert!(prompt.contains("HEAD INSTRUCTIONS: Draw a circle (#FFDBAC)\n"));
        assert!(prompt.contains("LEG INSTRUCTIONS: Two black lines\n"));
        assert!(prompt.contains("BODY SVG: <svg><rect fill=\"#123456\"/></svg>\n"));
        assert!(prompt.contains("<svg width=\"400\" height=\"600\""));
        assert!(prompt.ends_with("- No text before or after the SVG"));
    }

    #[test]
    fn phase1_ends_with_legs_placeholder() {
        let prompt = phase1_prompt();
        assert!(prompt.starts_with("You are setting up a collaborative drawing exercise."));
        assert!(prompt.ends_with("LEG_INSTRUCTIONS:\n[shape-based leg instructions with specific colors]"));
    }
}
