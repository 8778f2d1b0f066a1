// Call-stack rendering for failure reports
//
// Purely informational: the rendering goes to an Output, never into the
// failure message itself.

use std::backtrace::Backtrace;

use crate::config::Palette;

/// Capture the current call stack as text, regardless of RUST_BACKTRACE.
pub fn capture() -> String {
    Backtrace::force_capture().to_string()
}

/// Whether a backtrace line belongs to test code rather than the engine,
/// the standard library or the harness.
pub fn is_test_frame(line: &str) -> bool {
    line.contains("::test_")
        || line.contains("::tests::")
        || line.contains("tests/")
        || line.contains("_test.rs")
        || line.contains("_tests::")
}

/// Color each line of `trace`: test frames highlighted, the rest dimmed.
///
/// Tabs become two spaces; every line ends with a newline.
pub fn render(trace: &str, palette: &Palette) -> String {
    let mut rendered = String::with_capacity(trace.len() + 64);

    for line in trace.lines() {
        let line = line.replace('\t', "  ");
        let painted = if is_test_frame(&line) {
            palette.paint_highlight(&line)
        } else {
            palette.paint_dim(&line)
        };
        rendered.push_str(&painted);
        rendered.push('\n');
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/library/std/src/backtrace.rs:312:9
   1: plumb_core::spec::Spec::fail
   2: integration_tests::test_primitive_mismatch
             at ./plumb-core/tests/integration_tests.rs:40:5
   3: core::ops::function::FnOnce::call_once";

    #[test]
    fn test_is_test_frame() {
        assert!(is_test_frame("   2: integration_tests::test_primitive_mismatch"));
        assert!(is_test_frame("   4: plumb_core::comparator::tests::test_no_error"));
        assert!(is_test_frame("at ./plumb-core/tests/integration_tests.rs:40:5"));
        assert!(!is_test_frame("   1: plumb_core::spec::Spec::fail"));
        assert!(!is_test_frame("   3: core::ops::function::FnOnce::call_once"));
    }

    #[test]
    fn test_render_colors_by_frame_kind() {
        let palette = Palette::ansi();
        let rendered = render(TRACE, &palette);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with(palette.dim));
        assert!(lines[3].starts_with(palette.highlight));
        assert!(lines[4].starts_with(palette.highlight));
        assert!(lines[5].starts_with(palette.dim));
        assert!(lines.iter().all(|line| line.ends_with(palette.reset)));
    }

    #[test]
    fn test_render_replaces_tabs() {
        let rendered = render("\tat frame", &Palette::plain());
        assert_eq!(rendered, "  at frame\n");
    }

    #[test]
    fn test_capture_is_not_empty() {
        assert!(!capture().trim().is_empty());
    }
}
