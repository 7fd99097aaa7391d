//! Properties every layout must satisfy, checked over a set of mixed rows.

mod common;

use common::*;
use par_term_config::{Config, FallbackFonts, FontRange, GlyphNudge};
use par_term_typeset::{DrawableRun, GridCell, Point, Typesetter, cells_from_text};

/// Rows mixing ASCII, marks, fallback scripts, wide clusters and ligatures.
fn sample_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["a", "b", "c"],
        vec!["a\u{1DC1}", "a\u{032A}", "a\u{034B}", "\u{1F600}", ""],
        vec!["\u{1F476}", "", "\u{1F3FD}", "", "a"],
        vec!["하", "", "a", "泰", "", "-", ">"],
        vec!["\u{10437}", "\u{1F14}", "\u{1F600}", ""],
        vec!["-", "-", ">", "a", "\u{1F600}", "", "!", "="],
        vec!["", "a", "b"],
        vec!["a", "\u{E000}", "", "b"],
        vec!["", ""],
    ]
}

fn both_modes(row: &[&str], start_column: usize) -> [Vec<DrawableRun>; 2] {
    let typesetter = typesetter();
    let cells = cells(row);
    [
        typesetter.layout_without_ligatures(&cells, &font(FIRA), &params(start_column)),
        typesetter.layout_with_ligatures(&cells, &font(FIRA), &params(start_column)),
    ]
}

#[test]
fn test_runs_partition_the_row() {
    for row in sample_rows() {
        for start_column in [0, 7] {
            for runs in both_modes(&row, start_column) {
                assert_partition(&runs, start_column, row.len());
            }
        }
    }
}

#[test]
fn test_adjacent_runs_change_font() {
    for row in sample_rows() {
        for runs in both_modes(&row, 0) {
            for pair in runs.windows(2) {
                assert_ne!(pair[0].font, pair[1].font, "row {row:?}");
            }
        }
    }
}

#[test]
fn test_run_carries_color_and_baseline() {
    for row in sample_rows() {
        for runs in both_modes(&row, 3) {
            for run in &runs {
                assert_eq!(run.color, COLOR);
                assert_eq!(run.anchor.y, Y);
            }
        }
    }
}

#[test]
fn test_pinned_glyphs_never_land_on_continuation_cells() {
    for row in sample_rows() {
        let [pinned, _] = both_modes(&row, 0);
        for glyph in pinned.iter().flat_map(|run| run.glyphs.iter()) {
            let column = glyph.position.x / CELL_WIDTH;
            assert_eq!(column.fract(), 0.0, "row {row:?}");
            let content = row[column as usize];
            assert!(!content.is_empty(), "glyph on continuation cell in {row:?}");
        }
    }
}

#[test]
fn test_anchor_is_first_content_cell() {
    for row in sample_rows() {
        for runs in both_modes(&row, 2) {
            for run in &runs {
                let first_content = (run.columns.start..run.columns.end)
                    .find(|&column| !row[column - 2].is_empty());
                if let Some(column) = first_content {
                    assert_eq!(run.anchor.x, column as f32 * CELL_WIDTH, "row {row:?}");
                }
            }
        }
    }
}

#[test]
fn test_layout_is_deterministic() {
    for row in sample_rows() {
        let first = both_modes(&row, 4);
        let second = both_modes(&row, 4);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_shifting_start_column_shifts_runs() {
    for row in sample_rows() {
        let [pinned_at_0, shaped_at_0] = both_modes(&row, 0);
        let [pinned_at_5, shaped_at_5] = both_modes(&row, 5);
        for (before, after) in pinned_at_0
            .iter()
            .zip(&pinned_at_5)
            .chain(shaped_at_0.iter().zip(&shaped_at_5))
        {
            assert_eq!(after.columns.start, before.columns.start + 5);
            assert_eq!(after.glyph_ids(), before.glyph_ids());
            assert_eq!(after.anchor.x - before.anchor.x, 5.0 * CELL_WIDTH);
        }
    }
}

#[test]
fn test_continuation_only_span_yields_glyphless_run() {
    // The right half of a wide character redrawn on its own
    let typesetter = typesetter();
    let span = vec![GridCell::continuation(0)];
    for ligatures in [false, true] {
        let runs = typesetter.layout(&span, &font(MENLO), &params(9), ligatures);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].font, font(MENLO));
        assert_eq!(runs[0].columns, 9..10);
        assert_eq!(runs[0].anchor, Point::new(9.0 * CELL_WIDTH, Y));
        assert!(runs[0].glyphs.is_empty());
    }
}

#[test]
fn test_cells_from_text_lays_out_wide_clusters() {
    let cells = cells_from_text("a하\u{1F600}b");
    let contents: Vec<&str> = cells.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["a", "하", "", "\u{1F600}", "", "b"]);

    let runs = typesetter().layout_with_ligatures(&cells, &font(MENLO), &params(0));
    let families: Vec<&str> = runs.iter().map(|run| run.font.family()).collect();
    assert_eq!(families, vec![MENLO, GOTHIC, EMOJI, MENLO]);
    assert_partition(&runs, 0, cells.len());
}

#[test]
fn test_typesetter_from_config() {
    let mut config = Config::default();
    config.fallback_fonts = FallbackFonts {
        emoji: vec![EMOJI.to_string()],
        cjk: vec![GOTHIC.to_string()],
        general: vec![COURIER_NEW.to_string(), MONACO.to_string()],
    };
    // A range font that lacks the mark it is pinned to is skipped
    config.font_ranges = vec![FontRange {
        start: 0x1DC0,
        end: 0x1DFF,
        font_family: MONACO.to_string(),
    }];
    config.glyph_nudges = vec![GlyphNudge {
        font_family: COURIER_NEW.to_string(),
        mark: '\u{1DC1}',
        x: 0.5,
        y: 0.0,
    }];

    let fonts = MockFonts::new();
    let typesetter = Typesetter::from_config(&config, MockShaper::new(fonts.clone()), fonts);

    let runs = typesetter.layout(
        &cells(&["a\u{1DC1}", "하", ""]),
        &font(MENLO),
        &params(0),
        false,
    );
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].font.family(), COURIER_NEW);
    assert_eq!(x_cells(&runs[0]), vec![0.0, 0.5]);
    assert_eq!(runs[1].font.family(), GOTHIC);
    assert_eq!(runs[1].columns, 1..3);
}

#[test]
fn test_shared_typesetter_lays_out_rows_in_parallel() {
    let typesetter = typesetter();
    let rows = sample_rows();
    let expected: Vec<Vec<DrawableRun>> = rows
        .iter()
        .map(|row| typesetter.layout_with_ligatures(&cells(row), &font(FIRA), &params(0)))
        .collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for (row, expected) in rows.iter().zip(&expected) {
                    let runs = typesetter.layout_with_ligatures(&cells(row), &font(FIRA), &params(0));
                    assert_eq!(&runs, expected);
                }
            });
        }
    });
}
