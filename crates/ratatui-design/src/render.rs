use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Writes spans starting at `(x, y)`, skipping the first `start_col` columns and never writing more
/// than `max_cols` columns. Wide characters that would straddle either edge are dropped.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) {
    if max_cols == 0 {
        return;
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;

    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            fallback_style.patch(span.style)
        };
        for ch in span.content.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w <= start_col {
                col += w;
                continue;
            }
            if col < start_col && col + w > start_col {
                col += w;
                continue;
            }
            if out_cols + w > max_cols {
                return;
            }

            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol(&ch.to_string());
            }
            dx += 1;
            out_cols += 1;
            col += w;

            if w == 2 {
                if let Some(cell) = buf.cell_mut((x + dx, y)) {
                    cell.set_style(style);
                    cell.set_symbol("");
                }
                dx += 1;
                out_cols += 1;
            }
        }
    }
}

pub fn render_str_clipped(x: u16, y: u16, max_cols: u16, buf: &mut Buffer, s: &str, style: Style) {
    render_spans_clipped(x, y, 0, max_cols, buf, &[Span::raw(s)], style);
}

pub fn str_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Patches every cell of `area` with `style`, keeping existing symbols.
pub fn dim_area(area: Rect, buf: &mut Buffer, style: Style) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let patched = cell.style().patch(style);
                cell.set_style(patched);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn spans_are_clipped_to_width() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        render_spans_clipped(
            0,
            0,
            0,
            3,
            &mut buf,
            &[Span::raw("ab"), Span::raw("cdef")],
            Style::default(),
        );
        assert_eq!(row(&buf, 0), "abc  ");
    }

    #[test]
    fn wide_char_is_not_split() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        render_str_clipped(0, 0, 3, &mut buf, "你好", Style::default());
        assert_eq!(buf[(0, 0)].symbol(), "你");
        assert_eq!(buf[(2, 0)].symbol(), " ");
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let r = centered_rect(Rect::new(0, 0, 20, 10), 10, 4);
        assert_eq!(r, Rect::new(5, 3, 10, 4));
        let tiny = centered_rect(Rect::new(2, 2, 4, 2), 10, 4);
        assert_eq!(tiny, Rect::new(2, 2, 4, 2));
    }
}
