//! Utilities for generating examples, benchmarks, and test cases.
//!
//! Every generator numbers its rectangles from zero, in the order that it
//! produces them.

use crate::Rect;

/// Generate an `n` by `n` grid of squares.
///
/// The top-left of the first square is at (x0, y0). Each square has size
/// `size x size`, and the distance between the top-left corners of
/// neighboring squares (both horizontally and vertically) is `offset`.
pub fn squares((x0, y0): (f64, f64), size: f64, offset: f64, n: usize) -> Vec<Rect<usize>> {
    let mut ret = Vec::with_capacity(n * n);
    for j in 0..n {
        let y = y0 + j as f64 * offset;
        for i in 0..n {
            let x = x0 + i as f64 * offset;
            ret.push(Rect::new(ret.len(), x, x + size, y, y + size));
        }
    }
    ret
}

/// Generate an `n` by `n` checkerboard-like pattern with overlapping squares.
/// For `n = 3`, it looks like:
///
/// ```text
/// ┌────┐ ┌────┐ ┌────┐
/// │    │ │    │ │    │
/// │  ┌─┼─┼─┐┌─┼─┼─┐  │
/// └──┼─┘ └─┼┼─┘ └─┼──┘
/// ┌──┼─┐ ┌─┼┼─┐ ┌─┼──┐
/// │  └─┼─┼─┘└─┼─┼─┘  │
/// │  ┌─┼─┼─┐┌─┼─┼─┐  │
/// └──┼─┘ └─┼┼─┘ └─┼──┘
/// ┌──┼─┐ ┌─┼┼─┐ ┌─┼──┐
/// │  └─┼─┼─┘└─┼─┼─┘  │
/// │    │ │    │ │    │
/// └────┘ └────┘ └────┘
/// ```
///
/// The outer `n x n` squares come first, followed by the inner
/// `(n - 1) x (n - 1)` ones.
pub fn checkerboard(n: usize) -> Vec<Rect<usize>> {
    let mut ret = squares((0.0, 0.0), 30.0, 40.0, n);
    let inner = squares((20.0, 20.0), 30.0, 40.0, n.saturating_sub(1));
    let offset = ret.len();
    ret.extend(inner.into_iter().map(|mut r| {
        r.id += offset;
        r
    }));
    ret
}

/// Generate `rows` lines of "text": each line is a row of words of varying
/// widths, and the lines have varying lengths and indents.
///
/// The widths come from a fixed pseudo-random sequence, so the layout only
/// depends on `rows` and `words_per_row`.
pub fn paragraph(rows: usize, words_per_row: usize) -> Vec<Rect<usize>> {
    const LINE_HEIGHT: f64 = 16.0;
    const LEADING: f64 = 4.0;
    const SPACE: f64 = 5.0;

    let mut state: u32 = 0x2545_f491;
    let mut next = move |modulus: u32| {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state % modulus
    };

    let mut ret = Vec::with_capacity(rows * words_per_row);
    for row in 0..rows {
        let top_y = row as f64 * (LINE_HEIGHT + LEADING);
        let mut x = f64::from(next(4)) * 10.0;
        let words = words_per_row.saturating_sub(next(3) as usize).max(1);
        for _ in 0..words {
            let width = 10.0 + f64::from(next(8)) * 5.0;
            ret.push(Rect::new(ret.len(), x, x + width, top_y, top_y + LINE_HEIGHT));
            x += width + SPACE;
        }
    }
    ret
}

/// Generate a staircase of `n` rectangles, each one a step down and to the
/// right of the previous one, overlapping it.
pub fn staircase(n: usize) -> Vec<Rect<usize>> {
    (0..n)
        .map(|i| {
            let x = i as f64 * 20.0;
            let y = i as f64 * 10.0;
            Rect::new(i, x, x + 30.0, y, y + 15.0)
        })
        .collect()
}
