/// Iterator over all module positions `(i, j)` in placement order.
///
/// The symbol is traversed in pairs of columns starting at the bottom right
/// corner. Inside a pair the right module is visited before the left one,
/// the direction alternates between upward and downward with each pair.
/// The column of the vertical timing pattern is skipped entirely.
///
/// Reserved modules are included, the caller has to skip them.
pub(super) struct ZigZag {
    width: usize,
    // right column of the current pair
    column: usize,
    row: usize,
    upward: bool,
    left: bool,
    done: bool,
}

impl ZigZag {
    pub(super) fn new(width: usize) -> Self {
        Self {
            width,
            column: width - 1,
            row: width - 1,
            upward: true,
            left: false,
            done: width < 2,
        }
    }

    fn advance(&mut self) {
        if !self.left {
            self.left = true;
            return;
        }
        self.left = false;
        let at_edge = if self.upward {
            self.row == 0
        } else {
            self.row == self.width - 1
        };
        if !at_edge {
            if self.upward {
                self.row -= 1;
            } else {
                self.row += 1;
            }
            return;
        }
        if self.column < 3 {
            self.done = true;
            return;
        }
        self.column -= 2;
        if self.column == super::function::TIMING {
            self.column -= 1;
        }
        self.upward = !self.upward;
    }
}

impl Iterator for ZigZag {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let j = if self.left { self.column - 1 } else { self.column };
        let pos = (self.row, j);
        self.advance();
        Some(pos)
    }
}
