//! Text rendering of solved grids.

use std::{collections::HashMap, fmt::Write as _};

use numberlink_core::{EMPTY_CHAR, Position};
use numberlink_solver::SearchGrid;

const RESET: &str = "\x1b[0m";

/// Flow colors in order of first appearance; the bold variants follow.
const COLORS: [&str; 16] = [
    "\x1b[31m",
    "\x1b[32m",
    "\x1b[33m",
    "\x1b[34m",
    "\x1b[35m",
    "\x1b[36m",
    "\x1b[30m",
    "\x1b[37m",
    "\x1b[1m\x1b[31m",
    "\x1b[1m\x1b[32m",
    "\x1b[1m\x1b[33m",
    "\x1b[1m\x1b[34m",
    "\x1b[1m\x1b[35m",
    "\x1b[1m\x1b[36m",
    "\x1b[1m\x1b[30m",
    "\x1b[1m\x1b[37m",
];

/// Box-drawing glyph for each connection mask (N=1, E=2, S=4, W=8).
pub const TUBE: [char; 16] = [
    ' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
];

/// How a solved grid is drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// A `width height` header, then every cell showing its flow label.
    #[default]
    Simple,
    /// Endpoints keep their labels; other cells draw their connections.
    Tubes,
}

/// Renders solved grids as text, optionally with ANSI colors.
///
/// # Examples
///
/// ```
/// use numberlink_cli::render::{RenderStyle, Renderer};
/// use numberlink_solver::BacktrackSolver;
///
/// let grid = "A..A".parse()?;
/// let solved = BacktrackSolver::new().solve_grid(grid).unwrap();
///
/// assert_eq!(Renderer::new(RenderStyle::Simple).render(&solved), "4 1\nAAAA\n");
/// assert_eq!(Renderer::new(RenderStyle::Tubes).render(&solved), "A──A\n");
/// # Ok::<(), numberlink_core::ConfigurationError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer {
    style: RenderStyle,
    colors: bool,
}

impl Renderer {
    /// Creates an uncolored renderer with the given style.
    #[must_use]
    pub fn new(style: RenderStyle) -> Self {
        Self {
            style,
            colors: false,
        }
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Returns the rendering style.
    #[must_use]
    pub fn style(&self) -> RenderStyle {
        self.style
    }

    /// Renders `grid`, one line per row, each ending with a newline.
    #[must_use]
    pub fn render(&self, grid: &SearchGrid) -> String {
        let width = grid.grid().width();
        let height = grid.grid().height();
        let labels = grid.flow_labels();
        let palette = if self.colors {
            palette(&labels)
        } else {
            HashMap::new()
        };

        let mut out = String::new();
        if self.style == RenderStyle::Simple {
            writeln!(out, "{width} {height}").expect("writing to a String cannot fail");
        }
        for y in 0..height {
            for x in 0..width {
                let pos = Position::new(x, y);
                let label = labels[y * width + x];
                let ch = match self.style {
                    RenderStyle::Simple => label.unwrap_or(EMPTY_CHAR),
                    RenderStyle::Tubes => {
                        let cell = grid.grid().index(pos);
                        grid.grid()
                            .label(cell)
                            .unwrap_or(TUBE[usize::from(grid.connections(pos).bits())])
                    }
                };
                match label.and_then(|label| palette.get(&label)) {
                    Some(color) => {
                        write!(out, "{color}{ch}{RESET}").expect("writing to a String cannot fail");
                    }
                    None => out.push(ch),
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Assigns a color to every flow label in row-major order of appearance.
fn palette(labels: &[Option<char>]) -> HashMap<char, &'static str> {
    let mut palette = HashMap::new();
    for label in labels.iter().flatten() {
        let next = COLORS[palette.len() % COLORS.len()];
        palette.entry(*label).or_insert(next);
    }
    palette
}

#[cfg(test)]
mod tests {
    use numberlink_solver::BacktrackSolver;

    use super::*;

    fn solved(text: &str) -> SearchGrid {
        BacktrackSolver::new()
            .solve_grid(text.parse().unwrap())
            .unwrap()
    }

    #[test]
    fn test_simple() {
        let grid = solved("A.A\nB.B");
        let text = Renderer::new(RenderStyle::Simple).render(&grid);
        assert_eq!(text, "3 2\nAAA\nBBB\n");
    }

    #[test]
    fn test_tubes() {
        let grid = solved("A.A\nB.B");
        let text = Renderer::new(RenderStyle::Tubes).render(&grid);
        assert_eq!(text, "A─A\nB─B\n");

        let grid = solved("AB\n..\nAB");
        let text = Renderer::new(RenderStyle::Tubes).render(&grid);
        assert_eq!(text, "AB\n││\nAB\n");
        assert_eq!(Renderer::default().style(), RenderStyle::Simple);
    }

    #[test]
    fn test_tube_table_matches_masks() {
        use numberlink_core::Directions;

        assert_eq!(TUBE[usize::from(Directions::empty().bits())], ' ');
        assert_eq!(TUBE[usize::from((Directions::NORTH | Directions::SOUTH).bits())], '│');
        assert_eq!(TUBE[usize::from((Directions::EAST | Directions::WEST).bits())], '─');
        assert_eq!(TUBE[usize::from((Directions::SOUTH | Directions::EAST).bits())], '┌');
        assert_eq!(TUBE[usize::from((Directions::NORTH | Directions::WEST).bits())], '┘');
    }

    #[test]
    fn test_colors_per_flow() {
        let grid = solved("A.A\nB.B");
        let text = Renderer::new(RenderStyle::Simple)
            .with_colors(true)
            .render(&grid);
        let red = format!("{}A{RESET}", COLORS[0]);
        let green = format!("{}B{RESET}", COLORS[1]);
        assert_eq!(text, format!("3 2\n{red}{red}{red}\n{green}{green}{green}\n"));
    }

    #[test]
    fn test_palette_cycles() {
        let labels = (0..20u8)
            .map(|i| Some(char::from(b'a' + i)))
            .chain([Some('a'), None])
            .collect::<Vec<_>>();
        let palette = palette(&labels);
        assert_eq!(palette.len(), 20);
        assert_eq!(palette[&'a'], COLORS[0]);
        assert_eq!(palette[&'h'], COLORS[7]);
        assert_eq!(palette[&'i'], COLORS[8]);
        assert_eq!(palette[&'q'], COLORS[0]);
    }
}
