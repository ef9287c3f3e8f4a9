use anyhow::{Context, Result, bail, ensure};
use sapper_core::{Coord, Coord2, MineLayout};

/// A board read from text: a `rows columns` header, one line of `.` and `X` per row, then optionally the first click
/// as `row column`.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    pub layout: MineLayout,
    pub first_click: Option<Coord2>,
}

pub fn parse(text: &str) -> Result<Map> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines.next().context("map is empty")?;
    let size @ (rows, columns) = parse_pair(header).context("reading the board size")?;
    ensure!(rows > 0 && columns > 0, "board must have at least one row and column, got {rows}x{columns}");

    let mut mines = Vec::new();
    for row in 0..rows {
        let line = lines
            .next()
            .with_context(|| format!("missing board row {row} of {rows}"))?;
        let width = line.chars().count();
        ensure!(width == usize::from(columns), "row {row} has {width} cells, expected {columns}");

        for (column, ch) in (0..columns).zip(line.chars()) {
            match ch {
                '.' => {}
                'X' => mines.push((row, column)),
                _ => bail!("unexpected {ch:?} at row {row}, column {column}"),
            }
        }
    }

    let layout = MineLayout::from_mine_coords(size, &mines).context("building the mine layout")?;

    let first_click = lines
        .next()
        .map(|line| parse_pair(line).context("reading the first click"))
        .transpose()?
        .map(|coords| layout.validate_coords(coords).context("first click is off the board"))
        .transpose()?;

    if let Some(extra) = lines.next() {
        bail!("unexpected trailing line {extra:?}");
    }

    Ok(Map { layout, first_click })
}

fn parse_pair(line: &str) -> Result<(Coord, Coord)> {
    let mut parts = line.split_whitespace();
    let mut next = |what: &str| -> Result<Coord> {
        let part = parts.next().with_context(|| format!("missing {what}"))?;
        part.parse().with_context(|| format!("invalid {what} {part:?}"))
    };
    let pair = (next("row")?, next("column")?);

    ensure!(parts.next().is_none(), "expected two numbers, got {line:?}");
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_board_and_first_click() {
        let map = parse("3 3\n.X.\n...\n..X\n2 0\n").unwrap();

        assert_eq!(map.layout.size(), (3, 3));
        assert_eq!(map.layout.mine_count(), 2);
        assert!(map.layout.contains_mine((0, 1)));
        assert!(map.layout.contains_mine((2, 2)));
        assert_eq!(map.first_click, Some((2, 0)));
    }

    #[test]
    fn first_click_is_optional() {
        let map = parse("1 2\nX.").unwrap();

        assert_eq!(map.first_click, None);
        assert_eq!(map.layout.safe_cell_count(), 1);
    }

    #[test]
    fn blank_lines_and_padding_are_ignored() {
        let map = parse("\n  2 2 \n\n.X\n..\n\n").unwrap();

        assert_eq!(map.layout.mine_count(), 1);
    }

    #[test]
    fn short_row_is_rejected() {
        let err = parse("2 3\n...\n..\n").unwrap_err();

        assert!(err.to_string().contains("row 1"), "{err}");
    }

    #[test]
    fn missing_row_is_rejected() {
        assert!(parse("3 1\n.\n.\n").is_err());
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = parse("1 3\n.?.\n").unwrap_err();

        assert!(err.to_string().contains("column 1"), "{err}");
    }

    #[test]
    fn first_click_must_be_on_the_board() {
        assert!(parse("2 2\n..\n..\n2 0\n").is_err());
        assert!(parse("2 2\n..\n..\n0\n").is_err());
    }

    #[test]
    fn oversized_board_is_rejected() {
        let row = ".".repeat(65);
        let text = format!("65 65\n{}", vec![row; 65].join("\n"));

        assert!(parse(&text).is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(parse("").is_err());
        assert!(parse("0 3\n").is_err());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(parse("1 1\n.\n0 0\nmore\n").is_err());
    }
}
