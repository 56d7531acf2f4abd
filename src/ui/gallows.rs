use crate::render::STAGES;

const HEIGHT: usize = 7;
const WIDTH: usize = 7;

/// Parts added per stage, as (row, column, symbol)
const PARTS: [&[(usize, usize, char)]; STAGES] = [
    &[(2, 5, 'O')],
    &[(3, 5, '|'), (4, 5, '|')],
    &[(3, 4, '/')],
    &[(3, 6, '\\')],
    &[(5, 4, '/')],
    &[(5, 6, '\\')],
];

const FRAME: [&str; HEIGHT] = [
    " +---+ ",
    " |   | ",
    " |     ",
    " |     ",
    " |     ",
    " |     ",
    "=======",
];

/// ASCII drawing of the gallows at `stage` (0 = empty, `STAGES` = complete)
pub fn gallows_lines(stage: usize) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = FRAME.iter().map(|l| l.chars().collect()).collect();

    for part in PARTS.iter().take(stage.min(STAGES)) {
        for &(row, col, symbol) in part.iter() {
            rows[row][col] = symbol;
        }
    }

    rows.into_iter().map(|r| r.into_iter().collect()).collect()
}

pub const fn gallows_size() -> (u16, u16) {
    (WIDTH as u16, HEIGHT as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_gallows() {
        let lines = gallows_lines(0);
        assert_eq!(lines.len(), HEIGHT);
        assert!(lines.iter().all(|l| l.chars().count() == WIDTH));
        assert!(!lines.iter().any(|l| l.contains('O')));
    }

    #[test]
    fn test_complete_gallows() {
        let lines = gallows_lines(STAGES);
        assert_eq!(lines[2], " |   O ");
        assert_eq!(lines[3], " |  /|\\");
        assert_eq!(lines[4], " |   | ");
        assert_eq!(lines[5], " |  / \\");
    }

    #[test]
    fn test_stage_beyond_complete_is_capped() {
        assert_eq!(gallows_lines(STAGES + 3), gallows_lines(STAGES));
    }

    #[test]
    fn test_each_stage_adds_something() {
        for stage in 1..=STAGES {
            assert_ne!(gallows_lines(stage), gallows_lines(stage - 1));
        }
    }
}
