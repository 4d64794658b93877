use std::{fs, io, path::Path};

/// A non-blank line of a list file, trimmed, with its 1-based line number.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    pub number: usize,
    pub content: String,
}

/// Reads `path` and returns its non-blank lines. Both `\n` and `\r\n` endings are accepted.
pub fn read_lines(path: &Path) -> io::Result<Vec<Line>> {
    Ok(lines(&fs::read_to_string(path)?))
}

pub fn lines(content: &str) -> Vec<Line> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| Line {
            number: index + 1,
            content: line.trim().to_string(),
        })
        .filter(|line| !line.content.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use assert2::{assert, let_assert};

    use super::*;

    #[test]
    fn blank_lines_are_skipped_and_numbers_kept() {
        let parsed = lines("first\r\n\n   \n  second  \n");

        assert!(
            parsed
                == vec![
                    Line {
                        number: 1,
                        content: "first".to_string()
                    },
                    Line {
                        number: 4,
                        content: "second".to_string()
                    },
                ]
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");

        let result = read_lines(&dir.path().join("absent.txt"));

        let_assert!(Err(e) = result);
        assert!(e.kind() == io::ErrorKind::NotFound);
    }
}
