use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A parsed Intcode program: the initial memory image, word `i` at address `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    words: Vec<i64>,
}

impl Program {
    /// Parse comma-separated base-10 integers. Surrounding whitespace, on the
    /// text and on each token, is ignored. Blank text is the empty program.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::default());
        }
        let words = text
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| Error::Parse {
                    index,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { words })
    }

    /// Read a program file and parse its contents.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Treat `source` as a path if such a file exists, otherwise as program text.
    pub fn source(source: &str) -> Result<Self> {
        let path = Path::new(source);
        if path.is_file() {
            Self::load(path)
        } else {
            Self::parse(source)
        }
    }

    pub fn words(&self) -> &[i64] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<i64>> for Program {
    fn from(words: Vec<i64>) -> Self {
        Self { words }
    }
}

impl From<&[i64]> for Program {
    fn from(words: &[i64]) -> Self {
        Self {
            words: words.to_vec(),
        }
    }
}

impl<const N: usize> From<[i64; N]> for Program {
    fn from(words: [i64; N]) -> Self {
        Self {
            words: words.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let program = Program::parse("1,0,0,0,99").unwrap();
        assert_eq!(program.words(), &[1, 0, 0, 0, 99]);
    }

    #[test]
    fn test_parse_trims_whitespace_and_newline() {
        let program = Program::parse("  109, -1,\n204 ,1\n").unwrap();
        assert_eq!(program.words(), &[109, -1, 204, 1]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(Program::parse("").unwrap().is_empty());
        assert!(Program::parse(" \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_bad_token() {
        match Program::parse("1,2,x3,4") {
            Err(Error::Parse { index, token }) => {
                assert_eq!(index, 2);
                assert_eq!(token, "x3");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_trailing_comma_is_error() {
        assert!(matches!(
            Program::parse("1,2,"),
            Err(Error::Parse { index: 2, .. })
        ));
    }

    #[test]
    fn test_from_str() {
        let program: Program = "3,0,4,0,99".parse().unwrap();
        assert_eq!(program.len(), 5);
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("intcode-load-{}.txt", std::process::id()));
        std::fs::write(&path, "1,9,10,3\n").unwrap();
        let program = Program::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(program.words(), &[1, 9, 10, 3]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Program::load("/nonexistent/intcode/program.txt");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_source_falls_back_to_text() {
        let program = Program::source("99").unwrap();
        assert_eq!(program.words(), &[99]);
    }

    #[test]
    fn test_source_reads_file() {
        let path = std::env::temp_dir().join(format!("intcode-source-{}.txt", std::process::id()));
        std::fs::write(&path, "104,7,99").unwrap();
        let program = Program::source(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(program.words(), &[104, 7, 99]);
    }
}
