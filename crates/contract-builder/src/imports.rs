use std::{
    collections::{BTreeMap, VecDeque},
    fs,
    path::PathBuf,
};

use tracing::trace;

use crate::solc::Source;

/// Outcome of looking up a single import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    /// The dependency could not be read. Carries the reason, which is handed to the compiler
    /// diagnostics rather than raised.
    Missing(String),
}

/// Looks up imported source units in a local package directory.
#[derive(Clone, Debug)]
pub struct ImportResolver {
    package_dir: PathBuf,
}

/// Every source unit reachable from the main one.
#[derive(Clone, Debug, Default)]
pub struct CollectedSources {
    pub units: BTreeMap<String, Source>,
    pub missing: Vec<String>,
}

impl ImportResolver {
    pub fn new(package_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
        }
    }

    /// Read the source unit `unit_name` from the package directory.
    pub fn resolve(&self, unit_name: &str) -> Resolution {
        if unit_name.split('/').any(|segment| segment == "..") {
            return Resolution::Missing(format!("{unit_name} escapes the package directory"));
        }
        let path = self.package_dir.join(unit_name);
        match fs::read_to_string(&path) {
            Ok(contents) => Resolution::Found(contents),
            Err(err) => Resolution::Missing(format!("{}: {err}", path.display())),
        }
    }

    /// Walk the import graph starting at `main_unit`, registering every unit that could be read.
    ///
    /// Units that cannot be resolved are listed in `missing`; the compiler reports them later.
    pub fn collect_sources(&self, main_unit: &str, main_content: String) -> CollectedSources {
        let mut collected = CollectedSources::default();
        let mut pending = VecDeque::from([(main_unit.to_string(), main_content)]);

        while let Some((unit, content)) = pending.pop_front() {
            for import in find_imports(&content) {
                let dependency = unit_name_of(&unit, &import);
                if dependency == main_unit
                    || collected.units.contains_key(&dependency)
                    || collected.missing.contains(&dependency)
                    || pending.iter().any(|(name, _)| *name == dependency)
                {
                    continue;
                }
                match self.resolve(&dependency) {
                    Resolution::Found(contents) => {
                        trace!(unit = %dependency, "Resolved import");
                        pending.push_back((dependency, contents));
                    }
                    Resolution::Missing(_) => collected.missing.push(dependency),
                }
            }
            collected.units.insert(unit, Source { content });
        }

        collected
    }
}

/// Source unit name of `import` as seen from `importer`. Relative imports are resolved against the
/// importer's directory, everything else is taken verbatim.
fn unit_name_of(importer: &str, import: &str) -> String {
    if !(import.starts_with("./") || import.starts_with("../")) {
        return import.to_string();
    }

    let mut segments: Vec<&str> = importer.split('/').collect();
    segments.pop();
    for segment in import.split('/') {
        match segment {
            "." | "" => {}
            ".." => {
                if segments.pop().is_none() {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Paths of all `import` directives in a Solidity source.
pub fn find_imports(source: &str) -> Vec<String> {
    let tokens = tokenize(source);
    let mut imports = Vec::new();
    let mut rest = tokens.iter();

    while let Some(token) = rest.next() {
        if !matches!(token, Token::Word(word) if word == "import") {
            continue;
        }
        let path = rest
            .by_ref()
            .take_while(|token| **token != Token::Symbol(';'))
            .filter_map(|token| match token {
                Token::Literal(path) => Some(path.clone()),
                _ => None,
            })
            .next();
        imports.extend(path);
    }

    imports
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Literal(String),
    Symbol(char),
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Splits a Solidity source into words, string literals and single-character symbols. Comments
/// and whitespace are dropped.
fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for c in chars.by_ref() {
                    if previous == '*' && c == '/' {
                        break;
                    }
                    previous = c;
                }
            }
            '"' | '\'' => {
                let mut literal = String::new();
                while let Some(next) = chars.next() {
                    match next {
                        '\\' => literal.extend(chars.next()),
                        _ if next == c => break,
                        _ => literal.push(next),
                    }
                }
                tokens.push(Token::Literal(literal));
            }
            c if is_word_char(c) => {
                let mut word = String::from(c);
                while let Some(next) = chars.next_if(|&next| is_word_char(next)) {
                    word.push(next);
                }
                tokens.push(Token::Word(word));
            }
            c if c.is_whitespace() => {}
            c => tokens.push(Token::Symbol(c)),
        }
    }

    tokens
}
