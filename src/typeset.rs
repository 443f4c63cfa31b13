//! Math typesetting for result labels.
//!
//! The engine turns the LaTeX-ish text the endpoint returns (`\frac{1}{2}`,
//! `x^{2}`, `\cdot`) into text the 5x7 label font can show. It is loaded once
//! in the background at startup; until it is ready, or if loading fails,
//! labels are shown as their raw text.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::Error;

// Deeper groups or macro arguments are emitted literally.
const MAX_NESTING: usize = 64;

const BUILTIN_SYMBOLS: &[(&str, &str)] = &[
    ("cdot", "*"),
    ("times", "*"),
    ("ast", "*"),
    ("div", "/"),
    ("pm", "+-"),
    ("mp", "-+"),
    ("le", "<="),
    ("leq", "<="),
    ("ge", ">="),
    ("geq", ">="),
    ("ne", "!="),
    ("neq", "!="),
    ("lt", "<"),
    ("gt", ">"),
    ("approx", "~="),
    ("equiv", "=="),
    ("infty", "inf"),
    ("to", "->"),
    ("rightarrow", "->"),
    ("Rightarrow", "=>"),
    ("cdots", "..."),
    ("ldots", "..."),
    ("dots", "..."),
    ("circ", "deg"),
    ("degree", "deg"),
    ("quad", " "),
    ("qquad", " "),
    ("percent", "%"),
];

pub struct Typesetter {
    symbols: HashMap<String, String>,
}

impl Typesetter {
    /// Engine with only the built-in symbol table.
    pub fn builtin() -> Self {
        let symbols = BUILTIN_SYMBOLS
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { symbols }
    }

    /// Built-in table extended with a JSON object of `{"command": "replacement"}`.
    /// Keys may be written with or without the leading backslash.
    pub fn load(macros: Option<&Path>) -> Result<Self, Error> {
        let mut engine = Self::builtin();
        let Some(path) = macros else {
            return Ok(engine);
        };

        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Typeset(format!("read {}: {e}", path.display())))?;
        let extra: HashMap<String, String> = serde_json::from_str(&raw)
            .map_err(|e| Error::Typeset(format!("parse {}: {e}", path.display())))?;

        for (name, replacement) in extra {
            engine.symbols.insert(name.trim_start_matches('\\').to_string(), replacement);
        }
        Ok(engine)
    }

    /// Render markup as displayable text.
    pub fn typeset(&self, src: &str) -> String {
        let chars: Vec<char> = src.chars().collect();
        let mut cur = Cursor { src: &chars, pos: 0, depth: 0 };
        let out = self.sequence(&mut cur, false);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn sequence(&self, cur: &mut Cursor<'_>, in_group: bool) -> String {
        let mut out = String::new();
        while let Some(c) = cur.peek() {
            cur.bump();
            match c {
                '}' if in_group => break,
                '{' if cur.depth >= MAX_NESTING => {
                    out.push('{');
                    out.push_str(&cur.rest());
                }
                '{' => {
                    cur.depth += 1;
                    out.push_str(&self.sequence(cur, true));
                    cur.depth -= 1;
                }
                '$' => {}
                '\\' => self.command(cur, &mut out),
                '^' | '_' => {
                    out.push(c);
                    let arg = self.argument(cur);
                    if arg.chars().count() > 1 {
                        out.push_str(&format!("({arg})"));
                    } else {
                        out.push_str(&arg);
                    }
                }
                _ => out.push(c),
            }
        }
        out
    }

    /// One macro argument: a `{group}`, a `\command`, or a single character.
    fn argument(&self, cur: &mut Cursor<'_>) -> String {
        while cur.peek() == Some(' ') {
            cur.bump();
        }
        if cur.depth >= MAX_NESTING {
            return cur.rest();
        }
        cur.depth += 1;
        let out = match cur.peek() {
            Some('{') => {
                cur.bump();
                self.sequence(cur, true)
            }
            Some('\\') => {
                cur.bump();
                let mut out = String::new();
                self.command(cur, &mut out);
                out
            }
            Some(c) => {
                cur.bump();
                c.to_string()
            }
            None => String::new(),
        };
        cur.depth -= 1;
        out
    }

    fn command(&self, cur: &mut Cursor<'_>, out: &mut String) {
        let name = cur.command_name();
        match name.as_str() {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.argument(cur);
                let den = self.argument(cur);
                out.push_str(&wrap_if_compound(&num));
                out.push('/');
                out.push_str(&wrap_if_compound(&den));
            }
            "sqrt" => {
                let arg = self.argument(cur);
                out.push_str(&format!("sqrt({arg})"));
            }
            "text" | "mathrm" | "mathbf" | "mathit" | "operatorname" => {
                out.push_str(&self.argument(cur));
            }
            // sizing prefixes; the delimiter that follows is kept as-is
            "left" | "right" | "big" | "Big" | "bigl" | "bigr" => {}
            // inline/display math delimiters
            "(" | ")" | "[" | "]" => {}
            "," | ";" | ":" | " " | "\\" => out.push(' '),
            "!" => {}
            "{" | "}" | "%" | "$" | "&" | "#" | "_" => out.push_str(&name),
            other => match self.symbols.get(other) {
                Some(rep) => out.push_str(rep),
                None => out.push_str(other),
            },
        }
    }
}

fn wrap_if_compound(s: &str) -> String {
    if s.chars().count() <= 1 || s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        s.to_string()
    } else {
        format!("({s})")
    }
}

struct Cursor<'a> {
    src: &'a [char],
    pos: usize,
    depth: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Everything left, taken literally.
    fn rest(&mut self) -> String {
        let tail = self.src[self.pos..].iter().collect();
        self.pos = self.src.len();
        tail
    }

    /// Letters run (`\frac`) or a single symbol (`\,`). Empty at end of input.
    fn command_name(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.bump();
        }
        if self.pos == start {
            if let Some(c) = self.peek() {
                self.bump();
                return c.to_string();
            }
        }
        self.src[start..self.pos].iter().collect()
    }
}

// =============================================================================
// BACKGROUND LOAD
// =============================================================================

enum LoadState {
    Loading(Receiver<Result<Typesetter, Error>>),
    Ready(Typesetter),
    Failed,
}

/// One-shot background load of the engine with a completion signal.
pub struct TypesetLoader {
    state: LoadState,
}

impl TypesetLoader {
    /// Start loading on a background thread.
    pub fn spawn(macros: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new().name("typeset-load".into()).spawn(move || {
            let _ = tx.send(Typesetter::load(macros.as_deref()));
        });

        let state = match spawned {
            Ok(_) => LoadState::Loading(rx),
            Err(e) => {
                tracing::warn!(error = %e, "typesetter thread failed to start; labels stay plain text");
                LoadState::Failed
            }
        };
        Self { state }
    }

    /// Check the completion signal. Returns true exactly once, when loading
    /// has just finished (successfully or not).
    pub fn poll(&mut self) -> bool {
        let LoadState::Loading(rx) = &self.state else {
            return false;
        };
        let next = match rx.try_recv() {
            Ok(Ok(engine)) => {
                tracing::info!(symbols = engine.symbols.len(), "typesetter ready");
                LoadState::Ready(engine)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "typesetter unavailable; labels stay plain text");
                LoadState::Failed
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("typesetter thread exited without answering");
                LoadState::Failed
            }
        };
        self.state = next;
        true
    }

    /// The engine, once loaded.
    pub fn engine(&self) -> Option<&Typesetter> {
        match &self.state {
            LoadState::Ready(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, LoadState::Loading(_))
    }
}

#[cfg(test)]
#[path = "typeset_test.rs"]
mod tests;
