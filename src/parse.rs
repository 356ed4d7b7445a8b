use std::fmt;

/// Word that expands to the exit status of the last terminal stage.
pub const LAST_EXIT_CODE_VAR: &str = "$?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    RedirectIn,  // <
    RedirectOut, // >
    Pipe,        // |
}

static OPERATORS: &[(char, Operator)] = &[
    ('<', Operator::RedirectIn),
    ('>', Operator::RedirectOut),
    ('|', Operator::Pipe),
];

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RedirectIn => "<",
            Self::RedirectOut => ">",
            Self::Pipe => "|",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Op(Operator),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Word(w) => w,
            Self::Op(op) => op.as_str(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a raw input line into tokens and expand `$?`.
///
/// Only an operator at the very start of a whitespace-separated word is
/// recognised; whatever follows it is kept as one word, unscanned.
pub fn tokenize(line: &str, last_exit_code: i32) -> Vec<Token> {
    line.split_whitespace()
        .flat_map(split_operator)
        .map(|token| match token {
            Token::Word(w) if w == LAST_EXIT_CODE_VAR => Token::Word(last_exit_code.to_string()),
            other => other,
        })
        .collect()
}

fn split_operator(word: &str) -> Vec<Token> {
    OPERATORS
        .iter()
        .find_map(|&(c, op)| {
            word.strip_prefix(c).map(|rest| {
                let mut tokens = vec![Token::Op(op)];
                if !rest.is_empty() {
                    tokens.push(Token::Word(rest.to_string()));
                }
                tokens
            })
        })
        .unwrap_or_else(|| vec![Token::Word(word.to_string())])
}
