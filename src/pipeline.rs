//! Turns a token stream into stages that are ready to spawn.
//!
//! The builder is an iterator: each call to `next` resolves one stage's
//! executable, opens its redirections and, if the stage ends in `|`, creates
//! the pipe that links it to the following stage. The caller is expected to
//! spawn a stage before asking for the next one, so a failure in stage N
//! leaves stages before it running.

use std::{
    fs::{File, OpenOptions},
    io::{self, PipeReader, PipeWriter},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
    vec,
};

use crate::{
    error::ExecError,
    parse::{Operator, Token},
    resolve::Resolve,
};

/// Where a stage reads its standard input from.
#[derive(Debug)]
pub enum Source {
    Inherit,
    File { path: PathBuf, file: File },
    Pipe(PipeReader),
}

/// Where a stage writes its standard output or error to.
#[derive(Debug)]
pub enum Sink {
    Inherit,
    File { path: PathBuf, file: File },
    Pipe(PipeWriter),
}

/// One program invocation, with every descriptor it needs already open.
#[derive(Debug)]
pub struct Stage {
    /// Resolved executable.
    pub program: PathBuf,
    /// `argv[0]` is the command name as typed.
    pub argv: Vec<String>,
    pub stdin: Source,
    pub stdout: Sink,
    pub stderr: Sink,
    /// Last stage of the pipeline; its exit status is the pipeline's.
    pub terminal: bool,
}

impl Stage {
    fn new(program: PathBuf, name: String, stdin: Source) -> Self {
        Self {
            program,
            argv: vec![name],
            stdin,
            stdout: Sink::Inherit,
            stderr: Sink::Inherit,
            terminal: false,
        }
    }

    /// Command name as typed; empty if `argv` is.
    pub fn name(&self) -> &str {
        self.argv.first().map_or("", String::as_str)
    }
}

// Start of a stage that has not been built yet.
struct Pending {
    command: Token,
    stdin: Source,
}

pub struct PipelineBuilder<'r, R: Resolve + ?Sized> {
    resolver: &'r R,
    tokens: vec::IntoIter<Token>,
    pending: Option<Pending>,
}

impl<'r, R: Resolve + ?Sized> PipelineBuilder<'r, R> {
    pub fn new(tokens: Vec<Token>, resolver: &'r R) -> Self {
        let mut tokens = tokens.into_iter();
        let pending = tokens.next().map(|command| Pending {
            command,
            stdin: Source::Inherit,
        });
        Self {
            resolver,
            tokens,
            pending,
        }
    }

    fn build_stage(&mut self, Pending { command, stdin }: Pending) -> Result<Stage, ExecError> {
        let name = command.as_str().to_string();
        let program = self.resolver.resolve(&name)?;
        let mut stage = Stage::new(program, name, stdin);

        while let Some(token) = self.tokens.next() {
            match token {
                Token::Word(arg) => stage.argv.push(arg),
                Token::Op(Operator::RedirectIn) => {
                    let path = self.operand(Operator::RedirectIn)?;
                    let file = File::open(&path).map_err(|source| ExecError::RedirectIn {
                        path: path.clone(),
                        source,
                    })?;
                    stage.stdin = Source::File { path, file };
                }
                Token::Op(Operator::RedirectOut) => {
                    let path = self.operand(Operator::RedirectOut)?;
                    let file = open_for_output(&path).map_err(|source| ExecError::RedirectOut {
                        path: path.clone(),
                        source,
                    })?;
                    stage.stdout = Sink::File { path, file };
                }
                Token::Op(Operator::Pipe) => {
                    let command = self
                        .tokens
                        .next()
                        .ok_or(ExecError::MissingOperand(Operator::Pipe.as_str()))?;
                    let (reader, writer) = io::pipe().map_err(ExecError::Pipe)?;
                    stage.stdout = Sink::Pipe(writer);
                    self.pending = Some(Pending {
                        command,
                        stdin: Source::Pipe(reader),
                    });
                    return Ok(stage);
                }
            }
        }

        stage.terminal = true;
        Ok(stage)
    }

    fn operand(&mut self, op: Operator) -> Result<PathBuf, ExecError> {
        self.tokens
            .next()
            .map(|token| PathBuf::from(token.as_str()))
            .ok_or(ExecError::MissingOperand(op.as_str()))
    }
}

impl<R: Resolve + ?Sized> Iterator for PipelineBuilder<'_, R> {
    type Item = Result<Stage, ExecError>;

    fn next(&mut self) -> Option<Self::Item> {
        let pending = self.pending.take()?;
        Some(self.build_stage(pending))
    }
}

fn open_for_output(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
}
