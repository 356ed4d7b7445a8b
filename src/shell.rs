use crate::{
    error::ExecError,
    parse::{Token, tokenize},
    pipeline::PipelineBuilder,
    process_exec::{exit_code, launch},
    reaper::{Reaper, reap},
    resolve::{PathResolver, Resolve},
};

/// How a pipeline ended.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to run.
    Empty,
    /// The terminal stage ran to completion with this status.
    Exited(i32),
    /// Stage `stage` (0-based) could not be built, spawned or waited for.
    /// Stages before it were spawned and are left to their reapers.
    Failed { stage: usize, error: ExecError },
}

/// Everything a pipeline run produced.
#[derive(Debug)]
pub struct PipelineRun {
    /// Number of processes started.
    pub spawned: usize,
    /// One per non-terminal stage that was started.
    pub reapers: Vec<Reaper>,
    pub outcome: Outcome,
}

/// Build, spawn and wait for one pipeline.
///
/// Stages are spawned left to right as soon as they are complete; the
/// terminal stage is awaited here, every other stage by its own reaper.
pub async fn run_pipeline<R: Resolve + ?Sized>(tokens: Vec<Token>, resolver: &R) -> PipelineRun {
    let mut run = PipelineRun {
        spawned: 0,
        reapers: Vec::new(),
        outcome: Outcome::Empty,
    };

    for (index, stage) in PipelineBuilder::new(tokens, resolver).enumerate() {
        let launched = stage.and_then(|stage| {
            let terminal = stage.terminal;
            launch(stage).map(|launched| (terminal, launched))
        });

        match launched {
            Ok((false, launched)) => {
                run.spawned += 1;
                run.reapers.push(reap(launched));
            }
            Ok((true, mut launched)) => {
                run.spawned += 1;
                run.outcome = match launched.child.wait().await {
                    Ok(status) => Outcome::Exited(exit_code(status)),
                    Err(e) => Outcome::Failed {
                        stage: index,
                        error: ExecError::Wait(e),
                    },
                };
            }
            Err(error) => {
                run.outcome = Outcome::Failed {
                    stage: index,
                    error,
                };
                break;
            }
        }
    }

    run
}

/// Interactive session state: the resolver children are looked up with and
/// the exit status of the last completed pipeline.
pub struct Session<R = PathResolver> {
    resolver: R,
    last_exit_code: i32,
}

impl Session {
    pub fn new() -> Self {
        Self::with_resolver(PathResolver::from_env())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resolve> Session<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            last_exit_code: 0,
        }
    }

    pub fn last_exit_code(&self) -> i32 {
        self.last_exit_code
    }

    /// Run one input line. Only a completed terminal stage updates `$?`.
    pub async fn run(&mut self, line: &str) -> PipelineRun {
        let tokens = tokenize(line, self.last_exit_code);
        let run = run_pipeline(tokens, &self.resolver).await;
        if let Outcome::Exited(code) = run.outcome {
            self.last_exit_code = code;
        }
        run
    }

    /// Run one input line, reaping in the background, and surface a failure
    /// as an error for the caller to print.
    pub async fn exec(&mut self, line: &str) -> Result<(), ExecError> {
        match self.run(line).await.outcome {
            Outcome::Failed { error, .. } => Err(error),
            Outcome::Empty | Outcome::Exited(_) => Ok(()),
        }
    }
}
