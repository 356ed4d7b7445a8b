use std::{
    io::{self, PipeWriter},
    process::{ExitStatus, Stdio},
};

use tokio::process::{Child, Command};

use crate::{
    error::ExecError,
    pipeline::{Sink, Source, Stage},
};

/// A process that has been started and still has to be waited for.
#[derive(Debug)]
pub struct Launched {
    pub name: String,
    pub child: Child,
    /// The interpreter's own copy of the stage's pipe write-end. Whoever
    /// waits on `child` drops it once the process is gone.
    pub pipe_writer: Option<PipeWriter>,
}

/// Start a stage's program with its descriptors attached.
///
/// The stage is consumed: every file and pipe end it holds is either handed
/// to the child or closed on return, whether the spawn succeeded or not.
pub fn launch(stage: Stage) -> Result<Launched, ExecError> {
    let Stage {
        program,
        argv,
        stdin,
        stdout,
        stderr,
        ..
    } = stage;
    let Some((name, args)) = argv.split_first() else {
        return Err(ExecError::Spawn {
            program: program.display().to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty argument list"),
        });
    };
    let name = name.clone();
    let mut pipe_writer = None;

    let mut command = Command::new(&program);
    command
        .arg0(&name)
        .args(args)
        .stdin(source_stdio(stdin))
        .stdout(sink_stdio(stdout, &mut pipe_writer)?)
        .stderr(sink_stdio(stderr, &mut pipe_writer)?);

    let child = command.spawn().map_err(|source| ExecError::Spawn {
        program: name.clone(),
        source,
    })?;

    Ok(Launched {
        name,
        child,
        pipe_writer,
    })
}

fn source_stdio(source: Source) -> Stdio {
    match source {
        Source::Inherit => Stdio::inherit(),
        Source::File { file, .. } => file.into(),
        Source::Pipe(reader) => reader.into(),
    }
}

fn sink_stdio(sink: Sink, keep: &mut Option<PipeWriter>) -> Result<Stdio, ExecError> {
    Ok(match sink {
        Sink::Inherit => Stdio::inherit(),
        Sink::File { file, .. } => file.into(),
        Sink::Pipe(writer) => {
            let for_child = writer.try_clone().map_err(ExecError::Pipe)?;
            *keep = Some(writer);
            for_child.into()
        }
    })
}

/// The process's exit code, or -1 if it did not exit normally (killed by a
/// signal).
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};

    fn stage(program: &str, argv: &[&str]) -> Stage {
        Stage {
            program: PathBuf::from(program),
            argv: argv.iter().map(ToString::to_string).collect(),
            stdin: Source::Inherit,
            stdout: Sink::Inherit,
            stderr: Sink::Inherit,
            terminal: true,
        }
    }

    async fn run(stage: Stage) -> i32 {
        let mut launched = launch(stage).expect("spawn");
        exit_code(launched.child.wait().await.expect("wait"))
    }

    #[tokio::test]
    async fn exit_codes_are_reported() {
        assert_eq!(run(stage("/bin/sh", &["sh", "-c", "exit 0"])).await, 0);
        assert_eq!(run(stage("/bin/sh", &["sh", "-c", "exit 7"])).await, 7);
        assert_eq!(run(stage("/bin/sh", &["sh", "-c", "kill -9 $$"])).await, -1);
    }

    #[tokio::test]
    async fn file_bindings_are_attached() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "copied through cat\n").unwrap();

        let mut cat = stage("/bin/sh", &["sh", "-c", "cat"]);
        cat.stdin = Source::File {
            path: input.clone(),
            file: fs::File::open(&input).unwrap(),
        };
        cat.stdout = Sink::File {
            path: output.clone(),
            file: fs::File::create(&output).unwrap(),
        };

        assert_eq!(run(cat).await, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), "copied through cat\n");
    }

    #[tokio::test]
    async fn pipe_writer_is_kept_for_the_reaper() {
        let (_reader, writer) = std::io::pipe().unwrap();
        let mut producer = stage("/bin/sh", &["sh", "-c", "true"]);
        producer.stdout = Sink::Pipe(writer);
        producer.terminal = false;

        let mut launched = launch(producer).unwrap();
        assert_eq!(launched.name, "sh");
        assert!(launched.pipe_writer.is_some());
        launched.child.wait().await.unwrap();
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() {
        let err = launch(stage("/definitely/not/a/program", &["ghost"])).unwrap_err();
        match err {
            ExecError::Spawn { program, .. } => assert_eq!(program, "ghost"),
            other => panic!("expected a spawn error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_argument_list_is_rejected() {
        let err = launch(stage("/bin/true", &[])).unwrap_err();
        match err {
            ExecError::Spawn { program, source } => {
                assert_eq!(program, "/bin/true");
                assert_eq!(source.kind(), io::ErrorKind::InvalidInput);
            }
            other => panic!("expected a spawn error, got {other:?}"),
        }
    }
}
