//! A minimal interactive shell.
//!
//! A line is split into words and the `<`, `>` and `|` operators, turned
//! into one stage per program, and every stage is spawned with its standard
//! streams wired to the files and pipes the line asks for. Intermediate
//! stages are reaped in the background; the last one is awaited and its exit
//! status is what `$?` expands to on the next line.
//!
//! ```no_run
//! # async fn demo() {
//! let mut session = pipesh::Session::new();
//! if let Err(e) = session.exec("ls -l | sort > listing.txt").await {
//!     eprintln!("{e}");
//! }
//! println!("exit status: {}", session.last_exit_code());
//! # }
//! ```

pub mod config;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod process_exec;
pub mod prompt;
pub mod reaper;
pub mod resolve;
pub mod shell;

pub use error::{ExecError, ResolveError};
pub use shell::{Outcome, PipelineRun, Session};
