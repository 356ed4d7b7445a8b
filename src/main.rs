use std::io::{self, BufRead, ErrorKind, Write};

use anyhow::Context;
use pipesh::{Session, config, prompt::Prompt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // [1] Load configuration
    let cfg = config::init();

    // [2] Initialize prompt style
    let prompt = Prompt::new(&cfg);

    let mut stdout = io::stdout();
    for line in &cfg.banner {
        writeln!(stdout, "{line}")?;
    }

    let mut session = Session::new();
    let mut lines = io::stdin().lock().lines();

    // [3] Main REPL loop
    loop {
        prompt.print(&mut stdout).context("writing prompt")?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) if e.kind() == ErrorKind::InvalidData => {
                eprintln!("Reading input: {e}");
                continue;
            }
            Some(Err(e)) => return Err(e).context("reading input"),
            None => break,
        };

        if let Err(e) = session.exec(&line).await {
            eprintln!("{e}");
        }
    }

    writeln!(stdout)?;
    Ok(())
}
