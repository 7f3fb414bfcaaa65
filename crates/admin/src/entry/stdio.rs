#![forbid(unsafe_code)]

use crate::AdminServer;
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};

fn write_newline_json(stdout: &mut std::io::StdoutLock<'_>, resp: &Value) -> std::io::Result<()> {
    writeln!(stdout, "{resp}")?;
    stdout.flush()
}

/// One JSON request per line in, one JSON envelope per line out, until stdin closes.
pub(crate) fn run_stdio(server: &mut AdminServer) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    let reader = BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let resp = server.handle_line(&line);
        write_newline_json(&mut stdout, &resp)?;
    }
    Ok(())
}
