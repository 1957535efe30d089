// Drives the compiled binary through a PTY, exercising the real event loop
// and crossterm input handling.
//
// Requires a pseudo terminal; run with
// `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_answers_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("ionquiz");
    let cmd = format!("{} --mode cations --count 1", bin.display());

    let mut p = spawn(cmd)?;

    // Let the app enter the alternate screen
    std::thread::sleep(Duration::from_millis(200));

    p.send("sodium\r")?;
    std::thread::sleep(Duration::from_millis(200));

    // Results screen; ESC quits from every screen
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}
