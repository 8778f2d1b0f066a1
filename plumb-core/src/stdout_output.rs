//! Stdout wrapper implementing Output
//!
//! Default destination for stack renderings.

use std::io::{self, Write};

use crate::output::Output;

#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutOutput;

impl StdoutOutput {
    pub fn new() -> Self {
        StdoutOutput
    }
}

impl Output for StdoutOutput {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        // print! goes through the test harness capture; raw io::stdout() would not
        print!("{}", String::from_utf8_lossy(data));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
