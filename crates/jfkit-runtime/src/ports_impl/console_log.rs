use jfkit_core::TaskLogPort;
use std::io::Write;

/// Task log on the terminal: info and process output to stdout, warnings to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTaskLog;

impl TaskLogPort for ConsoleTaskLog {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("[WARN] {message}");
    }

    fn write_bytes(&self, bytes: &[u8]) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(bytes);
        let _ = stdout.flush();
    }
}
