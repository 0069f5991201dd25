//! stdin/stdout implementation of the operator terminal.

use logofetch_core::terminal::{Level, Notice, Terminal};
use std::io::{self, BufRead, Write};

pub struct ConsoleTerminal<R> {
    input: R,
}

impl ConsoleTerminal<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> ConsoleTerminal<R> {
    #[cfg(test)]
    pub fn from_reader(input: R) -> Self {
        Self { input }
    }

    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        // Terminals in a legacy code page send bytes that are not UTF-8.
        let line = String::from_utf8_lossy(&line);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead> Terminal for ConsoleTerminal<R> {
    fn prompt(&mut self, question: &str) -> io::Result<String> {
        print!("{}", question);
        io::stdout().flush()?;
        self.read_answer()
    }

    fn report(&mut self, notice: Notice) {
        match notice.level {
            Level::Error | Level::Warning => eprintln!("{}", notice),
            Level::Info | Level::Success => println!("{}", notice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_endings() {
        let mut t = ConsoleTerminal::from_reader(io::Cursor::new("carrefour.com\r\nCarrefour\n"));
        assert_eq!(t.read_answer().unwrap(), "carrefour.com");
        assert_eq!(t.read_answer().unwrap(), "Carrefour");
    }

    #[test]
    fn end_of_input_is_unexpected_eof() {
        let mut t = ConsoleTerminal::from_reader(io::Cursor::new(""));
        assert_eq!(
            t.read_answer().unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn keeps_inner_whitespace() {
        let mut t = ConsoleTerminal::from_reader(io::Cursor::new("  Lidl Stiftung  \n"));
        assert_eq!(t.read_answer().unwrap(), "  Lidl Stiftung  ");
    }

    #[test]
    fn non_utf8_input_is_decoded_lossily() {
        let mut t = ConsoleTerminal::from_reader(io::Cursor::new(&b"caf\xe9.com\nlidl.de\n"[..]));
        assert_eq!(t.read_answer().unwrap(), "caf\u{fffd}.com");
        assert_eq!(t.read_answer().unwrap(), "lidl.de");
    }
}
