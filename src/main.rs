//! tagmark CLI - render bracket-tag content to HTML
//!
//! Usage: `tagmark [--plain [N]] [FILE|-]`

use std::io::{self, Read, Write};

use tagmark::limits::DEFAULT_EXCERPT_CHARS;

fn main() -> io::Result<()> {
    let mut args = std::env::args().skip(1).peekable();

    let mut excerpt = None;
    if args.peek().map(String::as_str) == Some("--plain") {
        args.next();
        let limit = match args.peek().and_then(|a| a.parse::<usize>().ok()) {
            Some(n) => {
                args.next();
                n
            }
            None => DEFAULT_EXCERPT_CHARS,
        };
        excerpt = Some(limit);
    }

    // Read from stdin or file
    let input = match args.next() {
        Some(path) if path != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let output = match excerpt {
        Some(limit) => {
            let mut text = tagmark::to_plain_text(&input, limit);
            text.push('\n');
            text
        }
        None => tagmark::to_html(&input),
    };
    io::stdout().write_all(output.as_bytes())?;

    Ok(())
}
