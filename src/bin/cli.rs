//! liteDB CLI Client
//!
//! Interactive line client for a running liteDB server.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;

use clap::Parser;
use litedb::Result;

/// liteDB CLI
#[derive(Parser, Debug)]
#[command(name = "litedb-cli")]
#[command(about = "Interactive client for liteDB")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:9255")]
    server: String,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = repl(&args.server) {
        eprintln!("(err) {}", e);
        std::process::exit(1);
    }
}

/// Read lines from stdin, send them to the server, print the replies
fn repl(addr: &str) -> Result<()> {
    let stream = TcpStream::connect(addr)?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("litedb> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // stdin closed
            return Ok(());
        }
        if input.trim().is_empty() {
            continue;
        }
        if input.trim().eq_ignore_ascii_case("quit") {
            return Ok(());
        }

        writer.write_all(input.as_bytes())?;
        writer.flush()?;

        print_reply(&mut reader, &mut stdout)?;
    }
}

/// Read one reply and print it; an `(arr) n` header is followed by n
/// element lines.
fn print_reply<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> Result<()> {
    let header = read_reply_line(reader)?;
    writeln!(out, "{}", header)?;

    if let Some(count) = header.strip_prefix("(arr) ") {
        let count: usize = count
            .trim()
            .parse()
            .map_err(|_| litedb::LiteError::Protocol(format!("bad array header: {}", header)))?;
        for _ in 0..count {
            writeln!(out, "{}", read_reply_line(reader)?)?;
        }
    }

    Ok(())
}

fn read_reply_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(litedb::LiteError::Protocol(
            "server closed the connection".to_string(),
        ));
    }
    Ok(line.trim_end().to_string())
}
