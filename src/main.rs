use anyhow::Result;
use clap::Parser as _;
use mini_json_validator::{
    input::{read_input, InputSource},
    tokenize_with_positions, Parser, Position, Token, DEFAULT_MAX_DEPTH,
};
use std::{
    io::{self, Read, Write},
    path::PathBuf,
    process,
};

/// Exit codes of the `jsonv` binary.
mod exit_codes {
    pub const VALID: i32 = 0;
    pub const INVALID: i32 = 1;
    pub const INPUT_ERROR: i32 = 2;
}

#[derive(clap::Parser, Debug)]
#[command(name = "jsonv", version, about = "Check whether text is well-formed JSON")]
struct Cli {
    /// Path to a JSON file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// JSON text to check. Stdin is read when neither this nor --file is given
    #[arg(conflicts_with = "file")]
    json: Option<String>,

    /// Print the token stream grouped by source line
    #[arg(long)]
    tokens: bool,

    /// Reject containers nested deeper than this
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let cli = Cli::parse();
    let code = match run(
        cli,
        io::stdin().lock(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    ) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            exit_codes::INPUT_ERROR
        }
    };
    process::exit(code);
}

fn run<R: Read, W: Write, E: Write>(
    cli: Cli,
    stdin: R,
    out: &mut W,
    err: &mut E,
) -> Result<i32> {
    let source = InputSource::select(cli.file, cli.json);
    let text = read_input(&source, stdin)?;

    let (tokens, positions) = tokenize_with_positions(&text);
    if cli.tokens {
        for line in token_lines(&tokens, &positions) {
            writeln!(out, "{}", line)?;
        }
    }

    match Parser::new(&tokens).with_max_depth(cli.max_depth).validate() {
        Ok(()) => {
            writeln!(out, "true")?;
            Ok(exit_codes::VALID)
        }
        Err(e) => {
            match positions.get(e.pos) {
                Some(pos) => writeln!(err, "{} (line {})", e, pos)?,
                None => writeln!(err, "{}", e)?,
            }
            Ok(exit_codes::INVALID)
        }
    }
}

fn token_lines(tokens: &[Token], positions: &[Position]) -> Vec<String> {
    let mut lines = vec![];
    let mut row = 0;
    let mut lexemes: Vec<String> = vec![];

    for (token, pos) in tokens.iter().zip(positions) {
        if pos.row != row && !lexemes.is_empty() {
            lines.push(format!("Line {}: {}", row, lexemes.join(" ")));
            lexemes.clear();
        }
        row = pos.row;
        lexemes.push(token.to_string());
    }
    if !lexemes.is_empty() {
        lines.push(format!("Line {}: {}", row, lexemes.join(" ")));
    }
    lines
}
