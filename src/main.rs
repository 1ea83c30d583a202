use std::io::Read;
use std::path::Path;

use clap::Parser;

#[derive(Parser)]
#[command(name = "undot", about = "Convert Graphviz xdot JSON back into the DOT language")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,
}

fn read_input(file: Option<&Path>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let source = cli.file.as_deref();
    let input = read_input(source).unwrap_or_else(|e| {
        let what = source.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
        eprintln!("ERROR: failed to read {what}: {e}");
        std::process::exit(1);
    });

    match undot::convert(&input) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
}
