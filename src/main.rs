use clap::Parser;
use rpcalc::calc;
use std::io::{self, Read, Write};
use std::process;

#[derive(Parser)]
#[command(name = "rpcalc")]
#[command(about = "Command-line calculator for infix math expressions")]
#[command(version)]
struct Cli {
    /// Expression to evaluate; reads stdin (or starts an interactive
    /// session) when omitted
    expression: Option<String>,

    /// Additional namespaces to search ahead of the defaults
    #[arg(short = 'm', long = "use-modules", value_name = "MODULE", num_args = 0..)]
    use_modules: Vec<String>,

    /// Print the normalized expression, token sequence and postfix queue
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let modules: Vec<&str> = cli.use_modules.iter().map(String::as_str).collect();

    match cli.expression {
        Some(expr) => run_once(&expr, &modules, cli.verbose),
        None if atty::is(atty::Stream::Stdin) => repl(&modules, cli.verbose),
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("ERROR: {e}");
                process::exit(1);
            }
            run_once(buffer.trim(), &modules, cli.verbose);
        }
    }
}

fn run_once(expr: &str, modules: &[&str], verbose: bool) {
    match calc(expr, modules, verbose) {
        Ok(result) => println!("{result}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
    }
}

fn repl(modules: &[&str], verbose: bool) {
    loop {
        print!(">> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // an error ends the evaluation, not the session
        match calc(line, modules, verbose) {
            Ok(result) => println!("{result}"),
            Err(e) => eprintln!("ERROR: {e}"),
        }
    }
}
