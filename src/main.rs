use std::process;

use shamir_chunks::{combine, split, ShareBundle, SharingError};

const USAGE: &str = "usage:
  shamir-chunks split <secret> <n> <t>
  shamir-chunks combine <x1> <bundle1> <x2> <bundle2> [...]";

fn parse_count(value: &str, name: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|e| format!("{} must be a positive integer: {}", name, e))
}

fn run_split(args: &[String]) -> Result<(), String> {
    let [secret, n, t] = args else {
        return Err(USAGE.to_string());
    };
    let n = parse_count(n, "n")?;
    let t = parse_count(t, "t")?;

    let bundles = split(secret.as_bytes(), n, t).map_err(|e| e.to_string())?;
    for bundle in bundles {
        println!("{}", bundle);
    }
    Ok(())
}

fn run_combine(args: &[String]) -> Result<(), String> {
    if args.len() < 4 || args.len() % 2 != 0 {
        return Err(USAGE.to_string());
    }
    let bundles = args
        .chunks(2)
        .map(|pair| ShareBundle::parse(&pair[0], &pair[1]))
        .collect::<Result<Vec<_>, SharingError>>()
        .map_err(|e| e.to_string())?;

    let secret = combine(&bundles).map_err(|e| e.to_string())?;
    println!("{}", String::from_utf8_lossy(&secret));
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let outcome = match args.split_first() {
        Some((command, rest)) if command == "split" => run_split(rest),
        Some((command, rest)) if command == "combine" => run_combine(rest),
        _ => Err(USAGE.to_string()),
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        process::exit(1);
    }
}
