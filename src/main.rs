use std::env;
use std::process;

use bitcalc::engine::{Accumulator, EngineConfig};
use bitcalc::history::HistoryLog;
use bitcalc::repl::Repl;
use bitcalc::{Base, OverflowMode};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Usage: bitcalc [options]");
        println!();
        println!("Options:");
        println!("  --width <bits>    Bit width, multiple of 8 in 8..=128 (default: 64)");
        println!("  --mode <m>        signed | unsigned | relative (default: unsigned)");
        println!("  --hex             Start in hexadecimal display");
        println!("  --history <file>  Append completed operations to a log file");
        return;
    }

    let mut config = EngineConfig::default();

    if let Some(idx) = args.iter().position(|a| a == "--width") {
        match args.get(idx + 1).and_then(|a| a.parse::<u32>().ok()) {
            Some(bits) => config.bits = bits,
            None => {
                eprintln!("--width requires a number");
                process::exit(1);
            }
        }
    }

    if let Some(idx) = args.iter().position(|a| a == "--mode") {
        config.mode = match args.get(idx + 1).map(|a| a.to_lowercase()).as_deref() {
            Some("signed") => OverflowMode::Signed,
            Some("unsigned") => OverflowMode::Unsigned,
            Some("relative") | Some("rel") => OverflowMode::Relative,
            _ => {
                eprintln!("--mode requires one of: signed, unsigned, relative");
                process::exit(1);
            }
        };
    }

    if args.iter().any(|a| a == "--hex") {
        config.base = Base::Hexadecimal;
    }

    let mut engine = match Accumulator::with_config(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if let Some(idx) = args.iter().position(|a| a == "--history") {
        let Some(path) = args.get(idx + 1) else {
            eprintln!("--history requires a file path");
            process::exit(1);
        };
        match HistoryLog::with_file(path) {
            Ok(log) => engine.set_history(log),
            Err(e) => {
                eprintln!("cannot open history file {}: {}", path, e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = Repl::with_engine(engine).run() {
        eprintln!("I/O error: {}", e);
        process::exit(1);
    }
}
