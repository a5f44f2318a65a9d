use std::env;
use std::process;

use fretwork::{generate_voicings, score_voicing, Chord, SearchOptions};

fn usage() -> ! {
    eprintln!("Usage: fretwork <chord> [--json] [--max N] [--range MIN MAX]");
    eprintln!("       fretwork Am7 --max 3");
    eprintln!("       fretwork F --range 5 9 --json");
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage();
    }

    let symbol = &args[1];
    let mut json = false;
    let mut options = SearchOptions::default();

    // Parse flags
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                json = true;
                i += 1;
            }
            "--max" => {
                let Some(value) = args.get(i + 1).and_then(|v| v.parse::<usize>().ok()) else {
                    eprintln!("--max expects a number");
                    usage();
                };
                options.max_results = value;
                i += 2;
            }
            "--range" => {
                let min = args.get(i + 1).and_then(|v| v.parse::<u8>().ok());
                let max = args.get(i + 2).and_then(|v| v.parse::<u8>().ok());
                let (Some(min), Some(max)) = (min, max) else {
                    eprintln!("--range expects two fret numbers");
                    usage();
                };
                options.fret_range = Some((min, max));
                i += 3;
            }
            flag => {
                eprintln!("Unknown flag: {}", flag);
                usage();
            }
        }
    }

    let chord = match Chord::parse(symbol) {
        Ok(chord) => chord,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let voicings = match generate_voicings(&chord, &options) {
        Ok(voicings) => voicings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if voicings.is_empty() {
        eprintln!("No playable voicings found for {}", chord);
        process::exit(0);
    }

    if json {
        let report: Vec<serde_json::Value> = voicings
            .iter()
            .map(|v| {
                serde_json::json!({
                    "voicing": v,
                    "score": score_voicing(v),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("Voicings for {}:", chord);
        for voicing in &voicings {
            let score = score_voicing(voicing);
            let challenges = if score.challenges.is_empty() {
                String::new()
            } else {
                format!("  ({})", score.challenges.join(", "))
            };
            println!(
                "  {:10} {:12} score {:3}  {}{}",
                voicing.pattern(),
                voicing.position_label(),
                score.total,
                score.difficulty,
                challenges
            );
        }
    }
}
