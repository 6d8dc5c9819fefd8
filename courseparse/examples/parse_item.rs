//! Parses a raw item JSON file and prints the structured record.
//!
//! ```sh
//! cargo run --example parse_item -- item.json [out.json]
//! ```
//!
//! Without arguments a built-in sample quiz is used.

use std::{env, fs, process};

use courseparse::{
    faq::{assignment_chunks, quiz_chunks},
    parse_item_json,
    record::{ParsedItem, StructuredRecord},
};

const SAMPLE: &str = r#"{
    "type": "quiz",
    "id": 155647,
    "title": "Reading Quiz 1",
    "content": "Quiz: Reading Quiz 1\n\nPoints: 2.0\n\nQuestions:\n\nQuestion 1:\nOne type of Basic network security defense tool is a:\nPoints: 1.0\n\nAnswer Choices:\n  • Firewall [CORRECT]\n  • Black hat\n\nQuestion 2:\nThe OSI in OSI model stands for Optional Sidecar Insertion.\nPoints: 1.0\n\nAnswer Choices:\n  • True\n  • False [CORRECT]\n"
}"#;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let input = match args.first() {
        Some(path) => match fs::read_to_string(path) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("cannot read {path}: {e}");
                process::exit(1);
            }
        },
        None => SAMPLE.to_string(),
    };

    let parsed = match parse_item_json(&input) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    match parsed.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: {e}"),
    }

    let chunks = match &parsed {
        ParsedItem::Quiz(quiz) => quiz_chunks(quiz),
        ParsedItem::Assignment(assignment) => assignment_chunks(assignment),
    };
    println!("\n{} chunk(s) ready for analysis", chunks.len());

    if let Some(out) = args.get(1) {
        match parsed.save(out) {
            Ok(path) => println!("saved to {}", path.display()),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    }
}
