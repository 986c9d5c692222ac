//! A command-line interface for the classical cipher workbench.
//!
//! The three cipher subcommands are stateless one-shot transforms. The
//! `session` subcommand runs the full demonstration flow: an in-memory
//! credential store gates the ciphers behind register/login, and all state
//! is dropped when the process exits.

use cipher_core::cipher::{self, Cipher, Direction};
use cipher_core::credentials::{AuthResponse, CredentialStore};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::io::{self, BufRead};
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the Atbash mirror substitution (self-inverse)
    Atbash {
        /// The text to transform
        text: String,
    },
    /// Apply a Caesar shift
    Caesar {
        /// Shift amount, between 1 and 25
        #[arg(short, long)]
        shift: i32,

        /// Decode instead of encode
        #[arg(short, long)]
        decode: bool,

        /// The text to transform
        text: String,
    },
    /// Apply the Vigenère cipher
    Vigenere {
        /// Keyword, letters only
        #[arg(short, long)]
        keyword: String,

        /// Decode instead of encode
        #[arg(short, long)]
        decode: bool,

        /// The text to transform
        text: String,
    },
    /// Run an interactive login-gated cipher session on stdin
    Session {
        /// Emit one JSON object per command outcome
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Atbash { text } => run_transform(&Cipher::Atbash, text, false),
        Commands::Caesar {
            shift,
            decode,
            text,
        } => run_transform(&Cipher::Caesar { shift: *shift }, text, *decode),
        Commands::Vigenere {
            keyword,
            decode,
            text,
        } => run_transform(
            &Cipher::Vigenere {
                keyword: keyword.clone(),
            },
            text,
            *decode,
        ),
        Commands::Session { json } => run_session(*json),
    }
}

fn run_transform(selected: &Cipher, text: &str, decode: bool) -> ExitCode {
    let direction = if decode {
        Direction::Decode
    } else {
        Direction::Encode
    };
    match cipher::transform(selected, text, direction) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_session(json: bool) -> ExitCode {
    info!("starting interactive session");
    let mut store = CredentialStore::new();
    if !json {
        println!("Commands: register, login, logout, whoami, encode, decode, quit");
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("failed to read from stdin: {e}");
                return ExitCode::FAILURE;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (command, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        match command {
            "register" | "login" => {
                let mut args = rest.split_whitespace();
                let (Some(user), Some(pass)) = (args.next(), args.next()) else {
                    println!("Usage: {command} <username> <password>");
                    continue;
                };
                let response = if command == "register" {
                    AuthResponse::from_register(&store.register(user, pass))
                } else {
                    AuthResponse::from_login(&store.authenticate(user, pass))
                };
                respond(json, &response);
            }
            "logout" => {
                store.logout();
                print_message(json, true, "Logged out");
            }
            "whoami" => match store.current_user() {
                Some(user) => print_message(json, true, user),
                None => print_message(json, false, "Not logged in"),
            },
            "encode" => session_transform(&store, Direction::Encode, rest, json),
            "decode" => session_transform(&store, Direction::Decode, rest, json),
            "quit" | "exit" => break,
            other => println!("Unknown command: {other}"),
        }
    }
    info!("session ended");
    ExitCode::SUCCESS
}

/// Parses and runs a cipher command inside a session. Cipher access is
/// gated on an active login, matching the application flow this tool
/// demonstrates.
fn session_transform(store: &CredentialStore, direction: Direction, rest: &str, json: bool) {
    if !store.is_logged_in() {
        print_message(json, false, "Please log in to use the ciphers");
        return;
    }
    let (name, rest) = rest.split_once(' ').unwrap_or((rest, ""));
    let result = match name {
        "atbash" => cipher::transform(&Cipher::Atbash, rest, direction),
        "caesar" => {
            let Some((shift, text)) = rest.split_once(' ') else {
                println!("Usage: encode|decode caesar <shift> <text>");
                return;
            };
            let Ok(shift) = shift.parse::<i32>() else {
                print_message(json, false, "Shift must be an integer");
                return;
            };
            cipher::transform(&Cipher::Caesar { shift }, text, direction)
        }
        "vigenere" => {
            let Some((keyword, text)) = rest.split_once(' ') else {
                println!("Usage: encode|decode vigenere <keyword> <text>");
                return;
            };
            cipher::transform(
                &Cipher::Vigenere {
                    keyword: keyword.to_owned(),
                },
                text,
                direction,
            )
        }
        "" => {
            println!("Usage: encode|decode <atbash|caesar|vigenere> [params] <text>");
            return;
        }
        other => {
            println!("Unknown cipher: {other}");
            return;
        }
    };
    match result {
        Ok(output) => {
            if json {
                println!("{}", serde_json::json!({ "success": true, "output": output }));
            } else {
                println!("{output}");
            }
        }
        Err(e) => print_message(json, false, &e.to_string()),
    }
}

fn respond(json: bool, response: &AuthResponse) {
    if json {
        match serde_json::to_string(response) {
            Ok(payload) => println!("{payload}"),
            Err(e) => error!("failed to serialize response: {e}"),
        }
    } else if let Some(left) = response.attempts_left {
        println!("{} ({left} attempts remaining)", response.message);
    } else {
        println!("{}", response.message);
    }
}

fn print_message(json: bool, success: bool, message: &str) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "success": success, "message": message })
        );
    } else {
        println!("{message}");
    }
}
