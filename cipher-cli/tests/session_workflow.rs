#![allow(missing_docs)]
use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("cipher-cli").expect("Failed to find cipher-cli binary")
}

#[test]
fn test_atbash_subcommand() {
    cli()
        .arg("atbash")
        .arg("Hello, World!")
        .assert()
        .success()
        .stdout("Svool, Dliow!\n");
}

#[test]
fn test_caesar_subcommand_roundtrip() {
    cli()
        .arg("caesar")
        .arg("--shift")
        .arg("3")
        .arg("XYZ")
        .assert()
        .success()
        .stdout("ABC\n");

    cli()
        .arg("caesar")
        .arg("--shift")
        .arg("3")
        .arg("--decode")
        .arg("ABC")
        .assert()
        .success()
        .stdout("XYZ\n");
}

#[test]
fn test_caesar_rejects_out_of_range_shift() {
    cli()
        .arg("caesar")
        .arg("--shift")
        .arg("26")
        .arg("ABC")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Shift must be between 1 and 25"));
}

#[test]
fn test_vigenere_subcommand() {
    cli()
        .arg("vigenere")
        .arg("--keyword")
        .arg("LEMON")
        .arg("ATTACKATDAWN")
        .assert()
        .success()
        .stdout("LXFOPVEFRNHR\n");
}

#[test]
fn test_vigenere_rejects_bad_keyword() {
    cli()
        .arg("vigenere")
        .arg("--keyword")
        .arg("LEM0N")
        .arg("ATTACK")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Keyword must contain only letters"));
}

#[test]
fn test_session_gates_ciphers_behind_login() {
    cli()
        .arg("session")
        .write_stdin("encode atbash Hello\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please log in to use the ciphers"));
}

#[test]
fn test_session_register_login_and_transform() {
    let script = "register alice123 Secret123!\n\
                  login alice123 Secret123!\n\
                  whoami\n\
                  encode caesar 3 Hello World\n\
                  decode caesar 3 Khoor Zruog\n\
                  logout\n\
                  quit\n";
    cli()
        .arg("session")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Registration successful")
                .and(predicate::str::contains("Login successful"))
                .and(predicate::str::contains("alice123"))
                .and(predicate::str::contains("Khoor Zruog"))
                .and(predicate::str::contains("Hello World"))
                .and(predicate::str::contains("Logged out")),
        );
}

#[test]
fn test_session_lockout_flow() {
    let script = "register alice123 Secret123!\n\
                  login alice123 wrong\n\
                  login alice123 wrong\n\
                  login alice123 wrong\n\
                  login alice123 Secret123!\n\
                  quit\n";
    cli()
        .arg("session")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Invalid username or password (2 attempts remaining)")
                .and(predicate::str::contains(
                    "Invalid username or password (1 attempts remaining)",
                ))
                .and(
                    predicate::str::contains(
                        "Account is blocked due to too many failed login attempts",
                    )
                    .count(2),
                ),
        );
}

#[test]
fn test_session_json_output() {
    let script = "register alice123 Secret123!\n\
                  login alice123 nope\n\
                  quit\n";
    cli()
        .arg("session")
        .arg("--json")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#"{"success":true,"message":"Registration successful"}"#)
                .and(predicate::str::contains(r#""attemptsLeft":2"#)),
        );
}
