// File:    lib.rs
// Author:  apezoo
// Date:    2025-08-25
//
// Description: The main library crate for cipher-core, combining the credential store and the classical cipher engine.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Cipher Core Library
//!
//! This library provides the core functionality for the classical cipher
//! workbench: a credential store with attempt-limited lockout, and a pure
//! cipher engine for the Atbash, Caesar, and Vigenère substitution ciphers.
//!
//! The two components are independent of each other. A presentation layer
//! (such as the `cipher-cli` binary) composes them by gating access to the
//! cipher engine behind the credential store.

/// Classical substitution cipher transforms and their dispatch.
pub mod cipher;
/// User registration, authentication, attempt tracking, and lockout.
pub mod credentials;
