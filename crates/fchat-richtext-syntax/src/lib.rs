//! # fchat-richtext-syntax
//!
//! Token scanning for F-Chat messages that mix two inline notations: bracket
//! tags (`[b]bold[/b]`, `[color=red]...[/color]`, quick-close `[/]`) and an
//! optional Discord-style markdown (`**bold**`, `__underline__`, `||spoiler||`).
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Raw Tokens → Scanner → Tokens
//!               (Logos)              (Cursor)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! A [Logos] lexer splits the input into context-free raw tokens. Every byte
//! ends up in exactly one token.
//!
//! ### 2. Scanner ([`scanner`] module)
//!
//! The scanner recognizes bracket tags with a byte [`cursor`], classifies
//! markdown delimiters when markdown mode is on, and folds everything else
//! into maximal text runs. It also performs the verbatim searches the parser
//! needs for exclusive tags and `noparse`.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Quick Start
//!
//! ```
//! use fchat_richtext_syntax::{Scanner, TokenKind};
//!
//! let kinds: Vec<_> = Scanner::new("[b]hi[/b]", false).map(|t| t.kind).collect();
//! assert_eq!(kinds[1], TokenKind::Text);
//! ```

pub mod cursor;
pub mod lexer;
pub mod scanner;
pub mod span;
pub mod token;

pub use scanner::{Bracket, CloseMatch, Scanner};
pub use span::Span;
pub use token::{Delimiter, Token, TokenKind};
