//! Tree-construction support for the arbor document tree.
//!
//! # Scope
//!
//! This crate implements the bookkeeping an
//! [HTML tree builder](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//! keeps next to the document:
//! - **Stack of open elements** ([WHATWG § 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements))
//!   - stack discipline plus insert/remove by node identity
//!   - scope markers as sentinels
//! - **Scope queries** ([WHATWG § 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope))
//!   - default, button, list item, table and select scope
//!
//! # Not Implemented
//!
//! - Tokenization
//! - The insertion modes themselves
//! - Serialization back to markup

/// Stack errors.
pub mod error;
/// "has an element in scope" queries.
pub mod scope;
/// The stack of open elements.
pub mod stack;

pub use error::StackError;
pub use scope::Scope;
pub use stack::StackOfOpenElements;
