//! Test utilities for resforge unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use resforge::test_support::ResourceTree;
//!
//! #[test]
//! fn test_example() {
//!     let tree = ResourceTree::new()
//!         .strings("values", &[("app_name", "Demo")])
//!         .file("drawable-dark/logo.xml", "<vector/>");
//!
//!     let scanner = ResourceScanner::new(tree.root());
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
