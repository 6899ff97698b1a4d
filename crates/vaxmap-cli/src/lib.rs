//! vaxmap-cli
//! ==========
//!
//! Command-line interface for the `vaxmap-core` regional vaccination table.
//!
//! This crate primarily provides a binary (`vaxmap`). The library target
//! exists so that docs.rs renders this overview. See the README for full
//! usage examples.
//!
//! Quick start
//! -----------
//!
//! ```text
//! vaxmap --help
//! vaxmap stats
//! vaxmap region "valle d'aosta"
//! vaxmap map --column perc_vac --max-area 20000 -o layer.json
//! ```
//!
//! For programmatic access to the table and the JSON views, use the
//! [`vaxmap-core`] crate directly.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
