//! tfshow - renders Terraform JSON plans as `terraform show` output.
//!
//! This library reads the machine-readable plan that
//! `terraform show -json plan.out` produces and renders the human-readable
//! diff preview the plain `terraform show plan.out` command prints, including
//! its ANSI styling.
//!
//! # Example
//!
//! ```no_run
//! use tfshow_rs::{parse_file, render_plan};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let plan = parse_file(Path::new("plan.json"))?;
//! print!("{}", render_plan(&plan, true));
//! # Ok(())
//! # }
//! ```

mod array;
mod line;

pub mod diff;
pub mod error;
pub mod parser;
pub mod path;
pub mod show;
pub mod tree;
pub mod value;
pub mod writer;

// Re-export commonly used types for convenience
pub use diff::{map_actions, render_attributes, Action};
pub use error::{ParseError, TfshowError};
pub use parser::{parse_file, parse_str, Change, Plan, ResourceChange};
pub use show::render_plan;
pub use tree::Value;
pub use writer::{AnsiWriter, Style};
