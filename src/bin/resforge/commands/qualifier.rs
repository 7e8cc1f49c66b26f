//! `resforge qualifier` command
//!
//! Shows how a directory qualifier suffix is understood.

use anyhow::Result;

use crate::cli::QualifierArgs;
use resforge::core::qualifier::{parse_qualifiers, Strictness};

pub fn execute(args: QualifierArgs) -> Result<()> {
    let strictness = if args.lenient {
        Strictness::Lenient
    } else {
        Strictness::Strict
    };

    let set = parse_qualifiers(&args.qualifiers, strictness)
        .map_err(|e| anyhow::anyhow!("`{}` {}", args.qualifiers, e))?;

    println!("canonical: {}", set);
    for segment in set.segments() {
        println!("  {:<12} {}", segment.dimension(), segment);
    }

    Ok(())
}
