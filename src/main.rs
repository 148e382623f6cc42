use anyhow::Result;
use sme_matmul_report::export::write_outputs;
use std::path::Path;

fn main() -> Result<()> {
    println!("{:=<70}", "");
    println!("SME Matrix Multiplication Performance Visualization");
    println!("{:=<70}", "");

    write_outputs(Path::new("."))?;

    println!("\n{:=<70}", "");
    println!("Visualization complete!");
    println!("{:=<70}", "");

    Ok(())
}
