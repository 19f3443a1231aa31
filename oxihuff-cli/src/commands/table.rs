//! Table command implementation.

use oxihuff_huffman::Model;
use oxihuff_huffman::tree::describe_byte;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct TableRow {
    byte: u8,
    symbol: String,
    frequency: u64,
    code: String,
}

#[derive(Serialize)]
struct TableReport {
    rows: Vec<TableRow>,
    payload_bits: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<String>,
}

pub fn cmd_table(
    input: &Path,
    show_tree: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;
    let report = if data.is_empty() {
        TableReport {
            rows: Vec::new(),
            payload_bits: 0,
            tree: None,
        }
    } else {
        build_report(&Model::analyze(&data)?, show_tree)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.rows.is_empty() {
        println!("{} is empty: no codes", input.display());
        return Ok(());
    }

    println!("{:>6} {:>12} {:>4}  Code", "Byte", "Frequency", "Bits");
    println!("{}", "-".repeat(40));
    for row in &report.rows {
        println!(
            "{:>6} {:>12} {:>4}  {}",
            row.symbol,
            row.frequency,
            row.code.len(),
            row.code
        );
    }
    println!("{}", "-".repeat(40));
    println!(
        "{} symbols, {} payload bits",
        report.rows.len(),
        report.payload_bits
    );

    if let Some(tree) = &report.tree {
        println!();
        print!("{}", tree);
    }

    Ok(())
}

fn build_report(model: &Model, show_tree: bool) -> oxihuff_huffman::Result<TableReport> {
    let rows = model
        .codes
        .iter()
        .map(|(byte, code)| TableRow {
            byte,
            symbol: describe_byte(byte),
            frequency: model.frequencies.get(byte),
            code: code.to_string(),
        })
        .collect();

    Ok(TableReport {
        rows,
        payload_bits: model.payload_bits()?,
        tree: show_tree.then(|| model.tree.render()),
    })
}
