use codar_ts::{Result, TsFile};

fn main() -> Result<()> {
    // Usage: tsgen [input.txt] [output.ts]
    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| String::from("example.txt"));
    let output = args.next().unwrap_or_else(|| String::from("example.ts"));

    // Build the blocks and recompute every container length
    let file = TsFile::from_text_file(&input)?;

    // The whole stream is encoded before the output file is created
    file.save(&output)?;
    println!(
        "Wrote {output} ({} blocks) from {input}",
        file.sequence().len()
    );
    Ok(())
}
