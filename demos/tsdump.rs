use codar_ts::{RenderOptions, Result, TsFile};

fn main() -> Result<()> {
    // Usage: tsdump [file.ts] [--header]
    let mut path = String::from("example.ts");
    let mut options = RenderOptions::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--header" => options = RenderOptions::header_only(),
            _ => path = arg,
        }
    }

    // 1) Decode the whole file; overlong blocks are clamped, not rejected
    let file = TsFile::from_file(&path)?;
    for warning in file.warnings() {
        eprintln!("warning: {warning}");
    }

    // 2) Print the text form
    print!("{}", file.to_text(options)?);

    let summary = file.summary();
    eprintln!(
        "{path}: {} blocks, {} sample pairs, {} clamped",
        summary.blocks, summary.sample_pairs, summary.clamped_blocks
    );
    Ok(())
}
