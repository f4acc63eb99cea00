use log::debug;

use crate::{BlockSequence, Result, blocks::BlockKind, types::TranscodeContext};

/// Options for [`render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Stop before the `BODY` block, leaving out the sample data and every
    /// block after it.
    pub header_only: bool,
}

impl RenderOptions {
    pub fn header_only() -> Self {
        Self { header_only: true }
    }
}

/// Render a block sequence as text.
///
/// The context starts empty; format and scale blocks fill it in for the
/// sample blocks that follow them.
///
/// # Errors
/// [`crate::Error::MissingContext`] if a sample block comes before a usable
/// format selector or before the scale factors.
pub fn render(sequence: &BlockSequence, options: RenderOptions) -> Result<String> {
    let mut ctx = TranscodeContext::new();
    let mut out = String::new();
    let mut rendered = 0usize;
    for block in sequence {
        if options.header_only && block.kind() == BlockKind::Body {
            break;
        }
        block.render(&mut ctx, &mut out)?;
        rendered += 1;
    }
    debug!(
        "Rendered {rendered} of {} blocks ({} bytes of text)",
        sequence.len(),
        out.len()
    );
    Ok(out)
}
