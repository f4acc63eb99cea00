// signature_block.rs
use super::{SIGN_BLOCK_SIZE, SIGN_TEXT_SIZE, tags};
use crate::{
    Result, endian,
    blocks::common::{BlockCodec, FourCC, fixed_field_text},
    text::{Stanza, push_param},
    types::TranscodeContext,
};

/// Signature Block (`sign`) - identifies the file version, type and site.
///
/// The three text fields are fixed 64-byte areas that are not necessarily
/// NUL-terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignatureBlock {
    /// File version code (e.g. `"CSv4"`).
    pub version: FourCC,
    /// File type code.
    pub filetype: FourCC,
    /// Four character site code.
    pub sitecode: FourCC,
    /// User flag bits.
    pub userflags: u32,
    #[cfg_attr(feature = "serde", serde(with = "text_field"))]
    pub description: [u8; SIGN_TEXT_SIZE],
    #[cfg_attr(feature = "serde", serde(with = "text_field"))]
    pub ownername: [u8; SIGN_TEXT_SIZE],
    #[cfg_attr(feature = "serde", serde(with = "text_field"))]
    pub comment: [u8; SIGN_TEXT_SIZE],
}

impl Default for SignatureBlock {
    fn default() -> Self {
        Self {
            version: FourCC::new(b"CSv4"),
            filetype: FourCC::default(),
            sitecode: FourCC::default(),
            userflags: 0,
            description: [0; SIGN_TEXT_SIZE],
            ownername: [0; SIGN_TEXT_SIZE],
            comment: [0; SIGN_TEXT_SIZE],
        }
    }
}

impl SignatureBlock {
    pub fn description(&self) -> String {
        fixed_field_text(&self.description)
    }

    pub fn ownername(&self) -> String {
        fixed_field_text(&self.ownername)
    }

    pub fn comment(&self) -> String {
        fixed_field_text(&self.comment)
    }
}

impl BlockCodec for SignatureBlock {
    const TAG: FourCC = tags::SIGN;
    const SIZE: usize = SIGN_BLOCK_SIZE;

    /// # Structure (208 bytes):
    /// - version, filetype, sitecode: 4-byte codes
    /// - userflags: u32
    /// - description, ownername, comment: 64 bytes each
    fn from_payload(bytes: &[u8]) -> Self {
        let text = |start: usize| -> [u8; SIGN_TEXT_SIZE] {
            let mut field = [0u8; SIGN_TEXT_SIZE];
            field.copy_from_slice(&bytes[start..start + SIGN_TEXT_SIZE]);
            field
        };
        Self {
            version: FourCC::read(bytes, 0),
            filetype: FourCC::read(bytes, 4),
            sitecode: FourCC::read(bytes, 8),
            userflags: endian::read_u32(bytes, 12),
            description: text(16),
            ownername: text(16 + SIGN_TEXT_SIZE),
            comment: text(16 + 2 * SIGN_TEXT_SIZE),
        }
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        self.version.write(out);
        self.filetype.write(out);
        self.sitecode.write(out);
        endian::write_u32(out, self.userflags);
        out.extend_from_slice(&self.description);
        out.extend_from_slice(&self.ownername);
        out.extend_from_slice(&self.comment);
    }

    fn render(&self, _ctx: &mut TranscodeContext, out: &mut String) -> Result<()> {
        push_param(out, "version", self.version);
        push_param(out, "filetype", self.filetype);
        push_param(out, "sitecode", self.sitecode);
        push_param(out, "userflags", format_args!("{:x}", self.userflags));
        push_param(out, "description", self.description());
        push_param(out, "ownername", self.ownername());
        push_param(out, "comment", self.comment());
        Ok(())
    }

    fn build(stanza: &Stanza<'_>, _ctx: &mut TranscodeContext) -> Result<Self> {
        Ok(Self {
            version: stanza.fourcc("version")?,
            filetype: stanza.fourcc("filetype")?,
            sitecode: stanza.fourcc("sitecode")?,
            userflags: stanza.hex_u32("userflags")?,
            description: stanza.text_field("description")?,
            ownername: stanza.text_field("ownername")?,
            comment: stanza.text_field("comment")?,
        })
    }
}

#[cfg(feature = "serde")]
mod text_field {
    use super::SIGN_TEXT_SIZE;
    use crate::blocks::common::{fixed_field_from_text, fixed_field_text};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(field: &[u8; SIGN_TEXT_SIZE], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&fixed_field_text(field))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; SIGN_TEXT_SIZE], D::Error> {
        let text = String::deserialize(d)?;
        fixed_field_from_text(&text).ok_or_else(|| D::Error::custom("text is not Latin-1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::common::fixed_field_from_text;

    fn sample() -> SignatureBlock {
        SignatureBlock {
            version: FourCC::new(b"CSv4"),
            filetype: FourCC::new(b"TSer"),
            sitecode: FourCC::new(b"BML1"),
            userflags: 0x1f,
            description: fixed_field_from_text("Bodega Marine Lab").unwrap(),
            ownername: fixed_field_from_text("owner").unwrap(),
            comment: [0; SIGN_TEXT_SIZE],
        }
    }

    #[test]
    fn payload_layout() -> Result<()> {
        let sign = sample();
        let mut bytes = Vec::new();
        sign.write_payload(&mut bytes);
        assert_eq!(bytes.len(), SIGN_BLOCK_SIZE);
        assert_eq!(&bytes[0..4], b"CSv4");
        assert_eq!(&bytes[12..16], &[0, 0, 0, 0x1f]);
        assert_eq!(SignatureBlock::parse(&bytes, 0)?, sign);
        Ok(())
    }

    #[test]
    fn render_lines() -> Result<()> {
        let mut out = String::new();
        sample().render(&mut TranscodeContext::new(), &mut out)?;
        assert!(out.starts_with("version:CSv4\nfiletype:TSer\nsitecode:BML1\nuserflags:1f\n"));
        assert!(out.contains("description:Bodega Marine Lab\n"));
        assert!(out.ends_with("comment:\n"));
        Ok(())
    }

    #[test]
    fn short_payload_is_truncated() {
        let err = SignatureBlock::parse(&[0u8; 100], 16).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::TruncatedBlock {
                actual: 100,
                expected: SIGN_BLOCK_SIZE,
                offset: 16,
                ..
            }
        ));
    }
}
