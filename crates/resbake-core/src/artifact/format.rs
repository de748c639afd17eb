//! Text layout of the generated artifacts.
//!
//! These functions only render; they know nothing about files or paths.

use crate::classify::ResourceKind;
use std::io::{self, Write};

/// First line of every definition artifact
pub const SOURCE_BANNER: &str = "/* Generated by resbake */";

/// Include guard and C linkage opening of the declaration artifact
pub fn write_header_prologue(w: &mut impl Write, guard: &str) -> io::Result<()> {
    writeln!(w, "#ifndef {}", guard)?;
    writeln!(w, "#define {}", guard)?;
    writeln!(w)?;
    writeln!(w, "#ifdef __cplusplus")?;
    writeln!(w, "extern \"C\" {{")?;
    writeln!(w, "#endif")?;
    writeln!(w)
}

/// C linkage closing and `#endif` of the declaration artifact
pub fn write_header_epilogue(w: &mut impl Write) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "#ifdef __cplusplus")?;
    writeln!(w, "}}")?;
    writeln!(w, "#endif")?;
    writeln!(w)?;
    writeln!(w, "#endif")
}

/// Banner of the definition artifact
pub fn write_source_banner(w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "{}", SOURCE_BANNER)?;
    writeln!(w)
}

/// `extern const char NAME[LEN];`
pub fn write_declaration(
    w: &mut impl Write,
    symbol: &str,
    kind: ResourceKind,
    data: &[u8],
) -> io::Result<()> {
    writeln!(w, "extern const char {}[{}];", symbol, array_len(kind, data))
}

/// `const char NAME[LEN] = {0x..,0x..};`
///
/// Text resources get a trailing `0x00` element.
pub fn write_definition(
    w: &mut impl Write,
    symbol: &str,
    kind: ResourceKind,
    data: &[u8],
) -> io::Result<()> {
    write!(w, "const char {}[{}] = {{", symbol, array_len(kind, data))?;
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        write!(w, "0x{:02x}", byte)?;
    }
    if kind.is_text() {
        if !data.is_empty() {
            w.write_all(b",")?;
        }
        w.write_all(b"0x00")?;
    }
    writeln!(w, "}};")
}

fn array_len(kind: ResourceKind, data: &[u8]) -> u64 {
    data.len() as u64 + kind.terminator_len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_framing() {
        let text = render(|w| {
            write_header_prologue(w, "RES")?;
            write_declaration(w, "a_txt", ResourceKind::Text, b"He")?;
            write_header_epilogue(w)
        });
        assert_eq!(
            text,
            "#ifndef RES\n#define RES\n\n#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n\
             extern const char a_txt[3];\n\
             \n#ifdef __cplusplus\n}\n#endif\n\n#endif\n"
        );
    }

    #[test]
    fn test_source_banner() {
        assert_eq!(render(|w| write_source_banner(w)), "/* Generated by resbake */\n\n");
    }

    #[test]
    fn test_text_definition() {
        let text = render(|w| write_definition(w, "P_a_txt", ResourceKind::Text, &[0x48, 0x65]));
        assert_eq!(text, "const char P_a_txt[3] = {0x48,0x65,0x00};\n");
    }

    #[test]
    fn test_binary_definition() {
        let text = render(|w| write_definition(w, "P_sub_b_bin", ResourceKind::Binary, &[0x01, 0x02]));
        assert_eq!(text, "const char P_sub_b_bin[2] = {0x01,0x02};\n");
    }

    #[test]
    fn test_definition_element_count() {
        let data: Vec<u8> = (0..=255).collect();
        for kind in [ResourceKind::Binary, ResourceKind::Text] {
            let text = render(|w| write_definition(w, "all", kind, &data));
            let body = &text[text.find('{').unwrap() + 1..text.rfind('}').unwrap()];
            let elements: Vec<&str> = body.split(',').collect();
            assert_eq!(elements.len() as u64, 256 + kind.terminator_len());
            assert_eq!(elements[255], "0xff");
            assert!(elements.iter().all(|e| e.len() == 4 && e.starts_with("0x")));
        }
    }

    #[test]
    fn test_declaration_sizes() {
        let text = render(|w| write_declaration(w, "blob", ResourceKind::Binary, &[0; 10]));
        assert_eq!(text, "extern const char blob[10];\n");
    }
}
