//! Text and JSON rendering of the type map, struct layouts and exports.

use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::abi::TypeMap;
use crate::error::Result;
use crate::functions::Export;
use crate::structs::StructLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

pub fn type_map(map: &TypeMap<'_>, format: Format) -> Result<String> {
    if format == Format::Json {
        return json(map);
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<11} {:<16} {:>5} {:>5}  {:<9} note",
        "name", "rust", "bits", "bytes", "sign"
    )?;
    for p in map.primitives() {
        writeln!(
            out,
            "{:<11} {:<16} {:>5} {:>5}  {:<9} {}",
            p.name,
            p.rust_type,
            p.width.to_string(),
            p.size,
            p.signedness.to_string(),
            p.note.unwrap_or("")
        )?;
    }
    out.push('\n');
    for r in map.rewrites() {
        writeln!(out, "{:<11} => {:<18} {}", r.name, r.rust, r.note)?;
    }
    Ok(out)
}

pub fn layouts(layouts: &[StructLayout], format: Format) -> Result<String> {
    if format == Format::Json {
        return json(layouts);
    }

    let mut out = String::new();
    for layout in layouts {
        writeln!(
            out,
            "{} (size {}, align {})",
            layout.name, layout.size, layout.align
        )?;
        for field in &layout.fields {
            writeln!(out, "  {:>4}  {}", field.offset, field.name)?;
        }
    }
    Ok(out)
}

pub fn exports(exports: &[Export], format: Format) -> Result<String> {
    if format == Format::Json {
        return json(exports);
    }

    let mut out = String::new();
    for export in exports {
        writeln!(out, "{:<10} {}", export.group, export)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::EXPORTS;
    use crate::structs;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_table_lists_every_row() {
        let map = TypeMap::builtin();
        let text = type_map(&map, Format::Text).unwrap();

        // header + rows + blank line + rewrites
        assert_eq!(
            text.lines().count(),
            1 + map.primitives().len() + 1 + map.rewrites().len()
        );
        assert!(text.lines().any(|l| l.starts_with("DWORD") && l.contains("u32")));
        assert!(text.contains("CALLBACK    => extern \"system\""));
    }

    #[test]
    fn json_table_is_parseable() {
        let text = type_map(&TypeMap::builtin(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let handle = &value["primitives"][15];
        assert_eq!(handle["name"], "HANDLE");
        assert_eq!(handle["width"], "pointer");
        assert_eq!(handle["signedness"], "n/a");
        assert_eq!(value["primitives"][11]["width"]["bits"], 32);
        assert_eq!(value["rewrites"][1]["kind"], "calling_convention");
    }

    #[test]
    fn formatting_errors_are_reported() {
        fn render(out: &mut String) -> Result<()> {
            writeln!(out, "ok")?;
            Err(std::fmt::Error)?
        }
        let mut out = String::new();
        assert!(matches!(render(&mut out), Err(crate::AbiError::Fmt(_))));
        assert_eq!(out, "ok\n");
    }

    #[test]
    fn layouts_render_offsets() {
        let text = layouts(&structs::layouts(), Format::Text).unwrap();
        assert!(text.starts_with("JOYSTICK_POSITION_V2 (size 108, align 4)\n     0  bDevice\n"));
    }

    #[test]
    fn exports_render_one_line_each() {
        let text = exports(EXPORTS, Format::Text).unwrap();
        assert_eq!(text.lines().count(), EXPORTS.len());
        assert!(text.lines().any(|l| l
            == "ffb        fn Ffb_h_Packet(Packet: *const FFB_DATA, Type: *mut WORD, \
                DataSize: *mut INT, Data: *mut *mut BYTE) -> DWORD"));

        let json: serde_json::Value =
            serde_json::from_str(&exports(EXPORTS, Format::Json).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "vJoyEnabled");
        assert_eq!(json[0]["ret"], "BOOL");
        assert_eq!(json[5]["args"][0]["type"], "*mut WORD");
    }
}
