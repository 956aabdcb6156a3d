use crate::convert::{ConvertError, UnknownDialectSnafu};
use alloc::{
    format,
    string::{String, ToString},
    vec,
    vec::Vec,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use byteorder::{ByteOrder, LittleEndian};
use core::{fmt, str::FromStr};
use itertools::Itertools;

/// Output flavor of the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Bare `uint16_t` array plus a `TEXTURE` record with width, height and data.
    Plain,
    /// `Texture` record for the 3D renderer. `0x0000` is always its transparent color.
    Texture,
    /// `Texture2D` record for the 2D blitter.
    Texture2d,
    /// A single array that starts with width, height and the key color.
    Sprite,
    /// Script binding: a constructor call and a base64 pixel blob.
    Script,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Plain,
        Dialect::Texture,
        Dialect::Texture2d,
        Dialect::Sprite,
        Dialect::Script,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Plain => "plain",
            Dialect::Texture => "texture",
            Dialect::Texture2d => "texture2d",
            Dialect::Sprite => "sprite",
            Dialect::Script => "script",
        }
    }

    /// Whether the consumer treats `0x0000` as transparent no matter what the image contains.
    pub const fn reserves_zero(self) -> bool {
        matches!(self, Dialect::Texture)
    }

    /// Whether the dialect declares a separate `<name>_data` array next to its descriptor.
    const fn has_descriptor(self) -> bool {
        matches!(self, Dialect::Plain | Dialect::Texture | Dialect::Texture2d)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(dialect) = Dialect::ALL
            .into_iter()
            .find(|d| s.eq_ignore_ascii_case(d.name()))
        else {
            return UnknownDialectSnafu { name: s }.fail();
        };

        Ok(dialect)
    }
}

/// Storage qualifier of every declared array and record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Storage {
    #[default]
    Static,
    NonStatic,
}

impl Storage {
    const fn prefix(self) -> &'static str {
        match self {
            Storage::Static => "static ",
            Storage::NonStatic => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transparency {
    /// Whether transparent pixels exist at all.
    pub enabled: bool,
    /// Color that marks transparent pixels in the packed data.
    pub key: u16,
}

#[derive(Debug, Clone)]
pub struct EmitParams<'a> {
    /// File name of the source image, for the header comment.
    pub source_name: &'a str,
    /// Base identifier of every declared symbol.
    pub name: &'a str,
    pub storage: Storage,
    pub width: u32,
    pub height: u32,
    pub transparency: Transparency,
    /// Packed pixels, row-major. Must hold `width * height` values.
    pub pixels: &'a [u16],
}

impl EmitParams<'_> {
    fn data_name(&self, dialect: Dialect) -> String {
        if dialect.has_descriptor() {
            format!("{}_data", self.name)
        } else {
            self.name.to_string()
        }
    }

    fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.pixels
            .chunks(self.width.max(1) as usize)
            .map(|row| format!("{},", row.iter().map(|&p| hex(p)).join(", ")))
    }
}

#[inline]
fn hex(value: u16) -> String {
    format!("{value:#06x}")
}

/// Renders packed pixels as source lines in the given dialect.
pub fn emit(dialect: Dialect, params: &EmitParams<'_>) -> Vec<String> {
    let mut lines = vec![format!("// Generated from {}", params.source_name)];

    if dialect == Dialect::Script {
        emit_script(params, &mut lines);
        return lines;
    }

    let storage = params.storage.prefix();
    let data_name = params.data_name(dialect);

    lines.push(format!("{storage}const uint16_t {data_name}[] = {{"));
    if dialect == Dialect::Sprite {
        lines.push(format!(
            "{}, {}, {},",
            params.width,
            params.height,
            hex(params.transparency.key)
        ));
    }
    lines.extend(params.rows());
    lines.push("};".to_string());

    let record_type = match dialect {
        Dialect::Plain => "TEXTURE",
        Dialect::Texture => "Texture",
        Dialect::Texture2d => "Texture2D",
        Dialect::Sprite | Dialect::Script => return lines,
    };

    lines.push(format!("{storage}const {record_type} {} = {{", params.name));
    lines.push(format!("    .width = {},", params.width));
    lines.push(format!("    .height = {},", params.height));
    if dialect == Dialect::Plain {
        lines.push(format!("    .bitmap = {data_name},"));
    } else {
        lines.push(format!(
            "    .hasTransparency = {},",
            params.transparency.enabled
        ));
        lines.push(format!(
            "    .transparentColor = {},",
            hex(params.transparency.key)
        ));
        lines.push(format!("    .data = {data_name},"));
    }
    lines.push("};".to_string());

    lines
}

fn emit_script(params: &EmitParams<'_>, lines: &mut Vec<String>) {
    let key = if params.transparency.enabled {
        hex(params.transparency.key)
    } else {
        "null".to_string()
    };

    let mut bytes = vec![0; params.pixels.len() * 2];
    LittleEndian::write_u16_into(params.pixels, &mut bytes);

    lines.push(format!(
        "var {} = new Texture({}, {}, {key});",
        params.name, params.width, params.height
    ));
    lines.push(format!("{}.setData(\"{}\");", params.name, STANDARD.encode(bytes)));
}
