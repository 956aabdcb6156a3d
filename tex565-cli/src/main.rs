use argh::FromArgs;
use snafu::{OptionExt, ResultExt, Snafu};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tex565::{pack::is_opaque, Argb, ConvertError, ConvertOptions, DecodedImage, Dialect, Storage};

/// Converts an image into an RGB565 source array.
#[derive(FromArgs, Debug)]
struct Cli {
    /// output format (plain, texture, texture2d, sprite, script)
    #[argh(option)]
    format: Option<String>,

    /// name of the generated symbols, defaults to the image file name without extension
    #[argh(option)]
    var: Option<String>,

    /// don't declare the generated arrays and records `static`
    #[argh(switch)]
    not_static: bool,

    /// the input image (PNG, JPG, BMP, TIFF or GIF), then the output file (standard output if
    /// omitted)
    #[argh(positional, arg_name = "image [output]")]
    paths: Vec<String>,
}

#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("No input image given"))]
    MissingInput,
    #[snafu(display(
        "Missing or unknown format{}, expected one of: plain, texture, texture2d, sprite, script",
        name.as_deref().map(|n| format!(" `{n}`")).unwrap_or_default()
    ))]
    InvalidFormat { name: Option<String> },
    #[snafu(display("Unexpected argument `{arg}`, expected an image and an optional output file"))]
    UnexpectedArgument { arg: String },
    #[snafu(display("Could not decode `{path}`"))]
    DecodeFailure {
        path: String,
        source: image::ImageError,
    },
    #[snafu(display("Conversion failed"))]
    Convert { source: ConvertError },
    #[snafu(display("Could not write output"))]
    WriteOutput { source: std::io::Error },
}

#[snafu::report]
fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    run(argh::from_env())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        format,
        var,
        not_static,
        paths,
    } = cli;

    let dialect = parse_dialect(format)?;

    let mut paths = paths.into_iter();
    let input = paths.next().context(MissingInputSnafu)?;
    let output = paths.next();
    if let Some(arg) = paths.next() {
        return UnexpectedArgumentSnafu { arg }.fail();
    }

    let decoded = decode(&input)?;
    log::info!(
        "Converting {}x{} image `{input}` to {dialect}",
        decoded.width(),
        decoded.height()
    );

    let source_name = Path::new(&input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.clone());
    let name = match var {
        Some(var) => tex565::sanitize_identifier(&var),
        None => tex565::identifier_from_path(&input),
    };
    let options = ConvertOptions {
        dialect,
        name,
        source_name,
        storage: if not_static {
            Storage::NonStatic
        } else {
            Storage::Static
        },
    };

    let conversion = tex565::convert(&decoded, &options).context(ConvertSnafu)?;

    match output {
        Some(path) => {
            let file = File::create(&path).context(WriteOutputSnafu)?;
            write_lines(&conversion.lines, BufWriter::new(file))?;
            log::info!("Written {} lines to `{path}`", conversion.lines.len());
        }
        None => write_lines(&conversion.lines, std::io::stdout().lock())?,
    }

    Ok(())
}

fn parse_dialect(format: Option<String>) -> Result<Dialect, CliError> {
    let Some(format) = format else {
        return InvalidFormatSnafu { name: None::<String> }.fail();
    };

    format
        .parse::<Dialect>()
        .map_err(|_| CliError::InvalidFormat { name: Some(format) })
}

/// Decodes the first frame of an image into ARGB8888.
fn decode(path: &str) -> Result<DecodedImage, CliError> {
    let image = image::io::Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode())
        .context(DecodeFailureSnafu { path })?;

    let channel_has_alpha = image.color().has_alpha();
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels: Vec<_> = rgba.pixels().map(|p| to_argb(p.0)).collect();

    let has_alpha = channel_has_alpha && uses_transparency(&pixels);
    log::debug!("alpha channel present: {channel_has_alpha}, used: {has_alpha}");

    DecodedImage::new(width, height, pixels, has_alpha).context(ConvertSnafu)
}

/// Whether any pixel is transparent enough to be replaced by the key color.
fn uses_transparency(pixels: &[Argb]) -> bool {
    pixels.iter().any(|&p| !is_opaque(p))
}

#[inline]
fn to_argb([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    [a, r, g, b]
}

fn write_lines(lines: &[String], mut w: impl Write) -> Result<(), CliError> {
    for line in lines {
        writeln!(w, "{line}").context(WriteOutputSnafu)?;
    }
    w.flush().context(WriteOutputSnafu)
}
