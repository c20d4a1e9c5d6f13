use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::ops::Range;
use std::path::Path;

use textio::cli::{CliArgs, Command, InputArgs, LayoutArgs};
use textio::config::TextIoConfig;
use textio::input::{InputField, KeyOutcome};
use textio::keypad::{Keymap, THETA_PLACEHOLDER};
use textio::tracing::FieldSnapshot;
use textio::width::{TextIo, WidthProvider};
use textio::wrap::{self, OutputFormat};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    textio::tracing::init();

    let mut config = match &args.config {
        Some(path) => TextIoConfig::load_from(path),
        None => TextIoConfig::load(),
    };
    args.apply_to(&mut config).map_err(anyhow::Error::msg)?;

    let routines = config
        .backend
        .routines()
        .context("Failed to set up width backend")?;
    let io = TextIo::new(routines)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Wrap(layout) => {
            let text = read_text(layout)?;
            print_wrapped(&mut out, &config.output, &io, &text)?;
        }
        Command::Measure(layout) => {
            let text = read_text(layout)?;
            print_measurements(&mut out, &config.output, &io, &text)?;
        }
        Command::Input(input) => {
            replay_keys(&mut out, &config, &io, input)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn read_text(layout: &LayoutArgs) -> Result<Vec<u8>> {
    match &layout.file {
        Some(path) => read_file(path),
        None => {
            let mut text = Vec::new();
            io::stdin()
                .read_to_end(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Terminal columns per width unit: one for the console, a space glyph otherwise
fn column_unit(io: &TextIo) -> u32 {
    io.glyph_width(b' ').max(1)
}

/// Width of a wrapped line without its newline and hanging whitespace
fn printable_width(fmt: &OutputFormat, io: &TextIo, text: &[u8], range: &Range<usize>) -> u32 {
    let mut end = range.end;
    while end > range.start {
        let ch = text[end - 1];
        if ch != b' ' && ch != b'\t' && ch != fmt.newline {
            break;
        }
        end -= 1;
    }
    if end == range.start {
        return 0;
    }
    wrap::line_width(fmt, io, text, range.start, end - 1)
}

fn print_wrapped(
    out: &mut impl Write,
    fmt: &OutputFormat,
    io: &TextIo,
    text: &[u8],
) -> Result<()> {
    let unit = column_unit(io);
    let tab_cols = (fmt.tab_width / unit).max(1) as usize;

    for range in wrap::lines(fmt, io, text) {
        let width = printable_width(fmt, io, text, &range);
        let pad = (fmt.line_x(0, width) / unit) as usize;

        let mut line = vec![b' '; pad];
        for &ch in &text[range] {
            match ch {
                b'\t' => line.extend(std::iter::repeat(b' ').take(tab_cols)),
                ch if ch == fmt.newline => {}
                ch => line.push(ch),
            }
        }
        while line.last() == Some(&b' ') {
            line.pop();
        }
        line.push(b'\n');
        out.write_all(&line)?;
    }
    Ok(())
}

fn print_measurements(
    out: &mut impl Write,
    fmt: &OutputFormat,
    io: &TextIo,
    text: &[u8],
) -> Result<()> {
    for (i, range) in wrap::lines(fmt, io, text).enumerate() {
        let width = printable_width(fmt, io, text, &range);
        writeln!(
            out,
            "{:>4}  {:>6}..{:<6} width {:>4}  x {:>4}",
            i,
            range.start,
            range.end,
            width,
            fmt.line_x(0, width)
        )?;
    }
    Ok(())
}

fn replay_keys(
    out: &mut impl Write,
    config: &TextIoConfig,
    io: &TextIo,
    input: &InputArgs,
) -> Result<()> {
    let visible_width = config.input.visible_width;
    let field = if input.program_name {
        InputField::program_name(THETA_PLACEHOLDER, visible_width)
    } else {
        InputField::new(config.input.capacity, visible_width).with_keymaps(vec![
            Keymap::uppercase(),
            Keymap::lowercase(),
            Keymap::numeric(),
        ])
    };
    let mut field = field.with_keys(config.input.keys).with_format(config.output);

    let (x, y) = field.origin();
    writeln!(
        out,
        "field at ({}, {}), {} wide, {} characters",
        x,
        y,
        field.visible_width(),
        field.buffer().capacity()
    )?;

    for &key in &input.keys {
        let before = FieldSnapshot::from_field(&field, io);
        let outcome = field.handle_key(key, io);
        let after = FieldSnapshot::from_field(&field, io);
        if let Some(diff) = before.diff(&after) {
            tracing::debug!(%key, "{}", diff);
        }

        let span = field.visible_span(io);
        writeln!(
            out,
            "{:>8}  {:<28} [{}] {}  cursor {} x {}",
            key.to_string(),
            format!("{:?}", outcome),
            String::from_utf8_lossy(&field.text()[span]),
            field.indicator() as char,
            field.cursor(),
            field.cursor_x(io)
        )?;

        if outcome == KeyOutcome::Committed {
            break;
        }
    }

    writeln!(out, "{}", field.buffer().to_string_lossy())?;
    Ok(())
}
