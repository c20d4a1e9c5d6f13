//! Command-line argument parsing for the textio tool
//!
//! Supports:
//! - Wrapping text files (or stdin) to a line width
//! - Measuring wrapped lines
//! - Replaying key sequences into an input field
//!
//! Backend flags override whatever the config file selects.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{Backend, TextIoConfig};
use crate::keypad::ScanCode;
use crate::wrap::PrintFormat;

/// Text layout and input for small fixed-font displays
#[derive(Parser, Debug)]
#[command(
    name = "textio",
    version,
    about = "Text layout and input for small fixed-font displays"
)]
pub struct CliArgs {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Measure with a TTF/OTF font
    #[arg(long, global = true, value_name = "PATH", conflicts_with_all = ["glyph_width", "console"])]
    pub font: Option<PathBuf>,

    /// Font size in pixels (used with --font)
    #[arg(long, global = true, value_name = "PX")]
    pub px: Option<f32>,

    /// Measure with a monospace bitmap font of this glyph width
    #[arg(long, global = true, value_name = "N", conflicts_with = "console")]
    pub glyph_width: Option<u8>,

    /// Measure in console cells
    #[arg(long, global = true)]
    pub console: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wrap and align text to the configured line width
    Wrap(LayoutArgs),
    /// Print each wrapped line's range, width and x position
    Measure(LayoutArgs),
    /// Replay key presses into an input field
    Input(InputArgs),
}

/// Options shared by the layout commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// File to read (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Maximum line width
    #[arg(short, long, value_name = "N")]
    pub width: Option<u32>,

    /// Horizontal alignment
    #[arg(short, long, value_enum)]
    pub align: Option<Align>,

    /// Width of a tab character
    #[arg(long, value_name = "N")]
    pub tab_width: Option<u32>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Comma-separated key names or hex codes, e.g. `math,apps,alpha,0x21,enter`
    #[arg(short, long, value_delimiter = ',', value_name = "KEYS")]
    pub keys: Vec<ScanCode>,

    /// Maximum characters
    #[arg(long, value_name = "N")]
    pub capacity: Option<usize>,

    /// Width of the scroll window
    #[arg(short, long, value_name = "N")]
    pub width: Option<u32>,

    /// Use program name entry (8 characters, no leading digit)
    #[arg(long)]
    pub program_name: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl From<Align> for PrintFormat {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => PrintFormat::LeftMarginFlush,
            Align::Center => PrintFormat::Centered,
            Align::Right => PrintFormat::RightMarginFlush,
        }
    }
}

impl CliArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut TextIoConfig) -> Result<(), String> {
        if let Some(path) = &self.font {
            let px = self
                .px
                .ok_or_else(|| "--font requires --px".to_string())?;
            if px <= 0.0 {
                return Err(format!("Font size must be positive, got {}", px));
            }
            config.backend = Backend::Font {
                path: path.clone(),
                px,
            };
        } else if let Some(glyph_width) = self.glyph_width {
            config.backend = Backend::Bitmap { glyph_width };
        } else if self.console {
            config.backend = Backend::Console;
        } else if self.px.is_some() {
            return Err("--px requires --font".to_string());
        }

        match &self.command {
            Command::Wrap(layout) | Command::Measure(layout) => {
                if let Some(width) = layout.width {
                    config.output.max_line_width = width;
                }
                if let Some(align) = layout.align {
                    config.output.print_format = align.into();
                }
                if let Some(tab_width) = layout.tab_width {
                    config.output.tab_width = tab_width;
                }
            }
            Command::Input(input) => {
                if let Some(capacity) = input.capacity {
                    if capacity == 0 {
                        return Err("Capacity must be at least 1".to_string());
                    }
                    config.input.capacity = capacity;
                }
                if let Some(width) = input.width {
                    config.input.visible_width = width;
                }
            }
        }

        Ok(())
    }
}
