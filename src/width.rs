//! Glyph width providers
//!
//! Every measurement in the crate goes through a [`WidthProvider`]. The
//! application picks a backend once (OS console, proportional font, raw
//! graphics font, or any function) and installs it in a [`TextIo`] binding,
//! which is then passed by reference to the wrap and input engines.
//!
//! Tabs are not resolved here. Tab width depends on the output format, not the
//! font, so [`crate::wrap::char_width`] handles it.

use fontdue::{Font, FontSettings};

/// Binding revision understood by this build.
pub const LIBRARY_VERSION: u8 = 1;

/// Default glyph width of the graphics library's built-in font
pub const DEFAULT_BITMAP_GLYPH_WIDTH: u8 = 8;

/// Per-character pixel width of the active rendering backend.
pub trait WidthProvider {
    /// Width of `ch` in pixels (or cells for the OS console)
    fn glyph_width(&self, ch: u8) -> u32;
}

impl<W: WidthProvider + ?Sized> WidthProvider for &W {
    fn glyph_width(&self, ch: u8) -> u32 {
        (**self).glyph_width(ch)
    }
}

impl<W: WidthProvider + ?Sized> WidthProvider for Box<W> {
    fn glyph_width(&self, ch: u8) -> u32 {
        (**self).glyph_width(ch)
    }
}

// =============================================================================
// Standard bindings
// =============================================================================

/// OS home screen: fixed character cells, every glyph is one cell wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleWidth;

impl WidthProvider for ConsoleWidth {
    #[inline]
    fn glyph_width(&self, _ch: u8) -> u32 {
        1
    }
}

/// Proportional font backed by fontdue.
///
/// Advance widths are rounded to whole pixels and cached for all 256 codes when
/// the font is loaded, so lookups never touch the rasterizer.
#[derive(Clone)]
pub struct FontWidth {
    widths: [u32; 256],
    px: f32,
}

impl FontWidth {
    /// Measure every byte code of `font` at `px` pixels
    pub fn new(font: &Font, px: f32) -> Self {
        let mut widths = [0u32; 256];
        for (code, slot) in widths.iter_mut().enumerate() {
            let metrics = font.metrics(code as u8 as char, px);
            *slot = metrics.advance_width.round().max(0.0) as u32;
        }
        Self { widths, px }
    }

    /// Load a TTF/OTF font from memory and measure it at `px` pixels
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self, RoutinesError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| RoutinesError::FontLoad(e.to_string()))?;
        Ok(Self::new(&font, px))
    }

    /// Pixel size the widths were measured at
    pub fn px(&self) -> f32 {
        self.px
    }
}

impl std::fmt::Debug for FontWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontWidth").field("px", &self.px).finish()
    }
}

impl WidthProvider for FontWidth {
    #[inline]
    fn glyph_width(&self, ch: u8) -> u32 {
        self.widths[ch as usize]
    }
}

/// Raw graphics font: a 256-entry width table with per-character overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapFontWidth {
    widths: [u8; 256],
}

impl BitmapFontWidth {
    /// Every glyph `width` pixels wide
    pub fn monospace(width: u8) -> Self {
        Self {
            widths: [width; 256],
        }
    }

    /// Use a complete width table
    pub fn from_table(widths: [u8; 256]) -> Self {
        Self { widths }
    }

    /// Override the width of a single character
    pub fn set_char_width(&mut self, ch: u8, width: u8) {
        self.widths[ch as usize] = width;
    }

    pub fn with_char_width(mut self, ch: u8, width: u8) -> Self {
        self.set_char_width(ch, width);
        self
    }
}

impl Default for BitmapFontWidth {
    fn default() -> Self {
        Self::monospace(DEFAULT_BITMAP_GLYPH_WIDTH)
    }
}

impl WidthProvider for BitmapFontWidth {
    #[inline]
    fn glyph_width(&self, ch: u8) -> u32 {
        self.widths[ch as usize] as u32
    }
}

/// Any plain function that measures a character.
#[derive(Debug, Clone, Copy)]
pub struct FnWidth(pub fn(u8) -> u32);

impl WidthProvider for FnWidth {
    #[inline]
    fn glyph_width(&self, ch: u8) -> u32 {
        (self.0)(ch)
    }
}

// =============================================================================
// Binding
// =============================================================================

/// Errors raised while installing a width binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutinesError {
    /// Binding was built for a newer revision than this build understands
    IncompatibleVersion { provided: u8, supported: u8 },
    /// Version tag 0 never names a real revision
    Unversioned,
    /// Font data could not be parsed
    FontLoad(String),
}

impl std::fmt::Display for RoutinesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompatibleVersion {
                provided,
                supported,
            } => write!(
                f,
                "width routines version {} is newer than supported version {}",
                provided, supported
            ),
            Self::Unversioned => write!(f, "width routines carry no version tag"),
            Self::FontLoad(msg) => write!(f, "failed to load font: {}", msg),
        }
    }
}

impl std::error::Error for RoutinesError {}

/// A width backend tagged with the binding revision it was written against.
pub struct LibraryRoutines {
    pub library_version: u8,
    provider: Box<dyn WidthProvider>,
}

impl LibraryRoutines {
    /// Bind an arbitrary provider under an explicit version tag
    pub fn custom(library_version: u8, provider: impl WidthProvider + 'static) -> Self {
        Self {
            library_version,
            provider: Box::new(provider),
        }
    }

    /// OS home screen routines
    pub fn console() -> Self {
        Self::custom(LIBRARY_VERSION, ConsoleWidth)
    }

    /// Proportional font routines
    pub fn font(font: FontWidth) -> Self {
        Self::custom(LIBRARY_VERSION, font)
    }

    /// Graphics library routines
    pub fn bitmap(font: BitmapFontWidth) -> Self {
        Self::custom(LIBRARY_VERSION, font)
    }

    /// Bind a plain function
    pub fn function(f: fn(u8) -> u32) -> Self {
        Self::custom(LIBRARY_VERSION, FnWidth(f))
    }

    fn check_version(&self) -> Result<(), RoutinesError> {
        match self.library_version {
            0 => Err(RoutinesError::Unversioned),
            v if v > LIBRARY_VERSION => Err(RoutinesError::IncompatibleVersion {
                provided: v,
                supported: LIBRARY_VERSION,
            }),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Debug for LibraryRoutines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryRoutines")
            .field("library_version", &self.library_version)
            .finish_non_exhaustive()
    }
}

/// The installed width binding.
///
/// Created from a validated [`LibraryRoutines`]; engines take it (or any other
/// [`WidthProvider`]) by reference on every call.
#[derive(Debug)]
pub struct TextIo {
    routines: LibraryRoutines,
}

impl TextIo {
    /// Validate and install `routines`
    pub fn new(routines: LibraryRoutines) -> Result<Self, RoutinesError> {
        routines.check_version().inspect_err(|e| {
            tracing::warn!("Refusing width routines: {}", e);
        })?;
        tracing::debug!(
            version = routines.library_version,
            "Installed width routines"
        );
        Ok(Self { routines })
    }

    /// Replace the installed binding.
    ///
    /// On error the previous binding stays in place.
    pub fn set_routines(&mut self, routines: LibraryRoutines) -> Result<(), RoutinesError> {
        if let Err(e) = routines.check_version() {
            tracing::warn!("Refusing width routines: {}", e);
            return Err(e);
        }
        tracing::debug!(
            old = self.routines.library_version,
            new = routines.library_version,
            "Replaced width routines"
        );
        self.routines = routines;
        Ok(())
    }

    /// Version tag of the installed binding
    pub fn library_version(&self) -> u8 {
        self.routines.library_version
    }

    /// Width of `ch` under the installed binding
    #[inline]
    pub fn get_char_width(&self, ch: u8) -> u32 {
        self.routines.provider.glyph_width(ch)
    }
}

impl WidthProvider for TextIo {
    #[inline]
    fn glyph_width(&self, ch: u8) -> u32 {
        self.get_char_width(ch)
    }
}
