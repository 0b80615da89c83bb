//! Text payloads for the two banner lines

/// Characters written per display line
pub const LINE_WIDTH: usize = 20;

/// Banner shown on the first line unless the board overrides it
pub const DEFAULT_BANNER: Banner = Banner(*b"ZYYX klipper startup");

/// First-line text: always exactly one full line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Banner([u8; LINE_WIDTH]);

impl Banner {
    /// Create a banner from a full line of character codes
    pub const fn new(text: [u8; LINE_WIDTH]) -> Self {
        Self(text)
    }

    /// Create a banner from ASCII text of exactly [`LINE_WIDTH`] characters
    pub fn from_ascii(text: &str) -> Option<Self> {
        if !text.is_ascii() {
            return None;
        }
        let bytes: [u8; LINE_WIDTH] = text.as_bytes().try_into().ok()?;
        Some(Self(bytes))
    }

    /// Character codes in display order
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for Banner {
    fn default() -> Self {
        DEFAULT_BANNER
    }
}

/// Second-line text: the firmware version
///
/// Bounded to one line and cut at the first NUL. Shorter versions are not
/// padded; the cells after them are simply not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VersionText<'a>(&'a [u8]);

impl<'a> VersionText<'a> {
    /// Take the version from a NUL-terminated buffer
    ///
    /// Stops at the terminator or after [`LINE_WIDTH`] characters, whichever
    /// comes first. A buffer without a terminator is bounded by its length.
    pub fn from_nul_terminated(bytes: &'a [u8]) -> Self {
        let end = bytes
            .iter()
            .take(LINE_WIDTH)
            .position(|&b| b == 0)
            .unwrap_or(bytes.len().min(LINE_WIDTH));
        Self(&bytes[..end])
    }

    /// Take the version from a string, same bounds as a raw buffer
    pub fn from_text(text: &'a str) -> Self {
        Self::from_nul_terminated(text.as_bytes())
    }

    /// Character codes that will be written
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Number of characters that will be written
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing follows the second-line cursor command
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
